//! Фатальные условия старта клиента: оба аргумента обязательны.

use assert_cmd::Command;
use predicates::prelude::*;

fn bin() -> Command {
    Command::cargo_bin("stock-client").unwrap()
}

#[test]
fn no_arguments_is_fatal() {
    bin().assert().failure();
}

#[test]
fn host_without_port_is_fatal() {
    bin().arg("localhost").assert().failure();
}

#[test]
fn non_numeric_port_is_fatal() {
    bin()
        .args(["localhost", "notaport"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}
