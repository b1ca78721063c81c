//! Точка входа `stock-client`.
//!
//! Жизненный цикл:
//! - парсинг CLI: хост и порт сервера
//! - цикл чтения команд со stdin с промптом `> `
//! - локальная проверка формы команды и дат до похода на сервер
//!   (сервер всё равно перепроверяет сам)
//! - одноразовый TCP-обмен на каждую команду, ответ печатается как есть
//! - `quit` уходит серверу, после отправки клиент выходит со статусом 0

mod cli;
mod tcp;

use std::io::{self, BufRead, Write};

use clap::Parser;
use log::{info, warn};
use stock_core::frame::MAX_PAYLOAD;
use stock_core::protocol::{self, Command};

/// Решение по введённой строке до похода в сеть.
#[derive(Debug, PartialEq, Eq)]
enum Precheck {
    /// пустой ввод — просто следующий промпт
    Skip,
    /// локальный ответ, на сервер не ходим
    Local(&'static str),
    /// команда уходит на сервер
    Send {
        /// это `quit` — после отправки выходим
        quit: bool,
    },
}

/// Зеркало серверных проверок формы и дат: то, что сервер точно
/// отклонит, отклоняется до round-trip.
fn precheck(line: &str) -> Precheck {
    if line.trim().is_empty() {
        return Precheck::Skip;
    }

    if line.len() > MAX_PAYLOAD {
        return Precheck::Local(protocol::TOO_LARGE);
    }

    match protocol::parse_command(line) {
        Err(_) => Precheck::Local(protocol::INVALID_SYNTAX),
        Ok(Command::Quit) => Precheck::Send { quit: true },
        Ok(cmd) => {
            if protocol::dates_look_valid(&cmd) {
                Precheck::Send { quit: false }
            } else {
                Precheck::Local(protocol::UNKNOWN)
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/trace
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;
    let server_addr = args.server_socket_addr()?;

    info!("stock-client: server={server_addr}");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF на stdin
        };
        let line = line?;

        match precheck(&line) {
            Precheck::Skip => {}
            Precheck::Local(reply) => println!("{reply}"),
            Precheck::Send { quit: true } => {
                // ответ сервера уже не важен
                let _ = tcp::exchange(server_addr, &line);
                break;
            }
            Precheck::Send { quit: false } => match tcp::exchange(server_addr, &line) {
                Ok(reply) => println!("{reply}"),
                Err(e) => {
                    warn!("exchange failed: {e:#}");
                    eprintln!("Error: {e}");
                }
            },
        }
    }

    Ok(())
}
