use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::Context;
use log::{info, warn};
use stock_core::StockCatalog;
use stock_core::frame;
use stock_core::protocol::{self, Outcome};

use crate::config::{ACCEPT_POLL, READ_BUF_LEN, TCP_READ_TIMEOUT, TCP_WRITE_TIMEOUT};

// accept loop: строго одно соединение за раз, один запрос на соединение
pub(crate) fn run_tcp_listener(
    addr: SocketAddr,
    catalog: &StockCatalog,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let listener =
        TcpListener::bind(addr).with_context(|| format!("bind TCP listener {}", addr))?;
    listener
        .set_nonblocking(true)
        .context("listener.set_nonblocking(true)")?;

    info!(
        "listening on {addr}, serving: {}",
        catalog.symbols().join(", ")
    );

    loop {
        if shutdown.load(Ordering::Relaxed) {
            info!("shutting down tcp listener");
            break;
        }

        match listener.accept() {
            Ok((stream, peer)) => {
                stream
                    .set_nonblocking(false)
                    .context("stream.set_nonblocking(false)")?;

                stream.set_nodelay(true).ok();
                stream.set_read_timeout(Some(TCP_READ_TIMEOUT)).ok();
                stream.set_write_timeout(Some(TCP_WRITE_TIMEOUT)).ok();

                // ошибка одного соединения не валит сервер: лог и следующий accept
                match handle_conn(stream, catalog) {
                    Ok(true) => {
                        info!("quit requested by {peer}; stopping");
                        break;
                    }
                    Ok(false) => {}
                    Err(e) => warn!("connection {peer}: {e:#}"),
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // нет новых соединений прямо сейчас
                thread::sleep(ACCEPT_POLL);
            }
            Err(e) => {
                warn!("accept error: {e}");
                thread::sleep(ACCEPT_POLL);
            }
        }
    }

    Ok(())
}

/// Обслуживает одно соединение: один read, одна команда, один write.
///
/// `Ok(true)` означает, что клиент прислал `quit` и серверу пора
/// останавливаться (после уже записанного ответа).
pub(crate) fn handle_conn(
    mut stream: TcpStream,
    catalog: &StockCatalog,
) -> anyhow::Result<bool> {
    let mut buf = [0u8; READ_BUF_LEN];

    let n = stream.read(&mut buf)?;
    if n == 0 {
        anyhow::bail!("client closed connection before sending a request");
    }

    let outcome = match frame::decode(&buf[..n]) {
        Ok(payload) => {
            let line = String::from_utf8_lossy(payload);
            info!("request: {line}");
            protocol::respond(&line, catalog)
        }
        Err(e) => {
            warn!("bad frame: {e}");
            Outcome::Reply(protocol::CORRUPTED_REQUEST.to_string())
        }
    };

    write_reply(&mut stream, outcome.text())?;

    Ok(outcome.is_shutdown())
}

fn write_reply(stream: &mut TcpStream, text: &str) -> anyhow::Result<()> {
    let reply = match frame::encode(text.as_bytes()) {
        Ok(f) => f,
        Err(e) => {
            // ответ не влез в однобайтовый префикс длины
            warn!("reply does not fit a frame: {e}");
            frame::encode(protocol::TOO_LARGE.as_bytes())?
        }
    };

    stream.write_all(&reply)?;
    stream.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::net::{TcpListener, TcpStream};
    use std::time::Duration;

    use stock_core::catalog::{PriceRow, StockSeries};

    fn connect_pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let client = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();

        (client, server)
    }

    fn read_reply(client: &mut TcpStream) -> String {
        client
            .set_read_timeout(Some(Duration::from_millis(300)))
            .unwrap();
        let mut buf = [0u8; READ_BUF_LEN];
        let n = client.read(&mut buf).unwrap_or(0);
        let payload = frame::decode(&buf[..n]).expect("reply frame must decode");
        String::from_utf8_lossy(payload).to_string()
    }

    fn row(date: &str, close: &str) -> PriceRow {
        PriceRow {
            date: date.to_string(),
            close: close.to_string(),
        }
    }

    fn test_catalog() -> StockCatalog {
        StockCatalog::from_series(vec![StockSeries::new(
            "SYM",
            vec![row("2020-01-01", "100.00"), row("2020-01-02", "105.00")],
        )])
    }

    // отправляет одну команду через handle_conn и возвращает (ответ, quit)
    fn roundtrip(catalog: &StockCatalog, line: &str) -> (String, bool) {
        let (mut client, server) = connect_pair();

        let request = frame::encode(line.as_bytes()).unwrap();
        client.write_all(&request).unwrap();

        let quit = handle_conn(server, catalog).unwrap();
        (read_reply(&mut client), quit)
    }

    #[test]
    fn serves_price_for_present_date() {
        let (reply, quit) = roundtrip(&test_catalog(), "Prices SYM 2020-01-01");
        assert_eq!(reply, "100.00");
        assert!(!quit);
    }

    #[test]
    fn serves_unknown_for_absent_date() {
        let (reply, _) = roundtrip(&test_catalog(), "Prices SYM 1999-01-01");
        assert_eq!(reply, "Unknown");
    }

    #[test]
    fn serves_max_profit_over_range() {
        let (reply, _) = roundtrip(&test_catalog(), "MaxProfit SYM 2020-01-01 2020-01-02");
        assert_eq!(reply, "5.00");
    }

    #[test]
    fn serves_unknown_for_reversed_range() {
        let (reply, _) = roundtrip(&test_catalog(), "MaxProfit SYM 2020-01-02 2020-01-01");
        assert_eq!(reply, "Unknown");
    }

    #[test]
    fn serves_unknown_for_unknown_symbol() {
        let (reply, _) = roundtrip(&test_catalog(), "Prices AAPL 2020-01-01");
        assert_eq!(reply, "Unknown");

        let (reply, _) = roundtrip(&test_catalog(), "MaxProfit AAPL 2020-01-01 2020-01-02");
        assert_eq!(reply, "Unknown");
    }

    #[test]
    fn serves_invalid_syntax_for_garbled_command() {
        let (reply, _) = roundtrip(&test_catalog(), "Foo bar");
        assert_eq!(reply, "Invalid syntax");
    }

    #[test]
    fn lists_symbols() {
        let (reply, _) = roundtrip(&test_catalog(), "List");
        assert_eq!(reply, "SYM");
    }

    #[test]
    fn quit_replies_and_requests_stop() {
        let (reply, quit) = roundtrip(&test_catalog(), "quit");
        assert_eq!(reply, "Bye");
        assert!(quit);
    }

    #[test]
    fn corrupted_frame_gets_fixed_diagnostic() {
        let (mut client, server) = connect_pair();

        // заявлено 40 байт, отправлено 4
        let mut bad = vec![40u8];
        bad.extend_from_slice(b"List");
        client.write_all(&bad).unwrap();

        let quit = handle_conn(server, &test_catalog()).unwrap();
        assert!(!quit);
        assert_eq!(read_reply(&mut client), "Corrupted request");
    }

    #[test]
    fn unframed_text_is_treated_as_corruption() {
        let (mut client, server) = connect_pair();

        // первый байт 'L' читается как длина 76 и не сходится
        client.write_all(b"List").unwrap();

        handle_conn(server, &test_catalog()).unwrap();
        assert_eq!(read_reply(&mut client), "Corrupted request");
    }

    #[test]
    fn eof_before_request_is_an_error_not_a_crash() {
        let (client, server) = connect_pair();
        drop(client); // клиент закрылся, не прислав запроса

        let err = handle_conn(server, &test_catalog()).unwrap_err();
        assert!(err.to_string().contains("closed connection"));
    }

    #[test]
    fn serves_catalog_loaded_from_csv_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SYM.csv");
        fs::write(
            &path,
            "2020-01-01,101.0,102.0,99.0,100.00,5000\n\
             2020-01-02,100.5,106.0,100.0,105.00,6000\n",
        )
        .unwrap();

        let catalog = StockCatalog::load(&[path]).unwrap();

        let (reply, _) = roundtrip(&catalog, "List");
        assert_eq!(reply, "SYM");

        let (reply, _) = roundtrip(&catalog, "Prices SYM 2020-01-01");
        assert_eq!(reply, "100.00");

        let (reply, _) = roundtrip(&catalog, "MaxProfit SYM 2020-01-01 2020-01-02");
        assert_eq!(reply, "5.00");
    }
}
