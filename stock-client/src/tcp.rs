use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use anyhow::Context;
use log::warn;
use stock_core::frame;

const TCP_READ_TIMEOUT_S: u64 = 5;
const TCP_WRITE_TIMEOUT_S: u64 = 5;

/// Буфер одного read: байт длины + payload до 254 байт
const READ_BUF_LEN: usize = 256;

/// Одноразовый обмен: отправляет команду и возвращает текст ответа.
pub(crate) fn exchange(server_addr: SocketAddr, line: &str) -> anyhow::Result<String> {
    // кодируем до connect
    let request = frame::encode(line.as_bytes())?;

    let mut stream =
        TcpStream::connect(server_addr).with_context(|| format!("connect to {server_addr}"))?;

    stream.set_nodelay(true).ok();
    stream
        .set_read_timeout(Some(Duration::from_secs(TCP_READ_TIMEOUT_S)))
        .ok();
    stream
        .set_write_timeout(Some(Duration::from_secs(TCP_WRITE_TIMEOUT_S)))
        .ok();

    stream.write_all(&request)?;
    stream.flush()?;

    // читаем ответ одним фреймом
    let mut buf = [0u8; READ_BUF_LEN];
    let n = stream.read(&mut buf)?;
    if n == 0 {
        anyhow::bail!("server closed connection without response");
    }

    let payload = frame::decode(&buf[..n]).map_err(|e| {
        warn!("reply frame does not decode: {e}");
        anyhow::anyhow!("Corrupted response")
    })?;

    Ok(String::from_utf8_lossy(payload).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    // поднимает одноразовый сервер, который шлёт в ответ `reply_frame` как есть
    fn one_shot_server(reply_frame: Vec<u8>) -> (SocketAddr, thread::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let h = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            let mut buf = [0u8; READ_BUF_LEN];
            let n = stream.read(&mut buf).unwrap();

            stream.write_all(&reply_frame).unwrap();
            buf[..n].to_vec()
        });

        (addr, h)
    }

    #[test]
    fn exchange_frames_request_and_unframes_reply() {
        let reply = frame::encode(b"100.00").unwrap();
        let (addr, server) = one_shot_server(reply);

        let got = exchange(addr, "Prices SYM 2020-01-01").unwrap();
        assert_eq!(got, "100.00");

        // запрос ушёл с корректным префиксом длины
        let raw_request = server.join().unwrap();
        assert_eq!(
            frame::decode(&raw_request).unwrap(),
            b"Prices SYM 2020-01-01"
        );
    }

    #[test]
    fn exchange_reports_corrupted_response() {
        // заявлено 200 байт, отправлен один
        let (addr, _server) = one_shot_server(vec![200u8, b'x']);

        let err = exchange(addr, "List").unwrap_err();
        assert_eq!(err.to_string(), "Corrupted response");
    }

    #[test]
    fn exchange_refuses_oversized_command_before_connecting() {
        // адрес заведомо мёртвый: до connect дело дойти не должно
        let addr: SocketAddr = "127.0.0.1:1".parse().unwrap();
        let long_line = "x".repeat(300);

        let err = exchange(addr, &long_line).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
