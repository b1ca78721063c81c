use std::time::Duration;

pub(crate) const TCP_READ_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const TCP_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Пауза между опросами неблокирующего accept
pub(crate) const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// Буфер одного read: байт длины + payload до 254 байт
pub(crate) const READ_BUF_LEN: usize = 256;

pub(crate) const BIND_IP: [u8; 4] = [0, 0, 0, 0];
