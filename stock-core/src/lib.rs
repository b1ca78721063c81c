//! # stock-core
//!
//! Базовые типы и протокол для Stock Server / Stock Client.
//!
//! Этот крейт содержит:
//!
//! - [`protocol`] — парсинг и исполнение текстовых команд
//! - [`catalog`] — каталог котировок, загруженный из CSV
//! - [`calendar`] — разбор и сравнение дат `ГГГГ-М-Д`
//! - [`profit`] — максимальная прибыль одной сделки
//! - [`frame`] — однобайтовый префикс длины на проводе
//! - [`error`] — типы ошибок, которые возвращают компоненты `stock-core`
//!
//! ## Быстрый пример: разбор команды
//!
//! ```rust
//! use stock_core::protocol::{parse_command, Command};
//!
//! let cmd = parse_command("Prices MSFT 2020-1-2").unwrap();
//! assert_eq!(
//!     cmd,
//!     Command::Prices {
//!         symbol: "MSFT".to_string(),
//!         date: "2020-1-2".to_string(),
//!     }
//! );
//! ```
//!
//! ## Пример: фрейминг
//!
//! ```rust
//! use stock_core::frame::{decode, encode};
//!
//! let frame = encode(b"List").unwrap();
//! assert_eq!(frame, vec![4, b'L', b'i', b's', b't']);
//! assert_eq!(decode(&frame).unwrap(), b"List");
//!
//! // заявленная длина не сошлась с фактом => повреждение, не паника
//! assert!(decode(&[9, b'L', b'i', b's', b't']).is_err());
//! ```
//!
//! ## Пример: максимальная прибыль
//!
//! ```rust
//! use stock_core::profit::max_profit;
//!
//! assert_eq!(max_profit(&[1.0, 2.0, 3.0]), 2.0);
//! // на падающем ряду результат отрицательный, к нулю не прижимается
//! assert_eq!(max_profit(&[3.0, 2.0, 1.0]), -1.0);
//! ```
//!
//! ## Дизайн
//!
//! `stock-core` задуман как "нулевая" зависимость для всех частей
//! системы: сервер, клиент, тесты. Поэтому здесь держим только чистые
//! типы, парсинг и доменную логику, без сокетов и без runtime.
//! Каталог загружается один раз на старте сервера и дальше только
//! читается.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Текстовый протокол команд (`List`, `Prices`, `MaxProfit`, `quit`).
pub mod protocol;

/// Каталог котировок: загрузка CSV и поиск по тикеру/датам.
pub mod catalog;

/// Разбор и сравнение календарных дат.
pub mod calendar;

/// Максимальная прибыль одной пары покупка/продажа.
pub mod profit;

/// Wire-уровень: однобайтовый префикс длины.
pub mod frame;

/// Ошибки `stock-core`.
pub mod error;

// --- Re-exports (публичный фасад API) ---

pub use crate::calendar::CalendarDate;
pub use crate::catalog::{PriceRow, StockCatalog, StockSeries};
pub use crate::error::{CatalogError, FrameError, ProtocolError, StockCoreError};
pub use crate::protocol::{Command, Outcome};
