use std::path::PathBuf;
use thiserror::Error;

/// Верхнеуровневый тип ошибок крейта
#[derive(Debug, Error)]
pub enum StockCoreError {
    /// Ошибки протокола
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Ошибки фрейминга
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Ошибки загрузки каталога
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Ошибки разбора текстовой команды
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// пустая команда
    #[error("empty command")]
    EmptyCommand,

    /// Неизвестная команда
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Не передан тикер
    #[error("missing stock symbol")]
    MissingSymbol,

    /// Не передана дата (или одна из границ диапазона)
    #[error("missing date argument")]
    MissingDate,
}

/// Ошибки фрейминга (однобайтовый префикс длины)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Пустой буфер — нет даже байта длины
    #[error("empty frame")]
    Empty,

    /// Заявленная длина не совпадает с фактической, сообщение повреждено
    #[error("corrupted frame: declared {declared} bytes, got {actual}")]
    LengthMismatch {
        /// длина из префикса
        declared: u8,
        /// фактически прочитанные байты payload
        actual: usize,
    },

    /// Payload не влезает в однобайтовый префикс
    #[error("payload too large for one-byte length prefix: {0} bytes")]
    TooLarge(usize),
}

/// Ошибки загрузки CSV каталога (возможны только на старте сервера)
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Не передано ни одного файла с данными
    #[error("no data files given")]
    NoFiles,

    /// Из пути не извлекается имя тикера
    #[error("cannot derive a symbol name from path: {path:?}")]
    BadFileName {
        /// проблемный путь
        path: PathBuf,
    },

    /// Файл не читается или битый CSV
    #[error("failed to read data file {path:?}")]
    Read {
        /// проблемный путь
        path: PathBuf,
        /// исходная ошибка csv/io
        #[source]
        source: csv::Error,
    },
}
