//! Текстовый протокол команд и их исполнение поверх каталога.
//!
//! Одна команда на соединение; состояния между запросами нет.
//! Грамматика (токены разделяются пробелами/табами, имена команд
//! чувствительны к регистру):
//!
//! ```text
//! quit
//! List
//! Prices <SYMBOL> <DATE>
//! MaxProfit <SYMBOL> <START> <END>
//! ```
//!
//! Все ошибки уровня пользователя уходят обычным текстом ответа
//! (`Unknown`, `Invalid syntax`), отдельного канала ошибок на проводе
//! нет. Клиент делает те же проверки формы и дат до отправки, но
//! сервер всегда перепроверяет сам и клиенту не доверяет.

use crate::calendar;
use crate::catalog::{StockCatalog, covers_bounds};
use crate::error::ProtocolError;
use crate::profit::max_profit;

/// Ответ на запрос про неизвестный тикер/дату.
pub const UNKNOWN: &str = "Unknown";

/// Ответ на нераспознанную команду.
pub const INVALID_SYNTAX: &str = "Invalid syntax";

/// Ответ на повреждённый (обрезанный) запрос.
pub const CORRUPTED_REQUEST: &str = "Corrupted request";

/// Диагностика для запроса/ответа, не влезающего во фрейм.
pub const TOO_LARGE: &str = "message too large";

/// Прощальный ответ на `quit`.
pub const GOODBYE: &str = "Bye";

/// Разобранная команда протокола.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Остановить сервер (клиент выходит сразу после отправки).
    Quit,
    /// Перечислить загруженные тикеры.
    List,
    /// Цена закрытия тикера на дату.
    Prices {
        /// тикер
        symbol: String,
        /// дата `ГГГГ-М-Д`
        date: String,
    },
    /// Максимальная прибыль одной сделки в диапазоне дат.
    MaxProfit {
        /// тикер
        symbol: String,
        /// начало диапазона
        start: String,
        /// конец диапазона
        end: String,
    },
}

/// Результат исполнения: текст ответа и, для `quit`, просьба
/// остановить процесс после записи ответа.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Обычный ответ.
    Reply(String),
    /// Ответить и завершить сервер со статусом 0.
    Shutdown(String),
}

impl Outcome {
    /// Текст ответа, который уходит на провод.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Reply(s) | Outcome::Shutdown(s) => s,
        }
    }

    /// Просил ли запрос остановить сервер.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, Outcome::Shutdown(_))
    }
}

/// Разбирает строку запроса в команду.
///
/// Лишние токены в хвосте игнорируются: проверяется только наличие
/// обязательных аргументов.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    let mut parts = line.split([' ', '\t']).filter(|t| !t.is_empty());

    let head = parts.next().ok_or(ProtocolError::EmptyCommand)?;

    match head {
        "quit" => Ok(Command::Quit),
        "List" => Ok(Command::List),
        "Prices" => {
            let symbol = parts.next().ok_or(ProtocolError::MissingSymbol)?.to_string();
            let date = parts.next().ok_or(ProtocolError::MissingDate)?.to_string();
            Ok(Command::Prices { symbol, date })
        }
        "MaxProfit" => {
            let symbol = parts.next().ok_or(ProtocolError::MissingSymbol)?.to_string();
            let start = parts.next().ok_or(ProtocolError::MissingDate)?.to_string();
            let end = parts.next().ok_or(ProtocolError::MissingDate)?.to_string();
            Ok(Command::MaxProfit { symbol, start, end })
        }
        other => Err(ProtocolError::UnknownCommand(other.to_string())),
    }
}

/// Проверка дат команды без каталога.
///
/// Это клиентская половина защиты: синтаксис дат и порядок границ
/// можно отвергнуть до похода на сервер. Сервер делает те же проверки
/// ещё раз внутри [`execute`].
pub fn dates_look_valid(cmd: &Command) -> bool {
    match cmd {
        Command::Quit | Command::List => true,
        Command::Prices { date, .. } => calendar::is_valid_date(date),
        Command::MaxProfit { start, end, .. } => {
            calendar::is_valid_date(start)
                && calendar::is_valid_date(end)
                && calendar::before_or_on(start, end)
        }
    }
}

/// Исполняет команду против каталога и формирует текст ответа.
pub fn execute(cmd: &Command, catalog: &StockCatalog) -> Outcome {
    match cmd {
        Command::Quit => Outcome::Shutdown(GOODBYE.to_string()),
        Command::List => Outcome::Reply(catalog.symbols().join(" | ")),
        Command::Prices { symbol, date } => Outcome::Reply(price_reply(catalog, symbol, date)),
        Command::MaxProfit { symbol, start, end } => {
            Outcome::Reply(max_profit_reply(catalog, symbol, start, end))
        }
    }
}

/// Полный серверный путь: разбор строки запроса и исполнение.
///
/// Нераспознанная команда — ответ [`INVALID_SYNTAX`]; остальное
/// уходит в [`execute`].
pub fn respond(line: &str, catalog: &StockCatalog) -> Outcome {
    match parse_command(line) {
        Ok(cmd) => execute(&cmd, catalog),
        Err(_) => Outcome::Reply(INVALID_SYNTAX.to_string()),
    }
}

fn price_reply(catalog: &StockCatalog, symbol: &str, date: &str) -> String {
    if !calendar::is_valid_date(date) {
        return UNKNOWN.to_string();
    }

    let Some(series) = catalog.find(symbol) else {
        return UNKNOWN.to_string();
    };

    match series.price_on(date) {
        Some(price) => format!("{price:.2}"),
        None => UNKNOWN.to_string(),
    }
}

fn max_profit_reply(catalog: &StockCatalog, symbol: &str, start: &str, end: &str) -> String {
    if !calendar::is_valid_date(start) || !calendar::is_valid_date(end) {
        return UNKNOWN.to_string();
    }
    if !calendar::before_or_on(start, end) {
        return UNKNOWN.to_string();
    }

    let Some(series) = catalog.find(symbol) else {
        return UNKNOWN.to_string();
    };

    // обе границы обязаны существовать как строки файла
    let dates = series.dates_in_range(start, end);
    if !covers_bounds(&dates, start, end) {
        return UNKNOWN.to_string();
    }

    let prices = series.prices_in_range(start, end);
    format!("{:.2}", max_profit(&prices))
}
