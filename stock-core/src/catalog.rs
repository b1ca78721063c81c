//! Каталог котировок, загруженный из CSV файлов.
//!
//! Формат файла — минимум 5 колонок (OHLC + Volume): колонка 0 — дата,
//! колонка 4 — цена закрытия. Обе хранятся как есть, без нормализации.
//! Строка заголовка не вырезается: дата вида `"Date"` не разбирается
//! как календарная и не совпадает ни с одним запросом, то есть
//! инертна на всех путях поиска.
//!
//! Каталог строится один раз на старте и дальше только читается;
//! каждый запрос обслуживается из памяти.

use std::path::{Path, PathBuf};

use crate::calendar;
use crate::error::CatalogError;

/// Одна строка CSV: дата и цена закрытия, обе дословно из файла.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    /// колонка 0
    pub date: String,
    /// колонка 4
    pub close: String,
}

/// Именованный ряд котировок в порядке строк файла.
///
/// Порядок считается хронологическим и не пересортировывается;
/// дубликаты дат допустимы, побеждает первое совпадение.
#[derive(Debug, Clone)]
pub struct StockSeries {
    symbol: String,
    rows: Vec<PriceRow>,
}

impl StockSeries {
    /// Собирает ряд из готовых строк (в тестах и у загрузчика).
    pub fn new(symbol: impl Into<String>, rows: Vec<PriceRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    /// Имя тикера.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Строки ряда в порядке файла.
    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Цена закрытия на дату.
    ///
    /// Дата сравнивается как строка, дословно: `2020-1-5` и
    /// `2020-01-05` — разные ключи. Если цена в совпавшей строке не
    /// разбирается как число, считается что котировки нет.
    pub fn price_on(&self, date: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.date == date)
            .and_then(|row| row.close.parse().ok())
    }

    /// Даты строк, попавших в диапазон `[start, end]`.
    ///
    /// Строки с нечитаемой датой молча пропускаются; порядок файла
    /// сохраняется.
    pub fn dates_in_range(&self, start: &str, end: &str) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| in_range(&row.date, start, end))
            .map(|row| row.date.as_str())
            .collect()
    }

    /// Цены закрытия строк, попавших в диапазон `[start, end]`.
    pub fn prices_in_range(&self, start: &str, end: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|row| in_range(&row.date, start, end))
            .filter_map(|row| row.close.parse().ok())
            .collect()
    }
}

fn in_range(date: &str, start: &str, end: &str) -> bool {
    calendar::is_valid_date(date)
        && calendar::before_or_on(start, date)
        && calendar::before_or_on(date, end)
}

/// Покрывает ли найденный диапазон обе запрошенные границы.
///
/// Требование строгое: минимум две даты, первая дословно равна
/// `start`, последняя дословно равна `end`. Запрос, чья граница не
/// существует как строка файла, отклоняется, даже если между
/// границами данные есть.
pub fn covers_bounds(dates: &[&str], start: &str, end: &str) -> bool {
    dates.len() >= 2 && dates.first() == Some(&start) && dates.last() == Some(&end)
}

/// Каталог: тикер -> ряд котировок, в порядке загрузки.
#[derive(Debug, Clone)]
pub struct StockCatalog {
    series: Vec<StockSeries>,
}

impl StockCatalog {
    /// Загружает все файлы; порядок аргументов задаёт порядок `List`.
    ///
    /// Нечитаемый файл — ошибка целиком: каталог либо загружен весь,
    /// либо сервер не стартует.
    pub fn load(paths: &[PathBuf]) -> Result<Self, CatalogError> {
        if paths.is_empty() {
            return Err(CatalogError::NoFiles);
        }

        let mut series = Vec::with_capacity(paths.len());
        for path in paths {
            series.push(load_series(path)?);
        }

        Ok(Self { series })
    }

    /// Собирает каталог из готовых рядов (в тестах).
    pub fn from_series(series: Vec<StockSeries>) -> Self {
        Self { series }
    }

    /// Тикеры в порядке загрузки.
    pub fn symbols(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.symbol()).collect()
    }

    /// Ряд по тикеру, с учётом регистра.
    pub fn find(&self, symbol: &str) -> Option<&StockSeries> {
        self.series.iter().find(|s| s.symbol() == symbol)
    }
}

/// Читает один CSV файл в ряд котировок.
///
/// Имя тикера — имя файла без расширения. Записи короче 5 полей
/// пропускаются.
pub fn load_series(path: impl AsRef<Path>) -> Result<StockSeries, CatalogError> {
    let path = path.as_ref();

    let symbol = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CatalogError::BadFileName {
            path: path.to_path_buf(),
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        if record.len() < 5 {
            continue;
        }

        rows.push(PriceRow {
            date: record[0].to_string(),
            close: record[4].to_string(),
        });
    }

    Ok(StockSeries::new(symbol, rows))
}
