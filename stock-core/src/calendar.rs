//! Разбор и сравнение календарных дат вида `ГГГГ-М-Д`.
//!
//! Даты в CSV не обязаны иметь ведущие нули (`2020-1-5`), поэтому
//! разбор идёт по трём целым числам, а не по фиксированной ширине.

/// Календарная дата (год, месяц, день).
///
/// `Ord` выводится по полям, порядок объявления даёт
/// лексикографическое сравнение (год, месяц, день).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// Разбирает строку `ГГГГ-М-Д`: ровно три числа через `-`.
    ///
    /// `None` для любой другой формы и для дат вне допустимых
    /// диапазонов (год 1800..=9999, месяц 1..=12, день по месяцу
    /// с учётом високосных лет).
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('-');
        let year: i32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        let date = Self { year, month, day };
        date.in_bounds().then_some(date)
    }

    /// Год (1800..=9999).
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Месяц (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// День месяца.
    pub fn day(&self) -> u32 {
        self.day
    }

    fn in_bounds(&self) -> bool {
        (1800..=9999).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Валидна ли строка как дата.
pub fn is_valid_date(s: &str) -> bool {
    CalendarDate::parse(s).is_some()
}

/// `a <= b` в календарном порядке.
///
/// Любая некорректная сторона даёт `false`: компаратор никогда не
/// ошибается наружу, валидность проверяет вызывающий.
pub fn before_or_on(a: &str, b: &str) -> bool {
    match (CalendarDate::parse(a), CalendarDate::parse(b)) {
        (Some(a), Some(b)) => a <= b,
        _ => false,
    }
}

/// `a < b` в календарном порядке; на некорректный вход — `false`.
pub fn strictly_before(a: &str, b: &str) -> bool {
    match (CalendarDate::parse(a), CalendarDate::parse(b)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    }
}
