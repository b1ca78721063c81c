//! Максимальная прибыль одной пары покупка/продажа.

/// Лучший результат одной покупки и одной продажи строго позже
/// по порядку следования цен.
///
/// Один проход: держим минимум слева и лучшую разницу
/// `цена - минимум`. Хронологию обеспечивает вызывающий — функция
/// смотрит только на порядок элементов.
///
/// Меньше двух цен — сделки нет, возвращается `0.0`. На монотонно
/// падающем ряду результат отрицательный (наименьший убыток),
/// к нулю не прижимается.
pub fn max_profit(prices: &[f64]) -> f64 {
    let Some((&first, rest)) = prices.split_first() else {
        return 0.0;
    };
    if rest.is_empty() {
        return 0.0;
    }

    let mut lowest = first;
    let mut best = rest[0] - first;

    for &price in rest {
        let gain = price - lowest;
        if gain > best {
            best = gain;
        }
        if price < lowest {
            lowest = price;
        }
    }

    best
}
