//! Форматирование цен вариантов, заданных в минимальных единицах валюты

/// Вставляет пробел между каждыми тремя цифрами целой части
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(' ');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Форматирует цену в копейках с разделителем тысяч и 2 знаками после точки
///
/// # Примеры
///
/// ```
/// use option_selectors::shared::number_format::format_money;
/// assert_eq!(format_money(123456789), "1 234 567.89");
/// ```
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}
