//! Форматирование чисел для таблиц и итогов

/// Число с разделителем тысяч (пробел) и заданным количеством знаков
///
/// # Примеры
///
/// ```ignore
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1 234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Денежная сумма: 2 знака и разделитель тысяч
pub fn format_money(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Количество: без хвостовых нулей, до 3 знаков ("2", "2.5", "0.125")
pub fn format_quantity(value: f64) -> String {
    let s = format_number_with_decimals(value, 3);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Число для поля ввода: до 6 знаков после точки, без группировки
pub fn format_plain(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let s = format!("{:.6}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Коэффициент пересчёта
pub fn format_factor(value: f64) -> String {
    if value.is_finite() {
        format_plain(value)
    } else {
        "—".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "1 234.56");
        assert_eq!(format_money(1234567.89), "1 234 567.89");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(-1234.56), "-1 234.56");
        assert_eq!(format_money(3000.0), "3 000.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(1500.125), "1 500.125");
    }

    #[test]
    fn test_format_factor() {
        assert_eq!(format_factor(1000.0), "1000");
        assert_eq!(format_factor(0.001), "0.001");
        assert_eq!(format_factor(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_non_finite_is_dash() {
        assert_eq!(format_money(f64::NAN), "—");
    }
}
