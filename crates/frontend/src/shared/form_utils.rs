//! Преобразование полей формы в значения DTO

use crate::shared::number_format::format_plain;
use contracts::domain::common::parse_decimal;

/// Пустая строка (после trim) -> None
pub fn opt(v: String) -> Option<String> {
    if v.trim().is_empty() {
        None
    } else {
        Some(v)
    }
}

/// Число из поля ввода. Нераспознанный ввод становится NaN, чтобы
/// его отклонила проверка DTO, а не подменил ноль.
pub fn number_from_text(text: &str) -> f64 {
    parse_decimal(text).unwrap_or(f64::NAN)
}

/// Необязательное число: пустое поле -> None
pub fn optional_number_from_text(text: &str) -> Option<f64> {
    if text.trim().is_empty() {
        None
    } else {
        Some(number_from_text(text))
    }
}

/// Текст для поля ввода из необязательного числа
pub fn optional_number_to_text(value: Option<f64>) -> String {
    value.map(format_plain).unwrap_or_default()
}

/// Подтверждение через окно браузера; без `window` считается отказом
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_trims() {
        assert_eq!(opt("  ".into()), None);
        assert_eq!(opt("x".into()), Some("x".to_string()));
    }

    #[test]
    fn test_numbers_from_text() {
        assert_eq!(number_from_text("12,5"), 12.5);
        assert!(number_from_text("abc").is_nan());
        assert_eq!(optional_number_from_text(""), None);
        assert!(optional_number_from_text("?").is_some_and(f64::is_nan));
        assert_eq!(optional_number_from_text("1000"), Some(1000.0));
    }

    #[test]
    fn test_optional_number_to_text() {
        assert_eq!(optional_number_to_text(None), "");
        assert_eq!(optional_number_to_text(Some(2.5)), "2.5");
    }
}
