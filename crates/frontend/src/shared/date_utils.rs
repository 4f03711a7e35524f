//! Форматирование дат для таблиц и форм
//!
//! Документы хранят даты строкой `YYYY-MM-DD`, служебные поля - `DateTime<Utc>`.

use chrono::{DateTime, Local, Utc};

/// ISO datetime -> DD.MM.YYYY HH:MM:SS
/// Пример: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time = time_part
            .split(['.', 'Z', '+'])
            .next()
            .unwrap_or(time_part);
        let date = format_date(date_part);
        if date != date_part {
            return format!("{} {}", date, time);
        }
    }
    datetime_str.to_string()
}

/// ISO date -> DD.MM.YYYY
/// Пример: "2024-03-15" или "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Необязательная дата документа: пусто -> "—"
pub fn format_optional_date(date: Option<&str>) -> String {
    match date {
        Some(d) if !d.trim().is_empty() => format_date(d),
        _ => "—".to_string(),
    }
}

/// Метка времени в локальном часовом поясе браузера
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string()
}

/// Сегодня в формате YYYY-MM-DD (дата нового документа)
pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15.03.2024 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59+03:00"),
            "31.12.2024 23:59:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_optional_date() {
        assert_eq!(format_optional_date(None), "—");
        assert_eq!(format_optional_date(Some(" ")), "—");
        assert_eq!(format_optional_date(Some("2024-05-01")), "01.05.2024");
    }

    #[test]
    fn test_today_is_iso() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert_eq!(&today[4..5], "-");
    }
}
