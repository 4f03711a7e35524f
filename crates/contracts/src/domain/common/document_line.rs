//! Строки табличной части закупочных документов (заявка, заказ, RFQ)
//!
//! Сумма строки и итог документа - производные величины: они вычисляются
//! из количества и цены при каждом обращении и не хранятся отдельно.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Строка табличной части «Материалы»
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentLine {
    /// Номер строки (с 1)
    #[serde(rename = "lineNo")]
    pub line_no: u32,

    /// Ссылка на материал (a003_material)
    #[serde(rename = "materialId")]
    pub material_id: Option<String>,

    /// Ссылка на единицу измерения (должна быть настроена для материала)
    #[serde(rename = "unitId")]
    pub unit_id: Option<String>,

    /// Количество
    pub quantity: f64,

    /// Цена за единицу
    pub price: f64,

    /// Примечание к строке
    #[serde(default)]
    pub note: Option<String>,
}

impl DocumentLine {
    /// Сумма строки = количество × цена
    pub fn amount(&self) -> f64 {
        self.quantity * self.price
    }

    /// Строка содержит числа, пригодные для суммирования
    pub fn has_valid_numbers(&self) -> bool {
        is_countable(self.quantity, self.price)
    }
}

/// Те же границы, что у `validate_lines`: количество > 0, цена >= 0.
/// Строка, которую проверка отклонит, в итог не входит.
pub fn is_countable(quantity: f64, price: f64) -> bool {
    quantity.is_finite() && quantity > 0.0 && price.is_finite() && price >= 0.0
}

/// Ошибки проверки строк документа перед отправкой
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineValidationError {
    #[error("Документ должен содержать хотя бы одну строку")]
    NoLines,

    #[error("Строка {line_no}: не выбран материал")]
    MissingMaterial { line_no: u32 },

    #[error("Строка {line_no}: количество должно быть больше нуля")]
    NonPositiveQuantity { line_no: u32 },

    #[error("Строка {line_no}: некорректная цена")]
    InvalidPrice { line_no: u32 },

    #[error("Строка {line_no}: не выбрана единица измерения")]
    MissingUnit { line_no: u32 },

    #[error("Строка {line_no}: единица измерения не настроена для выбранного материала")]
    UnitNotRegistered { line_no: u32 },
}

/// Итог документа: сумма сумм строк с корректными числами.
///
/// Для пустого документа или строк без корректных данных итог равен нулю.
pub fn document_total(lines: &[DocumentLine]) -> f64 {
    lines
        .iter()
        .filter(|l| l.has_valid_numbers())
        .map(DocumentLine::amount)
        .sum()
}

/// Проверка строк документа.
///
/// `is_unit_registered(material_id, unit_id)` отвечает, привязана ли единица
/// к материалу (источник - загруженные MaterialUnit).
pub fn validate_lines<F>(lines: &[DocumentLine], is_unit_registered: F) -> Result<(), LineValidationError>
where
    F: Fn(&str, &str) -> bool,
{
    if lines.is_empty() {
        return Err(LineValidationError::NoLines);
    }

    for line in lines {
        let line_no = line.line_no;

        let material_id = match line.material_id.as_deref() {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(LineValidationError::MissingMaterial { line_no }),
        };

        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(LineValidationError::NonPositiveQuantity { line_no });
        }

        if !line.price.is_finite() || line.price < 0.0 {
            return Err(LineValidationError::InvalidPrice { line_no });
        }

        let unit_id = match line.unit_id.as_deref() {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Err(LineValidationError::MissingUnit { line_no }),
        };

        if !is_unit_registered(material_id, unit_id) {
            return Err(LineValidationError::UnitNotRegistered { line_no });
        }
    }

    Ok(())
}

/// Разбор числа из поля ввода.
///
/// Допускает запятую как десятичный разделитель и пробелы (в том числе
/// неразрывные) как разделители разрядов: "1 234,5" -> 1234.5
pub fn parse_decimal(input: &str) -> Option<f64> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(no: u32, material: Option<&str>, unit: Option<&str>, qty: f64, price: f64) -> DocumentLine {
        DocumentLine {
            line_no: no,
            material_id: material.map(String::from),
            unit_id: unit.map(String::from),
            quantity: qty,
            price,
            note: None,
        }
    }

    #[test]
    fn test_amount_follows_quantity_and_price() {
        let mut l = line(1, Some("m1"), Some("kg"), 3.0, 1000.0);
        assert_eq!(l.amount(), 3000.0);

        l.quantity = 5.0;
        assert_eq!(l.amount(), 5000.0);

        l.price = 10.5;
        assert_eq!(l.amount(), 52.5);
    }

    #[test]
    fn test_document_total_sums_lines() {
        let lines = vec![
            line(1, Some("m1"), Some("kg"), 3.0, 1000.0),
            line(2, Some("m2"), Some("pc"), 2.0, 250.0),
        ];
        assert_eq!(document_total(&lines), 3500.0);
    }

    #[test]
    fn test_document_total_is_zero_without_valid_lines() {
        assert_eq!(document_total(&[]), 0.0);
        let lines = vec![line(1, None, None, f64::NAN, 10.0)];
        assert_eq!(document_total(&lines), 0.0);
    }

    #[test]
    fn test_document_total_skips_lines_rejected_by_validation() {
        let negative = vec![line(1, Some("m1"), Some("kg"), -3.0, 1000.0)];
        assert!(validate_lines(&negative, |_, _| true).is_err());
        assert_eq!(document_total(&negative), 0.0);

        let zero = vec![line(1, Some("m1"), Some("kg"), 0.0, 1000.0)];
        assert_eq!(document_total(&zero), 0.0);

        let bad_price = vec![line(1, Some("m1"), Some("kg"), 2.0, -5.0)];
        assert_eq!(document_total(&bad_price), 0.0);

        let mixed = vec![
            line(1, Some("m1"), Some("kg"), 2.0, 100.0),
            line(2, Some("m2"), Some("kg"), -1.0, 100.0),
        ];
        assert_eq!(document_total(&mixed), 200.0);
    }

    #[test]
    fn test_validate_rejects_empty_document() {
        assert_eq!(validate_lines(&[], |_, _| true), Err(LineValidationError::NoLines));
    }

    #[test]
    fn test_validate_rejects_missing_material() {
        let lines = vec![line(1, Some("m1"), Some("kg"), 1.0, 1.0), line(2, None, Some("kg"), 1.0, 1.0)];
        assert_eq!(
            validate_lines(&lines, |_, _| true),
            Err(LineValidationError::MissingMaterial { line_no: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_quantity() {
        let zero = vec![line(1, Some("m1"), Some("kg"), 0.0, 1.0)];
        assert_eq!(
            validate_lines(&zero, |_, _| true),
            Err(LineValidationError::NonPositiveQuantity { line_no: 1 })
        );

        let negative = vec![line(1, Some("m1"), Some("kg"), -2.0, 1.0)];
        assert_eq!(
            validate_lines(&negative, |_, _| true),
            Err(LineValidationError::NonPositiveQuantity { line_no: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_unregistered_unit() {
        let lines = vec![line(1, Some("m1"), Some("box"), 1.0, 1.0)];
        let result = validate_lines(&lines, |material, unit| material == "m1" && unit == "kg");
        assert_eq!(result, Err(LineValidationError::UnitNotRegistered { line_no: 1 }));
    }

    #[test]
    fn test_validate_accepts_complete_lines() {
        let lines = vec![line(1, Some("m1"), Some("kg"), 1.5, 0.0)];
        assert!(validate_lines(&lines, |_, _| true).is_ok());
    }

    #[test]
    fn test_parse_decimal_accepts_local_formats() {
        assert_eq!(parse_decimal("3"), Some(3.0));
        assert_eq!(parse_decimal(" 2,5 "), Some(2.5));
        assert_eq!(parse_decimal("1 234.75"), Some(1234.75));
        assert_eq!(parse_decimal("1\u{a0}000"), Some(1000.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }
}
