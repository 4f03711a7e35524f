use crate::shared::number_format::format_plain;
use contracts::domain::common::{is_countable, parse_decimal, DocumentLine};

/// Строка редактора. Количество и цена - исходный текст поля ввода.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    /// Стабильный ключ строки для `<For>` (не номер строки)
    pub key: u64,
    pub material_id: String,
    pub unit_id: String,
    pub quantity_text: String,
    pub price_text: String,
    pub note: String,
}

impl LineRow {
    pub fn quantity(&self) -> Option<f64> {
        parse_decimal(&self.quantity_text)
    }

    pub fn price(&self) -> Option<f64> {
        parse_decimal(&self.price_text)
    }

    /// Сумма строки; нераспознанный или недопустимый ввод даёт 0
    pub fn amount(&self) -> f64 {
        match (self.quantity(), self.price()) {
            (Some(q), Some(p)) if is_countable(q, p) => q * p,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineRowsState {
    rows: Vec<LineRow>,
    next_key: u64,
}

impl LineRowsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: &[DocumentLine]) -> Self {
        let mut sorted: Vec<&DocumentLine> = lines.iter().collect();
        sorted.sort_by_key(|l| l.line_no);

        let mut state = Self::new();
        for line in sorted {
            let key = state.take_key();
            state.rows.push(LineRow {
                key,
                material_id: line.material_id.clone().unwrap_or_default(),
                unit_id: line.unit_id.clone().unwrap_or_default(),
                quantity_text: format_plain(line.quantity),
                price_text: format_plain(line.price),
                note: line.note.clone().unwrap_or_default(),
            });
        }
        state
    }

    fn take_key(&mut self) -> u64 {
        self.next_key += 1;
        self.next_key
    }

    pub fn rows(&self) -> &[LineRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: u64) -> Option<&LineRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    fn row_mut(&mut self, key: u64) -> Option<&mut LineRow> {
        self.rows.iter_mut().find(|r| r.key == key)
    }

    /// Новая пустая строка (количество 1, цена 0). Возвращает её ключ.
    pub fn add_row(&mut self) -> u64 {
        let key = self.take_key();
        self.rows.push(LineRow {
            key,
            material_id: String::new(),
            unit_id: String::new(),
            quantity_text: "1".to_string(),
            price_text: "0".to_string(),
            note: String::new(),
        });
        key
    }

    pub fn remove_row(&mut self, key: u64) {
        self.rows.retain(|r| r.key != key);
    }

    /// Смена материала сбрасывает единицу: у другого материала свой набор единиц
    pub fn set_material(&mut self, key: u64, material_id: &str) {
        if let Some(row) = self.row_mut(key) {
            if row.material_id != material_id {
                row.material_id = material_id.to_string();
                row.unit_id.clear();
            }
        }
    }

    pub fn set_unit(&mut self, key: u64, unit_id: &str) {
        if let Some(row) = self.row_mut(key) {
            row.unit_id = unit_id.to_string();
        }
    }

    pub fn set_quantity_text(&mut self, key: u64, text: &str) {
        if let Some(row) = self.row_mut(key) {
            row.quantity_text = text.to_string();
        }
    }

    pub fn set_price_text(&mut self, key: u64, text: &str) {
        if let Some(row) = self.row_mut(key) {
            row.price_text = text.to_string();
        }
    }

    pub fn set_note(&mut self, key: u64, text: &str) {
        if let Some(row) = self.row_mut(key) {
            row.note = text.to_string();
        }
    }

    /// Итог документа по текущему вводу
    pub fn total(&self) -> f64 {
        self.rows.iter().map(LineRow::amount).sum()
    }

    /// Материалы строк без повторов, в порядке появления
    pub fn material_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.material_id.is_empty() && !ids.contains(&row.material_id) {
                ids.push(row.material_id.clone());
            }
        }
        ids
    }

    /// Строки для отправки. Нераспознанные числа уходят как NaN,
    /// чтобы проверка строк отклонила их, а не молча заменила нулём.
    pub fn to_lines(&self) -> Vec<DocumentLine> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, row)| DocumentLine {
                line_no: idx as u32 + 1,
                material_id: Some(row.material_id.clone()).filter(|s| !s.is_empty()),
                unit_id: Some(row.unit_id.clone()).filter(|s| !s.is_empty()),
                quantity: row.quantity().unwrap_or(f64::NAN),
                price: row.price().unwrap_or(f64::NAN),
                note: Some(row.note.trim().to_string()).filter(|s| !s.is_empty()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::{validate_lines, LineValidationError};

    fn filled(state: &mut LineRowsState, material: &str, unit: &str, qty: &str, price: &str) -> u64 {
        let key = state.add_row();
        state.set_material(key, material);
        state.set_unit(key, unit);
        state.set_quantity_text(key, qty);
        state.set_price_text(key, price);
        key
    }

    #[test]
    fn test_amount_recomputes_on_quantity_change() {
        let mut state = LineRowsState::new();
        let key = filled(&mut state, "m1", "kg", "3", "1000");
        assert_eq!(state.row(key).map(LineRow::amount), Some(3000.0));

        state.set_quantity_text(key, "5");
        assert_eq!(state.row(key).map(LineRow::amount), Some(5000.0));
        assert_eq!(state.total(), 5000.0);
    }

    #[test]
    fn test_total_is_sum_of_rows() {
        let mut state = LineRowsState::new();
        filled(&mut state, "m1", "kg", "3", "1000");
        filled(&mut state, "m2", "pc", "2,5", "100");
        assert_eq!(state.total(), 3250.0);
    }

    #[test]
    fn test_total_is_zero_without_valid_rows() {
        let mut state = LineRowsState::new();
        assert_eq!(state.total(), 0.0);

        filled(&mut state, "m1", "kg", "много", "1000");
        filled(&mut state, "m2", "kg", "2", "");
        assert_eq!(state.total(), 0.0);
    }

    #[test]
    fn test_zero_or_negative_quantity_adds_nothing() {
        let mut state = LineRowsState::new();
        let negative = filled(&mut state, "m1", "kg", "-3", "1000");
        filled(&mut state, "m2", "kg", "0", "1000");
        assert_eq!(state.row(negative).map(LineRow::amount), Some(0.0));
        assert_eq!(state.total(), 0.0);

        filled(&mut state, "m3", "kg", "2", "250");
        assert_eq!(state.total(), 500.0);
    }

    #[test]
    fn test_changing_material_clears_unit() {
        let mut state = LineRowsState::new();
        let key = filled(&mut state, "m1", "kg", "1", "1");

        state.set_material(key, "m1");
        assert_eq!(state.row(key).map(|r| r.unit_id.as_str()), Some("kg"));

        state.set_material(key, "m2");
        assert_eq!(state.row(key).map(|r| r.unit_id.as_str()), Some(""));
    }

    #[test]
    fn test_to_lines_numbers_rows_and_keeps_bad_input_invalid() {
        let mut state = LineRowsState::new();
        let first = filled(&mut state, "m1", "kg", "1", "10");
        filled(&mut state, "m2", "kg", "abc", "10");
        state.remove_row(first);

        let lines = state.to_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_no, 1);
        assert!(lines[0].quantity.is_nan());
        assert_eq!(
            validate_lines(&lines, |_, _| true),
            Err(LineValidationError::NonPositiveQuantity { line_no: 1 })
        );
    }

    #[test]
    fn test_from_lines_keeps_line_order() {
        let lines = vec![
            DocumentLine {
                line_no: 2,
                material_id: Some("m2".into()),
                unit_id: Some("pc".into()),
                quantity: 4.0,
                price: 2.5,
                note: None,
            },
            DocumentLine {
                line_no: 1,
                material_id: Some("m1".into()),
                unit_id: Some("kg".into()),
                quantity: 1.5,
                price: 100.0,
                note: Some("срочно".into()),
            },
        ];
        let state = LineRowsState::from_lines(&lines);
        assert_eq!(state.rows()[0].material_id, "m1");
        assert_eq!(state.rows()[0].quantity_text, "1.5");
        assert_eq!(state.rows()[1].price_text, "2.5");
        assert_eq!(state.total(), 160.0);
        assert_eq!(state.material_ids(), vec!["m1".to_string(), "m2".to_string()]);
    }
}
