use super::{is_valid_factor, UnitRegistryError};
use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор коэффициента пересчёта
    UnitConversionId
);

/// Направленный коэффициент между двумя глобальными единицами:
/// 1 `from_unit` = `conversion_factor` × `to_unit`.
///
/// Не зависит от материала. `usage_count` - сколько проведённых операций
/// использовали коэффициент; изменение действует только на новые операции.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConversion {
    pub id: UnitConversionId,

    #[serde(rename = "fromUnitId")]
    pub from_unit_id: String,

    #[serde(rename = "toUnitId")]
    pub to_unit_id: String,

    #[serde(rename = "conversionFactor")]
    pub conversion_factor: f64,

    #[serde(rename = "usageCount", default)]
    pub usage_count: i64,

    #[serde(default)]
    pub note: Option<String>,

    #[serde(rename = "fromUnitCode", default)]
    pub from_unit_code: Option<String>,

    #[serde(rename = "toUnitCode", default)]
    pub to_unit_code: Option<String>,

    #[serde(default)]
    pub metadata: EntityMetadata,
}

impl UnitConversion {
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn is_used(&self) -> bool {
        self.usage_count > 0
    }

    /// Предупреждение для оператора при редактировании использованного коэффициента
    pub fn edit_warning(&self) -> Option<String> {
        if self.is_used() {
            Some(format!(
                "Коэффициент уже использован в операциях: {}. Изменение применится только к новым операциям, прошлые расчёты не пересчитываются.",
                self.usage_count
            ))
        } else {
            None
        }
    }

    /// Та же направленная пара единиц
    pub fn same_pair(&self, from_unit_id: &str, to_unit_id: &str) -> bool {
        self.from_unit_id == from_unit_id && self.to_unit_id == to_unit_id
    }
}

/// DTO для создания/обновления коэффициента
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UnitConversionDto {
    pub id: Option<String>,
    #[serde(rename = "fromUnitId")]
    pub from_unit_id: String,
    #[serde(rename = "toUnitId")]
    pub to_unit_id: String,
    #[serde(rename = "conversionFactor")]
    pub conversion_factor: f64,
    pub note: Option<String>,
}

impl UnitConversionDto {
    /// Проверка самой записи: единицы выбраны и различны, коэффициент > 0
    pub fn validate(&self) -> Result<(), String> {
        if self.from_unit_id.trim().is_empty() || self.to_unit_id.trim().is_empty() {
            return Err("Выберите обе единицы измерения".into());
        }
        self.check_rules(&[]).map_err(|e| e.to_string())
    }

    /// Проверка с учётом уже сохранённых коэффициентов
    pub fn check_rules(&self, existing: &[UnitConversion]) -> Result<(), UnitRegistryError> {
        if self.from_unit_id == self.to_unit_id {
            return Err(UnitRegistryError::SameUnit);
        }
        if !is_valid_factor(self.conversion_factor) {
            return Err(UnitRegistryError::InvalidFactor);
        }
        let duplicate = existing.iter().any(|c| {
            c.same_pair(&self.from_unit_id, &self.to_unit_id)
                && Some(c.to_string_id()) != self.id
        });
        if duplicate {
            return Err(UnitRegistryError::DuplicatePair);
        }
        Ok(())
    }
}

/// Проверка нового или изменённого коэффициента перед отправкой
pub fn validate_new_conversion(
    dto: &UnitConversionDto,
    existing: &[UnitConversion],
) -> Result<(), UnitRegistryError> {
    dto.check_rules(existing)
}

impl From<&UnitConversion> for UnitConversionDto {
    fn from(c: &UnitConversion) -> Self {
        Self {
            id: Some(c.to_string_id()),
            from_unit_id: c.from_unit_id.clone(),
            to_unit_id: c.to_unit_id.clone(),
            conversion_factor: c.conversion_factor,
            note: c.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(from: &str, to: &str, factor: f64, usage: i64) -> UnitConversion {
        UnitConversion {
            id: UnitConversionId::new_v4(),
            from_unit_id: from.into(),
            to_unit_id: to.into(),
            conversion_factor: factor,
            usage_count: usage,
            note: None,
            from_unit_code: None,
            to_unit_code: None,
            metadata: EntityMetadata::default(),
        }
    }

    fn dto(from: &str, to: &str, factor: f64) -> UnitConversionDto {
        UnitConversionDto {
            id: None,
            from_unit_id: from.into(),
            to_unit_id: to.into(),
            conversion_factor: factor,
            note: None,
        }
    }

    #[test]
    fn test_reflexive_pair_is_rejected() {
        assert_eq!(dto("kg", "kg", 1.0).check_rules(&[]), Err(UnitRegistryError::SameUnit));
        assert!(dto("kg", "kg", 1.0).validate().is_err());
    }

    #[test]
    fn test_factor_must_be_positive() {
        assert_eq!(dto("t", "kg", 0.0).check_rules(&[]), Err(UnitRegistryError::InvalidFactor));
        assert_eq!(dto("t", "kg", f64::NAN).check_rules(&[]), Err(UnitRegistryError::InvalidFactor));
    }

    #[test]
    fn test_duplicate_pair_is_rejected_for_new_record() {
        let existing = vec![stored("t", "kg", 1000.0, 0)];
        assert_eq!(
            validate_new_conversion(&dto("t", "kg", 999.0), &existing),
            Err(UnitRegistryError::DuplicatePair)
        );
        // обратное направление - другая пара
        assert!(dto("kg", "t", 0.001).check_rules(&existing).is_ok());
    }

    #[test]
    fn test_editing_record_does_not_conflict_with_itself() {
        let existing = vec![stored("t", "kg", 1000.0, 3)];
        let mut edit = UnitConversionDto::from(&existing[0]);
        edit.conversion_factor = 1000.5;
        assert!(edit.check_rules(&existing).is_ok());
    }

    #[test]
    fn test_used_conversion_warns_on_edit() {
        assert!(stored("t", "kg", 1000.0, 0).edit_warning().is_none());
        let warning = stored("t", "kg", 1000.0, 7).edit_warning().unwrap();
        assert!(warning.contains('7'));
    }
}
