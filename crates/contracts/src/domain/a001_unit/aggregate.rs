use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(
    /// Уникальный идентификатор единицы измерения
    UnitId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Единица измерения.
///
/// Может объявить себя кратной другой единице (`base_unit_id` +
/// `conversion_rate`): "1 эта единица = conversion_rate базовых".
/// Ссылка слабая - базовая единица живёт независимо.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    #[serde(flatten)]
    pub base: BaseAggregate<UnitId>,

    /// Обозначение ("кг", "шт", "м²")
    pub symbol: String,

    #[serde(rename = "baseUnitId", default)]
    pub base_unit_id: Option<String>,

    #[serde(rename = "conversionRate", default)]
    pub conversion_rate: Option<f64>,
}

impl Unit {
    pub fn new_for_insert(
        code: String,
        name: String,
        symbol: String,
        base_unit_id: Option<String>,
        conversion_rate: Option<f64>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(UnitId::new_v4(), code, name),
            symbol,
            base_unit_id,
            conversion_rate,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Наименование (хранится в description базового агрегата)
    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn is_active(&self) -> bool {
        self.base.metadata.is_active
    }

    /// Подпись для списков выбора: "Килограмм (кг)"
    pub fn display_label(&self) -> String {
        if self.symbol.trim().is_empty() {
            self.base.description.clone()
        } else {
            format!("{} ({})", self.base.description, self.symbol)
        }
    }

    pub fn update(&mut self, dto: &UnitDto) {
        self.base.code = dto.code.clone();
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.symbol = dto.symbol.clone();
        self.base_unit_id = dto.base_unit_id.clone().filter(|s| !s.trim().is_empty());
        self.conversion_rate = if self.base_unit_id.is_some() {
            dto.conversion_rate
        } else {
            None
        };
    }
}

impl AggregateRoot for Unit {
    type Id = UnitId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "unit"
    }

    fn element_name() -> &'static str {
        "Единица измерения"
    }

    fn list_name() -> &'static str {
        "Единицы измерения"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// DTO для создания/обновления единицы измерения
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct UnitDto {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    pub symbol: String,
    #[serde(rename = "baseUnitId")]
    pub base_unit_id: Option<String>,
    #[serde(rename = "conversionRate")]
    pub conversion_rate: Option<f64>,
    pub comment: Option<String>,
}

impl UnitDto {
    /// Валидация перед отправкой
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.symbol.trim().is_empty() {
            return Err("Обозначение не может быть пустым".into());
        }

        let base_unit = self.base_unit_id.as_deref().filter(|s| !s.trim().is_empty());
        match (base_unit, self.conversion_rate) {
            (Some(base), _) if Some(base) == self.id.as_deref() => {
                Err("Единица не может быть базовой сама для себя".into())
            }
            (Some(_), Some(rate)) if rate.is_finite() && rate > 0.0 => Ok(()),
            (Some(_), _) => Err("Коэффициент к базовой единице должен быть больше нуля".into()),
            (None, Some(_)) => Err("Коэффициент указан без базовой единицы".into()),
            (None, None) => Ok(()),
        }
    }
}

impl From<&Unit> for UnitDto {
    fn from(u: &Unit) -> Self {
        Self {
            id: Some(u.base.id.as_string()),
            code: u.base.code.clone(),
            name: u.base.description.clone(),
            symbol: u.symbol.clone(),
            base_unit_id: u.base_unit_id.clone(),
            conversion_rate: u.conversion_rate,
            comment: u.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> UnitDto {
        UnitDto {
            id: Some("11111111-1111-1111-1111-111111111111".into()),
            code: "KG".into(),
            name: "Килограмм".into(),
            symbol: "кг".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_unit_is_valid() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn test_scaled_unit_requires_positive_rate() {
        let mut d = dto();
        d.base_unit_id = Some("22222222-2222-2222-2222-222222222222".into());
        assert!(d.validate().is_err());

        d.conversion_rate = Some(0.0);
        assert!(d.validate().is_err());

        d.conversion_rate = Some(1000.0);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_unit_cannot_be_its_own_base() {
        let mut d = dto();
        d.base_unit_id = d.id.clone();
        d.conversion_rate = Some(1.0);
        assert_eq!(
            d.validate(),
            Err("Единица не может быть базовой сама для себя".to_string())
        );
    }

    #[test]
    fn test_rate_without_base_is_rejected() {
        let mut d = dto();
        d.conversion_rate = Some(2.0);
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_update_drops_rate_when_base_cleared() {
        let mut unit = Unit::new_for_insert(
            "T".into(),
            "Тонна".into(),
            "т".into(),
            Some("kg".into()),
            Some(1000.0),
        );
        let mut d = UnitDto::from(&unit);
        d.base_unit_id = Some("   ".into());
        unit.update(&d);
        assert_eq!(unit.base_unit_id, None);
        assert_eq!(unit.conversion_rate, None);
        assert_eq!(unit.display_label(), "Тонна (т)");
    }
}
