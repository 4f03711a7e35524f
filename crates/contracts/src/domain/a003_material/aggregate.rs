use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(
    /// Уникальный идентификатор материала
    MaterialId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// Материал (номенклатура закупок)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    #[serde(flatten)]
    pub base: BaseAggregate<MaterialId>,

    #[serde(rename = "categoryId")]
    pub category_id: String,

    /// Единица по умолчанию (для отображения)
    #[serde(rename = "unitId")]
    pub unit_id: String,

    #[serde(rename = "unitPrice", default)]
    pub unit_price: f64,

    #[serde(rename = "minStockLevel", default)]
    pub min_stock_level: Option<f64>,

    #[serde(rename = "maxStockLevel", default)]
    pub max_stock_level: Option<f64>,

    // Денормализованные подписи, которые сервер отдаёт в списках
    #[serde(rename = "categoryName", default)]
    pub category_name: Option<String>,

    #[serde(rename = "unitSymbol", default)]
    pub unit_symbol: Option<String>,
}

impl Material {
    pub fn new_for_insert(
        code: String,
        name: String,
        category_id: String,
        unit_id: String,
        unit_price: f64,
    ) -> Self {
        Self {
            base: BaseAggregate::new(MaterialId::new_v4(), code, name),
            category_id,
            unit_id,
            unit_price,
            min_stock_level: None,
            max_stock_level: None,
            category_name: None,
            unit_symbol: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn is_active(&self) -> bool {
        self.base.metadata.is_active
    }

    /// "КОД - Наименование" для выпадающих списков
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.base.code, self.base.description)
    }

    pub fn update(&mut self, dto: &MaterialDto) {
        self.base.code = dto.code.clone();
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.category_id = dto.category_id.clone();
        self.unit_id = dto.unit_id.clone();
        self.unit_price = dto.unit_price;
        self.min_stock_level = dto.min_stock_level;
        self.max_stock_level = dto.max_stock_level;
    }
}

impl AggregateRoot for Material {
    type Id = MaterialId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "material"
    }

    fn element_name() -> &'static str {
        "Материал"
    }

    fn list_name() -> &'static str {
        "Материалы"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MaterialDto {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "unitId")]
    pub unit_id: String,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "minStockLevel")]
    pub min_stock_level: Option<f64>,
    #[serde(rename = "maxStockLevel")]
    pub max_stock_level: Option<f64>,
    pub comment: Option<String>,
}

impl MaterialDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if self.category_id.trim().is_empty() {
            return Err("Выберите категорию".into());
        }
        if self.unit_id.trim().is_empty() {
            return Err("Выберите единицу измерения".into());
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err("Цена не может быть отрицательной".into());
        }
        for level in [self.min_stock_level, self.max_stock_level].into_iter().flatten() {
            if !level.is_finite() || level < 0.0 {
                return Err("Уровни запаса не могут быть отрицательными".into());
            }
        }
        if let (Some(min), Some(max)) = (self.min_stock_level, self.max_stock_level) {
            if min > max {
                return Err("Минимальный запас больше максимального".into());
            }
        }
        Ok(())
    }
}

impl From<&Material> for MaterialDto {
    fn from(m: &Material) -> Self {
        Self {
            id: Some(m.base.id.as_string()),
            code: m.base.code.clone(),
            name: m.base.description.clone(),
            category_id: m.category_id.clone(),
            unit_id: m.unit_id.clone(),
            unit_price: m.unit_price,
            min_stock_level: m.min_stock_level,
            max_stock_level: m.max_stock_level,
            comment: m.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MaterialDto {
        MaterialDto {
            id: None,
            code: "M-001".into(),
            name: "Цемент М500".into(),
            category_id: "cat".into(),
            unit_id: "kg".into(),
            unit_price: 12.5,
            min_stock_level: Some(100.0),
            max_stock_level: Some(1000.0),
            comment: None,
        }
    }

    #[test]
    fn test_valid_material() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let mut d = valid();
        d.min_stock_level = Some(2000.0);
        assert_eq!(
            d.validate(),
            Err("Минимальный запас больше максимального".to_string())
        );
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut d = valid();
        d.unit_price = -1.0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_dto_roundtrip_keeps_fields() {
        let mut m = Material::new_for_insert("M".into(), "Песок".into(), "c".into(), "t".into(), 5.0);
        let mut dto = MaterialDto::from(&m);
        dto.max_stock_level = Some(50.0);
        m.update(&dto);
        assert_eq!(m.max_stock_level, Some(50.0));
        assert_eq!(m.display_label(), "M - Песок");
    }
}
