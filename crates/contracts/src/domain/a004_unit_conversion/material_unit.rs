use serde::{Deserialize, Serialize};

fn default_factor() -> f64 {
    1.0
}

/// Единица измерения, привязанная к конкретному материалу.
///
/// 1 этой единицы = `conversion_factor` базовых единиц материала.
/// Для базовой единицы коэффициент равен 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialUnit {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "materialId")]
    pub material_id: String,

    #[serde(rename = "unitId")]
    pub unit_id: String,

    #[serde(rename = "unitCode", default)]
    pub unit_code: Option<String>,

    #[serde(rename = "unitName", default)]
    pub unit_name: Option<String>,

    #[serde(rename = "isBaseUnit")]
    pub is_base_unit: bool,

    #[serde(rename = "conversionFactor", default = "default_factor")]
    pub conversion_factor: f64,
}

impl MaterialUnit {
    pub fn new(material_id: &str, unit_id: &str, is_base_unit: bool, conversion_factor: f64) -> Self {
        Self {
            id: String::new(),
            material_id: material_id.to_string(),
            unit_id: unit_id.to_string(),
            unit_code: None,
            unit_name: None,
            is_base_unit,
            conversion_factor: if is_base_unit { 1.0 } else { conversion_factor },
        }
    }

    /// Коэффициент к базовой единице (у базовой всегда 1)
    pub fn factor(&self) -> f64 {
        if self.is_base_unit {
            1.0
        } else {
            self.conversion_factor
        }
    }

    /// Подпись для выпадающих списков: имя, код или id
    pub fn label(&self) -> String {
        let name = self
            .unit_name
            .as_deref()
            .or(self.unit_code.as_deref())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.unit_id);
        if self.is_base_unit {
            format!("{} (базовая)", name)
        } else {
            name.to_string()
        }
    }
}

/// Запрос на привязку единицы к материалу.
///
/// `is_base_unit` указывается всегда явно. `replace_base` выставляется,
/// когда новая базовая единица вытесняет текущую: тогда
/// `conversion_factor` = сколько старых базовых единиц в одной новой.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddMaterialUnitRequest {
    #[serde(rename = "materialId")]
    pub material_id: String,
    #[serde(rename = "unitId")]
    pub unit_id: String,
    #[serde(rename = "isBaseUnit")]
    pub is_base_unit: bool,
    #[serde(rename = "conversionFactor")]
    pub conversion_factor: f64,
    #[serde(rename = "replaceBase", default)]
    pub replace_base: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveMaterialUnitRequest {
    #[serde(rename = "materialId")]
    pub material_id: String,
    #[serde(rename = "unitId")]
    pub unit_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetBaseUnitRequest {
    #[serde(rename = "materialId")]
    pub material_id: String,
    #[serde(rename = "unitId")]
    pub unit_id: String,
}

/// Запрос пересчёта количества. `material_id` задаётся, когда пересчёт
/// выполняется в рамках единиц конкретного материала.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertRequest {
    pub quantity: f64,
    #[serde(rename = "fromUnitId")]
    pub from_unit_id: String,
    #[serde(rename = "toUnitId")]
    pub to_unit_id: String,
    #[serde(rename = "materialId", default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertResult {
    pub quantity: f64,
    #[serde(rename = "unitId", default)]
    pub unit_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_unit_factor_is_one() {
        let mut unit = MaterialUnit::new("m1", "kg", true, 42.0);
        assert_eq!(unit.factor(), 1.0);
        unit.conversion_factor = 5.0;
        assert_eq!(unit.factor(), 1.0);
    }

    #[test]
    fn test_missing_factor_defaults_to_one() {
        let json = r#"{"materialId":"m1","unitId":"kg","isBaseUnit":true}"#;
        let unit: MaterialUnit = serde_json::from_str(json).unwrap();
        assert_eq!(unit.conversion_factor, 1.0);
    }

    #[test]
    fn test_add_request_always_carries_is_base_unit() {
        let request = AddMaterialUnitRequest {
            material_id: "m1".into(),
            unit_id: "box".into(),
            is_base_unit: false,
            conversion_factor: 12.0,
            replace_base: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["isBaseUnit"], serde_json::Value::Bool(false));
        assert_eq!(json["conversionFactor"], 12.0);
    }

    #[test]
    fn test_label_prefers_name_and_marks_base() {
        let mut unit = MaterialUnit::new("m1", "kg", true, 1.0);
        assert_eq!(unit.label(), "kg (базовая)");
        unit.unit_name = Some("Килограмм".into());
        assert_eq!(unit.label(), "Килограмм (базовая)");
    }
}
