//! Подсистема пересчёта единиц измерения
//!
//! - `aggregate`: глобальные направленные коэффициенты между единицами
//! - `material_unit`: привязка единиц к материалу и запросы к API
//! - `registry`: инварианты набора единиц материала (ровно одна базовая)
//! - `graph`: поиск пути пересчёта между произвольными единицами

pub mod aggregate;
pub mod error;
pub mod graph;
pub mod material_unit;
pub mod registry;

pub use aggregate::{validate_new_conversion, UnitConversion, UnitConversionDto, UnitConversionId};
pub use error::UnitRegistryError;
pub use graph::ConversionGraph;
pub use material_unit::{
    AddMaterialUnitRequest, ConvertRequest, ConvertResult, MaterialUnit,
    RemoveMaterialUnitRequest, SetBaseUnitRequest,
};
pub use registry::{AddUnitPlan, MaterialUnitSet};

/// Коэффициент пригоден для пересчёта: конечное число больше нуля
pub fn is_valid_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}
