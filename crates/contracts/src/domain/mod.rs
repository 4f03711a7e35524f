pub mod a001_unit;
pub mod a002_material_category;
pub mod a003_material;
pub mod a004_unit_conversion;
pub mod a005_purchase_requisition;
pub mod a006_purchase_order;
pub mod a007_rfq;
pub mod common;
