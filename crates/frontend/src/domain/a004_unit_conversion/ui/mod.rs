pub mod convert;
pub mod details;
pub mod list;
pub mod material_units;
