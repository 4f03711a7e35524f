mod page;
mod view_model;

pub use page::UnitConversionDetails;
pub use view_model::unit_items;
