pub mod aggregate;

pub use aggregate::{MaterialCategory, MaterialCategoryDto, MaterialCategoryId};
