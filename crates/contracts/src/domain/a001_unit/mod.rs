pub mod aggregate;

pub use aggregate::{Unit, UnitDto, UnitId};
