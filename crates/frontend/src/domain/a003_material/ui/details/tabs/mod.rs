mod general;
mod units;

pub use general::GeneralTab;
pub use units::UnitsTab;
