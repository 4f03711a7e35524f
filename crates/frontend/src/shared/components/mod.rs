pub mod date_input;
pub mod status_badge;

pub use date_input::DateInput;
pub use status_badge::{ActiveBadge, TokenBadge};
