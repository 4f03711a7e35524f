pub mod aggregate;

pub use aggregate::{Rfq, RfqDto, RfqId};
