pub mod aggregate;

pub use aggregate::{PurchaseRequisition, PurchaseRequisitionDto, PurchaseRequisitionId};
