//! Карточка заявки: реквизиты, материалы и согласование

mod page;
mod view_model;

pub use page::PurchaseRequisitionDetails;
