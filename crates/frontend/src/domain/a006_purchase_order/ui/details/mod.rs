//! Карточка заказа поставщику

mod page;
mod view_model;

pub use page::PurchaseOrderDetails;
