//! Карточка запроса коммерческого предложения

mod page;
mod view_model;

pub use page::RfqDetails;
