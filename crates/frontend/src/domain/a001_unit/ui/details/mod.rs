//! Карточка единицы измерения
//!
//! - view_model.rs: поля формы, загрузка и сохранение
//! - page.rs: разметка

mod page;
mod view_model;

pub use page::UnitDetails;
pub use view_model::UnitDetailsVm;
