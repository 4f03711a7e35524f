//! Карточка материала (вкладки «Основная» и «Единицы»)

mod page;
mod tabs;
mod view_model;

pub use page::MaterialDetails;
