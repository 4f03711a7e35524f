//! Общие контракты фронтенда закупок и backend API.
//!
//! Здесь живут агрегаты, DTO, конверт ответа API и все чистые правила
//! (единицы измерения, строки документов, представление состояния workflow).

pub mod domain;
pub mod shared;
pub mod system;
