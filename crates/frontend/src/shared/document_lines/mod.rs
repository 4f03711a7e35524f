//! Табличная часть «Материалы» для заявки, заказа и запроса КП
//!
//! - `state` - строки редактора (ввод хранится текстом, суммы считаются на лету)
//! - `unit_selector` - что показать в колонке «Ед. изм.» для выбранного материала
//! - `catalog` - материалы и загруженные наборы единиц
//! - `editor` - компонент таблицы

pub mod catalog;
pub mod editor;
pub mod state;
pub mod unit_selector;

pub use catalog::LineCatalog;
pub use editor::DocumentLinesEditor;
pub use state::{LineRow, LineRowsState};
pub use unit_selector::{UnitOption, UnitSelectorState};
