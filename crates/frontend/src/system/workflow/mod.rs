//! Панель согласования документа: схема процесса, текущий шаг,
//! доступные действия, журнал и заметки.

pub mod api;
pub mod ui;

pub use ui::WorkflowPanel;
