//! Согласование документов через внешний движок workflow
//!
//! Клиент не знает набора шагов и переходов: он получает снимок
//! состояния и показывает то, что разрешил сервер.

pub mod bpmn;
pub mod definition;
pub mod history;
pub mod notes;
pub mod snapshot;

pub use definition::WorkflowDefinition;
pub use history::{newest_first, WorkflowHistoryEntry};
pub use notes::{CreateWorkflowNoteRequest, WorkflowNote};
pub use snapshot::{StepId, StepPresentation, WorkflowAction, WorkflowActionRequest, WorkflowStateSnapshot};
