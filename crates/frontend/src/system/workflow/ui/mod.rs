mod diagram;
mod history;
mod notes;
mod panel;

pub use diagram::WorkflowDiagram;
pub use panel::WorkflowPanel;
