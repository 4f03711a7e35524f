use serde::{Deserialize, Serialize};

/// Определение процесса: BPMN-схема, по которой идёт экземпляр
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowDefinition {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub version: i32,
    #[serde(rename = "bpmnXml", default)]
    pub bpmn_xml: String,
}

impl WorkflowDefinition {
    pub fn title(&self) -> String {
        if self.version > 0 {
            format!("{} (v{})", self.name, self.version)
        } else {
            self.name.clone()
        }
    }
}
