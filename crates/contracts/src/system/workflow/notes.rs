use crate::shared::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Заметка к экземпляру процесса
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowNote {
    pub id: String,
    #[serde(rename = "instanceId")]
    pub instance_id: String,
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateWorkflowNoteRequest {
    #[serde(rename = "instanceId")]
    pub instance_id: String,
    pub text: String,
}

impl CreateWorkflowNoteRequest {
    /// Пустая заметка не отправляется
    pub fn new(instance_id: &str, text: &str) -> Result<Self, ApiError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::Validation("Текст заметки не может быть пустым".into()));
        }
        Ok(Self {
            instance_id: instance_id.to_string(),
            text: text.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_note_is_rejected() {
        assert!(CreateWorkflowNoteRequest::new("i1", "   \n").is_err());
        let ok = CreateWorkflowNoteRequest::new("i1", " Проверить цену ").unwrap();
        assert_eq!(ok.text, "Проверить цену");
    }
}
