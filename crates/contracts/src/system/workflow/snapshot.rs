use crate::shared::{ApiError, TokenPresentation};
use serde::{Deserialize, Serialize};

/// Идентификатор шага процесса. Непрозрачная строка сервера
/// (обычно id элемента BPMN-схемы).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct StepId(pub String);

impl StepId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Подпись и окраска шага
pub type StepPresentation = TokenPresentation;

/// Действие, доступное на текущем шаге
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowAction {
    pub key: String,
    pub name: String,
}

/// Снимок состояния экземпляра процесса
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStateSnapshot {
    #[serde(rename = "instanceId")]
    pub instance_id: String,

    #[serde(rename = "definitionId")]
    pub definition_id: String,

    #[serde(rename = "stepId", default)]
    pub step_id: StepId,

    #[serde(rename = "stepName", default)]
    pub step_name: String,

    #[serde(rename = "isComplete", default)]
    pub is_complete: bool,

    #[serde(rename = "availableActions", default)]
    pub available_actions: Vec<WorkflowAction>,
}

impl WorkflowStateSnapshot {
    pub fn step_presentation(&self) -> StepPresentation {
        StepPresentation::resolve(self.step_id.as_str(), &self.step_name)
    }

    /// Действия, которые можно предложить пользователю
    pub fn offered_actions(&self) -> &[WorkflowAction] {
        if self.is_complete {
            &[]
        } else {
            &self.available_actions
        }
    }

    /// Собрать запрос на действие. Действие должно присутствовать
    /// в текущем снимке.
    pub fn prepare_action(&self, action_key: &str, comment: &str) -> Result<WorkflowActionRequest, ApiError> {
        if !self.offered_actions().iter().any(|a| a.key == action_key) {
            return Err(ApiError::Validation(
                "Действие недоступно на текущем шаге".to_string(),
            ));
        }
        let comment = comment.trim();
        Ok(WorkflowActionRequest {
            action_key: action_key.to_string(),
            comment: if comment.is_empty() { None } else { Some(comment.to_string()) },
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowActionRequest {
    #[serde(rename = "actionKey")]
    pub action_key: String,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::TokenTone;

    fn snapshot(step: &str, name: &str, complete: bool) -> WorkflowStateSnapshot {
        WorkflowStateSnapshot {
            instance_id: "i1".into(),
            definition_id: "d1".into(),
            step_id: StepId(step.into()),
            step_name: name.into(),
            is_complete: complete,
            available_actions: vec![
                WorkflowAction { key: "approve".into(), name: "Согласовать".into() },
                WorkflowAction { key: "reject".into(), name: "Отклонить".into() },
            ],
        }
    }

    #[test]
    fn test_unknown_step_is_plain_label() {
        let p = snapshot("Task_BudgetCheck", "Проверка бюджета", false).step_presentation();
        assert_eq!(p.label, "Проверка бюджета");
        assert_eq!(p.tone, TokenTone::Neutral);
    }

    #[test]
    fn test_complete_snapshot_offers_no_actions() {
        let s = snapshot("completed", "", true);
        assert!(s.offered_actions().is_empty());
        assert!(s.prepare_action("approve", "").is_err());
    }

    #[test]
    fn test_only_offered_actions_can_be_taken() {
        let s = snapshot("Task_1", "Руководитель", false);
        let request = s.prepare_action("approve", "  ok ").unwrap();
        assert_eq!(request.action_key, "approve");
        assert_eq!(request.comment.as_deref(), Some("ok"));
        assert!(s.prepare_action("escalate", "").is_err());
    }

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{"instanceId":"i","definitionId":"d","stepId":"Task_7","stepName":"Склад",
            "isComplete":false,"availableActions":[{"key":"done","name":"Готово"}]}"#;
        let s: WorkflowStateSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(s.step_id.as_str(), "Task_7");
        assert_eq!(s.offered_actions().len(), 1);
    }
}
