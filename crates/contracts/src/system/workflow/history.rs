use super::StepId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Запись журнала прохождения процесса
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowHistoryEntry {
    #[serde(rename = "stepId")]
    pub step_id: StepId,
    #[serde(rename = "stepName", default)]
    pub step_name: String,
    #[serde(rename = "actionKey", default)]
    pub action_key: Option<String>,
    #[serde(rename = "actionName", default)]
    pub action_name: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "occurredAt")]
    pub occurred_at: DateTime<Utc>,
}

impl WorkflowHistoryEntry {
    /// Подпись действия: имя, ключ или пусто (вход в шаг)
    pub fn action_label(&self) -> Option<&str> {
        self.action_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.action_key.as_deref())
    }
}

/// Журнал для ленты: новые записи сверху
pub fn newest_first(mut entries: Vec<WorkflowHistoryEntry>) -> Vec<WorkflowHistoryEntry> {
    entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(step: &str, hour: u32) -> WorkflowHistoryEntry {
        WorkflowHistoryEntry {
            step_id: StepId(step.into()),
            step_name: String::new(),
            action_key: Some("approve".into()),
            action_name: None,
            actor: None,
            comment: None,
            occurred_at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_history_is_sorted_newest_first() {
        let sorted = newest_first(vec![entry("a", 9), entry("c", 15), entry("b", 11)]);
        let steps: Vec<&str> = sorted.iter().map(|e| e.step_id.as_str()).collect();
        assert_eq!(steps, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_action_label_falls_back_to_key() {
        let mut e = entry("a", 9);
        assert_eq!(e.action_label(), Some("approve"));
        e.action_name = Some("Согласовать".into());
        assert_eq!(e.action_label(), Some("Согласовать"));
    }
}
