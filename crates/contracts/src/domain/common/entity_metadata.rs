use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Дата создания записи
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Дата последнего обновления
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Мягкое удаление (soft delete)
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
    /// Активна ли запись (деактивация вместо удаления для справочников)
    #[serde(rename = "isActive", default = "default_active")]
    pub is_active: bool,
    /// Версия для optimistic locking
    #[serde(default)]
    pub version: i32,
}

fn default_active() -> bool {
    true
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            is_active: true,
            version: 0,
        }
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_to_active() {
        let json = r#"{"createdAt":"2025-01-10T08:00:00Z","updatedAt":"2025-01-11T08:00:00Z"}"#;
        let meta: EntityMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.is_active);
        assert!(!meta.is_deleted);
        assert_eq!(meta.version, 0);
    }
}
