use serde::{Deserialize, Serialize};

/// Элемент справочника для выпадающих списков (поставщики, склады)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: String,
    #[serde(default)]
    pub code: String,
    pub name: String,
}

impl ReferenceItem {
    /// Подпись в списке: "КОД - Наименование" или только наименование
    pub fn label(&self) -> String {
        if self.code.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.code, self.name)
        }
    }
}
