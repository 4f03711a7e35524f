use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор категории материалов
    MaterialCategoryId
);

/// Категория материалов (допускается одна родительская категория)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialCategory {
    #[serde(flatten)]
    pub base: BaseAggregate<MaterialCategoryId>,

    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,

    /// Количество материалов в категории (считает сервер)
    #[serde(rename = "materialCount", default)]
    pub material_count: i32,
}

impl MaterialCategory {
    pub fn new_for_insert(code: String, name: String, parent_id: Option<String>) -> Self {
        Self {
            base: BaseAggregate::new(MaterialCategoryId::new_v4(), code, name),
            parent_id,
            material_count: 0,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn name(&self) -> &str {
        &self.base.description
    }

    pub fn update(&mut self, dto: &MaterialCategoryDto) {
        self.base.code = dto.code.clone();
        self.base.description = dto.name.clone();
        self.base.comment = dto.comment.clone();
        self.parent_id = dto.parent_id.clone().filter(|s| !s.trim().is_empty());
    }
}

impl AggregateRoot for MaterialCategory {
    type Id = MaterialCategoryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "material_category"
    }

    fn element_name() -> &'static str {
        "Категория материалов"
    }

    fn list_name() -> &'static str {
        "Категории материалов"
    }
}

/// DTO для создания/обновления категории
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MaterialCategoryDto {
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<String>,
    pub comment: Option<String>,
}

impl MaterialCategoryDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("Код не может быть пустым".into());
        }
        if self.name.trim().is_empty() {
            return Err("Наименование не может быть пустым".into());
        }
        if let (Some(id), Some(parent)) = (self.id.as_deref(), self.parent_id.as_deref()) {
            if id == parent {
                return Err("Категория не может быть родителем самой себя".into());
            }
        }
        Ok(())
    }
}

impl From<&MaterialCategory> for MaterialCategoryDto {
    fn from(c: &MaterialCategory) -> Self {
        Self {
            id: Some(c.base.id.as_string()),
            code: c.base.code.clone(),
            name: c.base.description.clone(),
            parent_id: c.parent_id.clone(),
            comment: c.base.comment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_cannot_parent_itself() {
        let dto = MaterialCategoryDto {
            id: Some("c1".into()),
            code: "RAW".into(),
            name: "Сырьё".into(),
            parent_id: Some("c1".into()),
            comment: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_blank_parent_is_cleared_on_update() {
        let mut cat = MaterialCategory::new_for_insert("RAW".into(), "Сырьё".into(), None);
        let mut dto = MaterialCategoryDto::from(&cat);
        dto.parent_id = Some(String::new());
        cat.update(&dto);
        assert_eq!(cat.parent_id, None);
    }
}
