use contracts::domain::a002_material_category::MaterialCategory;
use contracts::domain::a003_material::Material;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct MaterialListState {
    pub items: Vec<Material>,
    pub categories: Vec<MaterialCategory>,
    pub search_query: String,
    /// Пустая строка - все категории
    pub category_filter: String,
    pub show_inactive: bool,
    pub is_loaded: bool,
}

impl MaterialListState {
    pub fn visible(&self) -> Vec<Material> {
        let query = self.search_query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|m| self.show_inactive || m.is_active())
            .filter(|m| self.category_filter.is_empty() || m.category_id == self.category_filter)
            .filter(|m| {
                query.is_empty()
                    || m.base.code.to_lowercase().contains(&query)
                    || m.name().to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Имя категории из ответа сервера или из загруженного справочника
    pub fn category_name(&self, m: &Material) -> String {
        if let Some(name) = m.category_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.categories
            .iter()
            .find(|c| c.to_string_id() == m.category_id)
            .map(|c| c.name().to_string())
            .unwrap_or_default()
    }
}

pub fn create_state() -> RwSignal<MaterialListState> {
    RwSignal::new(MaterialListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(code: &str, category: &str, active: bool) -> Material {
        let mut m = Material::new_for_insert(code.into(), format!("Материал {}", code), category.into(), "kg".into(), 10.0);
        m.base.metadata.is_active = active;
        m
    }

    #[test]
    fn test_filters_combine() {
        let state = MaterialListState {
            items: vec![material("A1", "c1", true), material("A2", "c2", true), material("B1", "c1", false)],
            category_filter: "c1".into(),
            ..Default::default()
        };
        assert_eq!(state.visible().len(), 1);

        let state = MaterialListState {
            show_inactive: true,
            search_query: "b".into(),
            ..state
        };
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].base.code, "B1");
    }

    #[test]
    fn test_category_name_from_reference() {
        let cat = MaterialCategory::new_for_insert("RAW".into(), "Сырьё".into(), None);
        let m = material("A1", &cat.to_string_id(), true);
        let state = MaterialListState {
            categories: vec![cat],
            ..Default::default()
        };
        assert_eq!(state.category_name(&m), "Сырьё");
    }
}
