use contracts::domain::a002_material_category::MaterialCategory;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct MaterialCategoryListState {
    pub items: Vec<MaterialCategory>,
    pub search_query: String,
    pub is_loaded: bool,
}

impl MaterialCategoryListState {
    /// Родительские категории идут перед вложенными, внутри - по коду
    pub fn visible(&self) -> Vec<MaterialCategory> {
        let query = self.search_query.trim().to_lowercase();
        let mut rows: Vec<MaterialCategory> = self
            .items
            .iter()
            .filter(|c| {
                query.is_empty()
                    || c.base.code.to_lowercase().contains(&query)
                    || c.name().to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (self.sort_path(a), a.base.code.as_str()).cmp(&(self.sort_path(b), b.base.code.as_str()))
        });
        rows
    }

    fn sort_path(&self, c: &MaterialCategory) -> String {
        match c.parent_id.as_deref().and_then(|p| self.find(p)) {
            Some(parent) => format!("{}/{}", parent.base.code, c.base.code),
            None => c.base.code.clone(),
        }
    }

    fn find(&self, id: &str) -> Option<&MaterialCategory> {
        self.items.iter().find(|c| c.to_string_id() == id)
    }

    pub fn parent_name(&self, parent_id: Option<&str>) -> String {
        parent_id
            .and_then(|id| self.find(id))
            .map(|p| p.name().to_string())
            .unwrap_or_default()
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|c| c.to_string_id() != id);
    }
}

pub fn create_state() -> RwSignal<MaterialCategoryListState> {
    RwSignal::new(MaterialCategoryListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_follow_their_parent() {
        let raw = MaterialCategory::new_for_insert("RAW".into(), "Сырьё".into(), None);
        let metal = MaterialCategory::new_for_insert(
            "MET".into(),
            "Металл".into(),
            Some(raw.to_string_id()),
        );
        let box_ = MaterialCategory::new_for_insert("BOX".into(), "Упаковка".into(), None);
        let state = MaterialCategoryListState {
            items: vec![metal, box_, raw.clone()],
            ..Default::default()
        };
        let codes: Vec<String> = state.visible().into_iter().map(|c| c.base.code).collect();
        assert_eq!(codes, vec!["BOX", "RAW", "MET"]);
        assert_eq!(state.parent_name(Some(&raw.to_string_id())), "Сырьё");
    }

    #[test]
    fn test_remove_drops_row() {
        let raw = MaterialCategory::new_for_insert("RAW".into(), "Сырьё".into(), None);
        let id = raw.to_string_id();
        let mut state = MaterialCategoryListState {
            items: vec![raw],
            ..Default::default()
        };
        state.remove(&id);
        assert!(state.items.is_empty());
    }
}
