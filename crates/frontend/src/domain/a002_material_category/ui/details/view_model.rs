use crate::domain::a002_material_category::api;
use crate::shared::form_utils::opt;
use crate::shared::notifications::use_notifications;
use contracts::domain::a002_material_category::{MaterialCategory, MaterialCategoryDto};
use contracts::shared::ReferenceItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Родителем может быть только категория верхнего уровня, кроме самой себя
pub fn parent_candidates(all: &[MaterialCategory], self_id: Option<&str>) -> Vec<ReferenceItem> {
    all.iter()
        .filter(|c| c.parent_id.is_none())
        .filter(|c| Some(c.to_string_id().as_str()) != self_id)
        .map(|c| ReferenceItem {
            id: c.to_string_id(),
            code: c.base.code.clone(),
            name: c.name().to_string(),
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct MaterialCategoryDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub parent_id: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub all_categories: RwSignal<Vec<MaterialCategory>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl MaterialCategoryDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            parent_id: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            all_categories: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn parent_options(&self) -> Signal<Vec<ReferenceItem>> {
        let all = self.all_categories;
        let id = self.id;
        Signal::derive(move || {
            let self_id = id.get();
            all.with(|list| parent_candidates(list, self_id.as_deref()))
        })
    }

    pub fn load_categories(&self) {
        let all = self.all_categories;
        spawn_local(async move {
            match api::fetch_list().await {
                Ok(list) => {
                    let _ = all.try_set(list);
                }
                Err(e) => log::warn!("categories for parent selector not loaded: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(category) => this.fill(&category),
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    pub fn to_dto(&self) -> MaterialCategoryDto {
        MaterialCategoryDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked().trim().to_string(),
            name: self.name.get_untracked().trim().to_string(),
            parent_id: opt(self.parent_id.get_untracked()),
            comment: opt(self.comment.get_untracked()),
        }
    }

    pub fn save(&self, on_saved: Callback<MaterialCategory>) {
        if self.saving.get_untracked() {
            return;
        }
        let dto = self.to_dto();
        if let Err(msg) = dto.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = *self;
        let notifications = use_notifications();
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(category) => {
                    this.fill(&category);
                    notifications.success("Категория сохранена");
                    on_saved.run(category);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    fn fill(&self, c: &MaterialCategory) {
        let _ = self.id.try_set(Some(c.to_string_id()));
        let _ = self.code.try_set(c.base.code.clone());
        let _ = self.name.try_set(c.name().to_string());
        let _ = self.parent_id.try_set(c.parent_id.clone().unwrap_or_default());
        let _ = self.comment.try_set(c.base.comment.clone().unwrap_or_default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_top_level_categories_can_be_parents() {
        let raw = MaterialCategory::new_for_insert("RAW".into(), "Сырьё".into(), None);
        let metal = MaterialCategory::new_for_insert(
            "MET".into(),
            "Металл".into(),
            Some(raw.to_string_id()),
        );
        let pack = MaterialCategory::new_for_insert("PACK".into(), "Упаковка".into(), None);
        let pack_id = pack.to_string_id();

        let options = parent_candidates(&[raw, metal, pack], Some(&pack_id));
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].code, "RAW");
    }
}
