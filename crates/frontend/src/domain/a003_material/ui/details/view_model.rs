use crate::domain::{a001_unit, a002_material_category, a003_material::api};
use crate::shared::form_utils::{number_from_text, opt, optional_number_from_text, optional_number_to_text};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_plain;
use contracts::domain::a003_material::{Material, MaterialDto};
use contracts::shared::ReferenceItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct MaterialDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub category_id: RwSignal<String>,
    pub unit_id: RwSignal<String>,
    pub unit_price: RwSignal<String>,
    pub min_stock_level: RwSignal<String>,
    pub max_stock_level: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub categories: RwSignal<Vec<ReferenceItem>>,
    pub units: RwSignal<Vec<ReferenceItem>>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl MaterialDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            unit_id: RwSignal::new(String::new()),
            unit_price: RwSignal::new("0".to_string()),
            min_stock_level: RwSignal::new(String::new()),
            max_stock_level: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            categories: RwSignal::new(Vec::new()),
            units: RwSignal::new(Vec::new()),
            active_tab: RwSignal::new("general"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn set_tab(&self, tab: &'static str) {
        self.active_tab.set(tab);
    }

    pub fn load_references(&self) {
        let categories = self.categories;
        let units = self.units;
        spawn_local(async move {
            match a002_material_category::api::fetch_list().await {
                Ok(list) => {
                    let items = list
                        .iter()
                        .map(|c| ReferenceItem {
                            id: c.to_string_id(),
                            code: c.base.code.clone(),
                            name: c.name().to_string(),
                        })
                        .collect();
                    let _ = categories.try_set(items);
                }
                Err(e) => log::warn!("categories not loaded: {}", e),
            }
            match a001_unit::api::fetch_list().await {
                Ok(list) => {
                    let items = list
                        .iter()
                        .filter(|u| u.is_active())
                        .map(|u| ReferenceItem {
                            id: u.to_string_id(),
                            code: u.base.code.clone(),
                            name: u.display_label(),
                        })
                        .collect();
                    let _ = units.try_set(items);
                }
                Err(e) => log::warn!("units not loaded: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(m) => this.fill(&m),
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    pub fn to_dto(&self) -> MaterialDto {
        MaterialDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked().trim().to_string(),
            name: self.name.get_untracked().trim().to_string(),
            category_id: self.category_id.get_untracked(),
            unit_id: self.unit_id.get_untracked(),
            unit_price: number_from_text(&self.unit_price.get_untracked()),
            min_stock_level: optional_number_from_text(&self.min_stock_level.get_untracked()),
            max_stock_level: optional_number_from_text(&self.max_stock_level.get_untracked()),
            comment: opt(self.comment.get_untracked()),
        }
    }

    /// После сохранения нового материала карточка остаётся открытой:
    /// на вкладке «Единицы» сразу можно настроить единицы.
    pub fn save(&self, on_saved: Callback<Material>) {
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
                Ok(m) => {
                    this.fill(&m);
                    notifications.success("Материал сохранён");
                    on_saved.run(m);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    fn fill(&self, m: &Material) {
        let _ = self.id.try_set(Some(m.to_string_id()));
        let _ = self.code.try_set(m.base.code.clone());
        let _ = self.name.try_set(m.name().to_string());
        let _ = self.category_id.try_set(m.category_id.clone());
        let _ = self.unit_id.try_set(m.unit_id.clone());
        let _ = self.unit_price.try_set(format_plain(m.unit_price));
        let _ = self.min_stock_level.try_set(optional_number_to_text(m.min_stock_level));
        let _ = self.max_stock_level.try_set(optional_number_to_text(m.max_stock_level));
        let _ = self.comment.try_set(m.base.comment.clone().unwrap_or_default());
        let _ = self.is_active.try_set(m.is_active());
    }
}
