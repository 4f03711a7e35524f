use crate::domain::a001_unit::api;
use crate::shared::form_utils::{opt, optional_number_from_text, optional_number_to_text};
use crate::shared::notifications::use_notifications;
use contracts::domain::a001_unit::{Unit, UnitDto};
use contracts::shared::ReferenceItem;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Единицы, которые можно выбрать базовой: все, кроме самой единицы
pub fn base_candidates(units: &[Unit], self_id: Option<&str>) -> Vec<ReferenceItem> {
    units
        .iter()
        .filter(|u| Some(u.to_string_id().as_str()) != self_id)
        .map(|u| ReferenceItem {
            id: u.to_string_id(),
            code: u.base.code.clone(),
            name: u.display_label(),
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct UnitDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub symbol: RwSignal<String>,
    pub base_unit_id: RwSignal<String>,
    pub conversion_rate: RwSignal<String>,
    pub comment: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub all_units: RwSignal<Vec<Unit>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl UnitDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            symbol: RwSignal::new(String::new()),
            base_unit_id: RwSignal::new(String::new()),
            conversion_rate: RwSignal::new(String::new()),
            comment: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            all_units: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        Signal::derive(move || saving.get() || loading.get())
    }

    /// Без базовой единицы коэффициент не вводится
    pub fn has_base(&self) -> Signal<bool> {
        let base = self.base_unit_id;
        Signal::derive(move || !base.get().trim().is_empty())
    }

    pub fn base_options(&self) -> Signal<Vec<ReferenceItem>> {
        let all_units = self.all_units;
        let id = self.id;
        Signal::derive(move || {
            let self_id = id.get();
            all_units.with(|units| base_candidates(units, self_id.as_deref()))
        })
    }

    pub fn load_units(&self) {
        let all_units = self.all_units;
        spawn_local(async move {
            match api::fetch_list().await {
                Ok(units) => {
                    let _ = all_units.try_set(units);
                }
                Err(e) => log::warn!("units for base selector not loaded: {}", e),
            }
        });
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.error.set(None);
        this.id.set(Some(id.clone()));

        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(unit) => this.from_aggregate(&unit),
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    pub fn to_dto(&self) -> UnitDto {
        let base_unit_id = opt(self.base_unit_id.get_untracked());
        let conversion_rate = if base_unit_id.is_some() {
            optional_number_from_text(&self.conversion_rate.get_untracked())
        } else {
            None
        };
        UnitDto {
            id: self.id.get_untracked(),
            code: self.code.get_untracked().trim().to_string(),
            name: self.name.get_untracked().trim().to_string(),
            symbol: self.symbol.get_untracked().trim().to_string(),
            base_unit_id,
            conversion_rate,
            comment: opt(self.comment.get_untracked()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.to_dto().validate()
    }

    /// `on_saved` получает сохранённую единицу
    pub fn save(&self, on_saved: Callback<Unit>) {
        if self.saving.get_untracked() {
            return;
        }
        if let Err(msg) = self.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = *self;
        let notifications = use_notifications();
        let dto = this.to_dto();
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match api::save(&dto).await {
                Ok(unit) => {
                    this.from_aggregate(&unit);
                    notifications.success("Единица измерения сохранена");
                    on_saved.run(unit);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    fn from_aggregate(&self, unit: &Unit) {
        let _ = self.id.try_set(Some(unit.to_string_id()));
        let _ = self.code.try_set(unit.base.code.clone());
        let _ = self.name.try_set(unit.name().to_string());
        let _ = self.symbol.try_set(unit.symbol.clone());
        let _ = self.base_unit_id.try_set(unit.base_unit_id.clone().unwrap_or_default());
        let _ = self
            .conversion_rate
            .try_set(optional_number_to_text(unit.conversion_rate));
        let _ = self.comment.try_set(unit.base.comment.clone().unwrap_or_default());
        let _ = self.is_active.try_set(unit.is_active());
    }
}

impl Default for UnitDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_not_its_own_base_candidate() {
        let kg = Unit::new_for_insert("KG".into(), "Килограмм".into(), "кг".into(), None, None);
        let t = Unit::new_for_insert("T".into(), "Тонна".into(), "т".into(), None, None);
        let kg_id = kg.to_string_id();
        let candidates = base_candidates(&[kg, t], Some(&kg_id));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].code, "T");
        assert_eq!(candidates[0].label(), "T - Тонна (т)");
    }
}
