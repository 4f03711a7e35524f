use super::unit_selector::UnitSelectorState;
use crate::domain::{a001_unit, a003_material, a004_unit_conversion};
use crate::shared::notifications::{use_notifications, NotificationService};
use contracts::shared::ApiError;
use contracts::domain::a001_unit::Unit;
use contracts::domain::a003_material::Material;
use contracts::domain::a004_unit_conversion::MaterialUnitSet;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{HashMap, HashSet};

/// Данные, нужные редактору строк: материалы, единицы и наборы единиц
/// по материалам. Наборы грузятся лениво, по мере выбора материалов.
#[derive(Clone, Copy)]
pub struct LineCatalog {
    pub materials: RwSignal<Vec<Material>>,
    pub units: RwSignal<Vec<Unit>>,
    pub unit_sets: RwSignal<HashMap<String, MaterialUnitSet>>,
    pending: RwSignal<HashSet<String>>,
    /// Материалы, чей набор не загрузился (сеть, сервер)
    failed: RwSignal<HashSet<String>>,
    notifications: NotificationService,
}

impl Default for LineCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCatalog {
    pub fn new() -> Self {
        Self {
            materials: RwSignal::new(Vec::new()),
            units: RwSignal::new(Vec::new()),
            unit_sets: RwSignal::new(HashMap::new()),
            pending: RwSignal::new(HashSet::new()),
            failed: RwSignal::new(HashSet::new()),
            notifications: use_notifications(),
        }
    }

    pub fn load_references(&self) {
        let materials = self.materials;
        let units = self.units;
        spawn_local(async move {
            match a003_material::api::fetch_list().await {
                Ok(list) => {
                    let _ = materials.try_set(list);
                }
                Err(e) => log::warn!("materials not loaded: {}", e),
            }
            match a001_unit::api::fetch_list().await {
                Ok(list) => {
                    let _ = units.try_set(list);
                }
                Err(e) => log::warn!("units not loaded: {}", e),
            }
        });
    }

    /// Загрузить набор единиц материала, если его ещё нет
    pub fn ensure_unit_set(&self, material_id: &str) {
        if material_id.is_empty() {
            return;
        }
        // после ошибки - только явный повтор из строки
        let known = self.unit_sets.with_untracked(|m| m.contains_key(material_id))
            || self.pending.with_untracked(|p| p.contains(material_id))
            || self.failed.with_untracked(|f| f.contains(material_id));
        if !known {
            self.reload_unit_set(material_id);
        }
    }

    pub fn reload_unit_set(&self, material_id: &str) {
        let material_id = material_id.to_string();
        let unit_sets = self.unit_sets;
        let pending = self.pending;
        let failed = self.failed;
        let notifications = self.notifications;
        pending.update(|p| {
            p.insert(material_id.clone());
        });
        failed.update(|f| {
            f.remove(&material_id);
        });

        spawn_local(async move {
            let result = a004_unit_conversion::api::get_units_for_material(&material_id).await;
            if let Err(e) = &result {
                log::warn!("units of material {} not loaded: {}", material_id, e);
                notifications.report(e);
            }
            let _ = pending.try_update(|p| {
                p.remove(&material_id);
            });
            let (Some(mut sets), Some(mut failed_now)) =
                (unit_sets.try_get_untracked(), failed.try_get_untracked())
            else {
                return;
            };
            record_unit_set_load(&mut sets, &mut failed_now, material_id, result);
            let _ = failed.try_set(failed_now);
            let _ = unit_sets.try_set(sets);
        });
    }

    /// Реактивно: состояние колонки единиц для материала
    pub fn selector_state(&self, material_id: &str) -> UnitSelectorState {
        let load_failed = self.failed.with(|f| f.contains(material_id));
        self.unit_sets
            .with(|m| UnitSelectorState::resolve(material_id, m.get(material_id), load_failed))
    }

    pub fn unit_set(&self, material_id: &str) -> Option<MaterialUnitSet> {
        self.unit_sets.with_untracked(|m| m.get(material_id).cloned())
    }

    /// Снимок для проверки строк перед сохранением
    pub fn registered_units(&self) -> impl Fn(&str, &str) -> bool {
        let sets = self.unit_sets.get_untracked();
        move |material_id: &str, unit_id: &str| {
            sets.get(material_id)
                .map(|s| s.contains(unit_id))
                .unwrap_or(false)
        }
    }
}

/// Итог загрузки набора единиц. При ошибке прежний набор снимается:
/// пустой набор означал бы «единицы не настроены», а это неизвестно.
fn record_unit_set_load(
    sets: &mut HashMap<String, MaterialUnitSet>,
    failed: &mut HashSet<String>,
    material_id: String,
    result: Result<MaterialUnitSet, ApiError>,
) {
    match result {
        Ok(set) => {
            failed.remove(&material_id);
            sets.insert(material_id, set);
        }
        Err(_) => {
            sets.remove(&material_id);
            failed.insert(material_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::MaterialUnit;

    fn resolve(sets: &HashMap<String, MaterialUnitSet>, failed: &HashSet<String>, id: &str) -> UnitSelectorState {
        UnitSelectorState::resolve(id, sets.get(id), failed.contains(id))
    }

    #[test]
    fn test_transport_error_never_means_unconfigured() {
        let mut sets = HashMap::new();
        let mut failed = HashSet::new();
        record_unit_set_load(
            &mut sets,
            &mut failed,
            "m1".to_string(),
            Err(ApiError::Transport("network down".into())),
        );
        let state = resolve(&sets, &failed, "m1");
        assert!(!matches!(state, UnitSelectorState::NeedsConfiguration { .. }));
        assert_eq!(state, UnitSelectorState::LoadFailed { material_id: "m1".into() });
    }

    #[test]
    fn test_failed_reload_drops_stale_set() {
        let mut sets = HashMap::new();
        let mut failed = HashSet::new();
        let set = MaterialUnitSet::new("m1", vec![MaterialUnit::new("m1", "kg", true, 1.0)]);
        record_unit_set_load(&mut sets, &mut failed, "m1".to_string(), Ok(set));
        assert!(matches!(resolve(&sets, &failed, "m1"), UnitSelectorState::Ready { .. }));

        record_unit_set_load(&mut sets, &mut failed, "m1".to_string(), Err(ApiError::Transport("timeout".into())));
        assert!(matches!(resolve(&sets, &failed, "m1"), UnitSelectorState::LoadFailed { .. }));
    }

    #[test]
    fn test_successful_retry_clears_failure() {
        let mut sets = HashMap::new();
        let mut failed = HashSet::new();
        record_unit_set_load(&mut sets, &mut failed, "m1".to_string(), Err(ApiError::Transport("x".into())));
        record_unit_set_load(&mut sets, &mut failed, "m1".to_string(), Ok(MaterialUnitSet::new("m1", Vec::new())));
        assert_eq!(
            resolve(&sets, &failed, "m1"),
            UnitSelectorState::NeedsConfiguration { material_id: "m1".into() }
        );
    }
}
