use contracts::domain::a004_unit_conversion::MaterialUnitSet;

#[derive(Debug, Clone, PartialEq)]
pub struct UnitOption {
    pub unit_id: String,
    pub label: String,
    pub is_base: bool,
}

/// Что показывает колонка «Ед. изм.» строки документа
#[derive(Debug, Clone, PartialEq)]
pub enum UnitSelectorState {
    /// Материал не выбран: список заблокирован
    NoMaterial,
    /// Набор единиц материала ещё загружается
    Loading,
    /// Набор не загрузился: только повтор, настраивать единицы вслепую нельзя
    LoadFailed { material_id: String },
    /// У материала нет базовой единицы: вместо списка - действие «добавить единицу»
    NeedsConfiguration { material_id: String },
    Ready { options: Vec<UnitOption> },
}

impl UnitSelectorState {
    pub fn resolve(material_id: &str, set: Option<&MaterialUnitSet>, load_failed: bool) -> Self {
        if material_id.trim().is_empty() {
            return Self::NoMaterial;
        }
        let Some(set) = set else {
            if load_failed {
                return Self::LoadFailed {
                    material_id: material_id.to_string(),
                };
            }
            return Self::Loading;
        };
        if set.needs_configuration() {
            return Self::NeedsConfiguration {
                material_id: material_id.to_string(),
            };
        }

        let mut options: Vec<UnitOption> = set
            .units()
            .iter()
            .map(|u| UnitOption {
                unit_id: u.unit_id.clone(),
                label: u.label(),
                is_base: u.is_base_unit,
            })
            .collect();
        // базовая единица первой
        options.sort_by_key(|o| !o.is_base);
        Self::Ready { options }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::MaterialUnit;

    #[test]
    fn test_no_material_disables_selector() {
        assert_eq!(UnitSelectorState::resolve("", None, false), UnitSelectorState::NoMaterial);
    }

    #[test]
    fn test_missing_set_means_loading() {
        assert_eq!(UnitSelectorState::resolve("m1", None, false), UnitSelectorState::Loading);
    }

    #[test]
    fn test_failed_load_offers_retry() {
        assert_eq!(
            UnitSelectorState::resolve("m1", None, true),
            UnitSelectorState::LoadFailed {
                material_id: "m1".to_string()
            }
        );
    }

    #[test]
    fn test_zero_units_needs_configuration() {
        let set = MaterialUnitSet::new("m1", Vec::new());
        assert_eq!(
            UnitSelectorState::resolve("m1", Some(&set), false),
            UnitSelectorState::NeedsConfiguration {
                material_id: "m1".to_string()
            }
        );
    }

    #[test]
    fn test_ready_lists_base_first() {
        let set = MaterialUnitSet::new(
            "m1",
            vec![
                MaterialUnit::new("m1", "bag", false, 50.0),
                MaterialUnit::new("m1", "kg", true, 1.0),
            ],
        );
        match UnitSelectorState::resolve("m1", Some(&set), false) {
            UnitSelectorState::Ready { options } => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].unit_id, "kg");
                assert!(options[0].is_base);
                assert!(!options[1].is_base);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }
}
