//! Единицы измерения материала
//!
//! - `panel`: вкладка «Единицы» карточки материала
//! - `add_dialog`: окно привязки единицы (в том числе из строки документа)

mod add_dialog;
mod panel;

pub use add_dialog::open_add_unit_dialog;
pub use panel::MaterialUnitsPanel;

use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::{MaterialUnit, MaterialUnitSet};
use contracts::shared::ReferenceItem;

/// Подпись привязанной единицы: данные сервера, иначе справочник
pub fn unit_label(mu: &MaterialUnit, units: &[Unit]) -> String {
    let from_server = mu
        .unit_name
        .as_deref()
        .or(mu.unit_code.as_deref())
        .filter(|s| !s.trim().is_empty());
    match from_server {
        Some(name) => name.to_string(),
        None => units
            .iter()
            .find(|u| u.to_string_id() == mu.unit_id)
            .map(Unit::display_label)
            .unwrap_or_else(|| mu.unit_id.clone()),
    }
}

/// Активные единицы, ещё не привязанные к материалу
pub fn available_units(set: &MaterialUnitSet, units: &[Unit]) -> Vec<ReferenceItem> {
    units
        .iter()
        .filter(|u| u.is_active() && !set.contains(&u.to_string_id()))
        .map(|u| ReferenceItem {
            id: u.to_string_id(),
            code: u.base.code.clone(),
            name: u.display_label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(code: &str, name: &str, symbol: &str) -> Unit {
        Unit::new_for_insert(code.into(), name.into(), symbol.into(), None, None)
    }

    #[test]
    fn test_available_units_skip_bound_and_inactive() {
        let kg = unit("KG", "Килограмм", "кг");
        let t = unit("T", "Тонна", "т");
        let mut old = unit("PD", "Пуд", "пуд");
        old.base.metadata.is_active = false;

        let set = MaterialUnitSet::new(
            "m1",
            vec![MaterialUnit::new("m1", &kg.to_string_id(), true, 1.0)],
        );
        let options = available_units(&set, &[kg, t, old]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].code, "T");
    }

    #[test]
    fn test_unit_label_falls_back_to_reference() {
        let kg = unit("KG", "Килограмм", "кг");
        let mu = MaterialUnit::new("m1", &kg.to_string_id(), true, 1.0);
        assert_eq!(unit_label(&mu, &[kg]), "Килограмм (кг)");

        let named = MaterialUnit {
            unit_name: Some("Тонна".into()),
            ..MaterialUnit::new("m1", "t", false, 1000.0)
        };
        assert_eq!(unit_label(&named, &[]), "Тонна");
        assert_eq!(unit_label(&MaterialUnit::new("m1", "x", false, 2.0), &[]), "x");
    }
}
