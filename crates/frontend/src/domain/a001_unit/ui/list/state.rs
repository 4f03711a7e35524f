use contracts::domain::a001_unit::Unit;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct UnitListState {
    pub items: Vec<Unit>,
    pub search_query: String,
    pub show_inactive: bool,
    pub is_loaded: bool,
}

impl UnitListState {
    /// Строки для таблицы: поиск по коду, наименованию и обозначению
    pub fn visible(&self) -> Vec<Unit> {
        let query = self.search_query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|u| self.show_inactive || u.is_active())
            .filter(|u| {
                query.is_empty()
                    || u.base.code.to_lowercase().contains(&query)
                    || u.name().to_lowercase().contains(&query)
                    || u.symbol.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Подпись базовой единицы по её id
    pub fn base_label(&self, base_unit_id: Option<&str>) -> String {
        let Some(id) = base_unit_id else {
            return String::new();
        };
        self.items
            .iter()
            .find(|u| u.to_string_id() == id)
            .map(|u| u.display_label())
            .unwrap_or_else(|| id.to_string())
    }
}

pub fn create_state() -> RwSignal<UnitListState> {
    RwSignal::new(UnitListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(code: &str, name: &str, symbol: &str, active: bool) -> Unit {
        let mut u = Unit::new_for_insert(code.into(), name.into(), symbol.into(), None, None);
        u.base.metadata.is_active = active;
        u
    }

    #[test]
    fn test_visible_hides_inactive_by_default() {
        let state = UnitListState {
            items: vec![unit("KG", "Килограмм", "кг", true), unit("LB", "Фунт", "lb", false)],
            ..Default::default()
        };
        assert_eq!(state.visible().len(), 1);

        let state = UnitListState {
            show_inactive: true,
            ..state
        };
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn test_search_matches_symbol() {
        let state = UnitListState {
            items: vec![unit("KG", "Килограмм", "кг", true), unit("PC", "Штука", "шт", true)],
            search_query: "ШТ".into(),
            ..Default::default()
        };
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].base.code, "PC");
    }

    #[test]
    fn test_base_label_falls_back_to_id() {
        let kg = unit("KG", "Килограмм", "кг", true);
        let kg_id = kg.to_string_id();
        let state = UnitListState {
            items: vec![kg],
            ..Default::default()
        };
        assert_eq!(state.base_label(Some(&kg_id)), "Килограмм (кг)");
        assert_eq!(state.base_label(Some("x")), "x");
        assert_eq!(state.base_label(None), "");
    }
}
