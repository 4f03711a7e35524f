use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::UnitConversion;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct UnitConversionListState {
    pub items: Vec<UnitConversion>,
    pub units: Vec<Unit>,
    pub search_query: String,
    pub is_loaded: bool,
}

impl UnitConversionListState {
    /// Код единицы: из ответа сервера, затем из справочника, затем id
    pub fn unit_code(&self, code: Option<&str>, unit_id: &str) -> String {
        if let Some(code) = code.filter(|c| !c.trim().is_empty()) {
            return code.to_string();
        }
        self.units
            .iter()
            .find(|u| u.to_string_id() == unit_id)
            .map(|u| u.base.code.clone())
            .unwrap_or_else(|| unit_id.to_string())
    }

    pub fn from_code(&self, c: &UnitConversion) -> String {
        self.unit_code(c.from_unit_code.as_deref(), &c.from_unit_id)
    }

    pub fn to_code(&self, c: &UnitConversion) -> String {
        self.unit_code(c.to_unit_code.as_deref(), &c.to_unit_id)
    }

    pub fn visible(&self) -> Vec<UnitConversion> {
        let query = self.search_query.trim().to_lowercase();
        let mut rows: Vec<UnitConversion> = self
            .items
            .iter()
            .filter(|c| {
                query.is_empty()
                    || self.from_code(c).to_lowercase().contains(&query)
                    || self.to_code(c).to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        rows.sort_by_key(|c| (self.from_code(c), self.to_code(c)));
        rows
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|c| c.to_string_id() != id);
    }
}

pub fn create_state() -> RwSignal<UnitConversionListState> {
    RwSignal::new(UnitConversionListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::UnitConversionId;
    use contracts::domain::common::EntityMetadata;

    fn conversion(from: &str, to: &str, from_code: Option<&str>) -> UnitConversion {
        UnitConversion {
            id: UnitConversionId::new_v4(),
            from_unit_id: from.into(),
            to_unit_id: to.into(),
            conversion_factor: 1000.0,
            usage_count: 0,
            note: None,
            from_unit_code: from_code.map(String::from),
            to_unit_code: None,
            metadata: EntityMetadata::default(),
        }
    }

    #[test]
    fn test_unit_code_prefers_server_code() {
        let kg = Unit::new_for_insert("KG".into(), "Килограмм".into(), "кг".into(), None, None);
        let kg_id = kg.to_string_id();
        let state = UnitConversionListState {
            items: vec![conversion("t", &kg_id, Some("T"))],
            units: vec![kg],
            ..Default::default()
        };
        let c = &state.items[0];
        assert_eq!(state.from_code(c), "T");
        assert_eq!(state.to_code(c), "KG");
        assert_eq!(state.unit_code(None, "missing"), "missing");
    }

    #[test]
    fn test_search_by_unit_code() {
        let state = UnitConversionListState {
            items: vec![conversion("a", "b", Some("T")), conversion("c", "d", Some("BOX"))],
            search_query: "box".into(),
            ..Default::default()
        };
        assert_eq!(state.visible().len(), 1);
    }
}
