use contracts::domain::a007_rfq::Rfq;
use contracts::shared::ReferenceItem;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct RfqListState {
    pub items: Vec<Rfq>,
    pub suppliers: Vec<ReferenceItem>,
    pub search_query: String,
    /// Только запросы, созданные на основании заявок
    pub only_from_requisition: bool,
    pub is_loaded: bool,
}

impl RfqListState {
    pub fn visible(&self) -> Vec<Rfq> {
        let query = self.search_query.trim().to_lowercase();
        let mut items: Vec<Rfq> = self
            .items
            .iter()
            .filter(|q| !self.only_from_requisition || q.requisition_id.is_some())
            .filter(|q| {
                query.is_empty()
                    || q.document_no.to_lowercase().contains(&query)
                    || self.supplier_name(q).to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            b.document_date
                .cmp(&a.document_date)
                .then_with(|| b.document_no.cmp(&a.document_no))
        });
        items
    }

    /// Имя поставщика из ответа сервера или из справочника
    pub fn supplier_name(&self, q: &Rfq) -> String {
        if let Some(name) = q.supplier_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.suppliers
            .iter()
            .find(|s| s.id == q.supplier_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| q.supplier_id.clone())
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|q| q.to_string_id() != id);
    }
}

pub fn create_state() -> RwSignal<RfqListState> {
    RwSignal::new(RfqListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rfq(id: &str, no: &str, supplier: &str, requisition: Option<&str>) -> Rfq {
        serde_json::from_value(json!({
            "id": id,
            "code": no,
            "description": no,
            "documentNo": no,
            "documentDate": "2024-04-01",
            "supplierId": supplier,
            "requisitionId": requisition,
        }))
        .unwrap()
    }

    fn state() -> RfqListState {
        RfqListState {
            items: vec![
                rfq("0b0e4b1c-5f7e-4d0c-8d1c-1a2b3c4d5e61", "КП-1", "s1", None),
                rfq("0b0e4b1c-5f7e-4d0c-8d1c-1a2b3c4d5e62", "КП-2", "s2", Some("r1")),
            ],
            suppliers: vec![
                ReferenceItem { id: "s1".into(), code: "001".into(), name: "ООО Металл".into() },
                ReferenceItem { id: "s2".into(), code: "002".into(), name: "АО Крепёж".into() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_search_by_supplier_name() {
        let mut s = state();
        s.search_query = "металл".into();
        let visible = s.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].document_no, "КП-1");
    }

    #[test]
    fn test_only_from_requisition() {
        let mut s = state();
        s.only_from_requisition = true;
        let visible = s.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].document_no, "КП-2");
    }

    #[test]
    fn test_supplier_name_prefers_server_value() {
        let s = state();
        let mut q = s.items[0].clone();
        assert_eq!(s.supplier_name(&q), "ООО Металл");
        q.supplier_name = Some("Металл (сервер)".into());
        assert_eq!(s.supplier_name(&q), "Металл (сервер)");
        q.supplier_name = None;
        q.supplier_id = "s9".into();
        assert_eq!(s.supplier_name(&q), "s9");
    }
}
