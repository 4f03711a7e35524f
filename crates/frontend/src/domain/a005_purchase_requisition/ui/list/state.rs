use contracts::domain::a005_purchase_requisition::PurchaseRequisition;
use contracts::shared::ReferenceItem;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct PurchaseRequisitionListState {
    pub items: Vec<PurchaseRequisition>,
    pub warehouses: Vec<ReferenceItem>,
    pub search_query: String,
    pub is_loaded: bool,
}

impl PurchaseRequisitionListState {
    /// Новые документы сверху; поиск по номеру, инициатору и подразделению
    pub fn visible(&self) -> Vec<PurchaseRequisition> {
        let query = self.search_query.trim().to_lowercase();
        let mut items: Vec<PurchaseRequisition> = self
            .items
            .iter()
            .filter(|r| {
                query.is_empty()
                    || r.document_no.to_lowercase().contains(&query)
                    || r.requester_name.to_lowercase().contains(&query)
                    || r
                        .department_name
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
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

    pub fn warehouse_name(&self, warehouse_id: &str) -> String {
        self.warehouses
            .iter()
            .find(|w| w.id == warehouse_id)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| warehouse_id.to_string())
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|r| r.to_string_id() != id);
    }
}

pub fn create_state() -> RwSignal<PurchaseRequisitionListState> {
    RwSignal::new(PurchaseRequisitionListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn requisition(id: &str, no: &str, date: &str, requester: &str) -> PurchaseRequisition {
        serde_json::from_value(json!({
            "id": id,
            "code": no,
            "description": no,
            "documentNo": no,
            "documentDate": date,
            "requesterName": requester,
            "warehouseId": "w1",
        }))
        .unwrap()
    }

    fn state() -> PurchaseRequisitionListState {
        PurchaseRequisitionListState {
            items: vec![
                requisition("6f1c1b5e-0a4b-4c43-9d44-5a4d6f2f7f11", "ЗЯ-1", "2024-03-01", "Петров"),
                requisition("6f1c1b5e-0a4b-4c43-9d44-5a4d6f2f7f12", "ЗЯ-2", "2024-03-05", "Сидорова"),
            ],
            warehouses: vec![ReferenceItem {
                id: "w1".into(),
                code: "01".into(),
                name: "Центральный склад".into(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_newest_first_and_search() {
        let mut s = state();
        let visible = s.visible();
        assert_eq!(visible[0].document_no, "ЗЯ-2");

        s.search_query = "петр".into();
        let visible = s.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].document_no, "ЗЯ-1");
    }

    #[test]
    fn test_warehouse_name_falls_back_to_id() {
        let s = state();
        assert_eq!(s.warehouse_name("w1"), "Центральный склад");
        assert_eq!(s.warehouse_name("w9"), "w9");
    }

    #[test]
    fn test_remove() {
        let mut s = state();
        s.remove("6f1c1b5e-0a4b-4c43-9d44-5a4d6f2f7f11");
        assert_eq!(s.items.len(), 1);
    }
}
