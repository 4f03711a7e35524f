use contracts::domain::a006_purchase_order::PurchaseOrder;
use contracts::shared::ReferenceItem;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct PurchaseOrderListState {
    pub items: Vec<PurchaseOrder>,
    pub suppliers: Vec<ReferenceItem>,
    pub search_query: String,
    /// Только заказы, созданные на основании заявок
    pub only_from_requisition: bool,
    pub is_loaded: bool,
}

impl PurchaseOrderListState {
    pub fn visible(&self) -> Vec<PurchaseOrder> {
        let query = self.search_query.trim().to_lowercase();
        let mut items: Vec<PurchaseOrder> = self
            .items
            .iter()
            .filter(|o| !self.only_from_requisition || o.requisition_id.is_some())
            .filter(|o| {
                query.is_empty()
                    || o.document_no.to_lowercase().contains(&query)
                    || self.supplier_name(o).to_lowercase().contains(&query)
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
    pub fn supplier_name(&self, o: &PurchaseOrder) -> String {
        if let Some(name) = o.supplier_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.suppliers
            .iter()
            .find(|s| s.id == o.supplier_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| o.supplier_id.clone())
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|o| o.to_string_id() != id);
    }
}

pub fn create_state() -> RwSignal<PurchaseOrderListState> {
    RwSignal::new(PurchaseOrderListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: &str, no: &str, supplier: &str, requisition: Option<&str>) -> PurchaseOrder {
        serde_json::from_value(json!({
            "id": id,
            "code": no,
            "description": no,
            "documentNo": no,
            "documentDate": "2024-04-01",
            "supplierId": supplier,
            "warehouseId": "w1",
            "requisitionId": requisition,
        }))
        .unwrap()
    }

    fn state() -> PurchaseOrderListState {
        PurchaseOrderListState {
            items: vec![
                order("0b0e4b1c-5f7e-4d0c-8d1c-1a2b3c4d5e61", "ЗП-1", "s1", None),
                order("0b0e4b1c-5f7e-4d0c-8d1c-1a2b3c4d5e62", "ЗП-2", "s2", Some("r1")),
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
        assert_eq!(visible[0].document_no, "ЗП-1");
    }

    #[test]
    fn test_only_from_requisition() {
        let mut s = state();
        s.only_from_requisition = true;
        let visible = s.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].document_no, "ЗП-2");
    }

    #[test]
    fn test_supplier_name_prefers_server_value() {
        let s = state();
        let mut o = s.items[0].clone();
        assert_eq!(s.supplier_name(&o), "ООО Металл");
        o.supplier_name = Some("Металл (сервер)".into());
        assert_eq!(s.supplier_name(&o), "Металл (сервер)");
        o.supplier_name = None;
        o.supplier_id = "s9".into();
        assert_eq!(s.supplier_name(&o), "s9");
    }
}
