use crate::domain::a005_purchase_requisition::PurchaseRequisition;
use crate::domain::common::{
    document_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    EntityMetadata,
};
use crate::shared::{ApiError, TokenPresentation};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор заказа поставщику
    PurchaseOrderId
);

fn default_editable() -> bool {
    true
}

/// Заказ поставщику (агрегат a006)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<PurchaseOrderId>,

    #[serde(rename = "documentNo")]
    pub document_no: String,

    #[serde(rename = "documentDate")]
    pub document_date: String,

    #[serde(rename = "supplierId")]
    pub supplier_id: String,

    #[serde(rename = "supplierName", default)]
    pub supplier_name: Option<String>,

    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,

    /// Ожидаемая дата поставки
    #[serde(rename = "expectedDate", default)]
    pub expected_date: Option<String>,

    /// Заявка-основание
    #[serde(rename = "requisitionId", default)]
    pub requisition_id: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "statusName", default)]
    pub status_name: Option<String>,

    #[serde(rename = "isEditable", default = "default_editable")]
    pub is_editable: bool,

    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl PurchaseOrder {
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn total(&self) -> f64 {
        document_total(&self.lines)
    }

    pub fn status_presentation(&self) -> TokenPresentation {
        TokenPresentation::resolve(&self.status, self.status_name.as_deref().unwrap_or_default())
    }
}

impl AggregateRoot for PurchaseOrder {
    type Id = PurchaseOrderId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "purchase_order"
    }

    fn element_name() -> &'static str {
        "Заказ поставщику"
    }

    fn list_name() -> &'static str {
        "Заказы поставщикам"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PurchaseOrderDto {
    pub id: Option<String>,
    #[serde(rename = "documentNo")]
    pub document_no: String,
    #[serde(rename = "documentDate")]
    pub document_date: String,
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,
    #[serde(rename = "expectedDate")]
    pub expected_date: Option<String>,
    #[serde(rename = "requisitionId")]
    pub requisition_id: Option<String>,
    pub notes: Option<String>,
    pub lines: Vec<DocumentLine>,
}

impl PurchaseOrderDto {
    /// Новый заказ на основании заявки: склад и строки переносятся,
    /// поставщика выбирает оператор
    pub fn from_requisition(requisition: &PurchaseRequisition, document_date: &str) -> Self {
        Self {
            document_date: document_date.to_string(),
            warehouse_id: requisition.warehouse_id.clone(),
            expected_date: requisition.required_date.clone(),
            requisition_id: Some(requisition.to_string_id()),
            lines: requisition.lines.clone(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.document_date.trim().is_empty() {
            return Err("Укажите дату документа".into());
        }
        if self.supplier_id.trim().is_empty() {
            return Err("Выберите поставщика".into());
        }
        if self.warehouse_id.trim().is_empty() {
            return Err("Выберите склад".into());
        }
        if let Some(expected) = self.expected_date.as_deref().filter(|d| !d.is_empty()) {
            if expected < self.document_date.as_str() {
                return Err("Ожидаемая дата поставки раньше даты документа".into());
            }
        }
        Ok(())
    }

    pub fn validate_for_save<F>(&self, is_unit_registered: F) -> Result<(), ApiError>
    where
        F: Fn(&str, &str) -> bool,
    {
        self.validate().map_err(ApiError::Validation)?;
        validate_lines(&self.lines, is_unit_registered)?;
        Ok(())
    }
}

impl From<&PurchaseOrder> for PurchaseOrderDto {
    fn from(o: &PurchaseOrder) -> Self {
        Self {
            id: Some(o.to_string_id()),
            document_no: o.document_no.clone(),
            document_date: o.document_date.clone(),
            supplier_id: o.supplier_id.clone(),
            warehouse_id: o.warehouse_id.clone(),
            expected_date: o.expected_date.clone(),
            requisition_id: o.requisition_id.clone(),
            notes: o.notes.clone(),
            lines: o.lines.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_purchase_requisition::PurchaseRequisitionId;

    fn requisition() -> PurchaseRequisition {
        PurchaseRequisition {
            base: BaseAggregate::new(
                PurchaseRequisitionId::new_v4(),
                "ЗЯ-1".into(),
                "ЗЯ-1 от 2024-03-01".into(),
            ),
            document_no: "ЗЯ-1".into(),
            document_date: "2024-03-01".into(),
            requester_name: "Петров".into(),
            department_name: None,
            warehouse_id: "w1".into(),
            required_date: Some("2024-03-20".into()),
            notes: None,
            status: "approved".into(),
            status_name: None,
            is_editable: false,
            workflow_instance_id: Some("wf".into()),
            lines: vec![DocumentLine {
                line_no: 1,
                material_id: Some("m1".into()),
                unit_id: Some("t".into()),
                quantity: 2.0,
                price: 4500.0,
                note: None,
            }],
        }
    }

    #[test]
    fn test_order_from_requisition_copies_lines() {
        let r = requisition();
        let dto = PurchaseOrderDto::from_requisition(&r, "2024-03-05");
        assert_eq!(dto.requisition_id, Some(r.to_string_id()));
        assert_eq!(dto.warehouse_id, "w1");
        assert_eq!(dto.lines, r.lines);
        assert_eq!(dto.validate(), Err("Выберите поставщика".to_string()));
    }

    #[test]
    fn test_order_requires_supplier_and_lines() {
        let mut dto = PurchaseOrderDto::from_requisition(&requisition(), "2024-03-05");
        dto.supplier_id = "s1".into();
        assert!(dto.validate_for_save(|_, _| true).is_ok());

        dto.lines.clear();
        assert!(dto.validate_for_save(|_, _| true).is_err());
    }

    #[test]
    fn test_expected_date_before_document_date() {
        let mut dto = PurchaseOrderDto::from_requisition(&requisition(), "2024-04-01");
        dto.supplier_id = "s1".into();
        assert!(dto.validate().is_err());
    }
}
