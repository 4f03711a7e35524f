use crate::domain::common::{
    document_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    EntityMetadata,
};
use crate::shared::{ApiError, TokenPresentation};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор заявки на закупку
    PurchaseRequisitionId
);

fn default_editable() -> bool {
    true
}

/// Заявка на закупку (агрегат a005).
///
/// Статус принадлежит серверу: клиент только отображает его. После
/// отправки на согласование у заявки появляется `workflow_instance_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequisition {
    #[serde(flatten)]
    pub base: BaseAggregate<PurchaseRequisitionId>,

    /// Номер документа (напр. "ЗЯ-000001")
    #[serde(rename = "documentNo")]
    pub document_no: String,

    /// Дата документа (YYYY-MM-DD)
    #[serde(rename = "documentDate")]
    pub document_date: String,

    /// Инициатор
    #[serde(rename = "requesterName")]
    pub requester_name: String,

    #[serde(rename = "departmentName", default)]
    pub department_name: Option<String>,

    /// Склад получения
    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,

    /// Требуемая дата поставки
    #[serde(rename = "requiredDate", default)]
    pub required_date: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Непрозрачный токен статуса
    #[serde(default)]
    pub status: String,

    #[serde(rename = "statusName", default)]
    pub status_name: Option<String>,

    #[serde(rename = "isEditable", default = "default_editable")]
    pub is_editable: bool,

    #[serde(rename = "workflowInstanceId", default)]
    pub workflow_instance_id: Option<String>,

    #[serde(default)]
    pub lines: Vec<DocumentLine>,
}

impl PurchaseRequisition {
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn total(&self) -> f64 {
        document_total(&self.lines)
    }

    pub fn status_presentation(&self) -> TokenPresentation {
        TokenPresentation::resolve(&self.status, self.status_name.as_deref().unwrap_or_default())
    }

    /// Заявку можно отправить на согласование
    pub fn can_submit(&self) -> bool {
        self.workflow_instance_id.is_none() && self.is_editable
    }
}

impl AggregateRoot for PurchaseRequisition {
    type Id = PurchaseRequisitionId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "purchase_requisition"
    }

    fn element_name() -> &'static str {
        "Заявка на закупку"
    }

    fn list_name() -> &'static str {
        "Заявки на закупку"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PurchaseRequisitionDto {
    pub id: Option<String>,
    #[serde(rename = "documentNo")]
    pub document_no: String,
    #[serde(rename = "documentDate")]
    pub document_date: String,
    #[serde(rename = "requesterName")]
    pub requester_name: String,
    #[serde(rename = "departmentName")]
    pub department_name: Option<String>,
    #[serde(rename = "warehouseId")]
    pub warehouse_id: String,
    #[serde(rename = "requiredDate")]
    pub required_date: Option<String>,
    pub notes: Option<String>,
    pub lines: Vec<DocumentLine>,
}

impl PurchaseRequisitionDto {
    /// Проверка реквизитов шапки
    pub fn validate(&self) -> Result<(), String> {
        if self.document_date.trim().is_empty() {
            return Err("Укажите дату документа".into());
        }
        if self.requester_name.trim().is_empty() {
            return Err("Укажите инициатора заявки".into());
        }
        if self.warehouse_id.trim().is_empty() {
            return Err("Выберите склад".into());
        }
        if let Some(required) = self.required_date.as_deref().filter(|d| !d.is_empty()) {
            if required < self.document_date.as_str() {
                return Err("Требуемая дата раньше даты документа".into());
            }
        }
        Ok(())
    }

    /// Полная проверка перед сохранением: шапка и строки
    pub fn validate_for_save<F>(&self, is_unit_registered: F) -> Result<(), ApiError>
    where
        F: Fn(&str, &str) -> bool,
    {
        self.validate().map_err(ApiError::Validation)?;
        validate_lines(&self.lines, is_unit_registered)?;
        Ok(())
    }
}

impl From<&PurchaseRequisition> for PurchaseRequisitionDto {
    fn from(r: &PurchaseRequisition) -> Self {
        Self {
            id: Some(r.to_string_id()),
            document_no: r.document_no.clone(),
            document_date: r.document_date.clone(),
            requester_name: r.requester_name.clone(),
            department_name: r.department_name.clone(),
            warehouse_id: r.warehouse_id.clone(),
            required_date: r.required_date.clone(),
            notes: r.notes.clone(),
            lines: r.lines.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: f64, price: f64) -> DocumentLine {
        DocumentLine {
            line_no: 1,
            material_id: Some("m1".into()),
            unit_id: Some("kg".into()),
            quantity: qty,
            price,
            note: None,
        }
    }

    fn valid() -> PurchaseRequisitionDto {
        PurchaseRequisitionDto {
            document_date: "2024-03-01".into(),
            requester_name: "Иванов И.И.".into(),
            warehouse_id: "w1".into(),
            required_date: Some("2024-03-15".into()),
            lines: vec![line(3.0, 1000.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_requisition() {
        assert!(valid().validate_for_save(|_, _| true).is_ok());
    }

    #[test]
    fn test_required_date_before_document_date() {
        let mut d = valid();
        d.required_date = Some("2024-02-01".into());
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_empty_requisition_is_not_saved() {
        let mut d = valid();
        d.lines.clear();
        let err = d.validate_for_save(|_, _| true).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_deserialize_server_payload() {
        let json = r#"{
            "id": "6f1c1b5e-0a4b-4c43-9d44-5a4d6f2f7f10",
            "code": "ЗЯ-000001",
            "description": "ЗЯ-000001 от 2024-03-01",
            "documentNo": "ЗЯ-000001",
            "documentDate": "2024-03-01",
            "requesterName": "Петров",
            "warehouseId": "w1",
            "status": "pending_approval",
            "workflowInstanceId": "wf-1",
            "lines": [{"lineNo":1,"materialId":"m1","unitId":"kg","quantity":3,"price":1000}]
        }"#;
        let r: PurchaseRequisition = serde_json::from_str(json).unwrap();
        assert!(r.is_editable);
        assert_eq!(r.total(), 3000.0);
        assert!(!r.can_submit());
        assert_eq!(r.status_presentation().label, "На согласовании");
    }
}
