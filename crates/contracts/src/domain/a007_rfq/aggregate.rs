use crate::domain::a005_purchase_requisition::PurchaseRequisition;
use crate::domain::common::{
    document_total, validate_lines, AggregateId, AggregateRoot, BaseAggregate, DocumentLine,
    EntityMetadata,
};
use crate::shared::{ApiError, TokenPresentation};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(
    /// Уникальный идентификатор запроса коммерческого предложения
    RfqId
);

fn default_editable() -> bool {
    true
}

/// Запрос коммерческого предложения (агрегат a007).
///
/// Цена в строках - ориентировочная, итоговую указывает поставщик в ответе.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    #[serde(flatten)]
    pub base: BaseAggregate<RfqId>,

    #[serde(rename = "documentNo")]
    pub document_no: String,

    #[serde(rename = "documentDate")]
    pub document_date: String,

    #[serde(rename = "supplierId")]
    pub supplier_id: String,

    #[serde(rename = "supplierName", default)]
    pub supplier_name: Option<String>,

    #[serde(rename = "warehouseId", default)]
    pub warehouse_id: Option<String>,

    /// Срок ответа поставщика
    #[serde(rename = "responseDueDate", default)]
    pub response_due_date: Option<String>,

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

impl Rfq {
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

impl AggregateRoot for Rfq {
    type Id = RfqId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "rfq"
    }

    fn element_name() -> &'static str {
        "Запрос КП"
    }

    fn list_name() -> &'static str {
        "Запросы КП"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RfqDto {
    pub id: Option<String>,
    #[serde(rename = "documentNo")]
    pub document_no: String,
    #[serde(rename = "documentDate")]
    pub document_date: String,
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    #[serde(rename = "warehouseId")]
    pub warehouse_id: Option<String>,
    #[serde(rename = "responseDueDate")]
    pub response_due_date: Option<String>,
    #[serde(rename = "requisitionId")]
    pub requisition_id: Option<String>,
    pub notes: Option<String>,
    pub lines: Vec<DocumentLine>,
}

impl RfqDto {
    pub fn from_requisition(requisition: &PurchaseRequisition, document_date: &str) -> Self {
        Self {
            document_date: document_date.to_string(),
            warehouse_id: Some(requisition.warehouse_id.clone()),
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
        if let Some(due) = self.response_due_date.as_deref().filter(|d| !d.is_empty()) {
            if due < self.document_date.as_str() {
                return Err("Срок ответа раньше даты документа".into());
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

impl From<&Rfq> for RfqDto {
    fn from(r: &Rfq) -> Self {
        Self {
            id: Some(r.to_string_id()),
            document_no: r.document_no.clone(),
            document_date: r.document_date.clone(),
            supplier_id: r.supplier_id.clone(),
            warehouse_id: r.warehouse_id.clone(),
            response_due_date: r.response_due_date.clone(),
            requisition_id: r.requisition_id.clone(),
            notes: r.notes.clone(),
            lines: r.lines.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RfqDto {
        RfqDto {
            document_date: "2024-05-10".into(),
            supplier_id: "s1".into(),
            response_due_date: Some("2024-05-20".into()),
            lines: vec![DocumentLine {
                line_no: 1,
                material_id: Some("m1".into()),
                unit_id: Some("bag".into()),
                quantity: 40.0,
                price: 0.0,
                note: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_rfq_allows_zero_reference_price() {
        assert!(valid().validate_for_save(|_, _| true).is_ok());
    }

    #[test]
    fn test_rfq_rejects_unregistered_unit() {
        let err = valid().validate_for_save(|_, unit| unit == "kg").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Строка 1: единица измерения не настроена для выбранного материала"
        );
    }

    #[test]
    fn test_due_date_before_document_date() {
        let mut d = valid();
        d.response_due_date = Some("2024-05-01".into());
        assert!(d.validate().is_err());
    }
}
