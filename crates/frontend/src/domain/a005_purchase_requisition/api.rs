//! HTTP-обёртки заявок на закупку (`/api/purchase-requisition`)

use crate::shared::api_utils::{delete, get_json, item_path, post_json, put_json};
use contracts::domain::a005_purchase_requisition::{PurchaseRequisition, PurchaseRequisitionDto};
use contracts::shared::ApiError;

const BASE: &str = "/api/purchase-requisition";

pub async fn fetch_list() -> Result<Vec<PurchaseRequisition>, ApiError> {
    get_json(BASE).await.map_err(|e| {
        log::warn!("GET {} failed: {}", BASE, e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<PurchaseRequisition, ApiError> {
    get_json(&item_path(BASE, id)).await
}

pub async fn save(dto: &PurchaseRequisitionDto) -> Result<PurchaseRequisition, ApiError> {
    let requisition: PurchaseRequisition = match dto.id.as_deref() {
        Some(id) => put_json(&item_path(BASE, id), dto).await?,
        None => post_json(BASE, dto).await?,
    };
    log::info!("purchase requisition saved: {}", requisition.to_string_id());
    Ok(requisition)
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    delete(&item_path(BASE, id)).await?;
    log::info!("purchase requisition deleted: {}", id);
    Ok(())
}

/// Отправить на согласование. Сервер запускает процесс и возвращает
/// заявку с `workflowInstanceId`.
pub async fn submit(id: &str) -> Result<PurchaseRequisition, ApiError> {
    let requisition: PurchaseRequisition = post_json(&format!("{}/submit", item_path(BASE, id)), &()).await?;
    log::info!(
        "purchase requisition {} submitted, workflow {:?}",
        id,
        requisition.workflow_instance_id
    );
    Ok(requisition)
}
