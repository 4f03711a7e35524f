//! HTTP-обёртки заказов поставщикам (`/api/purchase-order`)

use crate::shared::api_utils::{delete, get_json, item_path, post_json, put_json};
use contracts::domain::a006_purchase_order::{PurchaseOrder, PurchaseOrderDto};
use contracts::shared::ApiError;

const BASE: &str = "/api/purchase-order";

pub async fn fetch_list() -> Result<Vec<PurchaseOrder>, ApiError> {
    get_json(BASE).await.map_err(|e| {
        log::warn!("GET {} failed: {}", BASE, e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<PurchaseOrder, ApiError> {
    get_json(&item_path(BASE, id)).await
}

pub async fn save(dto: &PurchaseOrderDto) -> Result<PurchaseOrder, ApiError> {
    let order: PurchaseOrder = match dto.id.as_deref() {
        Some(id) => put_json(&item_path(BASE, id), dto).await?,
        None => post_json(BASE, dto).await?,
    };
    log::info!("purchase order saved: {}", order.to_string_id());
    Ok(order)
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    delete(&item_path(BASE, id)).await?;
    log::info!("purchase order deleted: {}", id);
    Ok(())
}
