//! HTTP-обёртки запросов коммерческих предложений (`/api/rfq`)

use crate::shared::api_utils::{delete, get_json, item_path, post_json, put_json};
use contracts::domain::a007_rfq::{Rfq, RfqDto};
use contracts::shared::ApiError;

const BASE: &str = "/api/rfq";

pub async fn fetch_list() -> Result<Vec<Rfq>, ApiError> {
    get_json(BASE).await.map_err(|e| {
        log::warn!("GET {} failed: {}", BASE, e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<Rfq, ApiError> {
    get_json(&item_path(BASE, id)).await
}

pub async fn save(dto: &RfqDto) -> Result<Rfq, ApiError> {
    let rfq: Rfq = match dto.id.as_deref() {
        Some(id) => put_json(&item_path(BASE, id), dto).await?,
        None => post_json(BASE, dto).await?,
    };
    log::info!("rfq saved: {}", rfq.to_string_id());
    Ok(rfq)
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    delete(&item_path(BASE, id)).await?;
    log::info!("rfq deleted: {}", id);
    Ok(())
}
