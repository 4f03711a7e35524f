//! HTTP-обёртки для материалов (`/api/material`)

use crate::shared::api_utils::{get_json, item_path, post_command, post_json, put_json};
use contracts::domain::a003_material::{Material, MaterialDto};
use contracts::shared::ApiError;

pub async fn fetch_list() -> Result<Vec<Material>, ApiError> {
    get_json("/api/material").await.map_err(|e| {
        log::warn!("GET /api/material failed: {}", e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<Material, ApiError> {
    get_json(&item_path("/api/material", id)).await
}

pub async fn save(dto: &MaterialDto) -> Result<Material, ApiError> {
    let material: Material = match dto.id.as_deref() {
        Some(id) => put_json(&item_path("/api/material", id), dto).await?,
        None => post_json("/api/material", dto).await?,
    };
    log::info!("material saved: {}", material.to_string_id());
    Ok(material)
}

pub async fn activate(id: &str) -> Result<(), ApiError> {
    post_command(&format!("{}/activate", item_path("/api/material", id)), &()).await?;
    log::info!("material activated: {}", id);
    Ok(())
}

pub async fn deactivate(id: &str) -> Result<(), ApiError> {
    post_command(&format!("{}/deactivate", item_path("/api/material", id)), &()).await?;
    log::info!("material deactivated: {}", id);
    Ok(())
}
