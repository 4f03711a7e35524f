//! HTTP-обёртки для единиц измерения (`/api/unit`)

use crate::shared::api_utils::{get_json, item_path, post_command, post_json, put_json};
use contracts::domain::a001_unit::{Unit, UnitDto};
use contracts::shared::ApiError;

pub async fn fetch_list() -> Result<Vec<Unit>, ApiError> {
    get_json("/api/unit").await.map_err(|e| {
        log::warn!("GET /api/unit failed: {}", e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<Unit, ApiError> {
    get_json(&item_path("/api/unit", id)).await
}

pub async fn create(dto: &UnitDto) -> Result<Unit, ApiError> {
    let unit: Unit = post_json("/api/unit", dto).await?;
    log::info!("unit created: {}", unit.to_string_id());
    Ok(unit)
}

pub async fn update(id: &str, dto: &UnitDto) -> Result<Unit, ApiError> {
    let unit: Unit = put_json(&item_path("/api/unit", id), dto).await?;
    log::info!("unit updated: {}", id);
    Ok(unit)
}

/// Создание или обновление в зависимости от наличия id
pub async fn save(dto: &UnitDto) -> Result<Unit, ApiError> {
    match dto.id.as_deref() {
        Some(id) => update(id, dto).await,
        None => create(dto).await,
    }
}

pub async fn activate(id: &str) -> Result<(), ApiError> {
    post_command(&format!("{}/activate", item_path("/api/unit", id)), &()).await?;
    log::info!("unit activated: {}", id);
    Ok(())
}

pub async fn deactivate(id: &str) -> Result<(), ApiError> {
    post_command(&format!("{}/deactivate", item_path("/api/unit", id)), &()).await?;
    log::info!("unit deactivated: {}", id);
    Ok(())
}
