//! HTTP-обёртки для категорий материалов (`/api/material-category`)

use crate::shared::api_utils::{delete, get_json, item_path, post_json, put_json};
use contracts::domain::a002_material_category::{MaterialCategory, MaterialCategoryDto};
use contracts::shared::ApiError;

const BASE: &str = "/api/material-category";

pub async fn fetch_list() -> Result<Vec<MaterialCategory>, ApiError> {
    get_json(BASE).await.map_err(|e| {
        log::warn!("GET {} failed: {}", BASE, e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<MaterialCategory, ApiError> {
    get_json(&item_path(BASE, id)).await
}

pub async fn save(dto: &MaterialCategoryDto) -> Result<MaterialCategory, ApiError> {
    let category: MaterialCategory = match dto.id.as_deref() {
        Some(id) => put_json(&item_path(BASE, id), dto).await?,
        None => post_json(BASE, dto).await?,
    };
    log::info!("material category saved: {}", category.to_string_id());
    Ok(category)
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    delete(&item_path(BASE, id)).await?;
    log::info!("material category deleted: {}", id);
    Ok(())
}
