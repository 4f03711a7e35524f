//! HTTP-обёртки подсистемы пересчёта единиц (`/api/unit-conversion`)
//!
//! Глобальные коэффициенты (CRUD), единицы материала и пересчёт количества.

use crate::shared::api_utils::{delete, get_json, get_optional, item_path, post_command, post_json, put_json};
use contracts::domain::a004_unit_conversion::{
    AddMaterialUnitRequest, ConvertRequest, ConvertResult, MaterialUnit, MaterialUnitSet,
    RemoveMaterialUnitRequest, SetBaseUnitRequest, UnitConversion, UnitConversionDto,
};
use contracts::shared::ApiError;

const BASE: &str = "/api/unit-conversion";

// ---------------------------------------------------------------------------
// Глобальные коэффициенты
// ---------------------------------------------------------------------------

pub async fn fetch_list() -> Result<Vec<UnitConversion>, ApiError> {
    get_json(BASE).await.map_err(|e| {
        log::warn!("GET {} failed: {}", BASE, e);
        e
    })
}

pub async fn fetch_by_id(id: &str) -> Result<UnitConversion, ApiError> {
    get_json(&item_path(BASE, id)).await
}

pub async fn save(dto: &UnitConversionDto) -> Result<UnitConversion, ApiError> {
    let conversion: UnitConversion = match dto.id.as_deref() {
        Some(id) => put_json(&item_path(BASE, id), dto).await?,
        None => post_json(BASE, dto).await?,
    };
    log::info!("unit conversion saved: {}", conversion.to_string_id());
    Ok(conversion)
}

pub async fn remove(id: &str) -> Result<(), ApiError> {
    delete(&item_path(BASE, id)).await?;
    log::info!("unit conversion deleted: {}", id);
    Ok(())
}

/// Пересчёт на сервере (результат сервера - окончательный)
pub async fn convert(request: &ConvertRequest) -> Result<ConvertResult, ApiError> {
    post_json(&format!("{}/convert", BASE), request).await
}

// ---------------------------------------------------------------------------
// Единицы материала
// ---------------------------------------------------------------------------

fn material_units_path(material_id: &str) -> String {
    item_path(&format!("{}/material-units", BASE), material_id)
}

/// Единицы материала. 404 и отказ сервера дают пустой набор:
/// материал просто ещё не настроен.
pub async fn get_units_for_material(material_id: &str) -> Result<MaterialUnitSet, ApiError> {
    let units: Vec<MaterialUnit> = get_optional(&material_units_path(material_id))
        .await?
        .unwrap_or_default();
    Ok(MaterialUnitSet::new(material_id, units))
}

pub async fn add_unit(request: &AddMaterialUnitRequest) -> Result<(), ApiError> {
    post_command(&format!("{}/add-unit", BASE), request).await?;
    log::info!(
        "unit {} added to material {} (base: {}, replace base: {})",
        request.unit_id,
        request.material_id,
        request.is_base_unit,
        request.replace_base
    );
    Ok(())
}

pub async fn remove_unit(request: &RemoveMaterialUnitRequest) -> Result<(), ApiError> {
    post_command(&format!("{}/remove-unit", BASE), request).await?;
    log::info!("unit {} removed from material {}", request.unit_id, request.material_id);
    Ok(())
}

pub async fn set_base(request: &SetBaseUnitRequest) -> Result<(), ApiError> {
    post_command(&format!("{}/set-base", BASE), request).await?;
    log::info!("base unit of material {} set to {}", request.material_id, request.unit_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_units_path_encodes_id() {
        assert_eq!(material_units_path("m-1"), format!("{}/material-units/m-1", BASE));
        assert_eq!(
            material_units_path("a/b c"),
            format!("{}/material-units/a%2Fb%20c", BASE)
        );
    }
}
