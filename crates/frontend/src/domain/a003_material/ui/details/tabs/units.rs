use super::super::view_model::MaterialDetailsVm;
use crate::domain::a004_unit_conversion::ui::material_units::MaterialUnitsPanel;
use leptos::prelude::*;

/// Единицы доступны только сохранённому материалу
#[component]
pub fn UnitsTab(vm: MaterialDetailsVm) -> impl IntoView {
    move || match vm.id.get() {
        Some(id) => view! { <MaterialUnitsPanel material_id=id /> }.into_any(),
        None => view! {
            <div class="placeholder">"Сохраните материал, чтобы настроить единицы измерения"</div>
        }
        .into_any(),
    }
}
