//! Справочники для выпадающих списков в шапке документов
//!
//! Поставщики и склады ведутся вне этого приложения; здесь только чтение
//! `GET /api/supplier` и `GET /api/warehouse`.

use crate::shared::api_utils::get_json;
use contracts::shared::{ApiError, ReferenceItem};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub async fn fetch_suppliers() -> Result<Vec<ReferenceItem>, ApiError> {
    get_json("/api/supplier").await
}

pub async fn fetch_warehouses() -> Result<Vec<ReferenceItem>, ApiError> {
    get_json("/api/warehouse").await
}

/// Загрузить справочник в сигнал. Ошибка не мешает работе формы:
/// список останется пустым, а причина уйдёт в лог.
pub fn load_into<F, Fut>(target: RwSignal<Vec<ReferenceItem>>, fetch: F)
where
    F: FnOnce() -> Fut + 'static,
    Fut: std::future::Future<Output = Result<Vec<ReferenceItem>, ApiError>> + 'static,
{
    spawn_local(async move {
        match fetch().await {
            Ok(items) => {
                let _ = target.try_set(items);
            }
            Err(e) => log::warn!("reference list not loaded: {}", e),
        }
    });
}

/// Выпадающий список по `ReferenceItem`.
///
/// Пустое значение означает "не выбрано".
#[component]
pub fn ReferenceSelect(
    #[prop(into)] items: Signal<Vec<ReferenceItem>>,
    value: RwSignal<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "— не выбрано —".to_string());

    view! {
        <select
            class="form__select"
            prop:disabled=move || disabled.get()
            on:change=move |ev| value.set(event_target_value(&ev))
        >
            <option value="" selected=move || value.get().is_empty()>{placeholder}</option>
            {move || {
                let current = value.get();
                items
                    .get()
                    .into_iter()
                    .map(|item| {
                        let selected = item.id == current;
                        view! {
                            <option value=item.id.clone() selected=selected>{item.label()}</option>
                        }
                    })
                    .collect_view()
            }}
        </select>
    }
}
