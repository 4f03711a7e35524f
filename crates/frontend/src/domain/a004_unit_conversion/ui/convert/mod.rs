//! Пересчёт количества между единицами
//!
//! Предварительный результат считается локально по графу коэффициентов;
//! окончательный даёт сервер (`POST /api/unit-conversion/convert`).

use crate::domain::{a001_unit, a004_unit_conversion::api};
use crate::domain::a004_unit_conversion::ui::details::unit_items;
use crate::shared::form_utils::number_from_text;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_quantity;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::{ConversionGraph, ConvertRequest, UnitConversion};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Локальный предпросмотр: текст результата или сообщение об ошибке
pub fn preview(
    graph: &ConversionGraph,
    quantity_text: &str,
    from: &str,
    to: &str,
) -> Option<Result<f64, String>> {
    if from.is_empty() || to.is_empty() || quantity_text.trim().is_empty() {
        return None;
    }
    let quantity = number_from_text(quantity_text);
    if !quantity.is_finite() {
        return Some(Err("Некорректное количество".to_string()));
    }
    Some(graph.convert(quantity, from, to).map_err(|e| e.to_string()))
}

#[component]
pub fn UnitConverter() -> impl IntoView {
    let notifications = use_notifications();
    let units = RwSignal::new(Vec::<Unit>::new());
    let conversions = RwSignal::new(Vec::<UnitConversion>::new());
    let quantity = RwSignal::new("1".to_string());
    let from_unit_id = RwSignal::new(String::new());
    let to_unit_id = RwSignal::new(String::new());
    let server_result = RwSignal::new(None::<f64>);
    let converting = RwSignal::new(false);

    spawn_local(async move {
        match a001_unit::api::fetch_list().await {
            Ok(list) => {
                let _ = units.try_set(list);
            }
            Err(e) => log::warn!("units not loaded: {}", e),
        }
        match api::fetch_list().await {
            Ok(list) => {
                let _ = conversions.try_set(list);
            }
            Err(e) => log::warn!("unit conversions not loaded: {}", e),
        }
    });

    let graph = Signal::derive(move || {
        let units = units.get();
        conversions.with(|c| ConversionGraph::from_conversions(c).with_units(&units))
    });
    let unit_options = Signal::derive(move || units.with(|u| unit_items(u)));

    // Любое изменение ввода делает серверный результат устаревшим
    Effect::new(move |_| {
        quantity.track();
        from_unit_id.track();
        to_unit_id.track();
        server_result.set(None);
    });

    let local = Signal::derive(move || {
        graph.with(|g| preview(g, &quantity.get(), &from_unit_id.get(), &to_unit_id.get()))
    });

    let symbol_of = move |id: String| {
        units.with(|list| {
            list.iter()
                .find(|u| u.to_string_id() == id)
                .map(|u| u.symbol.clone())
                .unwrap_or_default()
        })
    };

    let run_server = move |_| {
        if converting.get_untracked() {
            return;
        }
        let qty = number_from_text(&quantity.get_untracked());
        let request = ConvertRequest {
            quantity: qty,
            from_unit_id: from_unit_id.get_untracked(),
            to_unit_id: to_unit_id.get_untracked(),
            material_id: None,
        };
        if !qty.is_finite() || request.from_unit_id.is_empty() || request.to_unit_id.is_empty() {
            notifications.warning("Укажите количество и обе единицы");
            return;
        }
        converting.set(true);
        spawn_local(async move {
            match api::convert(&request).await {
                Ok(result) => {
                    let _ = server_result.try_set(Some(result.quantity));
                }
                Err(e) => notifications.report(&e),
            }
            let _ = converting.try_set(false);
        });
    };

    view! {
        <PageFrame page_id="a004_unit_conversion--tool" category="tool">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Пересчёт единиц"</h1>
                </div>
            </div>

            <div class="page__content">
                <div class="details-section">
                    <div class="details-grid--3col">
                        <div class="form__group">
                            <label class="form__label">"Количество"</label>
                            <Input value=quantity attr:inputmode="decimal" />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Из единицы"</label>
                            <ReferenceSelect items=unit_options value=from_unit_id />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"В единицу"</label>
                            <ReferenceSelect items=unit_options value=to_unit_id />
                        </div>
                    </div>

                    <Flex gap=FlexGap::Medium align=FlexAlign::Center style="margin-top: var(--spacing-md);">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=run_server
                            disabled=Signal::derive(move || converting.get())
                        >
                            {icon("conversion")}
                            " Пересчитать на сервере"
                        </Button>
                    </Flex>
                </div>

                <div class="details-section">
                    <div class="form__group">
                        <label class="form__label">"Предварительно"</label>
                        {move || match local.get() {
                            None => view! { <span class="form__hint">"Заполните количество и единицы"</span> }.into_any(),
                            Some(Ok(v)) => view! {
                                <strong style="font-variant-numeric: tabular-nums;">
                                    {format!("{} {}", format_quantity(v), symbol_of(to_unit_id.get()))}
                                </strong>
                            }.into_any(),
                            Some(Err(msg)) => view! { <span class="form__error">{msg}</span> }.into_any(),
                        }}
                    </div>
                    {move || server_result.get().map(|v| view! {
                        <div class="form__group">
                            <label class="form__label">"Результат сервера"</label>
                            <strong style="font-variant-numeric: tabular-nums;">
                                {format!("{} {}", format_quantity(v), symbol_of(to_unit_id.get()))}
                            </strong>
                        </div>
                    })}
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_uses_inverse_edge() {
        let mut graph = ConversionGraph::new();
        graph.add_conversion("t", "kg", 1000.0);
        assert_eq!(preview(&graph, "2500", "kg", "t"), Some(Ok(2.5)));
    }

    #[test]
    fn test_preview_waits_for_input() {
        let graph = ConversionGraph::new();
        assert_eq!(preview(&graph, "", "kg", "t"), None);
        assert_eq!(preview(&graph, "1", "", "t"), None);
    }

    #[test]
    fn test_preview_reports_missing_path() {
        let graph = ConversionGraph::new();
        assert!(matches!(preview(&graph, "1", "kg", "pc"), Some(Err(_))));
        assert!(matches!(preview(&graph, "x", "kg", "pc"), Some(Err(_))));
    }
}
