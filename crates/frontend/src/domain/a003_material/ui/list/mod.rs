pub mod state;

use self::state::create_state;
use crate::domain::{a002_material_category, a003_material::api};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::ActiveBadge;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::PageFrame;
use contracts::domain::a003_material::Material;
use contracts::domain::common::AggregateRoot;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn stock_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => String::new(),
        (Some(a), None) => format!("от {}", format_quantity(a)),
        (None, Some(b)) => format!("до {}", format_quantity(b)),
        (Some(a), Some(b)) => format!("{} – {}", format_quantity(a), format_quantity(b)),
    }
}

#[component]
pub fn MaterialList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let toggling = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, code: String| {
        tabs_store.open_tab(
            &detail_tab_key::<Material>(id.as_deref()),
            &detail_tab_label(Material::element_name(), &code),
        );
    };

    let load_items = move || {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let categories = a002_material_category::api::fetch_list()
                .await
                .unwrap_or_default();
            match api::fetch_list().await {
                Ok(items) => {
                    let _ = state.try_update(|s| {
                        s.items = items;
                        s.categories = categories;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            log!("Loading materials");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    let category_filter = RwSignal::new(String::new());
    let show_inactive = RwSignal::new(false);
    Effect::new(move || {
        let query = search_query.get();
        let category = category_filter.get();
        let inactive = show_inactive.get();
        untrack(move || {
            state.update(|s| {
                s.search_query = query;
                s.category_filter = category;
                s.show_inactive = inactive;
            });
        });
    });

    let toggle_active = move |id: String, make_active: bool| {
        if toggling.get_untracked().is_some() {
            return;
        }
        toggling.set(Some(id.clone()));
        spawn_local(async move {
            let result = if make_active {
                api::activate(&id).await
            } else {
                api::deactivate(&id).await
            };
            match result {
                Ok(()) => {
                    let _ = state.try_update(|s| {
                        if let Some(m) = s.items.iter_mut().find(|m| m.to_string_id() == id) {
                            m.base.metadata.is_active = make_active;
                        }
                    });
                    notifications.success(if make_active {
                        "Материал активирован"
                    } else {
                        "Материал деактивирован"
                    });
                }
                Err(e) => notifications.report(&e),
            }
            let _ = toggling.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a003_material--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Material::list_name()}</h1>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || state.with(|s| s.visible().len()).to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| open_detail(None, String::new())
                        >
                            {icon("plus")}
                            " Новый материал"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| load_items()
                            disabled=Signal::derive(move || loading.get())
                        >
                            {icon("refresh")}
                            {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                        </Button>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                <Flex gap=FlexGap::Medium align=FlexAlign::Center style="margin-bottom: var(--spacing-md);">
                    <div style="width: 280px;">
                        <Input value=search_query placeholder="Код или наименование..." />
                    </div>
                    <select class="form__select" style="width: 240px;" on:change=move |ev| category_filter.set(event_target_value(&ev))>
                        <option value="">"Все категории"</option>
                        {move || state.with(|s| {
                            s.categories
                                .iter()
                                .map(|c| view! { <option value=c.to_string_id()>{c.name().to_string()}</option> })
                                .collect_view()
                        })}
                    </select>
                    <Checkbox checked=show_inactive label="Показывать неактивные" />
                </Flex>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=true min_width=110.0>"Код"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=220.0>"Наименование"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=160.0>"Категория"</TableHeaderCell>
                                <TableHeaderCell min_width=70.0>"Ед."</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Цена"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Запас мин–макс"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|m| (m.to_string_id(), m.base.metadata.is_active)
                                children=move |m: Material| {
                                    let id = m.to_string_id();
                                    let id_for_link = id.clone();
                                    let id_for_toggle = id.clone();
                                    let id_for_busy = id.clone();
                                    let code = m.base.code.clone();
                                    let is_active = m.is_active();
                                    let category = state.with_untracked(|s| s.category_name(&m));
                                    let code_text = m.base.code.clone();
                                    let name_text = m.name().to_string();
                                    let unit_symbol = m.unit_symbol.clone().unwrap_or_default();
                                    let price = format_money(m.unit_price);
                                    let stock = stock_range(m.min_stock_level, m.max_stock_level);

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(Some(id_for_link.clone()), code.clone());
                                                        }
                                                    >
                                                        {code_text}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout truncate=true>{name_text}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{category}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{unit_symbol}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">{price}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{stock}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout><ActiveBadge active=is_active /></TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=Signal::derive(move || toggling.get().as_deref() == Some(id_for_busy.as_str()))
                                                        on_click=move |_| toggle_active(id_for_toggle.clone(), !is_active)
                                                    >
                                                        {icon("power")}
                                                        {if is_active { " Деактивировать" } else { " Активировать" }}
                                                    </Button>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_range_text() {
        assert_eq!(stock_range(None, None), "");
        assert_eq!(stock_range(Some(5.0), None), "от 5");
        assert_eq!(stock_range(Some(1.0), Some(2.5)), "1 – 2.5");
    }
}
