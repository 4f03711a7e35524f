pub mod state;

use self::state::create_state;
use crate::domain::{a001_unit, a004_unit_conversion::api};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::form_utils::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_factor;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a004_unit_conversion::UnitConversion;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub const ENTITY_LABEL: &str = "Коэффициент пересчёта";
pub const DETAIL_PREFIX: &str = "a004_unit_conversion_detail_";

pub fn detail_key(id: Option<&str>) -> String {
    format!("{}{}", DETAIL_PREFIX, id.unwrap_or("new"))
}

#[component]
pub fn UnitConversionList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let deleting = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, pair: String| {
        tabs_store.open_tab(&detail_key(id.as_deref()), &detail_tab_label(ENTITY_LABEL, &pair));
    };

    let load_items = move || {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let units = a001_unit::api::fetch_list().await.unwrap_or_default();
            match api::fetch_list().await {
                Ok(items) => {
                    let _ = state.try_update(|s| {
                        s.items = items;
                        s.units = units;
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
            log!("Loading unit conversions");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    Effect::new(move || {
        let query = search_query.get();
        untrack(move || state.update(|s| s.search_query = query));
    });

    let delete_item = move |c: UnitConversion, pair: String| {
        if deleting.get_untracked().is_some() {
            return;
        }
        let mut message = format!("Удалить коэффициент {}?", pair);
        if let Some(warning) = c.edit_warning() {
            message = format!("{}\n\n{}", message, warning);
        }
        if !confirm(&message) {
            return;
        }
        let id = c.to_string_id();
        deleting.set(Some(id.clone()));
        spawn_local(async move {
            match api::remove(&id).await {
                Ok(()) => {
                    let _ = state.try_update(|s| s.remove(&id));
                    notifications.success("Коэффициент удалён");
                }
                Err(e) => notifications.report(&e),
            }
            let _ = deleting.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a004_unit_conversion--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Коэффициенты пересчёта"</h1>
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
                            " Новый коэффициент"
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
                <div style="width: 320px; margin-bottom: var(--spacing-md);">
                    <Input value=search_query placeholder="Код единицы..." />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=120.0>"Из"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"В"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Коэффициент"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Использован"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=200.0>"Примечание"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|c| (c.to_string_id(), c.conversion_factor.to_bits())
                                children=move |c: UnitConversion| {
                                    let id = c.to_string_id();
                                    let id_for_busy = id.clone();
                                    let (from, to) = state.with_untracked(|s| (s.from_code(&c), s.to_code(&c)));
                                    let pair = format!("{} → {}", from, to);
                                    let pair_for_link = pair.clone();
                                    let pair_for_delete = pair.clone();
                                    let c_for_delete = c.clone();
                                    let usage = if c.is_used() { c.usage_count.to_string() } else { "—".to_string() };

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(Some(id.clone()), pair_for_link.clone());
                                                        }
                                                    >
                                                        {from}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{to}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">{format_factor(c.conversion_factor)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{usage}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{c.note.clone().unwrap_or_default()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=Signal::derive(move || deleting.get().as_deref() == Some(id_for_busy.as_str()))
                                                        on_click=move |_| delete_item(c_for_delete.clone(), pair_for_delete.clone())
                                                    >
                                                        {icon("trash")}
                                                        " Удалить"
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
