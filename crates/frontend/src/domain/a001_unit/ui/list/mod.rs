pub mod state;

use self::state::create_state;
use crate::domain::a001_unit::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::ActiveBadge;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_factor;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a001_unit::Unit;
use contracts::domain::common::AggregateRoot;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn UnitList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    // id записи, для которой выполняется активация/деактивация
    let toggling = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, code: String| {
        tabs_store.open_tab(
            &detail_tab_key::<Unit>(id.as_deref()),
            &detail_tab_label(Unit::element_name(), &code),
        );
    };

    let load_items = move || {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_list().await {
                Ok(items) => {
                    let _ = state.try_update(|s| {
                        s.items = items;
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
            log!("Loading units");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    let show_inactive = RwSignal::new(false);
    Effect::new(move || {
        let query = search_query.get();
        let inactive = show_inactive.get();
        untrack(move || {
            state.update(|s| {
                s.search_query = query;
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
                        if let Some(u) = s.items.iter_mut().find(|u| u.to_string_id() == id) {
                            u.base.metadata.is_active = make_active;
                        }
                    });
                    notifications.success(if make_active {
                        "Единица активирована"
                    } else {
                        "Единица деактивирована"
                    });
                }
                Err(e) => notifications.report(&e),
            }
            let _ = toggling.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a001_unit--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Unit::list_name()}</h1>
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
                            " Новая единица"
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
                    <div style="width: 320px;">
                        <Input value=search_query placeholder="Код, наименование, обозначение..." />
                    </div>
                    <Checkbox checked=show_inactive label="Показывать неактивные" />
                </Flex>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=true min_width=100.0>"Код"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=200.0>"Наименование"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=90.0>"Обозначение"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=180.0>"Базовая единица"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=100.0>"Коэффициент"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Статус"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|u| (u.to_string_id(), u.base.metadata.is_active)
                                children=move |unit: Unit| {
                                    let id = unit.to_string_id();
                                    let id_for_link = id.clone();
                                    let id_for_toggle = id.clone();
                                    let id_for_busy = id.clone();
                                    let code = unit.base.code.clone();
                                    let is_active = unit.is_active();
                                    let base_label = state.with_untracked(|s| s.base_label(unit.base_unit_id.as_deref()));
                                    let rate = unit.conversion_rate.map(format_factor).unwrap_or_default();
                                    let code_text = unit.base.code.clone();
                                    let name_text = unit.name().to_string();
                                    let symbol = unit.symbol.clone();

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
                                            <TableCell><TableCellLayout>{symbol}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{base_label}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">{rate}</span>
                                                </TableCellLayout>
                                            </TableCell>
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
