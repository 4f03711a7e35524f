pub mod state;

use self::state::create_state;
use crate::domain::a005_purchase_requisition::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::TokenBadge;
use crate::shared::date_utils::{format_date, format_optional_date};
use crate::shared::form_utils::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::fetch_warehouses;
use contracts::domain::a005_purchase_requisition::PurchaseRequisition;
use contracts::domain::common::AggregateRoot;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn PurchaseRequisitionList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let deleting = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, number: String| {
        tabs_store.open_tab(
            &detail_tab_key::<PurchaseRequisition>(id.as_deref()),
            &detail_tab_label(PurchaseRequisition::element_name(), &number),
        );
    };

    let load_items = move || {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let warehouses = fetch_warehouses().await.unwrap_or_default();
            match api::fetch_list().await {
                Ok(items) => {
                    let _ = state.try_update(|s| {
                        s.items = items;
                        s.warehouses = warehouses;
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
            log!("Loading purchase requisitions");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    Effect::new(move || {
        let query = search_query.get();
        untrack(move || state.update(|s| s.search_query = query));
    });

    let delete_item = move |id: String, number: String| {
        if deleting.get_untracked().is_some() {
            return;
        }
        if !confirm(&format!("Удалить заявку {}?", number)) {
            return;
        }
        deleting.set(Some(id.clone()));
        spawn_local(async move {
            match api::remove(&id).await {
                Ok(()) => {
                    let _ = state.try_update(|s| s.remove(&id));
                    notifications.success(format!("Заявка {} удалена", number));
                }
                Err(e) => notifications.report(&e),
            }
            let _ = deleting.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a005_purchase_requisition--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{PurchaseRequisition::list_name()}</h1>
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
                            " Новая заявка"
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
                    <Input value=search_query placeholder="Номер, инициатор, подразделение..." />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=true min_width=120.0>"Номер"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Дата"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=180.0>"Инициатор"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=160.0>"Склад"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Нужно к"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Сумма"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Статус"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|r| r.to_string_id()
                                children=move |r: PurchaseRequisition| {
                                    let id = r.to_string_id();
                                    let id_for_link = id.clone();
                                    let id_for_busy = id.clone();
                                    let number = r.document_no.clone();
                                    let number_for_delete = r.document_no.clone();
                                    let editable = r.is_editable;
                                    let warehouse = state.with_untracked(|s| s.warehouse_name(&r.warehouse_id));
                                    let requester = match r.department_name.as_deref().filter(|d| !d.is_empty()) {
                                        Some(d) => format!("{} ({})", r.requester_name, d),
                                        None => r.requester_name.clone(),
                                    };
                                    let number_text = r.document_no.clone();
                                    let doc_date = format_date(&r.document_date);
                                    let required_date = format_optional_date(r.required_date.as_deref());
                                    let total = format_money(r.total());
                                    let status = r.status_presentation();

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(Some(id_for_link.clone()), number.clone());
                                                        }
                                                    >
                                                        {number_text}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{doc_date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{requester}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{warehouse}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{required_date}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span style="font-variant-numeric: tabular-nums;">{total}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout><TokenBadge presentation=status /></TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=Signal::derive(move || {
                                                            !editable || deleting.get().as_deref() == Some(id_for_busy.as_str())
                                                        })
                                                        on_click=move |_| delete_item(id.clone(), number_for_delete.clone())
                                                    >
                                                        {icon("trash")}
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
