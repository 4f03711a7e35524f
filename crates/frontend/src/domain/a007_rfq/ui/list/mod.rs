pub mod state;

use self::state::create_state;
use crate::domain::a007_rfq::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::TokenBadge;
use crate::shared::date_utils::{format_date, format_optional_date};
use crate::shared::form_utils::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::fetch_suppliers;
use contracts::domain::a007_rfq::Rfq;
use contracts::domain::common::AggregateRoot;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn RfqList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let deleting = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, number: String| {
        tabs_store.open_tab(
            &detail_tab_key::<Rfq>(id.as_deref()),
            &detail_tab_label(Rfq::element_name(), &number),
        );
    };

    let load_items = move || {
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let suppliers = fetch_suppliers().await.unwrap_or_default();
            match api::fetch_list().await {
                Ok(items) => {
                    let _ = state.try_update(|s| {
                        s.items = items;
                        s.suppliers = suppliers;
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
            log!("Loading RFQs");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    let only_from_requisition = RwSignal::new(false);
    Effect::new(move || {
        let query = search_query.get();
        let from_requisition = only_from_requisition.get();
        untrack(move || {
            state.update(|s| {
                s.search_query = query;
                s.only_from_requisition = from_requisition;
            })
        });
    });

    let delete_item = move |id: String, number: String| {
        if deleting.get_untracked().is_some() {
            return;
        }
        if !confirm(&format!("Удалить запрос КП {}?", number)) {
            return;
        }
        deleting.set(Some(id.clone()));
        spawn_local(async move {
            match api::remove(&id).await {
                Ok(()) => {
                    let _ = state.try_update(|s| s.remove(&id));
                    notifications.success(format!("Запрос КП {} удалён", number));
                }
                Err(e) => notifications.report(&e),
            }
            let _ = deleting.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a007_rfq--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Rfq::list_name()}</h1>
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
                            " Новый запрос"
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
                        <Input value=search_query placeholder="Номер или поставщик..." />
                    </div>
                    <Checkbox checked=only_from_requisition label="Только по заявкам" />
                </Flex>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=true min_width=120.0>"Номер"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Дата"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=200.0>"Поставщик"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Ответ до"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"По заявке"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Сумма"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Статус"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|q| q.to_string_id()
                                children=move |q: Rfq| {
                                    let id = q.to_string_id();
                                    let id_for_link = id.clone();
                                    let id_for_busy = id.clone();
                                    let number = q.document_no.clone();
                                    let number_for_delete = q.document_no.clone();
                                    let editable = q.is_editable;
                                    let supplier = state.with_untracked(|s| s.supplier_name(&q));
                                    let number_text = q.document_no.clone();
                                    let doc_date = format_date(&q.document_date);
                                    let due_date = format_optional_date(q.response_due_date.as_deref());
                                    let linked = q.requisition_id.is_some().then(|| icon("requisitions"));
                                    let total = format_money(q.total());
                                    let status = q.status_presentation();

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
                                            <TableCell><TableCellLayout truncate=true>{supplier}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{due_date}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{linked}</TableCellLayout></TableCell>
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
