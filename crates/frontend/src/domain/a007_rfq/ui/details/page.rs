use super::view_model::RfqDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{derived_tab_key, detail_tab_key, detail_tab_label};
use crate::shared::components::{DateInput, TokenBadge};
use crate::shared::document_lines::DocumentLinesEditor;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a005_purchase_requisition::PurchaseRequisition;
use contracts::domain::a007_rfq::Rfq;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn RfqDetails(
    id: Option<String>,
    /// Заявка-основание для нового запроса
    from_requisition: Option<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = RfqDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = match from_requisition.as_deref() {
        Some(req_id) => derived_tab_key::<Rfq>(req_id),
        None => detail_tab_key::<Rfq>(id.as_deref()),
    };

    vm.load_references();
    match (id, from_requisition) {
        (Some(id), _) => vm.load(id),
        (None, Some(req_id)) => vm.prefill_from_requisition(req_id),
        (None, None) => {}
    }

    let on_saved = Callback::new(move |q: Rfq| {
        tabs_store.update_tab_title(
            &tab_key,
            &detail_tab_label(Rfq::element_name(), &q.document_no),
        );
    });

    let open_requisition = move || {
        if let Some(req_id) = vm.requisition_id.get_untracked() {
            tabs_store.open_tab(
                &detail_tab_key::<PurchaseRequisition>(Some(&req_id)),
                &detail_tab_label(PurchaseRequisition::element_name(), &vm.requisition_no.get_untracked()),
            );
        }
    };

    view! {
        <PageFrame page_id="a007_rfq--detail" category="detail">
            <Header vm=vm on_saved=on_saved on_close=on_close />

            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
                    </MessageBar>
                })}
                {move || (vm.is_edit_mode().get() && !vm.is_editable.get()).then(|| view! {
                    <MessageBar intent=MessageBarIntent::Info>
                        <MessageBarBody>"Запрос в текущем статусе не редактируется"</MessageBarBody>
                    </MessageBar>
                })}

                <Show
                    when=move || !vm.loading.get()
                    fallback=|| view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-4xl);">
                            <Spinner />
                            <span>"Загрузка..."</span>
                        </Flex>
                    }
                >
                    <Show when=move || vm.requisition_id.get().is_some()>
                        <div class="details-source">
                            {icon("requisitions")}
                            " Основание: "
                            <a
                                href="#"
                                class="table__link"
                                on:click=move |e| {
                                    e.prevent_default();
                                    open_requisition();
                                }
                            >
                                {move || {
                                    let no = vm.requisition_no.get();
                                    if no.is_empty() { "заявка на закупку".to_string() } else { format!("заявка № {}", no) }
                                }}
                            </a>
                        </div>
                    </Show>
                    <DocumentTab vm=vm />
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn Header(vm: RfqDetailsVm, on_saved: Callback<Rfq>, on_close: Callback<()>) -> impl IntoView {
    let is_edit_mode = vm.is_edit_mode();

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h2 class="page__title">
                    {move || if is_edit_mode.get() {
                        format!("{} № {}", Rfq::element_name(), vm.document_no.get())
                    } else {
                        "Новый запрос КП".to_string()
                    }}
                </h2>
                {move || vm.status.get().map(|p| view! { <TokenBadge presentation=p /> })}
            </div>
            <div class="page__header-right">
                <Space>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.save(on_saved)
                        disabled=Signal::derive(move || {
                            vm.saving.get() || vm.loading.get() || !vm.is_editable.get()
                        })
                    >
                        {icon("save")}
                        {move || if vm.saving.get() { " Сохранение..." } else { " Сохранить" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        " Закрыть"
                    </Button>
                </Space>
            </div>
        </div>
    }
}

#[component]
fn DocumentTab(vm: RfqDetailsVm) -> impl IntoView {
    let read_only = vm.read_only();

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Реквизиты"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Номер"</label>
                    <Input value=vm.document_no placeholder="Присваивается при сохранении" disabled=read_only />
                </div>
                <div class="form__group">
                    <label class="form__label">"Дата *"</label>
                    <DateInput value=vm.document_date disabled=read_only />
                </div>
                <div class="form__group">
                    <label class="form__label">"Ответ до"</label>
                    <DateInput value=vm.response_due_date disabled=read_only />
                </div>

                <div class="form__group" style="grid-column: span 2;">
                    <label class="form__label">"Поставщик *"</label>
                    <ReferenceSelect items=vm.suppliers value=vm.supplier_id disabled=read_only />
                </div>
                <div class="form__group">
                    <label class="form__label">"Склад"</label>
                    <ReferenceSelect items=vm.warehouses value=vm.warehouse_id disabled=read_only />
                </div>

                <div class="form__group" style="grid-column: 1 / -1;">
                    <label class="form__label">"Примечание"</label>
                    <Textarea value=vm.notes placeholder="Опционально" attr:rows=2 disabled=read_only />
                </div>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Материалы"</h4>
            <DocumentLinesEditor rows=vm.rows catalog=vm.catalog read_only=read_only />
        </div>
    }
}
