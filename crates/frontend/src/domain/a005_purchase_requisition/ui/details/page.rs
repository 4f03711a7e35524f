use super::view_model::RequisitionDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{derived_tab_key, detail_tab_key, detail_tab_label};
use crate::shared::components::{DateInput, TokenBadge};
use crate::shared::document_lines::DocumentLinesEditor;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use crate::system::workflow::WorkflowPanel;
use contracts::domain::a005_purchase_requisition::PurchaseRequisition;
use contracts::domain::a006_purchase_order::PurchaseOrder;
use contracts::domain::a007_rfq::Rfq;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PurchaseRequisitionDetails(
    id: Option<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = RequisitionDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = detail_tab_key::<PurchaseRequisition>(id.as_deref());

    vm.load_references();
    if let Some(id) = id {
        vm.load(id);
    }

    let on_saved = Callback::new(move |r: PurchaseRequisition| {
        tabs_store.update_tab_title(
            &tab_key,
            &detail_tab_label(PurchaseRequisition::element_name(), &r.document_no),
        );
    });

    // документы на основании заявки открываются в своих вкладках
    let open_order = move |_| {
        if let Some(id) = vm.id.get_untracked() {
            tabs_store.open_tab(
                &derived_tab_key::<PurchaseOrder>(&id),
                &format!("{} по {}", PurchaseOrder::element_name(), vm.document_no.get_untracked()),
            );
        }
    };
    let open_rfq = move |_| {
        if let Some(id) = vm.id.get_untracked() {
            tabs_store.open_tab(
                &derived_tab_key::<Rfq>(&id),
                &format!("{} по {}", Rfq::element_name(), vm.document_no.get_untracked()),
            );
        }
    };

    // экземпляр процесса, если открыта его вкладка
    let workflow_tab = Memo::new(move |_| {
        if vm.active_tab.get() == "workflow" {
            vm.workflow_instance_id.get()
        } else {
            None
        }
    });

    view! {
        <PageFrame page_id="a005_purchase_requisition--detail" category="detail">
            <Header vm=vm on_saved=on_saved on_close=on_close />

            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
                    </MessageBar>
                })}
                {move || (vm.is_edit_mode().get() && !vm.is_editable.get()).then(|| view! {
                    <MessageBar intent=MessageBarIntent::Info>
                        <MessageBarBody>"Заявка в текущем статусе не редактируется"</MessageBarBody>
                    </MessageBar>
                })}

                <TabBar vm=vm />

                <Show
                    when=move || !vm.loading.get()
                    fallback=|| view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-4xl);">
                            <Spinner />
                            <span>"Загрузка..."</span>
                        </Flex>
                    }
                >
                    {move || match workflow_tab.get() {
                        Some(instance_id) => view! {
                            <WorkflowPanel
                                instance_id=instance_id
                                on_changed=Callback::new(move |_| vm.reload())
                            />
                        }
                        .into_any(),
                        None => view! { <DocumentTab vm=vm /> }.into_any(),
                    }}
                </Show>

                <Show when=move || vm.is_edit_mode().get()>
                    <div class="details-section">
                        <h4 class="details-section__title">"На основании заявки"</h4>
                        <Space>
                            <Button appearance=ButtonAppearance::Secondary on_click=open_order>
                                {icon("purchases")}
                                " Создать заказ поставщику"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=open_rfq>
                                {icon("rfq")}
                                " Создать запрос КП"
                            </Button>
                        </Space>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn Header(
    vm: RequisitionDetailsVm,
    on_saved: Callback<PurchaseRequisition>,
    on_close: Callback<()>,
) -> impl IntoView {
    let is_edit_mode = vm.is_edit_mode();
    let can_submit = vm.can_submit();

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h2 class="page__title">
                    {move || if is_edit_mode.get() {
                        format!("{} № {}", PurchaseRequisition::element_name(), vm.document_no.get())
                    } else {
                        "Новая заявка на закупку".to_string()
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
                    <Show when=move || can_submit.get()>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.submit()
                            disabled=Signal::derive(move || vm.submitting.get() || vm.saving.get())
                        >
                            {icon("send")}
                            " На согласование"
                        </Button>
                    </Show>
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
fn TabBar(vm: RequisitionDetailsVm) -> impl IntoView {
    let tab_button = move |key: &'static str, label: &'static str, icon_name: &'static str| {
        view! {
            <Button
                appearance=Signal::derive(move || if vm.active_tab.get() == key {
                    ButtonAppearance::Primary
                } else {
                    ButtonAppearance::Subtle
                })
                size=ButtonSize::Small
                on_click=move |_| vm.set_tab(key)
            >
                <span class="tab-icon">{icon(icon_name)}</span>
                {label}
            </Button>
        }
    };

    view! {
        <Flex
            gap=FlexGap::Small
            align=FlexAlign::Center
            style="margin-bottom: var(--spacing-md); padding: var(--spacing-sm); background: var(--color-bg-secondary); border-radius: var(--radius-lg); border: 1px solid var(--color-border);"
        >
            {tab_button("document", "Документ", "requisitions")}
            {move || vm.workflow_instance_id.get().is_some().then(|| tab_button("workflow", "Согласование", "workflow"))}
        </Flex>
    }
}

#[component]
fn DocumentTab(vm: RequisitionDetailsVm) -> impl IntoView {
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
                    <label class="form__label">"Требуемая дата"</label>
                    <DateInput value=vm.required_date disabled=read_only />
                </div>

                <div class="form__group">
                    <label class="form__label">"Инициатор *"</label>
                    <Input value=vm.requester_name disabled=read_only />
                </div>
                <div class="form__group">
                    <label class="form__label">"Подразделение"</label>
                    <Input value=vm.department_name placeholder="Опционально" disabled=read_only />
                </div>
                <div class="form__group">
                    <label class="form__label">"Склад *"</label>
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
