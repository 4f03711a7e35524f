use super::view_model::UnitDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::ActiveBadge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a001_unit::Unit;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn UnitDetails(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = UnitDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = detail_tab_key::<Unit>(id.as_deref());

    vm.load_units();
    if let Some(id) = id {
        vm.load(id);
    }

    let on_saved = Callback::new(move |unit: Unit| {
        tabs_store.update_tab_title(
            &tab_key,
            &detail_tab_label(Unit::element_name(), &unit.base.code),
        );
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a001_unit--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">
                        {move || if vm.is_edit_mode().get() {
                            format!("{}: {}", Unit::element_name(), vm.name.get())
                        } else {
                            "Новая единица измерения".to_string()
                        }}
                    </h2>
                    {move || vm.is_edit_mode().get().then(|| view! {
                        <ActiveBadge active=vm.is_active.get() />
                    })}
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save(on_saved)
                            disabled=vm.is_save_disabled()
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

            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
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
                    <div class="details-section">
                        <div class="details-grid--3col">
                            <div class="form__group">
                                <label class="form__label">"Код"</label>
                                <Input value=vm.code placeholder="KG" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Наименование"</label>
                                <Input value=vm.name placeholder="Килограмм" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Обозначение"</label>
                                <Input value=vm.symbol placeholder="кг" />
                            </div>

                            <div class="form__group">
                                <label class="form__label">"Базовая единица"</label>
                                <ReferenceSelect
                                    items=vm.base_options()
                                    value=vm.base_unit_id
                                    placeholder="— нет —"
                                />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Коэффициент к базовой"</label>
                                <Input
                                    value=vm.conversion_rate
                                    placeholder="1000"
                                    disabled=Signal::derive(move || !vm.has_base().get())
                                />
                                <span class="form__hint">"1 эта единица = коэффициент × базовая"</span>
                            </div>

                            <div class="form__group" style="grid-column: 1 / -1;">
                                <label class="form__label">"Комментарий"</label>
                                <Textarea value=vm.comment placeholder="Опционально" attr:rows=3 />
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
