use super::view_model::UnitConversionDetailsVm;
use crate::domain::a004_unit_conversion::ui::list::{detail_key, ENTITY_LABEL};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a004_unit_conversion::UnitConversion;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn UnitConversionDetails(
    id: Option<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = UnitConversionDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = detail_key(id.as_deref());

    vm.load_references();
    if let Some(id) = id {
        vm.load(id);
    }

    let on_saved = Callback::new(move |c: UnitConversion| {
        let pair = format!(
            "{} → {}",
            c.from_unit_code.as_deref().unwrap_or(&c.from_unit_id),
            c.to_unit_code.as_deref().unwrap_or(&c.to_unit_id)
        );
        tabs_store.update_tab_title(&tab_key, &detail_tab_label(ENTITY_LABEL, &pair));
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a004_unit_conversion--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">
                        {move || if vm.id.get().is_some() { ENTITY_LABEL } else { "Новый коэффициент пересчёта" }}
                    </h2>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| vm.save(on_saved)
                            disabled=Signal::derive(move || vm.saving.get() || vm.loading.get())
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
                {move || vm.edit_warning().get().map(|w| view! {
                    <MessageBar intent=MessageBarIntent::Warning>
                        <MessageBarBody>{w}</MessageBarBody>
                    </MessageBar>
                })}
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
                    </MessageBar>
                })}

                <Show when=move || !vm.loading.get() fallback=|| view! { <Spinner /> }>
                    <div class="details-section">
                        <div class="details-grid--3col">
                            <div class="form__group">
                                <label class="form__label">"Из единицы"</label>
                                <ReferenceSelect items=vm.unit_options() value=vm.from_unit_id />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"В единицу"</label>
                                <ReferenceSelect items=vm.unit_options() value=vm.to_unit_id />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Коэффициент"</label>
                                <Input value=vm.factor placeholder="1000" />
                                <span class="form__hint">"1 «из» = коэффициент × «в»"</span>
                            </div>
                            <div class="form__group" style="grid-column: 1 / -1;">
                                <label class="form__label">"Примечание"</label>
                                <Textarea value=vm.note placeholder="Опционально" attr:rows=2 />
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
