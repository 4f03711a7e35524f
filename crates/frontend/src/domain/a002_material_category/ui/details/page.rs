use super::view_model::MaterialCategoryDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a002_material_category::MaterialCategory;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MaterialCategoryDetails(
    id: Option<String>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = MaterialCategoryDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = detail_tab_key::<MaterialCategory>(id.as_deref());

    vm.load_categories();
    if let Some(id) = id {
        vm.load(id);
    }

    let on_saved = Callback::new(move |c: MaterialCategory| {
        tabs_store.update_tab_title(
            &tab_key,
            &detail_tab_label(MaterialCategory::element_name(), &c.base.code),
        );
        on_close.run(());
    });

    view! {
        <PageFrame page_id="a002_material_category--detail" category="detail">
            <div class="page__header">
                <div class="page__header-left">
                    <h2 class="page__title">
                        {move || match vm.id.get() {
                            Some(_) => format!("{}: {}", MaterialCategory::element_name(), vm.name.get()),
                            None => "Новая категория материалов".to_string(),
                        }}
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
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
                    </MessageBar>
                })}

                <Show when=move || !vm.loading.get() fallback=|| view! { <Spinner /> }>
                    <div class="details-section">
                        <div class="details-grid--3col">
                            <div class="form__group">
                                <label class="form__label">"Код"</label>
                                <Input value=vm.code placeholder="RAW" />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Наименование"</label>
                                <Input value=vm.name />
                            </div>
                            <div class="form__group">
                                <label class="form__label">"Родительская категория"</label>
                                <ReferenceSelect
                                    items=vm.parent_options()
                                    value=vm.parent_id
                                    placeholder="— верхний уровень —"
                                />
                            </div>
                            <div class="form__group" style="grid-column: 1 / -1;">
                                <label class="form__label">"Описание"</label>
                                <Textarea value=vm.comment placeholder="Опционально" attr:rows=3 />
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
