use super::tabs::{GeneralTab, UnitsTab};
use super::view_model::MaterialDetailsVm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::components::ActiveBadge;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a003_material::Material;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MaterialDetails(id: Option<String>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let vm = MaterialDetailsVm::new();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let tab_key = detail_tab_key::<Material>(id.as_deref());

    vm.load_references();
    if let Some(id) = id {
        vm.load(id);
    }

    let on_saved = Callback::new(move |m: Material| {
        tabs_store.update_tab_title(
            &tab_key,
            &detail_tab_label(Material::element_name(), &m.base.code),
        );
    });

    view! {
        <PageFrame page_id="a003_material--detail" category="detail">
            <Header vm=vm on_saved=on_saved on_close=on_close />

            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <MessageBar intent=MessageBarIntent::Error>
                        <MessageBarBody>{e}</MessageBarBody>
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
                    {move || match vm.active_tab.get() {
                        "units" => view! { <UnitsTab vm=vm /> }.into_any(),
                        _ => view! { <GeneralTab vm=vm /> }.into_any(),
                    }}
                </Show>
            </div>
        </PageFrame>
    }
}

#[component]
fn Header(vm: MaterialDetailsVm, on_saved: Callback<Material>, on_close: Callback<()>) -> impl IntoView {
    let is_edit_mode = vm.is_edit_mode();

    view! {
        <div class="page__header">
            <div class="page__header-left">
                <h2 class="page__title">
                    {move || if is_edit_mode.get() {
                        format!("{}: {}", Material::element_name(), vm.name.get())
                    } else {
                        "Новый материал".to_string()
                    }}
                </h2>
                {move || is_edit_mode.get().then(|| view! { <ActiveBadge active=vm.is_active.get() /> })}
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
    }
}

#[component]
fn TabBar(vm: MaterialDetailsVm) -> impl IntoView {
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
            {tab_button("general", "Основная", "materials")}
            {tab_button("units", "Единицы", "units")}
        </Flex>
    }
}
