pub mod state;

use self::state::create_state;
use crate::domain::a002_material_category::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_key, detail_tab_label};
use crate::shared::form_utils::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use contracts::domain::a002_material_category::MaterialCategory;
use contracts::domain::common::AggregateRoot;
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn MaterialCategoryList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let deleting = RwSignal::new(None::<String>);

    let open_detail = move |id: Option<String>, code: String| {
        tabs_store.open_tab(
            &detail_tab_key::<MaterialCategory>(id.as_deref()),
            &detail_tab_label(MaterialCategory::element_name(), &code),
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
            log!("Loading material categories");
            load_items();
        }
    });

    let search_query = RwSignal::new(String::new());
    Effect::new(move || {
        let query = search_query.get();
        untrack(move || state.update(|s| s.search_query = query));
    });

    let delete_item = move |id: String, name: String| {
        if deleting.get_untracked().is_some() {
            return;
        }
        if !confirm(&format!("Удалить категорию «{}»?", name)) {
            return;
        }
        deleting.set(Some(id.clone()));
        spawn_local(async move {
            match api::remove(&id).await {
                Ok(()) => {
                    let _ = state.try_update(|s| s.remove(&id));
                    notifications.success("Категория удалена");
                }
                Err(e) => notifications.report(&e),
            }
            let _ = deleting.try_set(None);
        });
    };

    view! {
        <PageFrame page_id="a002_material_category--list" category="list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{MaterialCategory::list_name()}</h1>
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
                            " Новая категория"
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
                    <Input value=search_query placeholder="Код или наименование..." />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="alert alert--error">{err}</div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=true min_width=120.0>"Код"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=220.0>"Наименование"</TableHeaderCell>
                                <TableHeaderCell resizable=true min_width=180.0>"Родительская категория"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Материалов"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.visible())
                                key=|c| c.to_string_id()
                                children=move |category: MaterialCategory| {
                                    let id = category.to_string_id();
                                    let id_for_link = id.clone();
                                    let id_for_delete = id.clone();
                                    let id_for_busy = id.clone();
                                    let code = category.base.code.clone();
                                    let name = category.name().to_string();
                                    let name_for_delete = name.clone();
                                    let parent = state.with_untracked(|s| s.parent_name(category.parent_id.as_deref()));
                                    let nested = category.parent_id.is_some();

                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a
                                                        href="#"
                                                        class="table__link"
                                                        style=if nested { "padding-left: var(--spacing-lg);" } else { "" }
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(Some(id_for_link.clone()), code.clone());
                                                        }
                                                    >
                                                        {category.base.code.clone()}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{parent}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{category.material_count}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        disabled=Signal::derive(move || deleting.get().as_deref() == Some(id_for_busy.as_str()))
                                                        on_click=move |_| delete_item(id_for_delete.clone(), name_for_delete.clone())
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
