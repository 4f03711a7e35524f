pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;
pub mod top_header;

use center::Tabs;
use global_context::AppGlobalContext;
use leptos::prelude::*;
use left::Sidebar;
use top_header::TopHeader;

/// Оболочка приложения.
///
/// ```text
/// +--------------------------------+
/// |           TopHeader            |
/// +--------------------------------+
/// |  Sidebar  |  Вкладки (Tabs)    |
/// +--------------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-layout">
            <TopHeader />

            <div class="app-body">
                <div data-zone="left" class="left" class:hidden=move || !ctx.left_open.get()>
                    <Sidebar />
                </div>

                <div class="app-main">
                    <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
                        <Tabs />
                    </div>
                </div>
            </div>
        </div>
    }
}
