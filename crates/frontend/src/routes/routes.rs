use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use leptos::prelude::*;

/// Единственный маршрут: оболочка с вкладками, адрес хранит активную вкладку
#[component]
pub fn AppRoutes() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    tabs_store.init_router_integration();

    view! { <Shell /> }
}
