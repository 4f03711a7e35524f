use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::notifications::{NotificationHost, NotificationService};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());
    provide_context(ModalStackService::new());
    provide_context(NotificationService::new());

    view! {
        <AppRoutes />
        <ModalHost />
        <NotificationHost />
    }
}
