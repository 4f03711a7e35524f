use contracts::shared::TokenPresentation;
use leptos::prelude::*;

/// Бейдж серверного токена (статус документа, шаг workflow)
#[component]
pub fn TokenBadge(presentation: TokenPresentation) -> impl IntoView {
    let class = format!("badge {}", presentation.tone.css_modifier());
    let title = if presentation.known {
        String::new()
    } else {
        "Значение задано сервером".to_string()
    };

    view! {
        <span class=class title=title>{presentation.label}</span>
    }
}

/// Активна / деактивирована (для справочников без удаления)
#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    if active {
        view! { <span class="badge badge--success">"Активна"</span> }.into_any()
    } else {
        view! { <span class="badge badge--neutral">"Не активна"</span> }.into_any()
    }
}
