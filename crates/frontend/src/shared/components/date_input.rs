use leptos::prelude::*;

/// Поле даты на нативном date picker.
/// Значение хранится как `YYYY-MM-DD`, браузер показывает его в локали пользователя.
#[component]
pub fn DateInput(
    value: RwSignal<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="form__date-input"
            prop:value=move || value.get()
            prop:disabled=move || disabled.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}
