use leptos::ev;
use leptos::prelude::*;

/// Подложка и поверхность модального окна.
///
/// Заголовок и кнопки рисует содержимое: карточка в окне выглядит так же,
/// как во вкладке.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    #[prop(optional)] z_index: Option<i32>,
    #[prop(optional, into)] modal_class: String,
    #[prop(optional, into)] modal_style: String,
    children: Children,
) -> impl IntoView {
    let z_index = z_index.unwrap_or(1000);
    let pressed_on_overlay = RwSignal::new(false);

    let is_overlay_itself = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    // Закрываем, только если нажатие и отпускание были на подложке:
    // выделение текста мышью внутри окна не должно его закрывать.
    let on_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(is_overlay_itself(&ev));
    };
    let on_overlay_click = move |ev: ev::MouseEvent| {
        let close = pressed_on_overlay.get_untracked() && is_overlay_itself(&ev);
        pressed_on_overlay.set(false);
        if close {
            on_close.run(());
        }
    };

    let surface_class = if modal_class.is_empty() {
        "modal".to_string()
    } else {
        format!("modal {modal_class}")
    };

    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=on_mouse_down
            on:click=on_overlay_click
        >
            <div
                class=surface_class
                style=format!("position: relative; {modal_style}")
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}
