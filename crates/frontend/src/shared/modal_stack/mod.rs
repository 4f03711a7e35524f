//! Стек модальных окон приложения
//!
//! Диалоги (подтверждение смены базовой единицы, добавление единицы к
//! материалу, комментарий к действию workflow) открываются через
//! `ModalStackService` и рисуются единственным `ModalHost` в корне.

use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: ModalBuilder,
    style: String,
    class: String,
}

/// Ссылка на открытое окно; копируется в обработчики кнопок
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    /// Открыть окно поверх текущих
    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with_frame(None, None, builder)
    }

    /// Открыть окно с дополнительными style/class для поверхности `div.modal`
    pub fn push_with_frame<F>(
        &self,
        style: Option<String>,
        class: Option<String>,
        builder: F,
    ) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder: Arc::new(builder),
                style: style.unwrap_or_default(),
                class: class.unwrap_or_default(),
            })
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn pop(&self) {
        self.stack.update(|s| {
            s.pop();
        });
    }

    pub fn clear(&self) {
        self.stack.set(Vec::new());
    }

    /// Закрытие на следующем тике: окно может быть удалено из DOM
    /// во время обработки собственного события клика.
    pub fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.close(id);
        });
    }

    fn pop_deferred(&self) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.pop();
        });
    }
}

/// Рисует стек окон. Монтируется один раз в `App`.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService не предоставлен в контексте приложения");

    // Escape закрывает только верхнее окно
    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                if key_event.key() == "Escape" && svc.is_open() {
                    svc.pop_deferred();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    view! {
        <For
            each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
            key=|(_, entry)| entry.id
            children=move |(idx, entry)| {
                let id = entry.id;
                let on_close = Callback::new(move |_| svc.close_deferred(id));
                let content = (entry.builder)(ModalHandle { id, svc });
                view! {
                    <ModalFrame
                        z_index=1000 + idx as i32
                        on_close=on_close
                        modal_style=entry.style.clone()
                        modal_class=entry.class.clone()
                    >
                        {content}
                    </ModalFrame>
                }
            }
        />
    }
}
