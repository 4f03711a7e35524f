//! Всплывающие уведомления
//!
//! Сервис кладётся в контекст в `App`; уведомление исчезает само через
//! `AUTO_DISMISS_MS`. Ошибки проверки формы сюда не попадают: они
//! показываются рядом с полями.

use contracts::shared::ApiError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Warning => "notification notification--warning",
            NotificationKind::Error => "notification notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: RwSignal<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn push(&self, kind: NotificationKind, text: impl Into<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.items.update(|items| {
            items.push(Notification {
                id,
                kind,
                text: text.into(),
            })
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            svc.dismiss(id);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NotificationKind::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text);
    }

    /// Сетевые и бизнес-ошибки; ошибки проверки остаются в форме
    pub fn report(&self, err: &ApiError) {
        match err {
            ApiError::Validation(_) => {}
            ApiError::Transport(_) => self.error(err.to_string()),
            ApiError::Business(_) => self.warning(err.to_string()),
        }
    }

    /// Ошибка операции формы: сетевая уходит в уведомление,
    /// остальные показываются в самой форме через `inline`.
    pub fn route(&self, err: ApiError, inline: RwSignal<Option<String>>) {
        if err.is_transient() {
            let _ = inline.try_set(None);
            self.error(err.to_string());
        } else {
            let _ = inline.try_set(Some(err.to_string()));
        }
    }

    pub fn dismiss(&self, id: u64) {
        // хост мог быть уже уничтожен
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

/// Стек уведомлений в правом нижнем углу. Монтируется один раз в `App`.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        <div class="notifications">
            <For
                each=move || svc.items.get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class() on:click=move |_| svc.dismiss(id)>
                            {n.text}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_css_class() {
        assert!(NotificationKind::Error.css_class().ends_with("--error"));
        assert!(NotificationKind::Success.css_class().starts_with("notification "));
    }
}
