use crate::shared::date_utils::format_timestamp;
use crate::shared::form_utils::confirm;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::system::workflow::api;
use contracts::system::workflow::{CreateWorkflowNoteRequest, WorkflowNote};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Заметки к экземпляру процесса
#[component]
pub fn WorkflowNotes(instance_id: String) -> impl IntoView {
    let notifications = use_notifications();
    let instance_id = StoredValue::new(instance_id);
    let notes = RwSignal::new(Vec::<WorkflowNote>::new());
    let draft = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let load = move || {
        let id = instance_id.get_value();
        spawn_local(async move {
            match api::fetch_notes(&id).await {
                Ok(items) => {
                    let _ = notes.try_set(items);
                }
                Err(e) => notifications.report(&e),
            }
        });
    };
    load();

    let add = move |_| {
        if busy.get_untracked() {
            return;
        }
        let request = match CreateWorkflowNoteRequest::new(&instance_id.get_value(), &draft.get_untracked()) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        spawn_local(async move {
            match api::add_note(&request).await {
                Ok(note) => {
                    let _ = notes.try_update(|items| items.push(note));
                    let _ = draft.try_set(String::new());
                }
                Err(e) => notifications.route(e, error),
            }
            let _ = busy.try_set(false);
        });
    };

    let remove = move |note_id: String| {
        if !confirm("Удалить заметку?") {
            return;
        }
        spawn_local(async move {
            match api::delete_note(&note_id).await {
                Ok(()) => {
                    let _ = notes.try_update(|items| items.retain(|n| n.id != note_id));
                }
                Err(e) => notifications.report(&e),
            }
        });
    };

    view! {
        <div class="workflow-notes">
            <h4 class="workflow-panel__subtitle">"Заметки"</h4>
            <For
                each=move || notes.get()
                key=|n| n.id.clone()
                children=move |note: WorkflowNote| {
                    let id = note.id.clone();
                    view! {
                        <div class="workflow-notes__item">
                            <div class="workflow-notes__meta">
                                {format_timestamp(note.created_at)}
                                {note.author.clone().map(|a| format!(" · {}", a))}
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    size=ButtonSize::Small
                                    on_click=move |_| remove(id.clone())
                                >
                                    {icon("trash")}
                                </Button>
                            </div>
                            <div class="workflow-notes__text">{note.text.clone()}</div>
                        </div>
                    }
                }
            />
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <div class="workflow-notes__form">
                <Textarea value=draft placeholder="Новая заметка" />
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=add
                    disabled=Signal::derive(move || busy.get())
                >
                    {icon("message")}
                    " Добавить"
                </Button>
            </div>
        </div>
    }
}
