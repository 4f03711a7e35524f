use super::diagram::WorkflowDiagram;
use super::history::WorkflowHistory;
use super::notes::WorkflowNotes;
use crate::shared::components::TokenBadge;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::use_notifications;
use crate::system::workflow::api;
use contracts::shared::ApiError;
use contracts::system::workflow::{
    WorkflowAction, WorkflowActionRequest, WorkflowDefinition, WorkflowHistoryEntry,
    WorkflowStateSnapshot,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Снимок, схема и журнал одного экземпляра процесса
#[derive(Clone, Copy)]
struct WorkflowState {
    snapshot: RwSignal<Option<WorkflowStateSnapshot>>,
    definition: RwSignal<Option<WorkflowDefinition>>,
    history: RwSignal<Vec<WorkflowHistoryEntry>>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl WorkflowState {
    fn new() -> Self {
        Self {
            snapshot: RwSignal::new(None),
            definition: RwSignal::new(None),
            history: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    /// Перечитать снимок и журнал; схема запрашивается только при смене определения
    async fn refresh(self, instance_id: &str) -> Result<(), ApiError> {
        let snapshot = api::fetch_state(instance_id).await?;
        let known_definition = self
            .definition
            .try_with_untracked(|d| d.as_ref().map(|d| d.id == snapshot.definition_id))
            .flatten()
            .unwrap_or(false);

        if !known_definition {
            match api::fetch_definition(&snapshot.definition_id).await {
                Ok(definition) => {
                    let _ = self.definition.try_set(Some(definition));
                }
                // без схемы панель работает, шаг покажется подписью
                Err(e) => log::warn!("workflow definition {}: {}", snapshot.definition_id, e),
            }
        }

        let history = api::fetch_history(instance_id).await?;
        let _ = self.snapshot.try_set(Some(snapshot));
        let _ = self.history.try_set(history);
        Ok(())
    }
}

/// Запрос на действие. `None`: предыдущий запрос ещё идёт или снимка нет.
fn action_request(
    busy: bool,
    snapshot: Option<&WorkflowStateSnapshot>,
    action_key: &str,
    comment: &str,
) -> Option<Result<WorkflowActionRequest, ApiError>> {
    if busy {
        return None;
    }
    snapshot.map(|s| s.prepare_action(action_key, comment))
}

/// Панель согласования документа.
///
/// Показывает текущий шаг и только те действия, которые пришли в снимке
/// сервера. После каждого действия снимок и журнал перечитываются,
/// затем вызывается `on_changed` (документ мог сменить статус).
#[component]
pub fn WorkflowPanel(
    instance_id: String,
    #[prop(optional)] on_changed: Option<Callback<()>>,
) -> impl IntoView {
    let notifications = use_notifications();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let state = WorkflowState::new();
    let instance = StoredValue::new(instance_id.clone());

    let reload = move || {
        state.loading.set(true);
        let id = instance.get_value();
        spawn_local(async move {
            match state.refresh(&id).await {
                Ok(()) => {
                    let _ = state.error.try_set(None);
                }
                Err(e) => notifications.route(e, state.error),
            }
            let _ = state.loading.try_set(false);
        });
    };
    reload();

    let perform = move |action_key: String, comment: String| {
        let busy = state.loading.get_untracked();
        let prepared = state
            .snapshot
            .with_untracked(|s| action_request(busy, s.as_ref(), &action_key, &comment));
        let request = match prepared {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                notifications.warning(e.to_string());
                return;
            }
            None => return,
        };
        let id = instance.get_value();
        state.loading.set(true);
        spawn_local(async move {
            match api::take_action(&id, &request).await {
                Ok(()) => {
                    if let Err(e) = state.refresh(&id).await {
                        notifications.report(&e);
                    }
                    if let Some(cb) = on_changed {
                        cb.run(());
                    }
                }
                Err(e) => notifications.route(e, state.error),
            }
            let _ = state.loading.try_set(false);
        });
    };

    let open_action = move |action: WorkflowAction| {
        modal_stack.push_with_frame(
            Some("max-width: min(520px, 95vw); width: min(520px, 95vw);".to_string()),
            Some("workflow-action-modal".to_string()),
            move |handle| {
                let comment = RwSignal::new(String::new());
                let key = action.key.clone();
                view! {
                    <div class="modal-header">
                        <h2 class="modal-title">{action.name.clone()}</h2>
                        <div class="modal-header-actions">
                            <Button appearance=ButtonAppearance::Subtle on_click=move |_| handle.close()>
                                {icon("x")}
                            </Button>
                        </div>
                    </div>
                    <div class="modal-body">
                        <div class="form__group">
                            <label class="form__label">"Комментарий"</label>
                            <Textarea value=comment placeholder="Необязательно" attr:rows=3 />
                        </div>
                    </div>
                    <div class="modal-footer">
                        <Space>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| {
                                    handle.close();
                                    perform(key.clone(), comment.get_untracked());
                                }
                            >
                                {icon("check")}
                                " Выполнить"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                                "Отмена"
                            </Button>
                        </Space>
                    </div>
                }
                .into_any()
            },
        );
    };

    view! {
        <div class="workflow-panel">
            <div class="workflow-panel__header">
                <h3 class="workflow-panel__title">
                    {icon("workflow")}
                    {move || {
                        state
                            .definition
                            .get()
                            .map(|d| d.title())
                            .unwrap_or_else(|| "Согласование".to_string())
                    }}
                </h3>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| reload()
                    disabled=Signal::derive(move || state.loading.get())
                >
                    {icon("refresh")}
                </Button>
            </div>

            {move || state.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            {move || {
                state
                    .snapshot
                    .get()
                    .map(|snapshot| {
                        let presentation = snapshot.step_presentation();
                        let actions = snapshot.offered_actions().to_vec();
                        view! {
                            <div class="workflow-panel__state">
                                <span class="form__label">"Текущий шаг: "</span>
                                <TokenBadge presentation=presentation />
                                {snapshot.is_complete.then(|| view! {
                                    <span class="workflow-panel__done">" Процесс завершён"</span>
                                })}
                            </div>
                            <div class="workflow-panel__actions">
                                <Space>
                                    {actions
                                        .into_iter()
                                        .map(|action| {
                                            let label = action.name.clone();
                                            view! {
                                                <Button
                                                    appearance=ButtonAppearance::Primary
                                                    on_click=move |_| open_action(action.clone())
                                                    disabled=Signal::derive(move || state.loading.get())
                                                >
                                                    {label}
                                                </Button>
                                            }
                                        })
                                        .collect_view()}
                                </Space>
                            </div>
                        }
                    })
            }}

            {move || {
                let definition = state.definition.get()?;
                let snapshot = state.snapshot.get()?;
                let presentation = snapshot.step_presentation();
                Some(view! {
                    <WorkflowDiagram
                        bpmn_xml=definition.bpmn_xml
                        step_id=snapshot.step_id.to_string()
                        step_label=presentation.label
                    />
                })
            }}

            <div class="workflow-panel__columns">
                <WorkflowHistory entries=state.history />
                <WorkflowNotes instance_id=instance_id />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::workflow::StepId;

    fn snapshot() -> WorkflowStateSnapshot {
        WorkflowStateSnapshot {
            instance_id: "i1".into(),
            definition_id: "d1".into(),
            step_id: StepId("Task_1".into()),
            step_name: "Руководитель".into(),
            is_complete: false,
            available_actions: vec![WorkflowAction {
                key: "approve".into(),
                name: "Согласовать".into(),
            }],
        }
    }

    #[test]
    fn test_no_second_action_while_request_in_flight() {
        let s = snapshot();
        assert!(action_request(true, Some(&s), "approve", "").is_none());
        assert!(matches!(action_request(false, Some(&s), "approve", ""), Some(Ok(_))));
    }

    #[test]
    fn test_action_needs_snapshot() {
        assert!(action_request(false, None, "approve", "").is_none());
    }
}
