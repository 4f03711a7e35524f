use crate::shared::date_utils::format_timestamp;
use contracts::system::workflow::WorkflowHistoryEntry;
use leptos::prelude::*;

/// Лента прохождения процесса (записи уже отсортированы: новые сверху)
#[component]
pub fn WorkflowHistory(#[prop(into)] entries: Signal<Vec<WorkflowHistoryEntry>>) -> impl IntoView {
    view! {
        <div class="workflow-history">
            <h4 class="workflow-panel__subtitle">"История"</h4>
            {move || {
                let entries = entries.get();
                if entries.is_empty() {
                    return view! { <div class="workflow-history__empty">"Записей нет"</div> }.into_any();
                }
                view! {
                    <ul class="workflow-history__list">
                        {entries
                            .into_iter()
                            .map(|entry| {
                                let step = if entry.step_name.trim().is_empty() {
                                    entry.step_id.to_string()
                                } else {
                                    entry.step_name.clone()
                                };
                                let action = entry.action_label().map(str::to_string);
                                view! {
                                    <li class="workflow-history__item">
                                        <div class="workflow-history__meta">
                                            <span class="workflow-history__time">
                                                {format_timestamp(entry.occurred_at)}
                                            </span>
                                            {entry.actor.clone().map(|a| view! {
                                                <span class="workflow-history__actor">{a}</span>
                                            })}
                                        </div>
                                        <div class="workflow-history__step">
                                            {step}
                                            {action.map(|a| view! {
                                                <span class="workflow-history__action">{format!(" → {}", a)}</span>
                                            })}
                                        </div>
                                        {entry.comment.clone().filter(|c| !c.trim().is_empty()).map(|c| view! {
                                            <div class="workflow-history__comment">{c}</div>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </div>
    }
}
