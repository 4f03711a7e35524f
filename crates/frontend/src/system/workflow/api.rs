//! HTTP-обёртки движка согласования (`/api/workflow`, `/api/workflow-notes`)

use crate::shared::api_utils::{delete, get_json, item_path, post_command, post_json};
use contracts::shared::ApiError;
use contracts::system::workflow::{
    newest_first, CreateWorkflowNoteRequest, WorkflowActionRequest, WorkflowDefinition,
    WorkflowHistoryEntry, WorkflowNote, WorkflowStateSnapshot,
};

const BASE: &str = "/api/workflow";
const NOTES: &str = "/api/workflow-notes";

fn instance_path(instance_id: &str, tail: &str) -> String {
    format!("{}/{}", item_path(&format!("{}/instance", BASE), instance_id), tail)
}

pub async fn fetch_definition(definition_id: &str) -> Result<WorkflowDefinition, ApiError> {
    get_json(&item_path(&format!("{}/definition", BASE), definition_id)).await
}

pub async fn fetch_state(instance_id: &str) -> Result<WorkflowStateSnapshot, ApiError> {
    get_json(&instance_path(instance_id, "state"))
        .await
        .map_err(|e| {
            log::warn!("workflow state {} failed: {}", instance_id, e);
            e
        })
}

/// Журнал экземпляра, новые записи сверху
pub async fn fetch_history(instance_id: &str) -> Result<Vec<WorkflowHistoryEntry>, ApiError> {
    let entries = get_json(&instance_path(instance_id, "history")).await?;
    Ok(newest_first(entries))
}

pub async fn take_action(instance_id: &str, request: &WorkflowActionRequest) -> Result<(), ApiError> {
    post_command(&instance_path(instance_id, "action"), request).await?;
    log::info!("workflow {}: action {}", instance_id, request.action_key);
    Ok(())
}

pub async fn fetch_notes(instance_id: &str) -> Result<Vec<WorkflowNote>, ApiError> {
    get_json(&item_path(NOTES, instance_id)).await
}

pub async fn add_note(request: &CreateWorkflowNoteRequest) -> Result<WorkflowNote, ApiError> {
    post_json(NOTES, request).await
}

pub async fn delete_note(note_id: &str) -> Result<(), ApiError> {
    delete(&item_path(NOTES, note_id)).await
}
