use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

use super::{created, ApiError, MessageResponse};

/// Full workspace snapshot: tabs, active tab, naming counter
pub async fn get_workspace(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Workspace>, ApiError> {
    let workspace = state.store.get_workspace().await?;
    Ok(Json(workspace))
}

/// List all tabs in strip order
pub async fn list_tabs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Tab>>, ApiError> {
    let tabs = state.store.list_tabs().await?;
    Ok(Json(tabs))
}

/// Get a single tab by ID
pub async fn get_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Tab>, ApiError> {
    let tab = state
        .store
        .get_tab(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("tab"))?;
    Ok(Json(tab))
}

/// Create a new auto-named tab and make it active
pub async fn create_tab(
    State(state): State<Arc<AppState>>,
) -> Result<(axum::http::StatusCode, Json<Tab>), ApiError> {
    let tab = state.store.create_tab().await?;
    Ok(created(tab))
}

/// Patch tab settings (name, line spacing, syntax mode, export filename)
pub async fn update_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTabRequest>,
) -> Result<Json<Tab>, ApiError> {
    if let Some(syntax) = &req.syntax {
        if !syntax_mode::is_valid(syntax) {
            return Err(ApiError::bad_request(format!(
                "invalid syntax mode: {}",
                syntax
            )));
        }
    }

    let tab = state.store.update_tab(&id, &req).await?;
    Ok(Json(tab))
}

/// Delete a tab; responds with the newly active tab id (if any)
pub async fn delete_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    // Drop any saves still pending against the doomed tab
    state.debouncer.cancel(&format!("content-{}", id)).await;
    state.debouncer.cancel(&format!("variables-{}", id)).await;

    let new_active = state.store.delete_tab(&id).await?;
    Ok(Json(serde_json::json!({ "active_tab_id": new_active })))
}

/// Mark a tab as the active one
pub async fn activate_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.set_active_tab(&id).await?;
    Ok(MessageResponse::new("tab activated"))
}

/// Save new template content for a tab. Persistence is debounced so a burst
/// of keystroke updates becomes one write; the request returns immediately.
pub async fn update_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<(axum::http::StatusCode, Json<MessageResponse>), ApiError> {
    // Reject unknown tabs up front; the deferred write can no longer report it
    if state.store.get_tab(&id).await?.is_none() {
        return Err(ApiError::not_found("tab"));
    }

    let store = state.store.clone();
    let tab_id = id.clone();
    state
        .debouncer
        .schedule(&format!("content-{}", id), move || async move {
            if let Err(e) = store.set_tab_content(&tab_id, &req.content).await {
                tracing::warn!("Deferred content save failed for tab {}: {}", tab_id, e);
            }
        })
        .await;

    Ok((
        axum::http::StatusCode::ACCEPTED,
        MessageResponse::new("content save scheduled"),
    ))
}

/// Save a tab's variable values. Debounced like content updates.
pub async fn update_variables(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateVariablesRequest>,
) -> Result<(axum::http::StatusCode, Json<MessageResponse>), ApiError> {
    if state.store.get_tab(&id).await?.is_none() {
        return Err(ApiError::not_found("tab"));
    }

    let store = state.store.clone();
    let tab_id = id.clone();
    state
        .debouncer
        .schedule(&format!("variables-{}", id), move || async move {
            if let Err(e) = store.set_tab_variables(&tab_id, &req.variables).await {
                tracing::warn!("Deferred variable save failed for tab {}: {}", tab_id, e);
            }
        })
        .await;

    Ok((
        axum::http::StatusCode::ACCEPTED,
        MessageResponse::new("variable save scheduled"),
    ))
}
