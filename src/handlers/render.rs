use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

use crate::models::*;
use crate::template;
use crate::AppState;

use super::ApiError;

/// Extract the ordered variable names referenced by a template.
/// Drives the value-entry form; always succeeds for any input.
pub async fn extract_variables(
    Json(req): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    Json(ExtractResponse {
        variables: template::extract_variables(&req.content),
    })
}

/// Stateless preview: substitute then space, persisting nothing
pub async fn render(Json(req): Json<RenderRequest>) -> Json<RenderResponse> {
    let result = template::replace_variables(&req.content, &req.variables);
    let output = template::apply_line_spacing(&result.output, req.line_spacing);

    Json(RenderResponse {
        output,
        undefined_vars: result.undefined_vars,
    })
}

/// Generate a tab's output from its stored template, values, and spacing
/// interval, persisting the result on the tab.
///
/// Unresolved variables are reported, not treated as failures — the caller
/// decides whether to warn. Very large templates get a fixed pre-response
/// delay so the UI can show progress feedback; the engine itself stays
/// synchronous and the delay is composed here, outside it.
pub async fn generate_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RenderResponse>, ApiError> {
    let tab = state
        .store
        .get_tab(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("tab"))?;

    if tab.content.trim().is_empty() {
        return Err(ApiError::bad_request("tab has no template content"));
    }

    if tab.content.len() > state.config.large_config_bytes {
        tokio::time::sleep(Duration::from_millis(state.config.generation_delay_ms)).await;
    }

    let result = template::replace_variables(&tab.content, &tab.variables);
    let output = template::apply_line_spacing(&result.output, tab.line_spacing);

    state.store.set_tab_output(&id, &output).await?;

    if !result.undefined_vars.is_empty() {
        tracing::info!(
            "Generated tab {} with {} unresolved variables",
            id,
            result.undefined_vars.len()
        );
    }

    Ok(Json(RenderResponse {
        output,
        undefined_vars: result.undefined_vars,
    }))
}
