use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::models::DEFAULT_FILENAME;
use crate::AppState;

use super::ApiError;

/// Download a tab's last generated output as a plain-text attachment
pub async fn export_tab(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let tab = state
        .store
        .get_tab(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("tab"))?;

    if tab.output.is_empty() {
        return Err(ApiError::conflict("no output generated for this tab yet"));
    }

    let filename = sanitize_filename(&tab.filename);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        tab.output,
    )
        .into_response())
}

/// Reduce a user-supplied filename to something safe for a download header.
/// Strips path components, header-breaking characters, and control bytes;
/// falls back to the default name when nothing usable remains.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .trim()
        .chars()
        .filter(|c| {
            !c.is_control() && !matches!(c, '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|')
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        return DEFAULT_FILENAME.to_string();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_passes_normal_names() {
        assert_eq!(sanitize_filename("router-01.cfg"), "router-01.cfg");
        assert_eq!(sanitize_filename("config.txt"), "config.txt");
    }

    #[test]
    fn test_sanitize_strips_path_separators() {
        assert_eq!(sanitize_filename("../etc/passwd"), "..etcpasswd");
        assert_eq!(sanitize_filename("a\\b.cfg"), "ab.cfg");
    }

    #[test]
    fn test_sanitize_strips_header_breakers() {
        assert_eq!(sanitize_filename("a\"b.txt"), "ab.txt");
        assert_eq!(sanitize_filename("bad\r\nname.txt"), "badname.txt");
    }

    #[test]
    fn test_sanitize_falls_back_to_default() {
        assert_eq!(sanitize_filename(""), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename("   "), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename("..."), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename("///"), DEFAULT_FILENAME);
    }
}
