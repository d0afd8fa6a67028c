use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical syntax-highlighting modes for the template editor
pub mod syntax_mode {
    pub const NONE: &str = "none";
    pub const CISCO: &str = "cisco";
    pub const JUNIPER: &str = "juniper";

    pub const ALL: &[&str] = &[NONE, CISCO, JUNIPER];

    pub fn is_valid(mode: &str) -> bool {
        ALL.contains(&mode)
    }
}

/// Default spacing interval for newly created tabs
pub const DEFAULT_LINE_SPACING: i32 = 5;

/// Default export filename for newly created tabs
pub const DEFAULT_FILENAME: &str = "config.txt";

/// Tab names are truncated to this length on rename
pub const MAX_TAB_NAME_LEN: usize = 50;

/// Tab represents one configuration workspace: a template, its variable
/// values, and the last generated output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    pub id: String,
    pub name: String,
    pub content: String,
    pub variables: HashMap<String, String>,
    pub output: String,
    pub line_spacing: i32,
    pub syntax: String,
    pub filename: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Workspace wraps the full tab state returned to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct Workspace {
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<String>,
    pub next_number: i64,
}

/// UpdateTabRequest patches tab settings; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTabRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub line_spacing: Option<i32>,
    #[serde(default)]
    pub syntax: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// UpdateContentRequest carries a new template body for a tab
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContentRequest {
    pub content: String,
}

/// UpdateVariablesRequest replaces a tab's value map
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVariablesRequest {
    pub variables: HashMap<String, String>,
}

/// ExtractRequest asks for the variable names referenced by a template
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub content: String,
}

/// ExtractResponse lists variable names in first-occurrence order
#[derive(Debug, Clone, Serialize)]
pub struct ExtractResponse {
    pub variables: Vec<String>,
}

/// RenderRequest for a stateless preview without touching any tab
#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub content: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub line_spacing: i32,
}

/// RenderResponse wraps generated output plus any unresolved variables.
/// `undefined_vars` is informational; generation never fails on content.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub output: String,
    pub undefined_vars: Vec<String>,
}
