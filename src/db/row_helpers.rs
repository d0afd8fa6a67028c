use std::collections::HashMap;

use sqlx::{sqlite::SqliteRow, Row};

use crate::models::*;

/// Map a SQLite row to a Tab struct
pub fn map_tab_row(row: &SqliteRow) -> Tab {
    let variables_json: String = row.get("variables");
    let variables: HashMap<String, String> =
        serde_json::from_str(&variables_json).unwrap_or_default();

    Tab {
        id: row.get("id"),
        name: row.get("name"),
        content: row.get("content"),
        variables,
        output: row.get("output"),
        line_spacing: row.get("line_spacing"),
        syntax: row.get("syntax"),
        filename: row.get("filename"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
