use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::models::*;

use super::row_helpers::map_tab_row;

const SELECT_TAB: &str = r#"
    SELECT id, name, content, variables, output, line_spacing, syntax, filename,
           created_at, updated_at
    FROM tabs
"#;

/// Tab database operations
pub struct TabRepo;

impl TabRepo {
    pub async fn list(pool: &Pool<Sqlite>) -> Result<Vec<Tab>> {
        let rows = sqlx::query(&format!("{} ORDER BY position, created_at", SELECT_TAB))
            .fetch_all(pool)
            .await?;

        Ok(rows.iter().map(map_tab_row).collect())
    }

    pub async fn get(pool: &Pool<Sqlite>, id: &str) -> Result<Option<Tab>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_TAB))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.as_ref().map(map_tab_row))
    }

    /// Insert a fresh tab with default content at the end of the tab strip
    pub async fn create(pool: &Pool<Sqlite>, name: &str) -> Result<Tab> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO tabs (id, name, content, variables, output, line_spacing,
                              syntax, filename, position, created_at, updated_at)
            VALUES (?, ?, '', '{}', '', ?, ?, ?,
                    COALESCE((SELECT MAX(position) + 1 FROM tabs), 0), ?, ?)
            "#,
        )
        .bind(&id)
        .bind(name)
        .bind(DEFAULT_LINE_SPACING)
        .bind(syntax_mode::NONE)
        .bind(DEFAULT_FILENAME)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        Self::get(pool, &id)
            .await?
            .context("Tab not found after creation")
    }

    /// Patch name/spacing/syntax/filename; unspecified fields keep their value
    pub async fn update(pool: &Pool<Sqlite>, id: &str, req: &UpdateTabRequest) -> Result<Tab> {
        let existing = Self::get(pool, id)
            .await?
            .ok_or_else(|| super::NotFoundError::new("Tab", id))?;

        let name = match &req.name {
            Some(n) => {
                let trimmed = n.trim();
                if trimmed.is_empty() {
                    existing.name
                } else {
                    trimmed.chars().take(MAX_TAB_NAME_LEN).collect()
                }
            }
            None => existing.name,
        };
        let line_spacing = req.line_spacing.unwrap_or(existing.line_spacing);
        let syntax = req.syntax.clone().unwrap_or(existing.syntax);
        let filename = req.filename.clone().unwrap_or(existing.filename);

        sqlx::query(
            r#"
            UPDATE tabs SET name = ?, line_spacing = ?, syntax = ?, filename = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&name)
        .bind(line_spacing)
        .bind(&syntax)
        .bind(&filename)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;

        Self::get(pool, id)
            .await?
            .context("Tab not found after update")
    }

    pub async fn set_content(pool: &Pool<Sqlite>, id: &str, content: &str) -> Result<()> {
        let result = sqlx::query("UPDATE tabs SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Tab", id).into());
        }
        Ok(())
    }

    pub async fn set_variables(
        pool: &Pool<Sqlite>,
        id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<()> {
        let data = serde_json::to_string(variables)?;
        let result = sqlx::query("UPDATE tabs SET variables = ?, updated_at = ? WHERE id = ?")
            .bind(&data)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Tab", id).into());
        }
        Ok(())
    }

    pub async fn set_output(pool: &Pool<Sqlite>, id: &str, output: &str) -> Result<()> {
        let result = sqlx::query("UPDATE tabs SET output = ?, updated_at = ? WHERE id = ?")
            .bind(output)
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Tab", id).into());
        }
        Ok(())
    }

    pub async fn delete(pool: &Pool<Sqlite>, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM tabs WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(super::NotFoundError::new("Tab", id).into());
        }
        Ok(())
    }
}
