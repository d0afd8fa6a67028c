pub(crate) mod row_helpers;
mod tabs;
mod workspace;

use anyhow::{Context, Result};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::collections::HashMap;

use crate::models::*;

use tabs::TabRepo;
use workspace::WorkspaceRepo;

/// Typed error for "resource not found" — enables reliable downcast
/// in the API error handler instead of fragile string matching.
#[derive(Debug)]
pub struct NotFoundError {
    pub resource: String,
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: &str, id: &str) -> Self {
        Self {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.resource, self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Store handles all database operations, delegating to per-entity repo modules.
#[derive(Clone)]
pub struct Store {
    pool: Pool<Sqlite>,
}

impl Store {
    /// Create a new database store with the default pool size
    pub async fn new(db_path: &str) -> Result<Self> {
        Self::with_pool_size(db_path, 5).await
    }

    /// Create a new database store with a specific pool size
    pub async fn with_pool_size(db_path: &str, max_connections: u32) -> Result<Self> {
        let db_url = format!("sqlite:{}?mode=rwc", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&db_url)
            .await
            .context("Failed to connect to database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations and ensure the workspace singleton row exists
    async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;

        let count: (i32,) = sqlx::query_as("SELECT COUNT(*) FROM workspace")
            .fetch_one(&self.pool)
            .await?;

        if count.0 == 0 {
            sqlx::query("INSERT INTO workspace (id, active_tab_id, next_number) VALUES (1, NULL, 1)")
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    // ---- Workspace ----

    /// Snapshot the full workspace: tabs plus active tab id and counter
    pub async fn get_workspace(&self) -> Result<Workspace> {
        let tabs = TabRepo::list(&self.pool).await?;
        let (active_tab_id, next_number) = WorkspaceRepo::get(&self.pool).await?;

        // Active id can go stale if rows were removed out of band
        let active_tab_id = active_tab_id.filter(|id| tabs.iter().any(|t| &t.id == id));

        Ok(Workspace {
            tabs,
            active_tab_id,
            next_number,
        })
    }

    /// Mark a tab as active; fails if the tab does not exist
    pub async fn set_active_tab(&self, id: &str) -> Result<()> {
        if TabRepo::get(&self.pool, id).await?.is_none() {
            return Err(NotFoundError::new("Tab", id).into());
        }
        WorkspaceRepo::set_active(&self.pool, Some(id)).await
    }

    // ---- Tabs ----

    pub async fn list_tabs(&self) -> Result<Vec<Tab>> {
        TabRepo::list(&self.pool).await
    }

    pub async fn get_tab(&self, id: &str) -> Result<Option<Tab>> {
        TabRepo::get(&self.pool, id).await
    }

    /// Create a tab with an auto-assigned "Config N" name, make it active,
    /// and advance the naming counter
    pub async fn create_tab(&self) -> Result<Tab> {
        let (_, next_number) = WorkspaceRepo::get(&self.pool).await?;
        let name = format!("Config {}", next_number);
        let tab = TabRepo::create(&self.pool, &name).await?;

        WorkspaceRepo::set_next_number(&self.pool, next_number + 1).await?;
        WorkspaceRepo::set_active(&self.pool, Some(&tab.id)).await?;
        Ok(tab)
    }

    pub async fn update_tab(&self, id: &str, req: &UpdateTabRequest) -> Result<Tab> {
        TabRepo::update(&self.pool, id, req).await
    }

    pub async fn set_tab_content(&self, id: &str, content: &str) -> Result<()> {
        TabRepo::set_content(&self.pool, id, content).await
    }

    pub async fn set_tab_variables(
        &self,
        id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<()> {
        TabRepo::set_variables(&self.pool, id, variables).await
    }

    pub async fn set_tab_output(&self, id: &str, output: &str) -> Result<()> {
        TabRepo::set_output(&self.pool, id, output).await
    }

    /// Delete a tab and re-select the active tab the way the UI expects:
    /// the tab that slid into the deleted slot, else the last tab, else none.
    /// The naming counter resets to 1 once the workspace is empty.
    pub async fn delete_tab(&self, id: &str) -> Result<Option<String>> {
        let tabs = TabRepo::list(&self.pool).await?;
        let index = tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| NotFoundError::new("Tab", id))?;

        TabRepo::delete(&self.pool, id).await?;

        let remaining: Vec<&Tab> = tabs.iter().filter(|t| t.id != id).collect();
        let new_active = if remaining.is_empty() {
            None
        } else if index < remaining.len() {
            Some(remaining[index].id.clone())
        } else {
            Some(remaining[remaining.len() - 1].id.clone())
        };

        WorkspaceRepo::set_active(&self.pool, new_active.as_deref()).await?;
        if remaining.is_empty() {
            WorkspaceRepo::set_next_number(&self.pool, 1).await?;
        }

        Ok(new_active)
    }
}
