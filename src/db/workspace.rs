use anyhow::Result;
use sqlx::{Pool, Sqlite};

/// Workspace singleton operations (active tab, tab-naming counter)
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    pub async fn get(pool: &Pool<Sqlite>) -> Result<(Option<String>, i64)> {
        let row: (Option<String>, i64) =
            sqlx::query_as("SELECT active_tab_id, next_number FROM workspace WHERE id = 1")
                .fetch_one(pool)
                .await?;
        Ok(row)
    }

    pub async fn set_active(pool: &Pool<Sqlite>, id: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE workspace SET active_tab_id = ? WHERE id = 1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_next_number(pool: &Pool<Sqlite>, next_number: i64) -> Result<()> {
        sqlx::query("UPDATE workspace SET next_number = ? WHERE id = 1")
            .bind(next_number)
            .execute(pool)
            .await?;
        Ok(())
    }
}
