// SPDX-License-Identifier: MIT
// SQLite-backed storage for tasks.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::model::{Task, TaskStatus};

/// Default timeout for individual SQLite queries (same as storage/mod.rs).
const QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Execute a future with the standard query timeout.
async fn with_timeout<T>(fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!(
            "database query timed out after {}s",
            QUERY_TIMEOUT.as_secs()
        )),
    }
}

// ─── Raw DB row ───────────────────────────────────────────────────────────────

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    name: String,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<TaskRow> for Task {
    fn from(r: TaskRow) -> Task {
        Task {
            id: Some(r.id),
            name: r.name,
            description: r.description,
            status: TaskStatus::from_str(&r.status),
            created_at: r.created_at,
        }
    }
}

// ─── TaskStorage ──────────────────────────────────────────────────────────────

/// Durable task store keyed by the SQLite-assigned row id.
///
/// The `*_with` variants take any SQLite executor so the service layer can
/// run read-then-write sequences inside one transaction; the `&self`
/// methods are pool-backed conveniences for single-statement operations.
#[derive(Clone)]
pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a transaction for a read-then-write unit of work.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Return every stored task in insertion order.
    pub async fn find_all(&self) -> Result<Vec<Task>> {
        let pool = self.pool.clone();
        let rows: Vec<TaskRow> = with_timeout(async {
            Ok(sqlx::query_as("SELECT * FROM tasks ORDER BY id ASC")
                .fetch_all(&pool)
                .await?)
        })
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Task>> {
        Self::find_by_id_with(&self.pool, id).await
    }

    /// Insert-or-update. A task without an id gets one assigned; the
    /// creation timestamp of an existing row is never overwritten.
    pub async fn save(&self, task: &Task) -> Result<Task> {
        Self::save_with(&self.pool, task).await
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool> {
        Self::exists_by_id_with(&self.pool, id).await
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<()> {
        Self::delete_by_id_with(&self.pool, id).await
    }

    // ── Executor-generic variants ─────────────────────────────────────────────

    pub async fn find_by_id_with(
        ex: impl sqlx::Executor<'_, Database = Sqlite>,
        id: i64,
    ) -> Result<Option<Task>> {
        let row: Option<TaskRow> = with_timeout(async {
            Ok(sqlx::query_as("SELECT * FROM tasks WHERE id = ?")
                .bind(id)
                .fetch_optional(ex)
                .await?)
        })
        .await?;
        Ok(row.map(Into::into))
    }

    pub async fn save_with(
        ex: impl sqlx::Executor<'_, Database = Sqlite>,
        task: &Task,
    ) -> Result<Task> {
        // A NULL id lets SQLite assign the next rowid; RETURNING hands the
        // stored row back in the same statement, so a save is one atomic
        // round trip. created_at is excluded from the conflict branch: it
        // is write-once.
        let row: TaskRow = with_timeout(async {
            Ok(sqlx::query_as(
                "INSERT INTO tasks (id, name, description, status, created_at)
                 VALUES (?, ?, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                     name        = excluded.name,
                     description = excluded.description,
                     status      = excluded.status
                 RETURNING id, name, description, status, created_at",
            )
            .bind(task.id)
            .bind(&task.name)
            .bind(task.description.as_deref())
            .bind(task.status.as_str())
            .bind(task.created_at)
            .fetch_one(ex)
            .await?)
        })
        .await?;
        Ok(row.into())
    }

    pub async fn exists_by_id_with(
        ex: impl sqlx::Executor<'_, Database = Sqlite>,
        id: i64,
    ) -> Result<bool> {
        let row: (i64,) = with_timeout(async {
            Ok(sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE id = ?")
                .bind(id)
                .fetch_one(ex)
                .await?)
        })
        .await?;
        Ok(row.0 > 0)
    }

    pub async fn delete_by_id_with(
        ex: impl sqlx::Executor<'_, Database = Sqlite>,
        id: i64,
    ) -> Result<()> {
        with_timeout(async {
            sqlx::query("DELETE FROM tasks WHERE id = ?")
                .bind(id)
                .execute(ex)
                .await?;
            Ok(())
        })
        .await
    }
}
