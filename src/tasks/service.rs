// SPDX-License-Identifier: MIT
// Task service — validation, merge, and storage orchestration.

use tracing::{debug, info};

use super::error::TaskError;
use super::model::{Task, TaskDraft, TaskPatch};
use super::storage::TaskStorage;
use super::validate;

/// Business-rule layer for the task resource.
///
/// Every operation is one atomic unit of work against storage:
/// read-then-write operations (update, delete) run inside a single
/// transaction so they observe a consistent row. Validation and not-found
/// failures are terminal — nothing here retries.
#[derive(Clone)]
pub struct TaskService {
    storage: TaskStorage,
}

impl TaskService {
    pub fn new(storage: TaskStorage) -> Self {
        Self { storage }
    }

    /// Every stored task, in storage (insertion) order. An empty store
    /// yields an empty vec.
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.storage.find_all().await?)
    }

    pub async fn get_task_by_id(&self, id: i64) -> Result<Task, TaskError> {
        validate::validate_id(id)?;
        self.storage
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Validate and persist a new task; the returned task carries the
    /// storage-assigned id.
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, TaskError> {
        let task = validate::validate_for_create(draft)?;
        let created = self.storage.save(&task).await?;
        info!(id = created.id, name = %created.name, "task created");
        Ok(created)
    }

    /// Merge a partial update into the stored task and persist the result.
    ///
    /// Lookup, merge, and save share one transaction; an invalid patch
    /// drops the transaction uncommitted, leaving the stored row as it was.
    pub async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Task, TaskError> {
        validate::validate_id(id)?;
        let mut tx = self.storage.begin().await?;
        let mut existing = TaskStorage::find_by_id_with(&mut *tx, id)
            .await?
            .ok_or(TaskError::NotFound(id))?;
        validate::merge_patch(&mut existing, patch)?;
        let updated = TaskStorage::save_with(&mut *tx, &existing).await?;
        tx.commit().await.map_err(anyhow::Error::from)?;
        debug!(id, "task updated");
        Ok(updated)
    }

    /// Hard-delete a task. Deleting an id that has no record — including an
    /// id deleted moments earlier — fails with `NotFound`.
    pub async fn delete_task(&self, id: i64) -> Result<(), TaskError> {
        validate::validate_id(id)?;
        let mut tx = self.storage.begin().await?;
        if !TaskStorage::exists_by_id_with(&mut *tx, id).await? {
            return Err(TaskError::NotFound(id));
        }
        TaskStorage::delete_by_id_with(&mut *tx, id).await?;
        tx.commit().await.map_err(anyhow::Error::from)?;
        info!(id, "task deleted");
        Ok(())
    }
}
