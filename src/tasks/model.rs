// SPDX-License-Identifier: MIT
// Task data model — the single resource this daemon manages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── TaskStatus ───────────────────────────────────────────────────────────────

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Canonical string used in the database `status` column and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> TaskStatus {
        match s {
            "IN_PROGRESS" => TaskStatus::InProgress,
            "DONE" => TaskStatus::Done,
            _ => TaskStatus::Todo,
        }
    }
}

// ─── Task ─────────────────────────────────────────────────────────────────────

/// A persisted (or about-to-be-persisted) task.
///
/// `id` is `None` until storage assigns one; after that it never changes.
/// `created_at` is set once at creation and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

// ─── Request payloads ─────────────────────────────────────────────────────────

/// Incoming creation payload. Every field is optional here — validation
/// normalizes the draft into a `Task` or rejects it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial update payload. Absent (or JSON null) fields mean "leave
/// unchanged" — there is no way to clear a field through a patch.
/// Identifier and creation timestamp are not patchable; any such keys in
/// the request body are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
