// SPDX-License-Identifier: MIT
// Pure validation and merge rules for the task resource.
//
// Everything here is side-effect free so the rules can be tested without a
// database: the service layer feeds these functions and persists whatever
// they hand back.

use chrono::Utc;

use super::error::TaskError;
use super::model::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Normalize a creation draft into a persistable `Task`.
///
/// Rejects drafts that pre-specify an identifier (ids are assigned by
/// storage) or whose name is absent or blank after trimming. Status
/// defaults to `TODO` and the creation timestamp to now when absent.
pub fn validate_for_create(draft: TaskDraft) -> Result<Task, TaskError> {
    if draft.id.is_some() {
        return Err(TaskError::invalid("a new task must not carry an id"));
    }
    let name = draft.name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err(TaskError::invalid("task name is required"));
    }
    Ok(Task {
        id: None,
        name: name.to_string(),
        description: draft.description,
        status: draft.status.unwrap_or(TaskStatus::Todo),
        created_at: draft.created_at.unwrap_or_else(Utc::now),
    })
}

/// Identifiers are positive integers; anything else is a caller error.
pub fn validate_id(id: i64) -> Result<(), TaskError> {
    if id <= 0 {
        return Err(TaskError::invalid(format!(
            "task id must be a positive number, got {id}"
        )));
    }
    Ok(())
}

/// Apply a partial update to `existing` in place.
///
/// Only fields present in the patch are written; a present name must be
/// non-blank after trimming, and the name check runs before any field is
/// touched so a rejected patch leaves `existing` unchanged. Identifier and
/// creation timestamp are never altered.
pub fn merge_patch(existing: &mut Task, patch: TaskPatch) -> Result<(), TaskError> {
    let name = match patch.name {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(TaskError::invalid("task name must not be blank"));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };
    if let Some(name) = name {
        existing.name = name;
    }
    if let Some(description) = patch.description {
        existing.description = Some(description);
    }
    if let Some(status) = patch.status {
        existing.status = status;
    }
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn draft(name: &str) -> TaskDraft {
        TaskDraft {
            name: Some(name.to_string()),
            ..TaskDraft::default()
        }
    }

    fn existing_task() -> Task {
        Task {
            id: Some(3),
            name: "A".to_string(),
            description: Some("d".to_string()),
            status: TaskStatus::Todo,
            created_at: "2026-01-15T08:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn create_trims_name_and_applies_defaults() {
        let task = validate_for_create(draft("  ship it  ")).unwrap();
        assert_eq!(task.name, "ship it");
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.id.is_none());
        assert!(task.description.is_none());
    }

    #[test]
    fn create_keeps_supplied_status_and_timestamp() {
        let ts: DateTime<Utc> = "2026-02-01T12:00:00Z".parse().unwrap();
        let task = validate_for_create(TaskDraft {
            name: Some("deploy".to_string()),
            status: Some(TaskStatus::InProgress),
            created_at: Some(ts),
            ..TaskDraft::default()
        })
        .unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.created_at, ts);
    }

    #[test]
    fn create_rejects_preassigned_id() {
        let result = validate_for_create(TaskDraft {
            id: Some(42),
            name: Some("ok".to_string()),
            ..TaskDraft::default()
        });
        assert!(matches!(result, Err(TaskError::InvalidArgument(_))));
    }

    #[test]
    fn create_rejects_missing_or_blank_name() {
        for d in [TaskDraft::default(), draft(""), draft("   \t ")] {
            assert!(matches!(
                validate_for_create(d),
                Err(TaskError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn validate_id_accepts_positive_only() {
        assert!(validate_id(1).is_ok());
        assert!(matches!(validate_id(0), Err(TaskError::InvalidArgument(_))));
        assert!(matches!(
            validate_id(-7),
            Err(TaskError::InvalidArgument(_))
        ));
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut task = existing_task();
        merge_patch(
            &mut task,
            TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
        )
        .unwrap();
        assert_eq!(task.name, "A");
        assert_eq!(task.description.as_deref(), Some("d"));
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn merge_trims_replacement_name() {
        let mut task = existing_task();
        merge_patch(
            &mut task,
            TaskPatch {
                name: Some("  B  ".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
        assert_eq!(task.name, "B");
    }

    #[test]
    fn merge_empty_patch_is_a_no_op() {
        let mut task = existing_task();
        let before = task.clone();
        merge_patch(&mut task, TaskPatch::default()).unwrap();
        assert_eq!(task, before);
    }

    #[test]
    fn merge_blank_name_fails_and_leaves_task_untouched() {
        let mut task = existing_task();
        let before = task.clone();
        let result = merge_patch(
            &mut task,
            TaskPatch {
                name: Some("   ".to_string()),
                description: Some("replaced".to_string()),
                status: Some(TaskStatus::Done),
            },
        );
        assert!(matches!(result, Err(TaskError::InvalidArgument(_))));
        assert_eq!(task, before);
    }

    #[test]
    fn merge_never_touches_id_or_created_at() {
        let mut task = existing_task();
        let (id, created_at) = (task.id, task.created_at);
        merge_patch(
            &mut task,
            TaskPatch {
                name: Some("renamed".to_string()),
                description: Some("new".to_string()),
                status: Some(TaskStatus::InProgress),
            },
        )
        .unwrap();
        assert_eq!(task.id, id);
        assert_eq!(task.created_at, created_at);
    }
}
