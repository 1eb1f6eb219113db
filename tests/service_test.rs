//! Service-level tests for the task CRUD contract, run against a real
//! SQLite database in a temp directory.

use taskd::storage::Storage;
use taskd::tasks::{TaskDraft, TaskError, TaskPatch, TaskService, TaskStatus, TaskStorage};
use tempfile::TempDir;

async fn make_service(dir: &TempDir) -> TaskService {
    let storage = Storage::new(dir.path()).await.unwrap();
    TaskService::new(TaskStorage::new(storage.pool()))
}

fn draft(name: &str) -> TaskDraft {
    TaskDraft {
        name: Some(name.to_string()),
        ..TaskDraft::default()
    }
}

#[tokio::test]
async fn create_assigns_distinct_ids_and_get_returns_equal_task() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let first = service.create_task(draft("first")).await.unwrap();
    let second = service.create_task(draft("second")).await.unwrap();

    let first_id = first.id.expect("created task must carry an id");
    let second_id = second.id.expect("created task must carry an id");
    assert!(first_id > 0);
    assert_ne!(first_id, second_id);

    let fetched = service.get_task_by_id(first_id).await.unwrap();
    assert_eq!(fetched, first);
}

#[tokio::test]
async fn create_rejects_invalid_drafts() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let with_id = TaskDraft {
        id: Some(1),
        name: Some("has an id".to_string()),
        ..TaskDraft::default()
    };
    for bad in [with_id, TaskDraft::default(), draft("   ")] {
        let result = service.create_task(bad).await;
        assert!(matches!(result, Err(TaskError::InvalidArgument(_))));
    }

    // Nothing was persisted by the rejected drafts.
    assert!(service.get_all_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_trims_name_and_defaults_status() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let task = service.create_task(draft("  padded  ")).await.unwrap();
    assert_eq!(task.name, "padded");
    assert_eq!(task.status, TaskStatus::Todo);
    assert!(task.description.is_none());
}

#[tokio::test]
async fn update_merges_only_present_fields() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let created = service
        .create_task(TaskDraft {
            name: Some("A".to_string()),
            description: Some("d".to_string()),
            ..TaskDraft::default()
        })
        .await
        .unwrap();
    let id = created.id.unwrap();

    let updated = service
        .update_task(
            id,
            TaskPatch {
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "A");
    assert_eq!(updated.description.as_deref(), Some("d"));
    assert_eq!(updated.status, TaskStatus::Done);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_with_blank_name_leaves_stored_record_unchanged() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let created = service.create_task(draft("keep me")).await.unwrap();
    let id = created.id.unwrap();

    let result = service
        .update_task(
            id,
            TaskPatch {
                name: Some("   ".to_string()),
                status: Some(TaskStatus::Done),
                ..TaskPatch::default()
            },
        )
        .await;
    assert!(matches!(result, Err(TaskError::InvalidArgument(_))));

    let stored = service.get_task_by_id(id).await.unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn operations_reject_non_positive_ids() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    for id in [0, -1] {
        assert!(matches!(
            service.get_task_by_id(id).await,
            Err(TaskError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.update_task(id, TaskPatch::default()).await,
            Err(TaskError::InvalidArgument(_))
        ));
        assert!(matches!(
            service.delete_task(id).await,
            Err(TaskError::InvalidArgument(_))
        ));
    }
}

#[tokio::test]
async fn operations_fail_not_found_for_unknown_id() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    assert!(matches!(
        service.get_task_by_id(9999).await,
        Err(TaskError::NotFound(9999))
    ));
    assert!(matches!(
        service.update_task(9999, TaskPatch::default()).await,
        Err(TaskError::NotFound(9999))
    ));
    assert!(matches!(
        service.delete_task(9999).await,
        Err(TaskError::NotFound(9999))
    ));
}

#[tokio::test]
async fn delete_removes_record_and_is_not_repeatable() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    let id = service
        .create_task(draft("short-lived"))
        .await
        .unwrap()
        .id
        .unwrap();

    service.delete_task(id).await.unwrap();
    assert!(matches!(
        service.get_task_by_id(id).await,
        Err(TaskError::NotFound(_))
    ));
    // Second delete on the same id is NotFound, not a silent success.
    assert!(matches!(
        service.delete_task(id).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn get_all_on_empty_store_returns_empty_vec() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;
    assert!(service.get_all_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_all_returns_tasks_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let service = make_service(&dir).await;

    for name in ["one", "two", "three"] {
        service.create_task(draft(name)).await.unwrap();
    }

    let names: Vec<String> = service
        .get_all_tasks()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, ["one", "two", "three"]);
}
