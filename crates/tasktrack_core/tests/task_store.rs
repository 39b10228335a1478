mod common;

use common::{FlakyStorage, FrozenClock, StepClock};
use tasktrack_core::{
    InMemoryStorage, KeyValueStorage, KeyValueTaskRepository, NewTask, Outcome, Rejection,
    ServiceError, TaskPatch, TaskPriority, TaskService, TaskStatus, TASKS_STORAGE_KEY,
};
use uuid::Uuid;

fn store(
    storage: &InMemoryStorage,
) -> TaskService<KeyValueTaskRepository<&InMemoryStorage>, StepClock> {
    TaskService::open(KeyValueTaskRepository::new(storage), StepClock::default()).unwrap()
}

#[test]
fn add_task_appends_todo_task_and_saves() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);

    for (index, title) in ["a", "  padded  ", "Write spec"].iter().enumerate() {
        let task = service
            .add_task(&NewTask::titled(*title))
            .unwrap()
            .applied()
            .unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(service.len(), index + 1);
    }

    assert_eq!(service.tasks()[1].title, "padded");
    let saved = storage.get(TASKS_STORAGE_KEY).unwrap().unwrap();
    assert!(saved.contains("Write spec"));
}

#[test]
fn add_task_rejects_blank_titles_without_saving() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);

    for title in ["", "   ", "\t\n"] {
        let outcome = service.add_task(&NewTask::titled(title)).unwrap();
        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyTitle));
    }

    assert!(service.is_empty());
    assert_eq!(storage.get(TASKS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn add_task_keeps_description_and_priority() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);

    let task = service
        .add_task(
            &NewTask::titled("Ship release")
                .with_description("tag and publish")
                .with_priority(TaskPriority::High),
        )
        .unwrap()
        .applied()
        .unwrap();
    assert_eq!(task.description.as_deref(), Some("tag and publish"));
    assert_eq!(task.priority, TaskPriority::High);

    let blank = service
        .add_task(&NewTask::titled("No notes").with_description("  "))
        .unwrap()
        .applied()
        .unwrap();
    assert_eq!(blank.description, None);
}

#[test]
fn generated_ids_are_unique() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    for index in 0..20 {
        let _ = service
            .add_task(&NewTask::titled(format!("task {index}")))
            .unwrap();
    }

    let mut ids: Vec<Uuid> = service.tasks().iter().map(|task| task.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn advance_status_cycles_back_after_three_steps() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let id = service
        .add_task(&NewTask::titled("cycle"))
        .unwrap()
        .applied()
        .unwrap()
        .id;

    let expected = [TaskStatus::InProgress, TaskStatus::Done, TaskStatus::Todo];
    let mut previous_updated_at = service.get(id).unwrap().updated_at;
    for status in expected {
        let task = service.advance_status(id).unwrap().applied().unwrap();
        assert_eq!(task.status, status);
        assert!(task.updated_at >= previous_updated_at);
        assert!(task.updated_at >= task.created_at);
        previous_updated_at = task.updated_at;
    }
    assert_eq!(service.get(id).unwrap().status, TaskStatus::Todo);
}

#[test]
fn advance_status_never_moves_updated_at_backwards() {
    let storage = InMemoryStorage::new();
    let seeded = {
        let mut service = TaskService::open(
            KeyValueTaskRepository::new(&storage),
            FrozenClock(common::at(2_000)),
        )
        .unwrap();
        service
            .add_task(&NewTask::titled("time travel"))
            .unwrap()
            .applied()
            .unwrap()
    };

    let mut service = TaskService::open(
        KeyValueTaskRepository::new(&storage),
        FrozenClock(common::at(1_000)),
    )
    .unwrap();
    let advanced = service.advance_status(seeded.id).unwrap().applied().unwrap();
    assert_eq!(advanced.updated_at, seeded.updated_at);
}

#[test]
fn unknown_ids_are_rejected_without_side_effects() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let _ = service.add_task(&NewTask::titled("keep me")).unwrap();
    let before = storage.get(TASKS_STORAGE_KEY).unwrap();

    let missing = Uuid::new_v4();
    assert_eq!(
        service.advance_status(missing).unwrap().rejection(),
        Some(Rejection::UnknownTask(missing))
    );
    assert_eq!(
        service.delete_task(missing).unwrap().rejection(),
        Some(Rejection::UnknownTask(missing))
    );
    assert_eq!(service.len(), 1);
    assert_eq!(storage.get(TASKS_STORAGE_KEY).unwrap(), before);
}

#[test]
fn delete_is_idempotent() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let id = service
        .add_task(&NewTask::titled("short lived"))
        .unwrap()
        .applied()
        .unwrap()
        .id;
    let _ = service.add_task(&NewTask::titled("survivor")).unwrap();

    let removed = service.delete_task(id).unwrap().applied().unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(service.len(), 1);

    assert!(!service.delete_task(id).unwrap().is_applied());
    assert!(!service.advance_status(id).unwrap().is_applied());
    assert_eq!(service.len(), 1);
    assert_eq!(service.tasks()[0].title, "survivor");
}

#[test]
fn update_task_replaces_editable_fields_only() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let original = service
        .add_task(&NewTask::titled("draft").with_description("old"))
        .unwrap()
        .applied()
        .unwrap();
    let _ = service.advance_status(original.id).unwrap();

    let patch = TaskPatch {
        title: Some(" final ".to_string()),
        description: Some(String::new()),
        priority: Some(TaskPriority::Low),
    };
    let updated = service
        .update_task(original.id, &patch)
        .unwrap()
        .applied()
        .unwrap();

    assert_eq!(updated.title, "final");
    assert_eq!(updated.description, None);
    assert_eq!(updated.priority, TaskPriority::Low);
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
}

#[test]
fn update_task_rejects_blank_title_and_keeps_task() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let original = service
        .add_task(&NewTask::titled("stable"))
        .unwrap()
        .applied()
        .unwrap();

    let patch = TaskPatch {
        title: Some("   ".to_string()),
        priority: Some(TaskPriority::High),
        ..TaskPatch::default()
    };
    assert_eq!(
        service.update_task(original.id, &patch).unwrap(),
        Outcome::Rejected(Rejection::EmptyTitle)
    );
    assert_eq!(service.get(original.id), Some(&original));
}

#[test]
fn empty_patch_is_a_no_op() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let original = service
        .add_task(&NewTask::titled("untouched"))
        .unwrap()
        .applied()
        .unwrap();

    let same = service
        .update_task(original.id, &TaskPatch::default())
        .unwrap()
        .applied()
        .unwrap();
    assert_eq!(same, original);
}

#[test]
fn save_failure_is_reported_and_mutation_kept_in_memory() {
    let storage = FlakyStorage::default();
    let mut service =
        TaskService::open(KeyValueTaskRepository::new(&storage), StepClock::default()).unwrap();
    let _ = service.add_task(&NewTask::titled("saved")).unwrap();

    storage.reject_writes(true);
    let err = service.add_task(&NewTask::titled("unsaved")).unwrap_err();
    assert!(matches!(err, ServiceError::Persistence(_)));
    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(service.len(), 2);

    let reloaded =
        TaskService::open(KeyValueTaskRepository::new(&storage), StepClock::default()).unwrap();
    assert_eq!(reloaded.len(), 1);

    storage.reject_writes(false);
    let id = service.tasks()[0].id;
    let _ = service.advance_status(id).unwrap();
    let reloaded =
        TaskService::open(KeyValueTaskRepository::new(&storage), StepClock::default()).unwrap();
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn stats_count_every_status_regardless_of_view() {
    let storage = InMemoryStorage::new();
    let mut service = store(&storage);
    let ids: Vec<Uuid> = ["one", "two", "three", "four"]
        .iter()
        .map(|title| {
            service
                .add_task(&NewTask::titled(*title))
                .unwrap()
                .applied()
                .unwrap()
                .id
        })
        .collect();
    let _ = service.advance_status(ids[0]).unwrap();
    let _ = service.advance_status(ids[1]).unwrap();
    let _ = service.advance_status(ids[1]).unwrap();

    let stats = service.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.todo, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.done, 1);
}
