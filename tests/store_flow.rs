use chrono::{Duration, TimeZone, Utc};
use schedulr::error::StoreError;
use schedulr::task::Status;
use schedulr::task_store::TaskStore;

#[test]
fn task_lifecycle_through_store() {
    let now = Utc
        .with_ymd_and_hms(2025, 6, 22, 10, 0, 0)
        .single()
        .expect("valid now");
    let mut store = TaskStore::with_sample_data();

    let stats = store.statistics_at(now);
    assert_eq!(stats.total, 5);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.pending, 3);
    assert_eq!(stats.completion_rate, 40);

    let added = store
        .add_task_at("X", "", "2099-01-01", now)
        .expect("add task");
    assert_eq!(added.status, Status::Pending);
    assert!(added.description.is_empty());

    let listed = store.list_tasks();
    assert_eq!(listed.last().map(|t| t.id), Some(added.id));
    assert!(listed.windows(2).all(|w| w[0].due_date <= w[1].due_date));

    let done = store
        .toggle_status_at(added.id, now + Duration::hours(1))
        .expect("complete");
    assert_eq!(done.status, Status::Completed);
    assert_eq!(store.statistics_at(now).completed, 3);

    store.delete_task(added.id).expect("delete");
    assert!(store.list_tasks().iter().all(|t| t.id != added.id));
    assert_eq!(store.delete_task(added.id), Err(StoreError::NotFound(added.id)));
    assert_eq!(store.toggle_status(added.id), Err(StoreError::NotFound(added.id)));
}

#[test]
fn empty_store_statistics_are_zero() {
    let store = TaskStore::new();
    let stats = store.statistics();
    assert_eq!(stats.completion_rate, 0);
    assert_eq!(stats.productivity_score, 0);
    assert_eq!(stats.current_streak, 0);
    assert!(store.is_empty());
}

#[test]
fn rejected_add_leaves_collection_unchanged() {
    let mut store = TaskStore::new();
    assert!(matches!(
        store.add_task("", "desc", "2099-01-01"),
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        store.add_task("Title", "desc", ""),
        Err(StoreError::Validation(_))
    ));
    assert!(store.list_tasks().is_empty());
}
