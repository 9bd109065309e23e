use crate::error::{StoreError, StoreResult};
use crate::sample;
use crate::statistics::Statistics;
use crate::task::Task;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// In-memory task collection.
///
/// Owned by whoever drives the application and passed around explicitly.
/// Stored order is insertion order; [`TaskStore::list_tasks`] sorts a copy.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    last_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            last_id: 0,
        }
    }

    pub fn with_sample_data() -> Self {
        Self::from_tasks(sample::sample_tasks())
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        info!(count = tasks.len(), "task store loaded");
        Self { tasks, last_id }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
    ) -> StoreResult<Task> {
        self.add_task_at(title, description, due_date, Utc::now())
    }

    pub fn add_task_at(
        &mut self,
        title: &str,
        description: &str,
        due_date: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Task> {
        let title = title.trim();
        if title.is_empty() {
            warn!("rejected task without a title");
            return Err(StoreError::Validation("title is required".to_string()));
        }
        let due_date = parse_due_date(due_date)?;

        self.last_id += 1;
        let task = Task::new_pending(
            self.last_id,
            title.to_string(),
            description.trim().to_string(),
            due_date,
            now,
        );
        self.tasks.push(task.clone());
        info!(id = task.id, due = %task.due_date, "task added");
        Ok(task)
    }

    pub fn toggle_status(&mut self, id: u64) -> StoreResult<Task> {
        self.toggle_status_at(id, Utc::now())
    }

    pub fn toggle_status_at(&mut self, id: u64, now: DateTime<Utc>) -> StoreResult<Task> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(id, "toggle on missing task");
            return Err(StoreError::NotFound(id));
        };
        task.status = task.status.toggled();
        task.updated_at = Some(now);
        info!(id, status = %task.status, "task status toggled");
        Ok(task.clone())
    }

    pub fn delete_task(&mut self, id: u64) -> StoreResult<()> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            warn!(id, "delete on missing task");
            return Err(StoreError::NotFound(id));
        };
        let removed = self.tasks.remove(pos);
        info!(id, title = %removed.title, "task deleted");
        Ok(())
    }

    /// Tasks ordered by due date, earliest first. Ties keep insertion order.
    pub fn list_tasks(&self) -> Vec<Task> {
        let mut sorted = self.tasks.clone();
        sorted.sort_by_key(|t| t.due_date);
        debug!(count = sorted.len(), "listing tasks");
        sorted
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics_at(Utc::now())
    }

    pub fn statistics_at(&self, now: DateTime<Utc>) -> Statistics {
        let stats = Statistics::compute(&self.tasks, now);
        debug!(?stats, "statistics computed");
        stats
    }
}

fn parse_due_date(raw: &str) -> StoreResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        warn!("rejected task without a due date");
        return Err(StoreError::Validation("due date is required".to_string()));
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).map_err(|err| {
        warn!(input = raw, error = %err, "rejected malformed due date");
        StoreError::Validation(format!("due date must be YYYY-MM-DD, got {raw:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 22, 8, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn add_assigns_fresh_id_and_defaults() {
        let mut store = TaskStore::with_sample_data();
        let task = store
            .add_task_at("  X  ", "", "2099-01-01", now())
            .expect("add task");

        assert_eq!(task.id, 6);
        assert_eq!(task.title, "X");
        assert_eq!(task.description, "");
        assert_eq!(task.status, Status::Pending);
        assert_eq!(task.created_at, now());
        assert_eq!(task.updated_at, None);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn add_rejects_missing_fields_without_mutating() {
        let mut store = TaskStore::with_sample_data();
        let before = store.list_tasks();

        let rejected = [
            ("", "2099-01-01"),
            ("   ", "2099-01-01"),
            ("X", ""),
            ("X", "01/02/2099"),
        ];
        for (title, due) in rejected {
            let err = store.add_task_at(title, "", due, now()).unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)), "{title:?} {due:?}");
        }

        assert_eq!(store.list_tasks(), before);

        // a rejected add does not burn an id
        let task = store.add_task_at("X", "", "2099-01-01", now()).expect("add");
        assert_eq!(task.id, 6);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = TaskStore::new();
        let a = store.add_task_at("a", "", "2025-07-01", now()).expect("add a");
        let b = store.add_task_at("b", "", "2025-07-01", now()).expect("add b");
        store.delete_task(b.id).expect("delete b");
        let c = store.add_task_at("c", "", "2025-07-01", now()).expect("add c");

        assert_ne!(c.id, a.id);
        assert_ne!(c.id, b.id);
    }

    #[test]
    fn toggle_twice_restores_status() {
        let mut store = TaskStore::with_sample_data();
        let first = now();
        let second = first + chrono::Duration::minutes(5);

        let toggled = store.toggle_status_at(1, first).expect("toggle");
        assert_eq!(toggled.status, Status::Completed);
        assert_eq!(toggled.updated_at, Some(first));

        let restored = store.toggle_status_at(1, second).expect("toggle back");
        assert_eq!(restored.status, Status::Pending);
        assert_eq!(restored.updated_at, Some(second));
        assert_eq!(store.get(1).map(|t| t.status), Some(Status::Pending));
    }

    #[test]
    fn toggle_missing_is_not_found() {
        let mut store = TaskStore::new();
        assert_eq!(store.toggle_status_at(42, now()), Err(StoreError::NotFound(42)));
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = TaskStore::with_sample_data();
        store.delete_task(3).expect("delete");

        let listed = store.list_tasks();
        assert_eq!(listed.len(), 4);
        assert!(listed.iter().all(|t| t.id != 3));
        assert_eq!(store.delete_task(3), Err(StoreError::NotFound(3)));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn list_is_sorted_and_leaves_storage_alone() {
        let mut store = TaskStore::new();
        store.add_task_at("late", "", "2025-09-01", now()).expect("add");
        store.add_task_at("early", "", "2025-07-01", now()).expect("add");
        store.add_task_at("early too", "", "2025-07-01", now()).expect("add");

        let titles: Vec<String> = store.list_tasks().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, ["early", "early too", "late"]);
        assert_eq!(store.tasks[0].title, "late");
    }

    #[test]
    fn statistics_track_mutations() {
        let mut store = TaskStore::with_sample_data();
        let stats = store.statistics_at(now());
        assert_eq!((stats.total, stats.completed, stats.pending), (5, 2, 3));
        assert_eq!(stats.completion_rate, 40);

        store.toggle_status_at(1, now()).expect("toggle");
        let stats = store.statistics_at(now());
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.completion_rate, 60);
    }
}
