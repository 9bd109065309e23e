//! Aggregate metrics derived from the task collection.
//!
//! Nothing here is stored: [`Statistics::compute`] is cheap and is called
//! every time the dashboard or the statistics view is drawn.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::task::{Status, Task};

pub const MAX_STREAK: u64 = 30;
const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: u64,
    pub completed: u64,
    pub pending: u64,
    pub completion_rate: u64,
    pub productivity_score: u64,
    pub current_streak: u64,
}

impl Statistics {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total = tasks.len() as u64;
        let completed = count(tasks, |t| t.status == Status::Completed);
        let pending = count(tasks, |t| t.status == Status::Pending);

        // Creation time against the due date, not completion time.
        let on_time = count(tasks, |t| t.is_completed() && t.created_at <= t.due_instant());

        let week_ago = now - Duration::days(RECENT_WINDOW_DAYS);
        let recent = count(tasks, |t| t.is_completed() && t.created_at >= week_ago);

        Self {
            total,
            completed,
            pending,
            completion_rate: percent(completed, total),
            productivity_score: percent(on_time, total).min(100),
            current_streak: (recent / 2).min(MAX_STREAK),
        }
    }

    /// Streak as a share of [`MAX_STREAK`], for progress bars.
    pub fn streak_percent(&self) -> u64 {
        self.current_streak * 100 / MAX_STREAK
    }
}

fn count(tasks: &[Task], pred: impl Fn(&Task) -> bool) -> u64 {
    tasks.iter().filter(|t| pred(t)).count() as u64
}

/// `round(100 * part / whole)` rounding halves up; 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> u64 {
    if whole == 0 {
        return 0;
    }
    (200 * part + whole) / (2 * whole)
}
