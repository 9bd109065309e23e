use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new_pending(
        id: u64,
        title: String,
        description: String,
        due_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            status: Status::Pending,
            created_at: now,
            updated_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// Midnight UTC at the start of the due date.
    pub fn due_instant(&self) -> DateTime<Utc> {
        self.due_date.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date < today
    }

    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        self.due_date == today
    }

    /// e.g. `Wed, Jun 25, 2025`
    pub fn formatted_due(&self) -> String {
        self.due_date.format("%a, %b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(due: &str) -> Task {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 20, 9, 30, 0)
            .single()
            .expect("valid now");
        Task::new_pending(
            7,
            "Write report".to_string(),
            String::new(),
            NaiveDate::parse_from_str(due, "%Y-%m-%d").expect("valid date"),
            now,
        )
    }

    #[test]
    fn status_toggle_flips_both_ways() {
        assert_eq!(Status::Pending.toggled(), Status::Completed);
        assert_eq!(Status::Completed.toggled(), Status::Pending);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Completed).expect("serialize");
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn overdue_only_when_pending_and_past() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 24).expect("valid date");
        let mut t = task("2025-06-23");
        assert!(t.is_overdue(today));

        t.status = Status::Completed;
        assert!(!t.is_overdue(today));

        let t = task("2025-06-24");
        assert!(!t.is_overdue(today));
        assert!(t.is_due_today(today));
    }

    #[test]
    fn formats_due_date_for_display() {
        assert_eq!(task("2025-06-25").formatted_due(), "Wed, Jun 25, 2025");
    }

    #[test]
    fn due_instant_is_start_of_day_utc() {
        let t = task("2025-06-25");
        assert_eq!(t.due_instant().to_rfc3339(), "2025-06-25T00:00:00+00:00");
    }
}
