use crate::task::{Status, Task};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

// (title, description, due, created, completed)
const SAMPLES: [(&str, &str, (i32, u32, u32), (i32, u32, u32), bool); 5] = [
    (
        "Complete Software Engineering Assignment",
        "Finish the web development project for CS 461",
        (2025, 6, 25),
        (2025, 6, 20),
        false,
    ),
    (
        "Study for Computer Science Exam",
        "Review data structures and algorithms for the midterm",
        (2025, 6, 30),
        (2025, 6, 21),
        false,
    ),
    (
        "Submit Research Proposal",
        "Complete and submit the research proposal for AI project",
        (2025, 6, 20),
        (2025, 6, 18),
        true,
    ),
    (
        "Prepare Project Presentation",
        "Create slides for the upcoming team presentation",
        (2025, 6, 22),
        (2025, 6, 15),
        true,
    ),
    (
        "Review Team Code",
        "Provide feedback on pull requests from team members",
        (2025, 6, 23),
        (2025, 6, 21),
        false,
    ),
];

/// Demonstration tasks loaded at startup, ids 1 through 5.
pub fn sample_tasks() -> Vec<Task> {
    SAMPLES
        .iter()
        .zip(1u64..)
        .filter_map(|(&(title, description, due, created, completed), id)| {
            let due_date = NaiveDate::from_ymd_opt(due.0, due.1, due.2)?;
            let created_at = midnight_utc(created)?;
            Some(Task {
                id,
                title: title.to_string(),
                description: description.to_string(),
                due_date,
                status: if completed { Status::Completed } else { Status::Pending },
                created_at,
                updated_at: None,
            })
        })
        .collect()
}

fn midnight_utc((y, m, d): (i32, u32, u32)) -> Option<DateTime<Utc>> {
    Some(NaiveDate::from_ymd_opt(y, m, d)?.and_time(NaiveTime::MIN).and_utc())
}
