use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::{Status, Task};

/// Days ahead that count as "upcoming".
pub const UPCOMING_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    Completed,
    Overdue,
    Due,
    Upcoming,
    Normal,
}

impl DueStatus {
    pub fn classify(due: Option<NaiveDate>, status: Status, today: NaiveDate) -> Self {
        if status.is_done() {
            return Self::Completed;
        }
        let Some(due) = due else {
            return Self::Normal;
        };
        if due < today {
            Self::Overdue
        } else if due == today {
            Self::Due
        } else if today
            .checked_add_days(Days::new(UPCOMING_WINDOW_DAYS))
            .is_some_and(|limit| due <= limit)
        {
            Self::Upcoming
        } else {
            Self::Normal
        }
    }

    pub fn of(task: &Task, today: NaiveDate) -> Self {
        Self::classify(task.due_date, task.status, today)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Due => "due",
            Self::Upcoming => "upcoming",
            Self::Normal => "normal",
        }
    }
}

/// Unfinished tasks due within `[today, today + days]`, soonest first.
pub fn upcoming_deadlines(tasks: &[Task], days: u64, today: NaiveDate) -> Vec<Task> {
    let limit = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
    let mut upcoming: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.status.is_done())
        .filter(|t| t.due_date.is_some_and(|d| d >= today && d <= limit))
        .cloned()
        .collect();
    upcoming.sort_by_key(|t| t.due_date);
    upcoming
}
