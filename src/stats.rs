use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Priority, Project, Status, Task};
use crate::query::{upcoming_deadlines, DueStatus, UPCOMING_WINDOW_DAYS};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub total: usize,
    pub by_status: StatusCounts,
    pub by_priority: PriorityCounts,
    pub by_tag: BTreeMap<String, usize>,
    pub overdue: usize,
    /// Share of done tasks, 0..=100.
    pub completion: u8,
}

impl TaskSummary {
    pub fn of(tasks: &[Task], today: NaiveDate) -> Self {
        let mut summary = TaskSummary {
            total: tasks.len(),
            ..Default::default()
        };
        for task in tasks {
            match task.status {
                Status::Pending => summary.by_status.pending += 1,
                Status::InProgress => summary.by_status.in_progress += 1,
                Status::Done => summary.by_status.done += 1,
            }
            match task.priority {
                Priority::High => summary.by_priority.high += 1,
                Priority::Medium => summary.by_priority.medium += 1,
                Priority::Low => summary.by_priority.low += 1,
            }
            for tag in &task.tags {
                *summary.by_tag.entry(tag.clone()).or_default() += 1;
            }
            if DueStatus::of(task, today) == DueStatus::Overdue {
                summary.overdue += 1;
            }
        }
        if summary.total > 0 {
            summary.completion = (summary.by_status.done * 100 / summary.total) as u8;
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub id: i64,
    pub name: String,
    pub progress: u8,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub today: NaiveDate,
    pub tasks: TaskSummary,
    pub upcoming: Vec<Task>,
    pub projects: Vec<ProjectProgress>,
    pub event_count: usize,
    pub member_count: usize,
}

impl Dashboard {
    pub fn build(
        tasks: &[Task],
        projects: &[Project],
        event_count: usize,
        member_count: usize,
        today: NaiveDate,
    ) -> Self {
        Dashboard {
            today,
            tasks: TaskSummary::of(tasks, today),
            upcoming: upcoming_deadlines(tasks, UPCOMING_WINDOW_DAYS, today),
            projects: projects
                .iter()
                .map(|p| ProjectProgress {
                    id: p.id,
                    name: p.name.clone(),
                    progress: p.progress,
                    status: p.status,
                })
                .collect(),
            event_count,
            member_count,
        }
    }
}
