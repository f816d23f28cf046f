use std::cmp::Ordering;

use serde_json::Value;

use super::{Direction, FilterSet};
use crate::error::{Result, TaskboardError};
use crate::models::{ListParams, Priority, Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortField {
    Title,
    Status,
    Priority,
    DueDate,
    CreatedAt,
}

impl TaskSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "dueDate" | "due_date" | "due" => Ok(Self::DueDate),
            "createdAt" | "created_at" | "created" => Ok(Self::CreatedAt),
            other => Err(TaskboardError::validation(format!(
                "unknown task sort field '{other}' (title, status, priority, dueDate, createdAt)"
            ))),
        }
    }
}

/// Search, status/priority/tag filters and sort for task listings.
///
/// Each `toggle_*` setter clears the filter when called with the value that
/// is already active.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub search: String,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub tag: Option<String>,
    pub sort_by: Option<TaskSortField>,
    pub direction: Direction,
    /// Filters on any other task field (`assignee`, `projectId`, ...).
    pub extra: FilterSet,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            priority: None,
            tag: None,
            sort_by: Some(TaskSortField::DueDate),
            direction: Direction::Asc,
            extra: FilterSet::default(),
        }
    }
}

fn toggle<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

impl TaskQuery {
    /// Query built from list parameters. Without `sort` the input order is kept.
    pub fn from_params(params: &ListParams) -> Result<Self> {
        let mut query = TaskQuery {
            sort_by: None,
            ..Default::default()
        };
        for (key, value) in params {
            let value = value.trim();
            match key.as_str() {
                "search" => query.search = value.to_string(),
                "status" if !value.is_empty() => {
                    query.status = Some(Status::from_str(value).ok_or_else(|| {
                        TaskboardError::validation(format!("unknown status '{value}'"))
                    })?);
                }
                "priority" if !value.is_empty() => {
                    query.priority = Some(Priority::from_str(value).ok_or_else(|| {
                        TaskboardError::validation(format!("unknown priority '{value}'"))
                    })?);
                }
                "tag" if !value.is_empty() => query.tag = Some(value.to_string()),
                "sort" if !value.is_empty() => query.sort_by = Some(TaskSortField::parse(value)?),
                "order" => query.direction = Direction::parse(value)?,
                "status" | "priority" | "tag" | "sort" => {}
                _ => query.extra.set(key, Value::String(value.to_string())),
            }
        }
        Ok(query)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn toggle_status(&mut self, status: Status) {
        toggle(&mut self.status, status);
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        toggle(&mut self.priority, priority);
    }

    pub fn toggle_tag(&mut self, tag: impl Into<String>) {
        toggle(&mut self.tag, tag.into());
    }

    /// Same field flips the direction; a new field sorts ascending.
    pub fn select_sort(&mut self, field: TaskSortField) {
        if self.sort_by == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.sort_by = Some(field);
            self.direction = Direction::Asc;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, task: &Task) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            let in_title = task.title.to_lowercase().contains(&term);
            let in_description = task
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !task.tags.iter().any(|t| t == tag) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        let mut result: Vec<Task> = self
            .extra
            .apply(tasks)
            .into_iter()
            .filter(|t| self.matches(t))
            .collect();
        if let Some(field) = self.sort_by {
            result.sort_by(|a, b| compare_tasks(a, b, field, self.direction));
        }
        result
    }
}

fn compare_tasks(a: &Task, b: &Task, field: TaskSortField, direction: Direction) -> Ordering {
    let directed = |ord: Ordering| match direction {
        Direction::Asc => ord,
        Direction::Desc => ord.reverse(),
    };
    match field {
        TaskSortField::Title => directed(
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title)),
        ),
        TaskSortField::Status => directed(status_rank(a.status).cmp(&status_rank(b.status))),
        TaskSortField::Priority => directed(a.priority.ordinal().cmp(&b.priority.ordinal())),
        TaskSortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
        // Undated tasks trail in both directions.
        TaskSortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn status_rank(status: Status) -> u8 {
    match status {
        Status::Pending => 0,
        Status::InProgress => 1,
        Status::Done => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, TaskDraft};
    use chrono::{NaiveDate, Utc};

    fn task(id: i64, draft: TaskDraft) -> Task {
        Task::build(id, draft, Utc::now()).unwrap()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, TaskDraft {
                title: Some("Draft proposal".into()),
                description: Some("Write the project proposal".into()),
                status: Some(Status::InProgress),
                priority: Some(Priority::High),
                due_date: NaiveDate::from_ymd_opt(2025, 4, 18),
                tags: vec!["docs".into(), "planning".into()],
                ..Default::default()
            }),
            task(2, TaskDraft {
                title: Some("Weekly sync".into()),
                description: Some("Prepare agenda".into()),
                priority: Some(Priority::Medium),
                due_date: NaiveDate::from_ymd_opt(2025, 4, 19),
                tags: vec!["meeting".into()],
                ..Default::default()
            }),
            task(3, TaskDraft {
                title: Some("Invoices".into()),
                priority: Some(Priority::Low),
                tags: vec!["finance".into()],
                ..Default::default()
            }),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn default_sorts_by_due_date_with_undated_last() {
        let q = TaskQuery::default();
        assert_eq!(ids(&q.apply(&sample())), vec![1, 2, 3]);
        let mut q = TaskQuery::default();
        q.select_sort(TaskSortField::DueDate);
        assert_eq!(q.direction, Direction::Desc);
        assert_eq!(ids(&q.apply(&sample())), vec![2, 1, 3]);
    }

    #[test]
    fn priority_sort_uses_ordinal_order() {
        let tasks = vec![
            task(1, serde_json::from_str(r#"{"title":"A","priority":"높음"}"#).unwrap()),
            task(2, serde_json::from_str(r#"{"title":"B","priority":"낮음"}"#).unwrap()),
        ];
        let mut q = TaskQuery::default();
        q.select_sort(TaskSortField::Priority);
        let titles: Vec<_> = q.apply(&tasks).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["A", "B"]);

        let mut reversed = tasks.clone();
        reversed.reverse();
        let titles: Vec<_> = q.apply(&reversed).into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn search_matches_title_or_description() {
        let mut q = TaskQuery::default();
        q.set_search("AGENDA");
        assert_eq!(ids(&q.apply(&sample())), vec![2]);
        q.set_search("proposal");
        assert_eq!(ids(&q.apply(&sample())), vec![1]);
    }

    #[test]
    fn toggles_clear_on_repeat() {
        let mut q = TaskQuery::default();
        q.toggle_tag("meeting");
        assert_eq!(ids(&q.apply(&sample())), vec![2]);
        q.toggle_tag("meeting");
        assert_eq!(q.tag, None);

        q.toggle_status(Status::InProgress);
        q.toggle_priority(Priority::High);
        assert_eq!(ids(&q.apply(&sample())), vec![1]);
        q.toggle_status(Status::InProgress);
        q.toggle_priority(Priority::High);
        assert_eq!(q.apply(&sample()).len(), 3);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut q = TaskQuery::default();
        q.set_search("x");
        q.toggle_status(Status::Done);
        q.select_sort(TaskSortField::Title);
        q.reset();
        assert_eq!(q, TaskQuery::default());
    }

    #[test]
    fn from_params_parses_known_keys_and_keeps_order_without_sort() {
        let mut params = ListParams::new();
        params.insert("priority".into(), "low".into());
        let q = TaskQuery::from_params(&params).unwrap();
        assert_eq!(q.sort_by, None);
        assert_eq!(ids(&q.apply(&sample())), vec![3]);

        let mut params = ListParams::new();
        params.insert("sort".into(), "title".into());
        params.insert("order".into(), "desc".into());
        let q = TaskQuery::from_params(&params).unwrap();
        assert_eq!(ids(&q.apply(&sample())), vec![2, 3, 1]);

        let mut params = ListParams::new();
        params.insert("status".into(), "bogus".into());
        assert!(TaskQuery::from_params(&params).is_err());
    }

    #[test]
    fn unknown_keys_filter_other_fields() {
        let mut tasks = sample();
        tasks[2].assignee = Some("Kim".into());
        let mut params = ListParams::new();
        params.insert("assignee".into(), "kim".into());
        let q = TaskQuery::from_params(&params).unwrap();
        assert_eq!(ids(&q.apply(&tasks)), vec![3]);
    }

    #[test]
    fn blank_order_is_ascending() {
        let mut params = ListParams::new();
        params.insert("sort".into(), "dueDate".into());
        params.insert("order".into(), "".into());
        let q = TaskQuery::from_params(&params).unwrap();
        assert_eq!(q.direction, Direction::Asc);
        assert_eq!(ids(&q.apply(&sample())), vec![1, 2, 3]);

        params.insert("order".into(), "sideways".into());
        assert!(TaskQuery::from_params(&params).is_err());
    }
}
