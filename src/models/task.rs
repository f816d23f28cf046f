use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, normalize_names, optional_text, required_text, ListParams, Priority, Resource, Status};
use crate::error::Result;
use crate::query::TaskQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub assignee: Option<String>,
    pub project_id: Option<i64>,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub project_id: Option<Option<i64>>,
}

impl Resource for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const COLLECTION: &'static str = "tasks";
    const LABEL: &'static str = "Task";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description"];

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: i64, draft: TaskDraft, now: DateTime<Utc>) -> Result<Self> {
        Ok(Task {
            id,
            title: required_text("title", draft.title)?,
            description: optional_text(draft.description),
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            due_date: draft.due_date,
            tags: normalize_names(draft.tags),
            assignee: optional_text(draft.assignee),
            project_id: draft.project_id,
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, patch: TaskPatch, now: DateTime<Utc>) -> Result<()> {
        if let Some(title) = patch.title {
            self.title = required_text("title", Some(title))?;
        }
        if let Some(description) = patch.description {
            self.description = optional_text(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_names(tags);
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = optional_text(assignee);
        }
        if let Some(project_id) = patch.project_id {
            self.project_id = project_id;
        }
        self.updated_at = now;
        Ok(())
    }

    fn query(items: Vec<Self>, params: &ListParams) -> Result<Vec<Self>> {
        Ok(TaskQuery::from_params(params)?.apply(&items))
    }
}
