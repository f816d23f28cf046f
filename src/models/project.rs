use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, normalize_names, optional_text, required_text, Priority, Resource, Status};
use crate::error::{Result, TaskboardError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub team: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub budget: Option<i64>,
    pub progress: Option<i64>,
    pub manager: Option<String>,
    #[serde(default)]
    pub team: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<NaiveDate>>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub budget: Option<i64>,
    pub progress: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager: Option<Option<String>>,
    pub team: Option<Vec<String>>,
}

/// Progress is a percentage; out-of-range input is clamped, not rejected.
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn check_budget(budget: i64) -> Result<i64> {
    if budget < 0 {
        return Err(TaskboardError::validation("budget must not be negative"));
    }
    Ok(budget)
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(TaskboardError::validation(format!(
                "endDate {end} is before startDate {start}"
            )));
        }
    }
    Ok(())
}

impl Resource for Project {
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const COLLECTION: &'static str = "projects";
    const LABEL: &'static str = "Project";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "description", "manager"];

    fn canonical_param(key: &str, value: &str) -> Option<&'static str> {
        match key {
            "status" => Status::from_str(value).map(|s| s.as_str()),
            "priority" => Priority::from_str(value).map(|p| p.as_str()),
            _ => None,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn build(id: i64, draft: ProjectDraft, now: DateTime<Utc>) -> Result<Self> {
        check_dates(draft.start_date, draft.end_date)?;
        Ok(Project {
            id,
            name: required_text("name", draft.name)?,
            description: optional_text(draft.description),
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            budget: check_budget(draft.budget.unwrap_or(0))?,
            progress: clamp_progress(draft.progress.unwrap_or(0)),
            manager: optional_text(draft.manager),
            team: normalize_names(draft.team),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, patch: ProjectPatch, now: DateTime<Utc>) -> Result<()> {
        let start_date = patch.start_date.unwrap_or(self.start_date);
        let end_date = patch.end_date.unwrap_or(self.end_date);
        check_dates(start_date, end_date)?;

        if let Some(name) = patch.name {
            self.name = required_text("name", Some(name))?;
        }
        if let Some(budget) = patch.budget {
            self.budget = check_budget(budget)?;
        }
        if let Some(description) = patch.description {
            self.description = optional_text(description);
        }
        self.start_date = start_date;
        self.end_date = end_date;
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(progress) = patch.progress {
            self.progress = clamp_progress(progress);
        }
        if let Some(manager) = patch.manager {
            self.manager = optional_text(manager);
        }
        if let Some(team) = patch.team {
            self.team = normalize_names(team);
        }
        self.updated_at = now;
        Ok(())
    }
}
