use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, optional_text, required_text, Resource};
use crate::error::{Result, TaskboardError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    #[default]
    #[serde(alias = "재직중")]
    Active,
    #[serde(alias = "휴직중")]
    OnLeave,
    #[serde(alias = "퇴사")]
    Left,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnLeave => "on-leave",
            Self::Left => "left",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "active" | "재직중" => Some(Self::Active),
            "on-leave" | "휴직중" => Some(Self::OnLeave),
            "left" | "퇴사" => Some(Self::Left),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<MemberStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub join_date: Option<Option<NaiveDate>>,
    pub status: Option<MemberStatus>,
}

pub(crate) fn checked_email(value: Option<String>) -> Result<String> {
    let email = required_text("email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(TaskboardError::validation(format!("invalid email: {email}"))),
    }
}

impl Resource for Member {
    type Draft = MemberDraft;
    type Patch = MemberPatch;

    const COLLECTION: &'static str = "members";
    const LABEL: &'static str = "Member";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "department", "role"];

    fn canonical_param(key: &str, value: &str) -> Option<&'static str> {
        match key {
            "status" => MemberStatus::from_str(value).map(|s| s.as_str()),
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

    fn build(id: i64, draft: MemberDraft, now: DateTime<Utc>) -> Result<Self> {
        Ok(Member {
            id,
            name: required_text("name", draft.name)?,
            email: checked_email(draft.email)?,
            phone: optional_text(draft.phone),
            department: optional_text(draft.department),
            role: optional_text(draft.role),
            join_date: draft.join_date,
            status: draft.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, patch: MemberPatch, now: DateTime<Utc>) -> Result<()> {
        if let Some(name) = patch.name {
            self.name = required_text("name", Some(name))?;
        }
        if let Some(email) = patch.email {
            self.email = checked_email(Some(email))?;
        }
        if let Some(phone) = patch.phone {
            self.phone = optional_text(phone);
        }
        if let Some(department) = patch.department {
            self.department = optional_text(department);
        }
        if let Some(role) = patch.role {
            self.role = optional_text(role);
        }
        if let Some(join_date) = patch.join_date {
            self.join_date = join_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
        Ok(())
    }
}
