use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{double_option, optional_text, required_text, Resource};
use crate::error::{Result, TaskboardError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[serde(alias = "회의", alias = "미팅")]
    Meeting,
    #[serde(alias = "업무")]
    Task,
    #[serde(alias = "마감일")]
    Deadline,
    #[serde(alias = "교육")]
    Training,
    #[serde(alias = "휴가")]
    Vacation,
    #[default]
    #[serde(alias = "기타")]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Task => "task",
            Self::Deadline => "deadline",
            Self::Training => "training",
            Self::Vacation => "vacation",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "meeting" | "회의" | "미팅" => Some(Self::Meeting),
            "task" | "업무" => Some(Self::Task),
            "deadline" | "마감일" => Some(Self::Deadline),
            "training" | "교육" => Some(Self::Training),
            "vacation" | "휴가" => Some(Self::Vacation),
            "other" | "기타" => Some(Self::Other),
            _ => None,
        }
    }

    /// Display color shown for events of this type.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Meeting => "#3b82f6",
            Self::Task => "#f59e0b",
            Self::Deadline => "#ef4444",
            Self::Training => "#10b981",
            Self::Vacation => "#ec4899",
            Self::Other => "#8b5cf6",
        }
    }
}

/// Serde format for event timestamps: local wall-clock time, seconds precision.
pub mod event_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_event_time(&raw)
            .map(|(t, _)| t)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid event time: {raw}")))
    }
}

/// Parse an event time. Bare dates are midnight and flagged as all-day.
/// An explicit offset is dropped and the wall-clock time kept as sent.
pub fn parse_event_time(raw: &str) -> Option<(NaiveDateTime, bool)> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some((dt.naive_local(), false));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some((dt, false));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| (dt, true))
}

fn event_time_field(field: &str, raw: &str) -> Result<(NaiveDateTime, bool)> {
    parse_event_time(raw).ok_or_else(|| {
        TaskboardError::validation(format!(
            "{field} must be YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS], got '{raw}'"
        ))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    #[serde(with = "event_time")]
    pub start: NaiveDateTime,
    #[serde(with = "event_time")]
    pub end: NaiveDateTime,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub color: Option<String>,
}

fn check_span(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end < start {
        return Err(TaskboardError::validation("end must not be before start"));
    }
    Ok(())
}

impl Resource for CalendarEvent {
    type Draft = EventDraft;
    type Patch = EventPatch;

    const COLLECTION: &'static str = "calendar";
    const LABEL: &'static str = "Event";
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "description", "location"];

    fn canonical_param(key: &str, value: &str) -> Option<&'static str> {
        match key {
            "type" => EventType::from_str(value).map(|t| t.as_str()),
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

    fn build(id: i64, draft: EventDraft, now: DateTime<Utc>) -> Result<Self> {
        let title = required_text("title", draft.title)?;
        let raw_start = required_text("start", draft.start)?;
        let (start, all_day) = event_time_field("start", &raw_start)?;
        let end = match draft.end.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => event_time_field("end", raw)?.0,
            None => start,
        };
        check_span(start, end)?;

        let event_type = draft.event_type.unwrap_or_default();
        Ok(CalendarEvent {
            id,
            title,
            start,
            end,
            all_day,
            description: optional_text(draft.description),
            location: optional_text(draft.location),
            event_type,
            color: optional_text(draft.color).unwrap_or_else(|| event_type.color().to_string()),
            created_at: now,
            updated_at: now,
        })
    }

    fn apply(&mut self, patch: EventPatch, now: DateTime<Utc>) -> Result<()> {
        let (start, all_day) = match patch.start.as_deref() {
            Some(raw) => event_time_field("start", raw)?,
            None => (self.start, self.all_day),
        };
        // A moved start without a new end keeps the event's length.
        let end = match patch.end.as_deref() {
            Some(raw) => event_time_field("end", raw)?.0,
            None => start
                .checked_add_signed(self.end - self.start)
                .ok_or_else(|| TaskboardError::validation("end is out of range"))?,
        };
        check_span(start, end)?;
        if let Some(title) = patch.title {
            self.title = required_text("title", Some(title))?;
        }
        self.start = start;
        self.end = end;
        self.all_day = all_day;

        if let Some(description) = patch.description {
            self.description = optional_text(description);
        }
        if let Some(location) = patch.location {
            self.location = optional_text(location);
        }
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
            if patch.color.is_none() {
                self.color = event_type.color().to_string();
            }
        }
        if let Some(color) = optional_text(patch.color) {
            self.color = color;
        }
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-04-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn bare_date_is_all_day() {
        let draft = EventDraft {
            title: Some("Vacation".into()),
            start: Some("2025-04-27".into()),
            end: Some("2025-04-29".into()),
            event_type: Some(EventType::Vacation),
            ..Default::default()
        };
        let e = CalendarEvent::build(1, draft, now()).unwrap();
        assert!(e.all_day);
        assert_eq!(e.color, "#ec4899");
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["start"], "2025-04-27T00:00:00");
        assert_eq!(v["type"], "vacation");
    }

    #[test]
    fn end_defaults_to_start_and_must_not_precede_it() {
        let e = CalendarEvent::build(
            1,
            EventDraft {
                title: Some("Deadline".into()),
                start: Some("2025-04-18T17:00:00".into()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert_eq!(e.start, e.end);
        assert!(!e.all_day);

        let bad = EventDraft {
            title: Some("Backwards".into()),
            start: Some("2025-04-18T17:00".into()),
            end: Some("2025-04-18T09:00".into()),
            ..Default::default()
        };
        assert!(CalendarEvent::build(2, bad, now()).is_err());
    }

    #[test]
    fn type_change_recolors_unless_color_given() {
        let mut e = CalendarEvent::build(
            1,
            EventDraft {
                title: Some("Sync".into()),
                start: Some("2025-04-17T10:00:00".into()),
                event_type: Some(EventType::Meeting),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        assert_eq!(e.color, "#3b82f6");

        let patch: EventPatch = serde_json::from_str(r#"{"type":"마감일"}"#).unwrap();
        e.apply(patch, now()).unwrap();
        assert_eq!(e.event_type, EventType::Deadline);
        assert_eq!(e.color, "#ef4444");

        let patch: EventPatch =
            serde_json::from_str(r##"{"type":"training","color":"#000000"}"##).unwrap();
        e.apply(patch, now()).unwrap();
        assert_eq!(e.color, "#000000");
    }

    #[test]
    fn moving_start_keeps_duration() {
        let mut e = CalendarEvent::build(
            1,
            EventDraft {
                title: Some("Deadline".into()),
                start: Some("2025-04-18T17:00:00".into()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        let patch: EventPatch = serde_json::from_str(r#"{"start":"2025-04-19T17:00:00"}"#).unwrap();
        e.apply(patch, now()).unwrap();
        assert_eq!(e.start, e.end);
        assert_eq!(serde_json::to_value(&e).unwrap()["end"], "2025-04-19T17:00:00");

        let patch: EventPatch =
            serde_json::from_str(r#"{"start":"2025-04-19T09:00","end":"2025-04-19T10:30"}"#).unwrap();
        e.apply(patch, now()).unwrap();
        let patch: EventPatch = serde_json::from_str(r#"{"start":"2025-04-21T14:00"}"#).unwrap();
        e.apply(patch, now()).unwrap();
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["start"], "2025-04-21T14:00:00");
        assert_eq!(v["end"], "2025-04-21T15:30:00");

        let backwards: EventPatch = serde_json::from_str(r#"{"end":"2025-04-21T13:00"}"#).unwrap();
        assert!(e.apply(backwards, now()).is_err());
    }

    #[test]
    fn offset_times_keep_wall_clock() {
        let e = CalendarEvent::build(
            1,
            EventDraft {
                title: Some("Seoul sync".into()),
                start: Some("2025-04-18T09:00:00+09:00".into()),
                end: Some("2025-04-18T10:00:00+09:00".into()),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["start"], "2025-04-18T09:00:00");
        assert_eq!(v["end"], "2025-04-18T10:00:00");
        assert!(!e.all_day);
    }

    #[test]
    fn rejects_unparseable_time() {
        let draft = EventDraft {
            title: Some("x".into()),
            start: Some("next tuesday".into()),
            ..Default::default()
        };
        assert!(CalendarEvent::build(1, draft, now()).is_err());
    }

    #[test]
    fn list_filters_accept_original_type_labels() {
        let event = |id: i64, title: &str, event_type: EventType| {
            CalendarEvent::build(
                id,
                EventDraft {
                    title: Some(title.into()),
                    start: Some("2025-04-27".into()),
                    event_type: Some(event_type),
                    ..Default::default()
                },
                now(),
            )
            .unwrap()
        };
        let items = vec![
            event(1, "Leave", EventType::Vacation),
            event(2, "Sync", EventType::Meeting),
        ];
        let mut params = crate::models::ListParams::new();
        params.insert("type".into(), "휴가".into());
        let found = CalendarEvent::query(items.clone(), &params).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Leave");

        params.insert("type".into(), "미팅".into());
        assert_eq!(CalendarEvent::query(items, &params).unwrap()[0].title, "Sync");
    }
}
