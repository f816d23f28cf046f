use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use super::Direction;

/// Single-key sort with a direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    field: Option<String>,
    direction: Direction,
    initial_field: Option<String>,
    initial_direction: Direction,
}

impl SortState {
    pub fn new(field: Option<&str>, direction: Direction) -> Self {
        let field = field.map(str::to_string);
        Self {
            field: field.clone(),
            direction,
            initial_field: field,
            initial_direction: direction,
        }
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Selecting the active field flips direction; a new field starts ascending.
    pub fn select(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.toggle_direction();
        } else {
            self.field = Some(field.to_string());
            self.direction = Direction::Asc;
        }
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    pub fn reset(&mut self) {
        self.field = self.initial_field.clone();
        self.direction = self.initial_direction;
    }

    /// Stable sort by the active field; input order is kept when none is set.
    pub fn apply<R>(&self, items: &[R]) -> Vec<R>
    where
        R: Serialize + Clone,
    {
        let Some(field) = self.field.as_deref() else {
            return items.to_vec();
        };
        let mut keyed: Vec<(SortKey, &R)> = items
            .iter()
            .map(|item| {
                let key = serde_json::to_value(item)
                    .ok()
                    .and_then(|v| v.get(field).cloned())
                    .map(|v| SortKey::of(&v))
                    .unwrap_or(SortKey::Missing);
                (key, item)
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match self.direction {
            Direction::Asc => a.cmp(b),
            Direction::Desc => b.cmp(a),
        });
        keyed.into_iter().map(|(_, item)| item.clone()).collect()
    }
}

/// Comparable projection of a JSON value.
///
/// Variants order as listed, so mixed-kind columns still sort totally:
/// missing values first, then numbers, dates and text.
#[derive(Debug, Clone)]
pub(crate) enum SortKey {
    Missing,
    Number(f64),
    Date(i64),
    Text { folded: String, raw: String },
}

impl SortKey {
    pub(crate) fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Missing,
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Missing),
            Value::String(s) => match parse_timestamp_millis(s) {
                Some(ms) => Self::Date(ms),
                None => Self::text(s),
            },
            other => Self::text(&other.to_string()),
        }
    }

    fn text(s: &str) -> Self {
        Self::Text {
            folded: s.to_lowercase(),
            raw: s.to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text { .. } => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text { folded: fa, raw: ra }, Self::Text { folded: fb, raw: rb }) => {
                fa.cmp(fb).then_with(|| ra.cmp(rb))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Milliseconds since the epoch for RFC 3339, ISO local datetime or bare date strings.
pub(crate) fn parse_timestamp_millis(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
