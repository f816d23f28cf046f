pub mod event;
pub mod member;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use event::*;
pub use member::*;
pub use project::*;
pub use status::*;
pub use task::*;
pub use user::*;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TaskboardError};

/// Raw list parameters (query string or CLI flags), keyed by name.
pub type ListParams = BTreeMap<String, String>;

/// A stored record type with its create/update payloads.
///
/// Validation lives in `build` and `apply`, so every backend and every
/// entry point (HTTP, CLI, seeding) enforces the same rules.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    /// Collection name, used for file names and route segments.
    const COLLECTION: &'static str;
    /// Human label used in messages ("Task not found: 3").
    const LABEL: &'static str;
    /// Fields matched by the `search` list parameter.
    const SEARCH_FIELDS: &'static [&'static str];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn created_at(&self) -> DateTime<Utc>;

    fn build(id: i64, draft: Self::Draft, now: DateTime<Utc>) -> Result<Self>;
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>) -> Result<()>;

    /// Stored spelling of a filter value for `key`, when it is an alias.
    fn canonical_param(_key: &str, _value: &str) -> Option<&'static str> {
        None
    }

    /// Filter and sort a listing according to `params`.
    fn query(items: Vec<Self>, params: &ListParams) -> Result<Vec<Self>> {
        crate::query::apply_params(items, params, Self::SEARCH_FIELDS, Self::canonical_param)
    }
}

/// Newest first, ties broken by the higher id.
pub fn sort_newest_first<R: Resource>(items: &mut [R]) {
    items.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(de: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

pub(crate) fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(TaskboardError::validation(format!("{field} is required"))),
    }
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim, drop blanks and duplicates, keep first-appearance order.
pub(crate) fn normalize_names(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|existing| existing == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_names_dedupes_in_order() {
        let tags = normalize_names(vec![
            " docs ".into(),
            "".into(),
            "review".into(),
            "docs".into(),
        ]);
        assert_eq!(tags, vec!["docs", "review"]);
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(required_text("title", Some("   ".into())).is_err());
        assert!(required_text("title", None).is_err());
        assert_eq!(required_text("title", Some(" A ".into())).unwrap(), "A");
    }
}
