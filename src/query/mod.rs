//! Listing queries: field filters, sorting and the task-specific query.
//!
//! Records are inspected through their serialized JSON form, so a filter
//! or sort key names a wire field (`dueDate`, `projectId`, ...).

pub mod due;
pub mod filter;
pub mod sort;
pub mod task_query;

pub use due::*;
pub use filter::FilterSet;
pub use sort::SortState;
pub use task_query::{TaskQuery, TaskSortField};

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TaskboardError};
use crate::models::ListParams;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Blank means the default ascending order.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(TaskboardError::validation(format!(
                "order must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
pub(crate) fn matches_search(item: &Value, fields: &[&str], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        item.get(*field)
            .and_then(Value::as_str)
            .map(|text| text.to_lowercase().contains(&term))
            .unwrap_or(false)
    })
}

/// Generic listing: `search`, `sort`, `order`, and every other parameter
/// as a field filter. `canonical` maps a filter value to its stored form
/// (enum aliases), or returns `None` to keep it as given.
pub fn apply_params<R, F>(
    items: Vec<R>,
    params: &ListParams,
    search_fields: &[&str],
    canonical: F,
) -> Result<Vec<R>>
where
    R: Serialize + Clone,
    F: Fn(&str, &str) -> Option<&'static str>,
{
    let mut filters = FilterSet::default();
    let mut search = None;
    let mut sort_field = None;
    let mut direction = Direction::Asc;

    for (key, value) in params {
        match key.as_str() {
            "search" => search = Some(value.as_str()),
            "sort" => sort_field = Some(value.as_str()).filter(|v| !v.trim().is_empty()),
            "order" => direction = Direction::parse(value)?,
            _ => {
                let value = canonical(key, value)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.clone());
                filters.set(key, Value::String(value));
            }
        }
    }

    let mut items = filters.apply(&items);
    if let Some(term) = search {
        items.retain(|item| {
            serde_json::to_value(item)
                .map(|v| matches_search(&v, search_fields, term))
                .unwrap_or(false)
        });
    }

    Ok(SortState::new(sort_field, direction).apply(&items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generic_params_filter_search_and_sort() {
        let members = vec![
            json!({"name": "Kim", "department": "Dev", "role": "lead"}),
            json!({"name": "Lee", "department": "Design", "role": "member"}),
            json!({"name": "Jung", "department": "Dev", "role": "member"}),
        ];
        let mut params = ListParams::new();
        params.insert("department".into(), "dev".into());
        params.insert("sort".into(), "name".into());
        params.insert("order".into(), "desc".into());

        let out = apply_params(members.clone(), &params, &["name"], |_, _| None).unwrap();
        let names: Vec<_> = out.iter().map(|m| m["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Kim", "Jung"]);

        let mut params = ListParams::new();
        params.insert("search".into(), "LE".into());
        let out = apply_params(members, &params, &["name"], |_, _| None).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["name"], "Lee");
    }

    #[test]
    fn bad_order_is_rejected() {
        let mut params = ListParams::new();
        params.insert("order".into(), "sideways".into());
        assert!(apply_params(vec![json!({})], &params, &[], |_, _| None).is_err());
    }

    #[test]
    fn blank_order_sorts_ascending() {
        let items = vec![json!({"name": "b"}), json!({"name": "a"})];
        let mut params = ListParams::new();
        params.insert("sort".into(), "name".into());
        params.insert("order".into(), "  ".into());
        let out = apply_params(items, &params, &[], |_, _| None).unwrap();
        assert_eq!(out[0]["name"], "a");
    }

    #[test]
    fn canonical_values_replace_aliases() {
        let items = vec![json!({"status": "in-progress"}), json!({"status": "done"})];
        let mut params = ListParams::new();
        params.insert("status".into(), "진행중".into());
        let canonical = |key: &str, value: &str| match (key, value) {
            ("status", "진행중") => Some("in-progress"),
            _ => None,
        };
        let out = apply_params(items, &params, &[], canonical).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["status"], "in-progress");
    }
}
