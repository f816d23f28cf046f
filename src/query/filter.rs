use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Field filters combined with AND.
///
/// Setting a key to the value it already holds clears that key, so a UI
/// can bind "click the active chip again" straight to [`FilterSet::set`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: BTreeMap<String, Value>,
    initial: BTreeMap<String, Value>,
}

impl FilterSet {
    pub fn new(initial: BTreeMap<String, Value>) -> Self {
        Self {
            filters: initial.clone(),
            initial,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if self.filters.get(&key) == Some(&value) {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.filters.remove(key);
    }

    pub fn reset(&mut self) {
        self.filters = self.initial.clone();
    }

    pub fn has_active(&self) -> bool {
        !self.filters.is_empty()
    }

    /// True when `item` (a serialized record) satisfies every filter.
    pub fn matches(&self, item: &Value) -> bool {
        self.filters
            .iter()
            .all(|(key, wanted)| field_matches(item.get(key), wanted))
    }

    pub fn apply<R>(&self, items: &[R]) -> Vec<R>
    where
        R: Serialize + Clone,
    {
        if !self.has_active() {
            return items.to_vec();
        }
        items
            .iter()
            .filter(|item| {
                serde_json::to_value(item)
                    .map(|v| self.matches(&v))
                    .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}

fn field_matches(field: Option<&Value>, wanted: &Value) -> bool {
    match wanted {
        Value::Null => return true,
        Value::String(s) if s.is_empty() => return true,
        _ => {}
    }
    let Some(field) = field else {
        return false;
    };

    match (field, wanted) {
        (Value::Array(values), _) => values.contains(wanted),
        (Value::String(have), Value::String(want)) => {
            have.to_lowercase().contains(&want.to_lowercase())
        }
        (Value::Number(have), Value::String(want)) => match (have.as_f64(), want.trim().parse::<f64>()) {
            (Some(have), Ok(want)) => have == want,
            _ => false,
        },
        (Value::Bool(have), Value::String(want)) => want.trim().parse::<bool>() == Ok(*have),
        _ => field == wanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tasks() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "Write Plan", "status": "pending", "tags": ["docs", "plan"], "projectId": 1}),
            json!({"id": 2, "title": "Review design", "status": "done", "tags": ["design"], "projectId": 2}),
            json!({"id": 3, "title": "Plan sprint", "status": "pending", "tags": [], "projectId": null}),
        ]
    }

    fn ids(items: &[Value]) -> Vec<i64> {
        items.iter().map(|v| v["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn same_value_twice_clears_the_filter() {
        let data = tasks();
        let mut f = FilterSet::default();
        f.set("status", "done");
        assert_eq!(ids(&f.apply(&data)), vec![2]);
        f.set("status", "done");
        assert!(!f.has_active());
        assert_eq!(f.apply(&data), data);
    }

    #[test]
    fn strings_match_case_insensitive_substrings() {
        let mut f = FilterSet::default();
        f.set("title", "plan");
        assert_eq!(ids(&f.apply(&tasks())), vec![1, 3]);
    }

    #[test]
    fn arrays_use_membership() {
        let mut f = FilterSet::default();
        f.set("tags", "design");
        assert_eq!(ids(&f.apply(&tasks())), vec![2]);
        f.set("tags", "des");
        assert!(f.apply(&tasks()).is_empty());
    }

    #[test]
    fn empty_values_are_no_constraint() {
        let mut f = FilterSet::default();
        f.set("status", "");
        f.set("assignee", Value::Null);
        assert!(f.has_active());
        assert_eq!(f.apply(&tasks()).len(), 3);
    }

    #[test]
    fn numbers_compare_exactly_and_from_strings() {
        let mut f = FilterSet::default();
        f.set("projectId", 1);
        assert_eq!(ids(&f.apply(&tasks())), vec![1]);
        let mut f = FilterSet::default();
        f.set("projectId", "2");
        assert_eq!(ids(&f.apply(&tasks())), vec![2]);
    }

    #[test]
    fn filters_combine_with_and() {
        let mut f = FilterSet::default();
        f.set("status", "pending");
        f.set("tags", "docs");
        assert_eq!(ids(&f.apply(&tasks())), vec![1]);
    }

    #[test]
    fn reset_restores_initial_filters() {
        let mut initial = BTreeMap::new();
        initial.insert("status".to_string(), json!("pending"));
        let mut f = FilterSet::new(initial);
        f.set("title", "sprint");
        f.remove("status");
        assert_eq!(ids(&f.apply(&tasks())), vec![3]);
        f.reset();
        assert_eq!(ids(&f.apply(&tasks())), vec![1, 3]);
    }
}
