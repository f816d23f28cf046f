pub mod commands;
pub mod event;
pub mod init;
pub mod member;
pub mod project;
mod resource;
pub mod serve;
pub mod status;
pub mod task;

pub use commands::*;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{Result, TaskboardError};
use crate::models::ListParams;
use crate::output;
use crate::store::Store;

/// Report `result` in the selected output mode and return the exit code.
pub(crate) fn finish(result: Result<i32>, json_output: bool) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                output::json::print(&output::json::error(&e));
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

pub(crate) fn open_store(config_path: &Path) -> Result<(AppConfig, Store)> {
    let config = AppConfig::load(config_path)?;
    let store = Store::open(&config)?;
    Ok((config, store))
}

/// Deserialize a create/update body assembled from flags.
pub(crate) fn from_flags<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| TaskboardError::validation(format!("invalid value: {e}")))
}

/// List parameters from `--search`, `--sort`, `--desc` and `--filter key=value`.
pub(crate) fn list_params(
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
    filters: &[String],
) -> Result<ListParams> {
    let mut params = ListParams::new();
    for raw in filters {
        let (key, value) = raw
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| TaskboardError::validation(format!("filter must be key=value, got '{raw}'")))?;
        params.insert(key.trim().to_string(), value.trim().to_string());
    }
    if let Some(search) = search {
        params.insert("search".into(), search);
    }
    if let Some(sort) = sort {
        params.insert("sort".into(), sort);
    }
    if desc {
        params.insert("order".into(), "desc".into());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_collects_flags() {
        let params = list_params(
            Some("plan".into()),
            Some("name".into()),
            true,
            &["department=Dev".into(), "status = active".into()],
        )
        .unwrap();
        assert_eq!(params.get("search").map(String::as_str), Some("plan"));
        assert_eq!(params.get("order").map(String::as_str), Some("desc"));
        assert_eq!(params.get("department").map(String::as_str), Some("Dev"));
        assert_eq!(params.get("status").map(String::as_str), Some("active"));
        assert!(list_params(None, None, false, &["oops".into()]).is_err());
    }
}
