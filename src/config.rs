use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskboardError};
use crate::models::UserProfile;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// SQLite when true, JSON files in `data_dir` otherwise.
    pub use_database: bool,
    pub use_sample_data: bool,
    pub server_port: u16,
    pub api_base_path: String,
    pub database_path: PathBuf,
    pub data_dir: PathBuf,
    pub require_auth: bool,
    pub lock_timeout_ms: u64,
    pub users: Vec<UserAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            use_database: false,
            use_sample_data: true,
            server_port: 3000,
            api_base_path: "/api".into(),
            database_path: PathBuf::from("data/taskboard.db"),
            data_dir: PathBuf::from("data"),
            require_auth: false,
            lock_timeout_ms: 5000,
            users: vec![UserAccount::demo()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub join_date: Option<chrono::NaiveDate>,
}

impl UserAccount {
    fn demo() -> Self {
        Self {
            email: "test@example.com".into(),
            password: "password".into(),
            name: "김태호".into(),
            position: Some("프로젝트 매니저".into()),
            department: Some("개발팀".into()),
            join_date: chrono::NaiveDate::from_ymd_opt(2023, 1, 15),
        }
    }

    /// Public view of the account; `id` is its 1-based position in the config.
    pub fn profile(&self, id: i64) -> UserProfile {
        UserProfile {
            id,
            email: self.email.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            join_date: self.join_date,
        }
    }
}

impl AppConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    ///
    /// Relative storage paths are resolved against the config file's
    /// directory, then `PORT` and `TASKBOARD_DATABASE` are applied.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
                TaskboardError::config(format!("Invalid config {}: {e}", path.display()))
            })?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            AppConfig::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.resolve_paths(path.parent().unwrap_or(Path::new("")));
        config.validate()?;
        Ok(config)
    }

    /// Write this config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(self)
            .map_err(|e| TaskboardError::internal(e.to_string()))?;
        fs::write(path, body + "\n")?;
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            self.server_port = port
                .trim()
                .parse()
                .map_err(|_| TaskboardError::config(format!("PORT must be a port number, got '{port}'")))?;
        }
        if let Some(db) = lookup("TASKBOARD_DATABASE").filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(db.trim());
        }
        Ok(())
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        if self.database_path.is_relative() {
            self.database_path = base.join(&self.database_path);
        }
        if self.data_dir.is_relative() {
            self.data_dir = base.join(&self.data_dir);
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.api_base_path.starts_with('/') {
            return Err(TaskboardError::config(format!(
                "apiBasePath must start with '/', got '{}'",
                self.api_base_path
            )));
        }
        Ok(())
    }

    /// Base path without a trailing slash (`/api`), or empty for `/`.
    pub fn base_path(&self) -> &str {
        self.api_base_path.trim_end_matches('/')
    }

    pub fn mode(&self) -> &'static str {
        if self.use_database {
            "database"
        } else {
            "files"
        }
    }

    /// Account and its profile id for matching credentials.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<UserProfile> {
        self.users
            .iter()
            .enumerate()
            .find(|(_, u)| u.email.eq_ignore_ascii_case(email.trim()) && u.password == password)
            .map(|(i, u)| u.profile(i as i64 + 1))
    }

    pub fn default_profile(&self) -> Option<UserProfile> {
        self.users.first().map(|u| u.profile(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(&dir.path().join("config.json")).unwrap();
        assert!(!config.use_database);
        assert_eq!(config.api_base_path, "/api");
        assert_eq!(config.data_dir, dir.path().join("data"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"useDatabase": true, "serverPort": 8080, "databasePath": "db/app.db"}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert!(config.use_database);
        assert!(config.use_sample_data);
        assert_eq!(config.database_path, dir.path().join("db/app.db"));
        assert_eq!(config.users.len(), 1);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn env_overrides_port_and_database() {
        let mut config = AppConfig::default();
        config
            .apply_env(|key| match key {
                "PORT" => Some("4100".into()),
                "TASKBOARD_DATABASE" => Some("/tmp/other.db".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.server_port, 4100);
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));

        assert!(config.apply_env(|_| Some("abc".into())).is_err());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.json");
        let mut config = AppConfig::default();
        config.require_auth = true;
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert!(loaded.require_auth);
        assert_eq!(loaded.data_dir, dir.path().join("nested/data"));
    }

    #[test]
    fn authenticate_checks_credentials() {
        let config = AppConfig::default();
        let profile = config.authenticate("TEST@example.com", "password").unwrap();
        assert_eq!(profile.id, 1);
        assert!(config.authenticate("test@example.com", "wrong").is_none());
        assert_eq!(config.default_profile(), Some(profile));
    }
}
