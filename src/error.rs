use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    NotFound,
    ValidationError,
    Unauthorized,
    StorageBusy,
    ConfigError,
    DatabaseError,
    IoError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::NotFound => "NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::StorageBusy => "STORAGE_BUSY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code the API answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::ValidationError => 400,
            Self::Unauthorized => 401,
            Self::StorageBusy => 503,
            Self::NotInitialized
            | Self::ConfigError
            | Self::DatabaseError
            | Self::IoError
            | Self::InternalError => 500,
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskboardError {
    pub code: ErrorCode,
    pub message: String,
}

pub type Result<T, E = TaskboardError> = std::result::Result<T, E>;

impl TaskboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            format!(
                "{}. Run `taskboard init` first.",
                detail.into()
            ),
        )
    }

    pub fn not_found(label: &str, id: i64) -> Self {
        Self::new(ErrorCode::NotFound, format!("{label} not found: {id}"))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn storage_busy(path: &std::path::Path) -> Self {
        Self::new(
            ErrorCode::StorageBusy,
            format!("Timed out waiting for lock on {}", path.display()),
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }
}

impl From<rusqlite::Error> for TaskboardError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}

impl From<std::io::Error> for TaskboardError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorCode::IoError, e.to_string())
    }
}

impl From<serde_json::Error> for TaskboardError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::new(ErrorCode::IoError, e.to_string())
        } else {
            Self::validation(format!("Invalid JSON: {e}"))
        }
    }
}
