use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use ulid::Ulid;

use crate::config::AppConfig;
use crate::error::{Result, TaskboardError};
use crate::models::UserProfile;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

pub const SESSION_TTL_HOURS: i64 = 24;

impl Session {
    fn expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at >= ttl
    }
}

/// In-memory bearer-token sessions. Lost on restart; expire after a TTL.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(SESSION_TTL_HOURS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Check credentials against the configured users and open a session.
    pub fn login(&self, config: &AppConfig, email: &str, password: &str) -> Result<Session> {
        let user = config
            .authenticate(email, password)
            .ok_or_else(|| TaskboardError::unauthorized("Invalid email or password"))?;
        let session = Session {
            token: Ulid::new().to_string(),
            user,
            created_at: Utc::now(),
        };
        let mut sessions = self.lock()?;
        let ttl = self.ttl;
        let now = session.created_at;
        sessions.retain(|_, s| !s.expired(ttl, now));
        sessions.insert(session.token.clone(), session.clone());
        tracing::info!(user = %session.user.email, active = sessions.len(), "login");
        Ok(session)
    }

    /// Returns true when a session was closed.
    pub fn logout(&self, token: &str) -> Result<bool> {
        Ok(self.lock()?.remove(token).is_some())
    }

    /// Live session for `token`; an expired one is dropped.
    pub fn lookup(&self, token: &str) -> Result<Option<Session>> {
        let mut sessions = self.lock()?;
        let expired = match sessions.get(token) {
            Some(s) => s.expired(self.ttl, Utc::now()),
            None => return Ok(None),
        };
        if expired {
            sessions.remove(token);
            return Ok(None);
        }
        Ok(sessions.get(token).cloned())
    }

    /// The session for `token`, or UNAUTHORIZED.
    pub fn require(&self, token: Option<&str>) -> Result<Session> {
        let token = token.ok_or_else(|| TaskboardError::unauthorized("Authentication required"))?;
        self.lookup(token)?
            .ok_or_else(|| TaskboardError::unauthorized("Session expired or invalid"))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Session>>> {
        self.sessions
            .lock()
            .map_err(|_| TaskboardError::internal("session mutex poisoned"))
    }
}
