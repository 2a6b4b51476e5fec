use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;

/// Inactivity limit applied to signed-in sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTtl {
    pub enabled: bool,
    pub ttl: Duration,
}

impl Default for SessionTtl {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
        }
    }
}

impl SessionTtl {
    #[must_use]
    pub fn enabled_minutes(minutes: i64) -> Self {
        Self {
            enabled: true,
            ttl: Duration::minutes(minutes),
        }
    }

    /// Parses the two settings as they are stored: a flag and a minute count.
    pub fn from_settings(enabled: bool, minutes: &str) -> Result<Self> {
        let trimmed = minutes.trim();
        let parsed = trimmed.parse::<i64>().map_err(|_| {
            RenderError::Validation(format!("session ttl must be a whole number of minutes: {trimmed}"))
        })?;
        if parsed < 1 {
            return Err(RenderError::Validation(format!(
                "session ttl must be at least one minute: {parsed}"
            )));
        }
        let ttl = Duration::try_minutes(parsed).ok_or_else(|| {
            RenderError::Validation(format!("session ttl is out of range: {parsed} minutes"))
        })?;
        Ok(Self { enabled, ttl })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub const fn new(updated_at: DateTime<Utc>) -> Self {
        Self { updated_at }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestClass {
    Interactive,
    Programmatic,
}

/// What the caller must surface once a session has run past its TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiredResponse {
    /// Continue anonymously so the next page shows the login action.
    LoginLanding,
    /// Stop with an unauthorized response instead of the payload.
    Unauthorized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDecision {
    Active,
    Expired(ExpiredResponse),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionExpiryPolicy {
    ttl: SessionTtl,
}

impl SessionExpiryPolicy {
    #[must_use]
    pub const fn new(ttl: SessionTtl) -> Self {
        Self { ttl }
    }

    #[must_use]
    pub const fn ttl(&self) -> SessionTtl {
        self.ttl
    }

    #[must_use]
    pub fn is_expired(&self, record: &SessionRecord, now: DateTime<Utc>) -> bool {
        self.ttl.enabled && now.signed_duration_since(record.updated_at) > self.ttl.ttl
    }

    #[must_use]
    pub fn decide(
        &self,
        record: &SessionRecord,
        now: DateTime<Utc>,
        class: RequestClass,
    ) -> SessionDecision {
        if !self.is_expired(record, now) {
            return SessionDecision::Active;
        }
        SessionDecision::Expired(match class {
            RequestClass::Interactive => ExpiredResponse::LoginLanding,
            RequestClass::Programmatic => ExpiredResponse::Unauthorized,
        })
    }
}
