use crate::error::{RenderError, Result};
use crate::links::UrlOptions;
use crate::session::{DEFAULT_SESSION_TTL_MINUTES, SessionTtl};

mod env;

use self::env::{parse_env_bool, read_non_empty_env};

pub const ENV_PROTOCOL: &str = "RENDERMARK_PROTOCOL";
pub const ENV_HOST_NAME: &str = "RENDERMARK_HOST_NAME";
pub const ENV_SESSION_TTL_ENABLED: &str = "RENDERMARK_SESSION_TTL_ENABLED";
pub const ENV_SESSION_TTL: &str = "RENDERMARK_SESSION_TTL";
pub const ENV_PROGRAMMATIC_HEADER: &str = "RENDERMARK_PROGRAMMATIC_HEADER";
pub const ENV_PROGRAMMATIC_VALUE: &str = "RENDERMARK_PROGRAMMATIC_VALUE";
pub const ENV_ADMIN_LOGIN: &str = "RENDERMARK_ADMIN_LOGIN";
pub const ENV_ADMIN_PASSWORD: &str = "RENDERMARK_ADMIN_PASSWORD";

const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_PROGRAMMATIC_HEADER: &str = "X-Requested-With";
const DEFAULT_PROGRAMMATIC_VALUE: &str = "XMLHttpRequest";
const DEFAULT_ADMIN_LOGIN: &str = "admin";

/// Header marker that flags a request as coming from an API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammaticMarker {
    pub header_name: String,
    pub header_value: String,
}

impl Default for ProgrammaticMarker {
    fn default() -> Self {
        Self {
            header_name: DEFAULT_PROGRAMMATIC_HEADER.to_string(),
            header_value: DEFAULT_PROGRAMMATIC_VALUE.to_string(),
        }
    }
}

/// Single stand-in account; sign-in is refused while no password is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub login: String,
    pub password: Option<String>,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            login: DEFAULT_ADMIN_LOGIN.to_string(),
            password: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub url_options: UrlOptions,
    pub session_ttl: SessionTtl,
    pub programmatic_marker: ProgrammaticMarker,
    pub admin: AdminAccount,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            url_options: UrlOptions {
                protocol: Some(DEFAULT_PROTOCOL.to_string()),
                host: None,
            },
            session_ttl: SessionTtl::default(),
            programmatic_marker: ProgrammaticMarker::default(),
            admin: AdminAccount::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(read_non_empty_env)
    }

    /// Resolves every setting through `lookup`, which must return trimmed,
    /// non-empty values only.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let url_options = UrlOptions {
            protocol: Some(resolve_protocol(lookup(ENV_PROTOCOL).as_deref())?),
            host: lookup(ENV_HOST_NAME),
        };
        let session_ttl = resolve_session_ttl(
            lookup(ENV_SESSION_TTL_ENABLED).as_deref(),
            lookup(ENV_SESSION_TTL).as_deref(),
        )?;
        let programmatic_marker = ProgrammaticMarker {
            header_name: lookup(ENV_PROGRAMMATIC_HEADER)
                .unwrap_or(defaults.programmatic_marker.header_name),
            header_value: lookup(ENV_PROGRAMMATIC_VALUE)
                .unwrap_or(defaults.programmatic_marker.header_value),
        };
        let admin = AdminAccount {
            login: lookup(ENV_ADMIN_LOGIN).unwrap_or(defaults.admin.login),
            password: lookup(ENV_ADMIN_PASSWORD),
        };

        Ok(Self {
            url_options,
            session_ttl,
            programmatic_marker,
            admin,
        })
    }
}

fn resolve_protocol(raw: Option<&str>) -> Result<String> {
    let normalized = raw.map(|value| {
        value
            .trim()
            .trim_end_matches("://")
            .to_ascii_lowercase()
    });
    match normalized.as_deref() {
        None => Ok(DEFAULT_PROTOCOL.to_string()),
        Some(value @ ("http" | "https")) => Ok(value.to_string()),
        Some(other) => {
            tracing::warn!(protocol = other, "rejecting configured protocol");
            Err(RenderError::Validation(format!(
                "invalid {ENV_PROTOCOL}: {other} (expected http|https)"
            )))
        }
    }
}

fn resolve_session_ttl(enabled: Option<&str>, minutes: Option<&str>) -> Result<SessionTtl> {
    let enabled = parse_env_bool(enabled);
    match minutes {
        Some(raw) => SessionTtl::from_settings(enabled, raw).map_err(|err| {
            tracing::warn!(error = %err, "rejecting configured session ttl");
            RenderError::Validation(format!("invalid {ENV_SESSION_TTL}: {raw}"))
        }),
        None => SessionTtl::from_settings(enabled, &DEFAULT_SESSION_TTL_MINUTES.to_string()),
    }
}
