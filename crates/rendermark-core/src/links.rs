//! Rewriting of root-relative links into absolute URLs.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Scheme and authority of the request a render runs inside of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRequest {
    /// Either `https://` or a bare `https`.
    pub protocol: String,
    pub host_with_port: String,
}

impl OriginRequest {
    #[must_use]
    pub fn new(protocol: impl Into<String>, host_with_port: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host_with_port: host_with_port.into(),
        }
    }
}

/// Process-wide fallback used when no request is available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlOptions {
    pub protocol: Option<String>,
    pub host: Option<String>,
}

impl UrlOptions {
    #[must_use]
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: Some(protocol.into()),
            host: Some(host.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub only_path: bool,
    pub request: Option<OriginRequest>,
    pub default_url_options: UrlOptions,
}

impl RenderContext {
    /// Context for output that stays relative (HTML pages).
    #[must_use]
    pub fn relative() -> Self {
        Self {
            only_path: true,
            ..Self::default()
        }
    }

    /// Context for output that must carry absolute links (API, mail, export).
    #[must_use]
    pub fn absolute(request: Option<OriginRequest>, default_url_options: UrlOptions) -> Self {
        Self {
            only_path: false,
            request,
            default_url_options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host_with_port: String,
}

impl Origin {
    fn from_parts(protocol: &str, host: &str) -> Option<Self> {
        let scheme = protocol.trim().trim_end_matches("://").trim_end_matches(':');
        let host = host.trim().trim_end_matches('/');
        if !is_web_scheme(scheme) || host.is_empty() {
            return None;
        }
        Some(Self {
            scheme: scheme.to_ascii_lowercase(),
            host_with_port: host.to_string(),
        })
    }

    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}://{}", self.scheme, self.host_with_port)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LinkRewriter<'c> {
    context: &'c RenderContext,
}

impl<'c> LinkRewriter<'c> {
    #[must_use]
    pub const fn new(context: &'c RenderContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub const fn context(&self) -> &'c RenderContext {
        self.context
    }

    #[must_use]
    pub fn applicable(&self, url: &str) -> bool {
        !self.context.only_path && is_root_relative(url)
    }

    #[must_use]
    pub fn rewrite<'u>(&self, url: &'u str) -> Cow<'u, str> {
        if !self.applicable(url) {
            return Cow::Borrowed(url);
        }
        match self.resolve_origin() {
            Some(origin) => Cow::Owned(format!("{}{url}", origin.prefix())),
            None => Cow::Borrowed(url),
        }
    }

    /// The originating request wins; the configured defaults are the fallback.
    #[must_use]
    pub fn resolve_origin(&self) -> Option<Origin> {
        if let Some(request) = &self.context.request {
            return Origin::from_parts(&request.protocol, &request.host_with_port);
        }
        let defaults = &self.context.default_url_options;
        Origin::from_parts(defaults.protocol.as_deref()?, defaults.host.as_deref()?)
    }
}

#[must_use]
pub fn is_root_relative(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// `http` or `https`, in any case, with or without the trailing `://`.
#[must_use]
pub fn is_web_scheme(protocol: &str) -> bool {
    let scheme = protocol.trim().trim_end_matches("://").trim_end_matches(':');
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}
