// Public fallible APIs in this crate share one concrete error contract (`RenderError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod config;
pub mod error;
pub mod links;
#[cfg(feature = "markdown")]
pub mod markdown;
pub mod mime;
pub mod session;

pub use config::AppConfig;
pub use error::{RenderError, Result};
pub use links::{LinkRewriter, OriginRequest, RenderContext, UrlOptions, is_web_scheme};
pub use mime::{ContentTypeRegistry, InlineDisplay};
pub use session::{
    ExpiredResponse, RequestClass, SessionDecision, SessionExpiryPolicy, SessionRecord, SessionTtl,
};
