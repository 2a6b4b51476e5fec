use serde::{Deserialize, Serialize};

use rendermark_core::{InlineDisplay, mime};

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub name: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentClassification {
    pub name: String,
    pub content_type: Option<String>,
    pub css_class: Option<String>,
    pub category: Option<String>,
    pub inline: Option<InlineDisplay>,
    /// Declared type narrowed through the registry; absent without a declared type.
    pub narrowed: Option<String>,
}

impl AttachmentClassification {
    pub fn classify(name: &str, declared: Option<&str>) -> Self {
        let content_type = mime::of(name);
        let narrowed = declared.map(|declared| mime::narrow_type(name, declared).to_string());
        let effective = narrowed.as_deref().or(content_type);
        Self {
            name: name.to_string(),
            content_type: content_type.map(str::to_string),
            css_class: mime::css_class_of(name),
            category: mime::main_mimetype_of(name).map(str::to_string),
            inline: effective.and_then(mime::inline_display),
            narrowed,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub content: String,
    #[serde(default = "default_only_path")]
    pub only_path: bool,
}

const fn default_only_path() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct FormattedText {
    pub raw: String,
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: u64,
    pub subject: String,
    pub description: FormattedText,
    pub attachments: Vec<AttachmentClassification>,
}
