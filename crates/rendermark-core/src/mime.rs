//! Canonical MIME types for attachment names.
//!
//! The table below is the single source of truth: the extension index, the
//! css class tokens and the category checks are all derived from it. Entries
//! are matched on the last extension segment of a file name only.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Ordered `(canonical type, comma-separated extensions)` pairs.
///
/// When two types claim the same extension the later row wins, so `png`
/// resolves to `image/png` rather than `image/apng`.
pub const MIME_TYPES: &[(&str, &str)] = &[
    (
        "text/plain",
        "txt,tpl,properties,patch,diff,ini,readme,install,upgrade",
    ),
    ("text/css", "css"),
    ("text/html", "html,htm,xhtml"),
    ("text/jsp", "jsp"),
    ("text/x-c", "c,cpp,cc,h,hh"),
    ("text/x-csharp", "cs"),
    ("text/x-java", "java"),
    ("text/x-javascript", "js"),
    ("text/x-html-template", "rhtml"),
    ("text/x-perl", "pl,pm"),
    ("text/x-php", "php,php3,php4,php5"),
    ("text/x-python", "py"),
    ("text/x-ruby", "rb,rbw,ruby,rake,erb"),
    ("text/x-csh", "csh"),
    ("text/x-sh", "sh"),
    ("text/xml", "xml,xsd,mxml"),
    ("text/yaml", "yml,yaml"),
    ("text/csv", "csv"),
    ("text/x-po", "po"),
    ("image/gif", "gif"),
    ("image/jpeg", "jpg,jpeg,jpe"),
    ("image/apng", "png"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/tiff", "tiff,tif"),
    ("image/x-ms-bmp", "bmp"),
    ("image/x-xpixmap", "xpm"),
    ("application/pdf", "pdf"),
    ("application/rtf", "rtf"),
    ("application/msword", "doc"),
    ("application/vnd.ms-excel", "xls"),
    ("application/vnd.ms-powerpoint", "ppt,pps"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pptx",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.slideshow",
        "ppsx",
    ),
    ("application/vnd.oasis.opendocument.spreadsheet", "ods"),
    ("application/vnd.oasis.opendocument.text", "odt"),
    ("application/vnd.oasis.opendocument.presentation", "odp"),
    ("application/x-7z-compressed", "7z"),
    ("application/x-rar-compressed", "rar"),
    ("application/x-tar", "tar"),
    ("application/zip", "zip"),
    ("application/x-gzip", "gz"),
    ("video/x-flv", "flv,f4v"),
    ("video/mpeg", "mpeg,mpg,mpe"),
    ("video/mp4", "mp4"),
    ("video/x-ms-wmv", "wmv"),
    ("video/webm", "webm"),
    ("video/quicktime", "qt,mov"),
    ("video/vnd.vivo", "viv,vivo"),
    ("video/x-msvideo", "avi"),
];

pub const PLAIN_TEXT_TYPES: &[&str] = &["text/plain"];

pub const INLINE_IMAGE_TYPES: &[&str] = &[
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/apng",
    "image/tiff",
    "image/bmp",
    "image/webp",
];

pub const INLINE_MOVIE_TYPES: &[&str] = &[
    "video/x-msvideo",
    "video/quicktime",
    "video/mpeg",
    "video/mp4",
    "video/webm",
    "video/x-ms-wmv",
];

static REGISTRY: LazyLock<ContentTypeRegistry> =
    LazyLock::new(|| ContentTypeRegistry::from_table(MIME_TYPES));

/// How a renderer may show an attachment of a given type inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineDisplay {
    Text,
    Image,
    Movie,
}

#[derive(Debug, Clone)]
pub struct ContentTypeRegistry {
    table: &'static [(&'static str, &'static str)],
    extensions: HashMap<String, &'static str>,
}

impl ContentTypeRegistry {
    /// Builds the extension index, later rows overriding earlier ones.
    #[must_use]
    pub fn from_table(table: &'static [(&'static str, &'static str)]) -> Self {
        let mut extensions = HashMap::new();
        for (mime, exts) in table {
            for ext in exts.split(',').map(str::trim).filter(|ext| !ext.is_empty()) {
                let key = ext.to_lowercase();
                if let Some(previous) = extensions.insert(key, *mime) {
                    if previous != *mime {
                        tracing::debug!(
                            extension = ext,
                            previous,
                            current = *mime,
                            "extension re-declared; later mime type wins"
                        );
                    }
                }
            }
        }
        Self { table, extensions }
    }

    #[must_use]
    pub fn of<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&'static str> {
        let ext = extension_of(name.into()?)?;
        self.extensions.get(ext.to_lowercase().as_str()).copied()
    }

    #[must_use]
    pub fn css_class_of<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<String> {
        self.of(name).map(|mime| mime.replace('/', "-"))
    }

    #[must_use]
    pub fn main_mimetype_of<'a>(&self, name: impl Into<Option<&'a str>>) -> Option<&'static str> {
        self.of(name).and_then(|mime| mime.split('/').next())
    }

    #[must_use]
    pub fn is_type<'a>(&self, category: &str, name: impl Into<Option<&'a str>>) -> bool {
        self.main_mimetype_of(name) == Some(category)
    }

    /// Prefers the registry type over `declared` when both share a category.
    #[must_use]
    pub fn narrow_type<'d>(&self, name: &str, declared: &'d str) -> &'d str {
        let declared_category = declared.split('/').next();
        match self.of(name) {
            Some(known) if known.split('/').next() == declared_category => known,
            _ => declared,
        }
    }

    /// Extensions that resolve back to `mime` through the index.
    #[must_use]
    pub fn extensions_of(&self, mime: &str) -> Vec<&'static str> {
        self.table
            .iter()
            .filter(|(declared, _)| *declared == mime)
            .flat_map(|(_, exts)| exts.split(',').map(str::trim))
            .filter(|ext| {
                self.extensions.get(ext.to_lowercase().as_str()).copied() == Some(mime)
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

#[must_use]
pub fn registry() -> &'static ContentTypeRegistry {
    &REGISTRY
}

#[must_use]
pub fn of<'a>(name: impl Into<Option<&'a str>>) -> Option<&'static str> {
    REGISTRY.of(name)
}

#[must_use]
pub fn css_class_of<'a>(name: impl Into<Option<&'a str>>) -> Option<String> {
    REGISTRY.css_class_of(name)
}

#[must_use]
pub fn main_mimetype_of<'a>(name: impl Into<Option<&'a str>>) -> Option<&'static str> {
    REGISTRY.main_mimetype_of(name)
}

#[must_use]
pub fn is_type<'a>(category: &str, name: impl Into<Option<&'a str>>) -> bool {
    REGISTRY.is_type(category, name)
}

#[must_use]
pub fn narrow_type<'d>(name: &str, declared: &'d str) -> &'d str {
    REGISTRY.narrow_type(name, declared)
}

#[must_use]
pub fn extensions_of(mime: &str) -> Vec<&'static str> {
    REGISTRY.extensions_of(mime)
}

#[must_use]
pub fn is_plain_text(mime: &str) -> bool {
    PLAIN_TEXT_TYPES.contains(&mime)
}

#[must_use]
pub fn is_image(mime: &str) -> bool {
    INLINE_IMAGE_TYPES.contains(&mime)
}

#[must_use]
pub fn is_movie(mime: &str) -> bool {
    INLINE_MOVIE_TYPES.contains(&mime)
}

#[must_use]
pub fn inline_display(mime: &str) -> Option<InlineDisplay> {
    if is_plain_text(mime) {
        Some(InlineDisplay::Text)
    } else if is_image(mime) {
        Some(InlineDisplay::Image)
    } else if is_movie(mime) {
        Some(InlineDisplay::Movie)
    } else {
        None
    }
}

// Text after the final dot, or the whole name when there is none.
fn extension_of(name: &str) -> Option<&str> {
    let ext = match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    };
    (!ext.is_empty()).then_some(ext)
}
