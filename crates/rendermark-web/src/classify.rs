use axum::http::{HeaderMap, HeaderName};

use rendermark_core::config::ProgrammaticMarker;
use rendermark_core::{RenderError, RequestClass};

/// Decides whether a request comes from a browser or an API client.
pub trait RequestClassifier: Send + Sync {
    fn classify(&self, headers: &HeaderMap) -> RequestClass;
}

/// Flags a request as programmatic when one header carries a marker value.
#[derive(Debug, Clone)]
pub struct HeaderMarkerClassifier {
    header_name: HeaderName,
    header_value: String,
}

impl HeaderMarkerClassifier {
    pub fn from_marker(marker: &ProgrammaticMarker) -> rendermark_core::Result<Self> {
        let header_name = HeaderName::from_bytes(marker.header_name.trim().as_bytes())
            .map_err(|err| {
                RenderError::Validation(format!(
                    "invalid header name {:?}: {err}",
                    marker.header_name
                ))
            })?;
        Ok(Self {
            header_name,
            header_value: marker.header_value.trim().to_string(),
        })
    }
}

impl RequestClassifier for HeaderMarkerClassifier {
    fn classify(&self, headers: &HeaderMap) -> RequestClass {
        let flagged = headers
            .get_all(&self.header_name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.trim().eq_ignore_ascii_case(&self.header_value));
        if flagged {
            RequestClass::Programmatic
        } else {
            RequestClass::Interactive
        }
    }
}
