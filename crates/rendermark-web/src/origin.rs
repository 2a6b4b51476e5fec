use axum::http::{HeaderMap, header};

use rendermark_core::{OriginRequest, RenderContext, UrlOptions, is_web_scheme};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme and host the request arrived on, as seen through a reverse proxy.
pub(crate) fn origin_request(headers: &HeaderMap, defaults: &UrlOptions) -> Option<OriginRequest> {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())?;
    let protocol = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|value| {
            let accepted = is_web_scheme(value);
            if !accepted {
                tracing::debug!(forwarded_proto = %value, "ignoring forwarded protocol");
            }
            accepted
        })
        .or(defaults.protocol.as_deref())
        .unwrap_or("http");
    Some(OriginRequest::new(format!("{protocol}://"), host))
}

pub(crate) fn render_context(
    headers: &HeaderMap,
    defaults: &UrlOptions,
    only_path: bool,
) -> RenderContext {
    RenderContext {
        only_path,
        request: origin_request(headers, defaults),
        default_url_options: defaults.clone(),
    }
}
