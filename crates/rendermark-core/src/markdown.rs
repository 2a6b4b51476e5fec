use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::links::{LinkRewriter, RenderContext};

/// Renders markdown to HTML, dropping raw HTML and unsafe destinations, and
/// absolutizing root-relative links when `context` asks for it.
#[must_use]
pub fn render_markdown_html(content: &str, context: &RenderContext) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let rewriter = LinkRewriter::new(context);
    let parser = Parser::new_ext(content, options).map(|event| match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: final_destination(&rewriter, &dest_url, LINK_SCHEMES, "#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: final_destination(&rewriter, &dest_url, IMAGE_SCHEMES, ""),
            title,
            id,
        }),
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(CowStr::from(raw.into_string())),
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

// Validates the emitted URL, after any origin was prepended.
fn final_destination(
    rewriter: &LinkRewriter<'_>,
    dest_url: &str,
    allowed: &[&str],
    blocked: &'static str,
) -> CowStr<'static> {
    let rewritten = rewriter.rewrite(dest_url);
    if destination_allowed(&rewritten, allowed) {
        CowStr::from(rewritten.into_owned())
    } else {
        tracing::debug!(destination = %rewritten, "dropping link destination");
        CowStr::from(blocked)
    }
}

fn destination_allowed(destination: &str, allowed: &[&str]) -> bool {
    let trimmed = destination.trim();
    if trimmed.starts_with("//") {
        return false;
    }
    match scheme_of(trimmed) {
        Some(scheme) => allowed
            .iter()
            .any(|candidate| scheme.eq_ignore_ascii_case(candidate)),
        None => true,
    }
}

/// Text before a `:` that precedes any `/`, `?` or `#`.
fn scheme_of(destination: &str) -> Option<&str> {
    let end = destination.find([':', '/', '?', '#'])?;
    destination[end..]
        .starts_with(':')
        .then(|| &destination[..end])
}
