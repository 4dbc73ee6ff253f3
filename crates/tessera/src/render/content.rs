//! Rendering of abbreviation content.

use log::warn;
use tessera_core::content::{ContentNode, MarkupKind};

use super::escape_html;

/// Converts captured abbreviation content into HTML.
///
/// The diagram compiler never interprets content; hosts plug their own
/// markup engine in here. Any `Fn(&[ContentNode]) -> String` closure is a
/// renderer.
///
/// ```
/// # use tessera::render::ContentRenderer;
/// # use tessera_core::content::ContentNode;
/// let upper = |nodes: &[ContentNode]| {
///     nodes.iter().map(|n| n.plain_text().to_uppercase()).collect::<String>()
/// };
/// assert_eq!(upper.render_content(&[ContentNode::text("hi")]), "HI");
/// ```
pub trait ContentRenderer {
    fn render_content(&self, nodes: &[ContentNode]) -> String;
}

impl<F> ContentRenderer for F
where
    F: Fn(&[ContentNode]) -> String,
{
    fn render_content(&self, nodes: &[ContentNode]) -> String {
        self(nodes)
    }
}

/// Default content renderer producing inline HTML.
///
/// Text is escaped. Markup spans map to `<strong>`, `<em>`, `<u>`, `<code>`,
/// `<a>` and `<img>`; unformatted spans are emitted as escaped text.
///
/// Link and media targets must be relative or use one of
/// [`SAFE_SCHEMES`]. Any other target renders its label as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineHtmlRenderer;

impl InlineHtmlRenderer {
    fn render_node(&self, node: &ContentNode, out: &mut String) {
        match node {
            ContentNode::Text(text) => out.push_str(&escape_html(text)),
            ContentNode::Markup { kind, inner } => match kind {
                MarkupKind::Strong => wrap(out, "strong", inner),
                MarkupKind::Emphasis => wrap(out, "em", inner),
                MarkupKind::Underline => wrap(out, "u", inner),
                MarkupKind::Monospace => wrap(out, "code", inner),
                MarkupKind::Unformatted => out.push_str(&escape_html(inner)),
                MarkupKind::Link => {
                    let (target, label) = split_title(inner);
                    if !is_safe_target(target) {
                        warn!(link = target; "Refusing link target with unsupported scheme");
                        out.push_str(&escape_html(label.unwrap_or(target)));
                        return;
                    }
                    out.push_str(&format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(target),
                        escape_html(label.unwrap_or(target))
                    ));
                }
                MarkupKind::Media => {
                    let (source, title) = split_title(inner);
                    if !is_safe_target(source) {
                        warn!(media = source; "Refusing media source with unsupported scheme");
                        out.push_str(&escape_html(title.unwrap_or(source)));
                        return;
                    }
                    out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(source),
                        escape_html(title.unwrap_or_default())
                    ));
                }
            },
        }
    }
}

impl ContentRenderer for InlineHtmlRenderer {
    fn render_content(&self, nodes: &[ContentNode]) -> String {
        let mut out = String::new();
        for node in nodes {
            self.render_node(node, &mut out);
        }
        out
    }
}

fn wrap(out: &mut String, tag: &str, inner: &str) {
    out.push_str(&format!("<{tag}>{}</{tag}>", escape_html(inner)));
}

/// URL schemes allowed in `href` and `src` attributes.
pub const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `target` is a relative reference or uses a [`SAFE_SCHEMES`] entry.
///
/// A `:` before the first `/`, `?` or `#` marks a scheme. Control characters
/// are rejected outright since browsers strip them inside schemes.
fn is_safe_target(target: &str) -> bool {
    if target.chars().any(char::is_control) {
        return false;
    }
    let head_end = target.find(['/', '?', '#']).unwrap_or(target.len());
    match target[..head_end].split_once(':') {
        Some((scheme, _)) => SAFE_SCHEMES
            .iter()
            .any(|safe| scheme.eq_ignore_ascii_case(safe)),
        None => true,
    }
}

/// Splits `target|title`, trimming both parts.
fn split_title(inner: &str) -> (&str, Option<&str>) {
    match inner.split_once('|') {
        Some((target, title)) => (target.trim(), Some(title.trim())),
        None => (inner.trim(), None),
    }
}
