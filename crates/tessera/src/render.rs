//! HTML rendering for compiled diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Diagram body
//!     ↓ parse (tessera-parser)
//! Lines + abbreviation table
//!     ↓ grid
//! CellFramework
//!     ↓ render (this module)
//! HTML table
//! ```
//!
//! # Overview
//!
//! - [`HtmlRenderer`] - Emits the `<table>` for one framework.
//! - [`ContentRenderer`] - Host hook that turns abbreviation content into HTML.
//! - [`InlineHtmlRenderer`] - Default content renderer.
//! - [`STYLESHEET`] - CSS for the decoration classes used in the table.

mod content;
mod html;

pub use content::{ContentRenderer, InlineHtmlRenderer, SAFE_SCHEMES};
pub use html::HtmlRenderer;

use tessera_core::style::StyleParams;

/// Table class used when none is configured.
pub const DEFAULT_TABLE_CLASS: &str = "diagram";

/// CSS for the classes emitted by [`HtmlRenderer`].
pub const STYLESHEET: &str = include_str!("render/diagram.css");

/// Options that shape the rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    table_class: String,
    block_style: StyleParams,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_class: DEFAULT_TABLE_CLASS.to_string(),
            block_style: StyleParams::new(),
        }
    }
}

impl RenderOptions {
    pub fn new(table_class: impl Into<String>, block_style: StyleParams) -> Self {
        Self {
            table_class: table_class.into(),
            block_style,
        }
    }

    /// CSS class of the `<table>` element.
    pub fn table_class(&self) -> &str {
        &self.table_class
    }

    /// Style applied to every abbreviation block before its own parameters.
    pub fn block_style(&self) -> &StyleParams {
        &self.block_style
    }
}

/// Wrap rendered diagrams in a complete HTML page with the diagram stylesheet.
pub fn standalone_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{STYLESHEET}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape_html(title)
    )
}

/// Escape HTML special characters in text
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
