//! Tessera - compiler for a compact box-and-line diagram notation.
//!
//! A diagram is written one row per line, with `|`-separated commands. Single
//! character commands draw connector lines, anything else becomes a box, and
//! abbreviations (`|name=...`) fill boxes with rich content. The compiled
//! diagram renders as an HTML table.
//!
//! ```
//! let diagram = tessera::compile("|,|-@2|.|\n|!|box|!|\n|`|-|'|\n");
//! let html = tessera::render(diagram.framework(), diagram.abbreviations());
//!
//! assert!(html.starts_with("<table class=\"diagram\">"));
//! assert!(diagram.diagnostics().is_empty());
//! ```

pub mod config;
pub mod grid;
pub mod render;

mod error;

pub use tessera_core::{arrow, border, cell, content, style};
pub use tessera_parser::{AbbreviationBlock, AbbreviationTable, Span, error as diagnostic};

pub use error::TesseraError;

use log::{debug, info, trace};

use tessera_core::cell::CellFramework;
use tessera_parser::{blocks, error::Diagnostic};

use config::AppConfig;
use render::{ContentRenderer, HtmlRenderer, InlineHtmlRenderer, RenderOptions};

/// A compiled diagram: its cell grid, the abbreviation blocks that fill
/// its boxes, and the warnings raised while compiling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    framework: CellFramework,
    abbreviations: AbbreviationTable,
    diagnostics: Vec<Diagnostic>,
}

impl Diagram {
    pub fn framework(&self) -> &CellFramework {
        &self.framework
    }

    pub fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    /// Warnings about input that was dropped or reinterpreted, with spans
    /// relative to the compiled body.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// A document with every diagram block replaced by its table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    html: String,
    diagrams: usize,
    diagnostics: Vec<Diagnostic>,
}

impl RenderedDocument {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Number of diagram blocks that were rendered.
    pub fn diagram_count(&self) -> usize {
        self.diagrams
    }

    /// Warnings of every diagram, with spans relative to the document.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Compile a diagram body into a [`Diagram`].
///
/// Compilation never fails; see [`Diagram::diagnostics`] for the warnings.
pub fn compile(body: &str) -> Diagram {
    let assembly = tessera_parser::parse(body);
    let (lines, abbreviations, mut diagnostics) = assembly.into_parts();

    let (framework, grid_diagnostics) = grid::compile_lines(&lines);
    diagnostics.extend(grid_diagnostics);

    Diagram {
        framework,
        abbreviations,
        diagnostics,
    }
}

/// Render a compiled framework as an HTML table with default options and
/// the [`InlineHtmlRenderer`].
pub fn render(framework: &CellFramework, abbreviations: &AbbreviationTable) -> String {
    HtmlRenderer::new(&InlineHtmlRenderer, &RenderOptions::default()).render(framework, abbreviations)
}

/// Replace every `<diagram>` block of a document with its table, using the
/// default configuration.
pub fn render_document(document: &str) -> RenderedDocument {
    DiagramBuilder::default().render_document(document)
}

/// Builder for compiling and rendering Tessera diagrams with a configuration
/// and a custom content renderer.
///
/// # Examples
///
/// ```
/// use tessera::{DiagramBuilder, config::AppConfig, content::ContentNode};
///
/// let builder = DiagramBuilder::new(AppConfig::default())
///     .with_content_renderer(|nodes: &[ContentNode]| {
///         nodes.iter().map(|node| node.plain_text()).collect::<String>()
///     });
///
/// let diagram = builder.compile("|note|note= **hi**\n");
/// let html = builder.render_html(&diagram);
/// assert!(html.contains("> hi</td>"));
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    options: RenderOptions,
    content: Box<dyn ContentRenderer + Send + Sync>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// Style defaults that fail validation are left out of the rendered
    /// styles; call [`config::StyleConfig::validate`] first to reject them
    /// instead.
    pub fn new(config: AppConfig) -> Self {
        let options = config.render_options();
        Self {
            config,
            options,
            content: Box::new(InlineHtmlRenderer),
        }
    }

    /// Replace the renderer used for abbreviation content.
    pub fn with_content_renderer(
        mut self,
        renderer: impl ContentRenderer + Send + Sync + 'static,
    ) -> Self {
        self.content = Box::new(renderer);
        self
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compile a diagram body.
    pub fn compile(&self, body: &str) -> Diagram {
        info!("Compiling diagram");
        let diagram = compile(body);
        debug!(
            rows = diagram.framework.rows(),
            cols = diagram.framework.cols(),
            warnings = diagram.diagnostics.len();
            "Diagram compiled"
        );
        trace!(diagram:?; "Compiled diagram");
        diagram
    }

    /// Render a compiled diagram as an HTML table.
    pub fn render_html(&self, diagram: &Diagram) -> String {
        HtmlRenderer::new(self.content.as_ref(), &self.options)
            .render(&diagram.framework, &diagram.abbreviations)
    }

    /// Replace every `<diagram>...</diagram>` block of a document with its
    /// table. Text outside the blocks is copied verbatim.
    pub fn render_document(&self, document: &str) -> RenderedDocument {
        let mut rendered = RenderedDocument::default();
        let mut cursor = 0;

        for block in blocks(document) {
            let span = block.span();
            rendered.html.push_str(&document[cursor..span.start()]);

            let diagram = self.compile(block.body());
            rendered.html.push_str(&self.render_html(&diagram));
            rendered.diagnostics.extend(
                diagram
                    .diagnostics
                    .iter()
                    .map(|diagnostic| diagnostic.shifted(block.body_offset())),
            );
            rendered.diagrams += 1;
            cursor = span.end();
        }
        rendered.html.push_str(&document[cursor..]);

        info!(diagrams = rendered.diagrams; "Document rendered");
        rendered
    }
}
