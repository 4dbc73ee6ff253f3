//! CLI logic for the Tessera diagram tool.
//!
//! Reads a document, replaces each `<diagram>` block with its HTML table and
//! writes the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use tessera::{DiagramBuilder, TesseraError, render::standalone_page};
use tessera_parser::error::Diagnostic;

/// Result of a successful run: the input text and the warnings raised while
/// compiling it, with spans relative to that text.
#[derive(Debug)]
pub struct RunOutcome {
    source: String,
    diagrams: usize,
    diagnostics: Vec<Diagnostic>,
}

impl RunOutcome {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of diagrams written.
    pub fn diagram_count(&self) -> usize {
        self.diagrams
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Run the Tessera CLI application
///
/// This function renders the input file through the Tessera pipeline and
/// writes the resulting HTML to the output file.
///
/// # Errors
///
/// Returns `TesseraError` for:
/// - File I/O errors
/// - Configuration loading and validation errors
pub fn run(args: &Args) -> Result<RunOutcome, TesseraError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        raw = args.raw;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let (mut html, diagrams, diagnostics) = if args.raw {
        let diagram = builder.compile(&source);
        let html = builder.render_html(&diagram);
        (html, 1, diagram.diagnostics().to_vec())
    } else {
        let rendered = builder.render_document(&source);
        let diagrams = rendered.diagram_count();
        let diagnostics = rendered.diagnostics().to_vec();
        (rendered.into_html(), diagrams, diagnostics)
    };

    if args.standalone {
        let title = Path::new(&args.input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        html = standalone_page(&title, &html);
    }

    fs::write(&args.output, html)?;

    info!(output_file = args.output, diagrams; "HTML exported successfully");

    Ok(RunOutcome {
        source,
        diagrams,
        diagnostics,
    })
}
