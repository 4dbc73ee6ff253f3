//! HTML table output for compiled diagrams.

use log::{debug, trace};

use tessera_core::cell::{Cell, CellFramework, Decoration};
use tessera_parser::AbbreviationTable;

use super::{ContentRenderer, RenderOptions, escape_html};
use crate::grid::LINE_HEIGHT;

/// Empty element that spacer cells and arrowheads are styled through.
const GLYPH: &str = "<div></div>";

/// Renders a [`CellFramework`] as an HTML `<table>`.
///
/// The table starts with a row of horizontal spacer cells, one per grid
/// column, and every row starts with a vertical spacer cell. Box cells whose
/// text names an abbreviation declared on the same line are filled by the
/// [`ContentRenderer`] and styled with the block defaults merged with the
/// abbreviation's parameters.
pub struct HtmlRenderer<'a> {
    content: &'a dyn ContentRenderer,
    options: &'a RenderOptions,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(content: &'a dyn ContentRenderer, options: &'a RenderOptions) -> Self {
        Self { content, options }
    }

    /// Render the framework.
    ///
    /// Output depends only on the inputs, so rendering the same diagram twice
    /// yields identical markup.
    pub fn render(&self, framework: &CellFramework, abbreviations: &AbbreviationTable) -> String {
        let mut table = format!(
            "<table class=\"{}\">\n",
            escape_html(self.options.table_class())
        );

        table.push_str("\t<tr>\n\t\t<td></td>\n");
        let spacer = Decoration::SpacerHorizontal.class_name();
        for _ in 0..framework.cols() {
            table.push_str(&format!("\t\t<td class=\"{spacer}\">{GLYPH}</td>\n"));
        }
        table.push_str("\t</tr>\n");

        let spacer = Decoration::SpacerVertical.class_name();
        for row in 0..framework.rows() {
            table.push_str(&format!("\t<tr>\n\t\t<td class=\"{spacer}\">{GLYPH}</td>\n"));
            for (_, cell) in framework.row(row) {
                table.push_str(&self.render_cell(row / LINE_HEIGHT, cell, abbreviations));
            }
            table.push_str("\t</tr>\n");
        }

        table.push_str("</table>\n");
        debug!(rows = framework.rows(), cols = framework.cols(); "Rendered diagram table");
        table
    }

    fn render_cell(&self, line: usize, cell: &Cell, abbreviations: &AbbreviationTable) -> String {
        let mut style = String::new();
        let content = match cell.text() {
            None if cell.has_arrow_glyph() => GLYPH.to_string(),
            None => String::new(),
            Some(text) => match abbreviations.get(line, text) {
                Some(block) => {
                    trace!(line, abbreviation = text; "Expanding abbreviation");
                    style = self.options.block_style().merged(block.params()).to_css();
                    self.content.render_content(block.content())
                }
                None => escape_html(text),
            },
        };

        let mut td = String::from("\t\t<td");
        if let Some(classes) = cell.class_list() {
            td.push_str(&format!(" class=\"{classes}\""));
        }
        if !style.is_empty() {
            td.push_str(&format!(" style=\"{}\"", escape_html(&style)));
        }
        if cell.colspan() > 1 {
            td.push_str(&format!(" colspan=\"{}\"", cell.colspan()));
        }
        if cell.rowspan() > 1 {
            td.push_str(&format!(" rowspan=\"{}\"", cell.rowspan()));
        }
        td.push_str(&format!(">{content}</td>\n"));
        td
    }
}
