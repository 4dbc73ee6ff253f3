//! Grid cells and the compiled cell framework.
//!
//! The grid compiler produces a [`CellFramework`]: a sparse map from
//! `(row, column)` to [`Cell`]. Each diagram line owns two grid rows. Only the
//! right and bottom borders of a cell are ever drawn, so neighboring cells
//! never double up a shared border.

use std::{collections::BTreeMap, fmt};

use log::warn;

use crate::border::{Edge, LineStyle};

/// Visual tag attached to a cell.
///
/// Every decoration maps to exactly one CSS class name, see
/// [`Decoration::class_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    /// A box cell holding text or an abbreviation block.
    Block,
    /// A line drawn along the right border of the cell.
    BorderRight(LineStyle),
    /// A line drawn along the bottom border of the cell.
    BorderBottom(LineStyle),
    /// An arrow glyph for the given connector edge.
    Arrow(Edge),
    /// The arrowhead in this cell points inward.
    ArrowInside,
    /// Cell of the leading spacer row.
    SpacerHorizontal,
    /// Cell of the leading spacer column.
    SpacerVertical,
}

impl Decoration {
    /// Returns the CSS class for this decoration.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Block => "d-b",
            Self::BorderRight(LineStyle::Solid) => "d-brs",
            Self::BorderRight(LineStyle::Dashed) => "d-brd",
            Self::BorderBottom(LineStyle::Solid) => "d-bbs",
            Self::BorderBottom(LineStyle::Dashed) => "d-bbd",
            Self::Arrow(Edge::Top) => "d-at",
            Self::Arrow(Edge::Right) => "d-ar",
            Self::Arrow(Edge::Bottom) => "d-ab",
            Self::Arrow(Edge::Left) => "d-al",
            Self::ArrowInside => "d-ai",
            Self::SpacerHorizontal => "d-sh",
            Self::SpacerVertical => "d-sv",
        }
    }

    /// Returns the border style carried by this decoration, if any.
    pub fn line_style(self) -> Option<LineStyle> {
        match self {
            Self::BorderRight(style) | Self::BorderBottom(style) => Some(style),
            _ => None,
        }
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A single rectangular cell of the compiled grid.
///
/// A cell without text is a connector or spacer cell; it renders its
/// decorations and, if [`has_arrow_glyph`](Self::has_arrow_glyph) is set, an
/// arrow placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    colspan: usize,
    rowspan: usize,
    decorations: Vec<Decoration>,
    text: Option<String>,
    arrow_glyph: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            decorations: Vec::new(),
            text: None,
            arrow_glyph: false,
        }
    }
}

impl Cell {
    /// Creates an undecorated 1x1 cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a box cell spanning `colspan` x `rowspan` with the given text.
    ///
    /// Spans below 1 are clamped to 1.
    pub fn block(colspan: usize, rowspan: usize, text: impl Into<String>) -> Self {
        Self {
            colspan: colspan.max(1),
            rowspan: rowspan.max(1),
            decorations: vec![Decoration::Block],
            text: Some(text.into()),
            arrow_glyph: false,
        }
    }

    pub fn colspan(&self) -> usize {
        self.colspan
    }

    pub fn rowspan(&self) -> usize {
        self.rowspan
    }

    /// Decorations in the order they were added.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn has_decoration(&self, decoration: Decoration) -> bool {
        self.decorations.contains(&decoration)
    }

    /// Box text or abbreviation name, `None` for connector cells.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_arrow_glyph(&self) -> bool {
        self.arrow_glyph
    }

    /// Adds a decoration; duplicates are ignored.
    pub fn decorate(&mut self, decoration: Decoration) {
        if !self.decorations.contains(&decoration) {
            self.decorations.push(decoration);
        }
    }

    /// Builder form of [`decorate`](Self::decorate).
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorate(decoration);
        self
    }

    /// Marks the cell as holding an arrow glyph placeholder.
    pub fn set_arrow_glyph(&mut self) {
        self.arrow_glyph = true;
    }

    /// Returns the space-separated CSS class list, or `None` if undecorated.
    pub fn class_list(&self) -> Option<String> {
        if self.decorations.is_empty() {
            return None;
        }
        let classes: Vec<&str> = self
            .decorations
            .iter()
            .map(|decoration| decoration.class_name())
            .collect();
        Some(classes.join(" "))
    }
}

/// The compiled grid: row and column counts plus sparse cell storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellFramework {
    rows: usize,
    cols: usize,
    cells: BTreeMap<(usize, usize), Cell>,
}

impl CellFramework {
    /// Creates an empty framework with `rows` rows and no columns.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            cols: 0,
            cells: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Widens the framework to at least `cols` columns.
    pub fn extend_cols(&mut self, cols: usize) {
        self.cols = self.cols.max(cols);
    }

    /// Places `cell` with its top-left corner at `(row, col)`.
    ///
    /// The framework grows to cover the cell's span. Placing a cell on an
    /// occupied origin replaces the previous cell.
    pub fn place(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows = self.rows.max(row + cell.rowspan);
        self.cols = self.cols.max(col + cell.colspan);
        if self.cells.insert((row, col), cell).is_some() {
            warn!(row, col; "Replacing an already placed cell");
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Iterates all placed cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells.iter().map(|(&position, cell)| (position, cell))
    }

    /// Iterates the cells whose origin lies in `row`, ordered by column.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells
            .range((row, 0)..(row + 1, 0))
            .map(|(&(_, col), cell)| (col, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
