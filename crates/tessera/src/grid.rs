//! Grid compiler.
//!
//! Maps assembled lines onto a [`CellFramework`]. Line `i` owns grid rows
//! `2i` and `2i + 1`. Each command occupies either a 2×2 block of connector
//! cells or one 6×2 box cell, left to right from column 0.
//!
//! ```text
//! +     +     +
//!       |
//!  (0,0) top (0,1)
//!       |
//! +-left+right+
//!       |
//!  (1,0) bot (1,1)
//!       |
//! +     +     +
//! ```
//!
//! Only right and bottom cell borders are drawn, so the four edges of a
//! connector pattern land on the two borders that meet at the block centre.

use log::{debug, trace};

use tessera_core::{
    arrow::ArrowSpec,
    border::{BorderPattern, Edge, LineStyle},
    cell::{Cell, CellFramework, Decoration},
};
use tessera_parser::{
    Command, Line,
    error::{Diagnostic, WarningCode},
};

/// Columns occupied by a connector.
pub const CONNECTOR_WIDTH: usize = 2;
/// Columns occupied by a box.
pub const BOX_WIDTH: usize = 6;
/// Rows occupied by every line.
pub const LINE_HEIGHT: usize = 2;

/// Separates a connector symbol from its arrow suffix.
pub const ARROW_SEPARATOR: char = '@';

/// Returns the border pattern of a connector symbol as a
/// `top right bottom left` code, or `None` for box text.
pub fn connector_code(symbol: &str) -> Option<&'static str> {
    let code = match symbol {
        "" => "nnnn",
        "," => "nssn",
        "F" => "nddn",
        "." => "nnss",
        "7" => "nndd",
        "v" => "nsss",
        "V" => "nddd",
        "!" => "snsn",
        ":" => "dndn",
        "+" => "ssss",
        "%" => "dddd",
        "-" => "nsns",
        "~" => "ndnd",
        "`" => "ssnn",
        "L" => "ddnn",
        "'" => "snns",
        "J" => "dnnd",
        "^" => "ssns",
        "A" => "ddnd",
        "(" => "snss",
        "C" => "dndd",
        ")" => "sssn",
        "D" => "dddn",
        "y" => "ndsd",
        "*" => "dsds",
        "}" => "dsdn",
        "{" => "dnds",
        "]" => "sdsn",
        "[" => "snsd",
        "h" => "sdnd",
        "#" => "sdsd",
        "p" => "nsds",
        "b" => "dsns",
        _ => return None,
    };
    Some(code)
}

/// Every connector symbol, solid/dashed pairs first.
pub const CONNECTOR_SYMBOLS: [&str; 33] = [
    "", ",", "F", ".", "7", "v", "V", "!", ":", "+", "%", "-", "~", "`", "L", "'", "J", "^", "A",
    "(", "C", ")", "D", "y", "*", "}", "{", "]", "[", "h", "#", "p", "b",
];

/// Solid symbols paired with their dashed twin.
pub const SOLID_DASHED_PAIRS: [(&str, &str); 11] = [
    (",", "F"),
    (".", "7"),
    ("v", "V"),
    ("!", ":"),
    ("+", "%"),
    ("-", "~"),
    ("`", "L"),
    ("'", "J"),
    ("^", "A"),
    ("(", "C"),
    (")", "D"),
];

/// How a single command is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement<'a> {
    Connector {
        pattern: BorderPattern,
        arrows: ArrowSpec,
    },
    Box {
        text: &'a str,
    },
}

/// Outcome of splitting a command into symbol and arrow suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    pub placement: Placement<'a>,
    /// Set when a connector carried an arrow suffix that is not 1-2 hex digits.
    pub malformed_suffix: Option<&'a str>,
}

/// Classifies a command as a connector or a box.
///
/// The text before the first `@` selects the connector. A two digit suffix is
/// read low nibble first, so `ab` means `0xba`.
pub fn classify(command: &str) -> Classified<'_> {
    let (symbol, suffix) = match command.split_once(ARROW_SEPARATOR) {
        Some((symbol, suffix)) => (symbol, Some(suffix)),
        None => (command, None),
    };

    let Some(pattern) = connector_code(symbol).and_then(BorderPattern::from_code) else {
        return Classified {
            placement: Placement::Box { text: command },
            malformed_suffix: None,
        };
    };

    let (arrows, malformed_suffix) = match suffix {
        None => (ArrowSpec::NONE, None),
        Some(suffix) => match ArrowSpec::from_suffix(suffix) {
            Some(arrows) => (arrows, None),
            None => (ArrowSpec::NONE, Some(suffix)),
        },
    };

    Classified {
        placement: Placement::Connector { pattern, arrows },
        malformed_suffix,
    }
}

/// Builds the 2×2 connector cells, in `(0,0) (0,1) (1,0) (1,1)` order.
pub fn connector_cells(pattern: BorderPattern, arrows: ArrowSpec) -> [Cell; 4] {
    let mut cells = [Cell::new(), Cell::new(), Cell::new(), Cell::new()];

    let borders: [(usize, Edge, fn(LineStyle) -> Decoration); 4] = [
        (0, Edge::Top, Decoration::BorderRight),
        (1, Edge::Right, Decoration::BorderBottom),
        (2, Edge::Bottom, Decoration::BorderRight),
        (0, Edge::Left, Decoration::BorderBottom),
    ];
    for (index, edge, decoration) in borders {
        if let Some(style) = pattern.edge(edge) {
            cells[index].decorate(decoration(style));
        }
    }

    for edge in Edge::ALL {
        if arrows.has_arrow(edge) {
            let cell = &mut cells[arrow_cell(edge)];
            cell.decorate(Decoration::Arrow(edge));
            cell.set_arrow_glyph();
        }
    }
    for edge in Edge::ALL {
        if arrows.points_inward(edge) {
            cells[arrow_cell(edge)].decorate(Decoration::ArrowInside);
        }
    }

    cells
}

/// Index of the connector cell that carries the arrowhead of `edge`.
fn arrow_cell(edge: Edge) -> usize {
    match edge {
        Edge::Top => 1,
        Edge::Right => 3,
        Edge::Bottom => 2,
        Edge::Left => 0,
    }
}

/// Offsets of the connector cells returned by [`connector_cells`].
const CONNECTOR_OFFSETS: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

struct GridCompiler {
    framework: CellFramework,
    diagnostics: Vec<Diagnostic>,
}

impl GridCompiler {
    fn new(lines: usize) -> Self {
        Self {
            framework: CellFramework::new(lines * LINE_HEIGHT),
            diagnostics: Vec::new(),
        }
    }

    fn compile_line(&mut self, index: usize, line: &Line) {
        let row = index * LINE_HEIGHT;
        let mut col = 0;

        for command in line.commands() {
            col += self.place_command(row, col, command);
        }

        self.framework.extend_cols(col);
        trace!(line = index, cols = col; "Compiled line");
    }

    /// Places one command and returns the number of columns it used.
    fn place_command(&mut self, row: usize, col: usize, command: &Command) -> usize {
        let classified = classify(command.text());

        if let Some(suffix) = classified.malformed_suffix {
            debug!(command = command.text(), suffix; "Ignoring malformed arrow suffix");
            self.diagnostics.push(
                Diagnostic::warning(format!("malformed arrow suffix `{suffix}`; no arrows drawn"))
                    .with_code(WarningCode::W101)
                    .with_label(command.span(), "connector drawn without arrows")
                    .with_help("use one or two hexadecimal digits, e.g. `-@2` or `+@a1`"),
            );
        }

        match classified.placement {
            Placement::Connector { pattern, arrows } => {
                let cells = connector_cells(pattern, arrows);
                for ((dr, dc), cell) in CONNECTOR_OFFSETS.into_iter().zip(cells) {
                    self.framework.place(row + dr, col + dc, cell);
                }
                CONNECTOR_WIDTH
            }
            Placement::Box { text } => {
                self.framework
                    .place(row, col, Cell::block(BOX_WIDTH, LINE_HEIGHT, text));
                BOX_WIDTH
            }
        }
    }
}

/// Compile assembled lines into a cell framework.
///
/// Returns the framework with `2 × lines.len()` rows, plus warnings for
/// commands whose arrow suffix had to be ignored.
pub fn compile_lines(lines: &[Line]) -> (CellFramework, Vec<Diagnostic>) {
    let mut compiler = GridCompiler::new(lines.len());
    for (index, line) in lines.iter().enumerate() {
        compiler.compile_line(index, line);
    }

    debug!(
        rows = compiler.framework.rows(),
        cols = compiler.framework.cols(),
        cells = compiler.framework.len();
        "Compiled cell framework"
    );
    (compiler.framework, compiler.diagnostics)
}

#[cfg(test)]
mod tests {
    use tessera_parser::Span;

    use super::*;

    fn lines(rows: &[&[&str]]) -> Vec<Line> {
        rows.iter()
            .map(|commands| {
                Line::new(
                    commands
                        .iter()
                        .map(|text| Command::new(*text, Span::default()))
                        .collect(),
                )
            })
            .collect()
    }

    fn decorations(framework: &CellFramework, row: usize, col: usize) -> Vec<Decoration> {
        framework
            .cell(row, col)
            .map(|cell| cell.decorations().to_vec())
            .unwrap_or_default()
    }

    #[test]
    fn test_symbol_table_is_complete() {
        for symbol in CONNECTOR_SYMBOLS {
            let code = connector_code(symbol).unwrap();
            assert!(BorderPattern::from_code(code).is_some(), "{symbol:?}");
        }
        assert_eq!(connector_code("x"), None);
        assert_eq!(connector_code("++"), None);
    }

    #[test]
    fn test_cross_connector() {
        let (framework, diagnostics) = compile_lines(&lines(&[&["+"]]));

        assert!(diagnostics.is_empty());
        assert_eq!(framework.rows(), 2);
        assert_eq!(framework.cols(), 2);
        assert_eq!(framework.len(), 4);

        let solid = LineStyle::Solid;
        assert_eq!(
            decorations(&framework, 0, 0),
            vec![Decoration::BorderRight(solid), Decoration::BorderBottom(solid)]
        );
        assert_eq!(
            decorations(&framework, 0, 1),
            vec![Decoration::BorderBottom(solid)]
        );
        assert_eq!(
            decorations(&framework, 1, 0),
            vec![Decoration::BorderRight(solid)]
        );
        assert!(decorations(&framework, 1, 1).is_empty());
    }

    #[test]
    fn test_boxes_advance_by_six() {
        let (framework, _) = compile_lines(&lines(&[&["X", "Y", "Z"]]));

        assert_eq!(framework.cols(), 18);
        for (col, text) in [(0, "X"), (6, "Y"), (12, "Z")] {
            let cell = framework.cell(0, col).unwrap();
            assert_eq!(cell.text(), Some(text));
            assert_eq!(cell.colspan(), 6);
            assert_eq!(cell.rowspan(), 2);
            assert_eq!(cell.decorations(), &[Decoration::Block]);
        }
        assert_eq!(framework.len(), 3);
    }

    #[test]
    fn test_connector_letters_are_not_boxes() {
        let (framework, _) = compile_lines(&lines(&[&["A", "B", "C"]]));

        assert_eq!(framework.cols(), 10);
        assert!(framework.cell(0, 0).unwrap().text().is_none());
        assert_eq!(framework.cell(0, 2).unwrap().text(), Some("B"));
        assert!(framework.cell(0, 8).unwrap().text().is_none());
    }

    #[test]
    fn test_arrow_right() {
        let (framework, _) = compile_lines(&lines(&[&["-@2"]]));

        let cell = framework.cell(1, 1).unwrap();
        assert_eq!(cell.decorations(), &[Decoration::Arrow(Edge::Right)]);
        assert!(cell.has_arrow_glyph());
        assert!(!framework.cell(0, 1).unwrap().has_arrow_glyph());
    }

    #[test]
    fn test_two_digit_suffix_is_low_nibble_first() {
        // `12` is 0x21: a top arrow plus the inward flag of the right edge
        let classified = classify("+@12");
        assert_eq!(
            classified.placement,
            Placement::Connector {
                pattern: BorderPattern::from_code("ssss").unwrap(),
                arrows: ArrowSpec::new(0x21),
            }
        );
    }

    #[test]
    fn test_inward_arrow_lands_on_same_cell() {
        let (framework, _) = compile_lines(&lines(&[&["!@11"]]));
        let cell = framework.cell(0, 1).unwrap();
        assert!(cell.has_decoration(Decoration::Arrow(Edge::Top)));
        assert!(cell.has_decoration(Decoration::ArrowInside));
    }

    #[test]
    fn test_inward_bit_flips_without_adding_arrows() {
        let outward = connector_cells(BorderPattern::EMPTY, ArrowSpec::new(0x01));
        let inward = connector_cells(BorderPattern::EMPTY, ArrowSpec::new(0x11));

        assert_eq!(outward[1].decorations(), &[Decoration::Arrow(Edge::Top)]);
        assert_eq!(
            inward[1].decorations(),
            &[Decoration::Arrow(Edge::Top), Decoration::ArrowInside]
        );
        for index in [0, 2, 3] {
            assert_eq!(outward[index], inward[index]);
            assert!(inward[index].decorations().is_empty());
        }

        let glyphs = |cells: &[Cell; 4]| {
            cells.iter().map(Cell::has_arrow_glyph).collect::<Vec<_>>()
        };
        assert_eq!(glyphs(&outward), vec![false, true, false, false]);
        assert_eq!(glyphs(&outward), glyphs(&inward));
    }

    #[test]
    fn test_malformed_suffix_warns() {
        let (framework, diagnostics) = compile_lines(&lines(&[&["-@xyz", "box@zz"]]));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code(), Some(WarningCode::W101));
        assert!(framework.cells().all(|(_, cell)| !cell.has_arrow_glyph()));
        // A box keeps its whole text, suffix included
        assert_eq!(framework.cell(0, 2).unwrap().text(), Some("box@zz"));
    }

    #[test]
    fn test_empty_lines_take_rows() {
        let (framework, _) = compile_lines(&lines(&[&[], &["+"], &[]]));
        assert_eq!(framework.rows(), 6);
        assert!(framework.cell(2, 0).is_some());
        assert_eq!(framework.row(0).count(), 0);
    }

    #[test]
    fn test_cols_is_widest_line() {
        let (framework, _) = compile_lines(&lines(&[&["+"], &["box", "+"]]));
        assert_eq!(framework.cols(), 8);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use tessera_parser::Span;

    use super::*;

    fn command_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(CONNECTOR_SYMBOLS.to_vec()).prop_map(str::to_string),
            (prop::sample::select(CONNECTOR_SYMBOLS.to_vec()), "[0-9a-fA-F]{1,2}")
                .prop_map(|(symbol, suffix)| format!("{symbol}@{suffix}")),
            "[a-z ]{1,8}",
        ]
    }

    fn lines_strategy() -> impl Strategy<Value = Vec<Line>> {
        prop::collection::vec(prop::collection::vec(command_strategy(), 0..6), 0..6).prop_map(
            |rows| {
                rows.into_iter()
                    .map(|commands| {
                        Line::new(
                            commands
                                .into_iter()
                                .map(|text| Command::new(text, Span::default()))
                                .collect(),
                        )
                    })
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn rows_are_twice_the_lines(lines in lines_strategy()) {
            let (framework, _) = compile_lines(&lines);
            prop_assert_eq!(framework.rows(), 2 * lines.len());
        }

        #[test]
        fn cells_fit_and_never_overlap(lines in lines_strategy()) {
            let (framework, _) = compile_lines(&lines);
            let mut occupied = std::collections::HashSet::new();

            for ((row, col), cell) in framework.cells() {
                prop_assert!([1, 2, 6].contains(&cell.colspan()));
                prop_assert!([1, 2].contains(&cell.rowspan()));
                prop_assert!(row + cell.rowspan() <= framework.rows());
                prop_assert!(col + cell.colspan() <= framework.cols());

                for r in row..row + cell.rowspan() {
                    for c in col..col + cell.colspan() {
                        prop_assert!(occupied.insert((r, c)), "overlap at ({}, {})", r, c);
                    }
                }
            }
        }

        #[test]
        fn compilation_is_deterministic(lines in lines_strategy()) {
            prop_assert_eq!(compile_lines(&lines), compile_lines(&lines));
        }

        #[test]
        fn dashed_twin_has_same_geometry(
            pair in prop::sample::select(SOLID_DASHED_PAIRS.to_vec()),
            bits in any::<u8>(),
        ) {
            let (solid, dashed) = pair;
            let solid = BorderPattern::from_code(connector_code(solid).unwrap()).unwrap();
            let dashed = BorderPattern::from_code(connector_code(dashed).unwrap()).unwrap();
            prop_assert_eq!(solid.restyled(LineStyle::Dashed), dashed);

            let arrows = ArrowSpec::new(bits);
            let solid_cells = connector_cells(solid, arrows);
            let dashed_cells = connector_cells(dashed, arrows);
            for (a, b) in solid_cells.iter().zip(&dashed_cells) {
                let a: Vec<_> = a.decorations().iter().map(|d| d.line_style().map(|_| ())).collect();
                let b: Vec<_> = b.decorations().iter().map(|d| d.line_style().map(|_| ())).collect();
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn single_arrow_bit_touches_one_cell(bit in 0u8..4) {
            let edge = Edge::ALL[usize::from(bit)];
            let cells = connector_cells(BorderPattern::EMPTY, ArrowSpec::new(1 << bit));

            for (index, cell) in cells.iter().enumerate() {
                if index == arrow_cell(edge) {
                    prop_assert_eq!(cell.decorations(), &[Decoration::Arrow(edge)]);
                    prop_assert!(cell.has_arrow_glyph());
                } else {
                    prop_assert!(cell.decorations().is_empty());
                    prop_assert!(!cell.has_arrow_glyph());
                }
            }
        }
    }
}
