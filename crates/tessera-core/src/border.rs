//! Border line styles and connector border patterns.
//!
//! A connector symbol describes which of the four edges meeting at its center
//! carry a line, and whether that line is solid or dashed. The pattern is
//! written as four characters in `top right bottom left` order, each one of
//! `s` (solid), `d` (dashed) or `n` (no line).

use std::fmt;

/// Visual style of a single border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl LineStyle {
    /// Parses a pattern character. `n` and anything unknown yield `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            's' => Some(Self::Solid),
            'd' => Some(Self::Dashed),
            _ => None,
        }
    }

    /// Returns the pattern character for this style.
    pub fn code(self) -> char {
        match self {
            Self::Solid => 's',
            Self::Dashed => 'd',
        }
    }

    /// Returns the lowercase style name used in class names and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four edges around a connector's center point.
///
/// The discriminant order (top, right, bottom, left) matches both the border
/// pattern character order and the arrow bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// All edges in pattern order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Position of this edge in the pattern and in the arrow bit layout.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line styles of the four edges meeting at a connector's center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BorderPattern {
    edges: [Option<LineStyle>; 4],
}

impl BorderPattern {
    /// A pattern without any lines.
    pub const EMPTY: BorderPattern = BorderPattern { edges: [None; 4] };

    /// Creates a pattern from explicit edge styles.
    pub fn new(
        top: Option<LineStyle>,
        right: Option<LineStyle>,
        bottom: Option<LineStyle>,
        left: Option<LineStyle>,
    ) -> Self {
        Self {
            edges: [top, right, bottom, left],
        }
    }

    /// Parses a four-character `top right bottom left` code such as `"nssn"`.
    ///
    /// Returns `None` unless the code has exactly four characters drawn from
    /// `s`, `d` and `n`.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut edges = [None; 4];
        let mut chars = code.chars();
        for slot in &mut edges {
            *slot = match chars.next()? {
                'n' => None,
                c => Some(LineStyle::from_code(c)?),
            };
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self { edges })
    }

    /// Returns the line style of `edge`, or `None` if it carries no line.
    pub fn edge(&self, edge: Edge) -> Option<LineStyle> {
        self.edges[edge.index()]
    }

    /// Returns the same geometry with every line drawn in `style`.
    pub fn restyled(&self, style: LineStyle) -> Self {
        Self {
            edges: self.edges.map(|edge| edge.map(|_| style)),
        }
    }

    /// Returns `true` if at least one edge carries a line.
    pub fn has_lines(&self) -> bool {
        self.edges.iter().any(Option::is_some)
    }
}

impl fmt::Display for BorderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in self.edges {
            write!(f, "{}", edge.map_or('n', LineStyle::code))?;
        }
        Ok(())
    }
}
