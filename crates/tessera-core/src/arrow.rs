//! Arrow overlay specification for connector cells.
//!
//! An [`ArrowSpec`] is an 8-bit value. Bits 0-3 request an arrow on the top,
//! right, bottom and left edges. Bits 4-7 flip the arrowhead on the same
//! edges so that it points inward instead of outward.
//!
//! In diagram text the value is written as a 1-2 digit hexadecimal suffix
//! after `@`. A two-digit suffix is read low nibble first, so `@31` means
//! `0x13`: an arrow on the top and right edges, with an inward head on top.

use crate::border::Edge;

/// Presence and orientation of arrows on the four edges of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArrowSpec(u8);

impl ArrowSpec {
    /// No arrows at all.
    pub const NONE: ArrowSpec = ArrowSpec(0);

    pub fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Parses an `@` suffix.
    ///
    /// Accepts 1 or 2 ASCII hex digits in either case; two digits are swapped
    /// before parsing. Returns `None` for anything else.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let digits: Vec<u8> = suffix
            .chars()
            .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
            .collect::<Option<_>>()?;

        match digits.as_slice() {
            [single] => Some(Self(*single)),
            [low, high] => Some(Self((high << 4) | low)),
            _ => None,
        }
    }

    /// Returns `true` if an arrow is drawn on `edge`.
    pub fn has_arrow(self, edge: Edge) -> bool {
        self.0 & (1 << edge.index()) != 0
    }

    /// Returns `true` if the arrowhead on `edge` points inward.
    ///
    /// The flag is independent of [`has_arrow`](Self::has_arrow); an inward
    /// flag without an arrow still decorates the cell.
    pub fn points_inward(self, edge: Edge) -> bool {
        self.0 & (1 << (edge.index() + 4)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
