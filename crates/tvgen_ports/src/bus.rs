//! Bus range annotations.

use serde::Serialize;
use std::fmt;

/// Widest bus expanded into per-bit columns.
pub const MAX_BUS_WIDTH: u64 = 1 << 16;

/// An inclusive bit-index interval with `high >= low`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct BusRange {
    /// Most significant bit index.
    pub high: i32,
    /// Least significant bit index.
    pub low: i32,
}

impl BusRange {
    /// Sentinel returned for annotations that do not resolve.
    pub const INVALID: BusRange = BusRange { high: -1, low: -1 };

    /// Creates a range from two bounds in either order.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            high: a.max(b),
            low: a.min(b),
        }
    }

    /// Resolves an annotation such as `"[7:0]"` or `"[0:7]"`.
    ///
    /// The enclosing brackets are stripped and the rest split on `:`. Anything
    /// other than exactly two integer tokens yields [`BusRange::INVALID`].
    pub fn parse(annotation: &str) -> BusRange {
        let text = annotation.trim();
        let text = text.strip_prefix('[').unwrap_or(text);
        let text = text.strip_suffix(']').unwrap_or(text);

        let tokens: Vec<&str> = text.split(':').collect();
        let [left, right] = tokens.as_slice() else {
            return BusRange::INVALID;
        };
        match (left.trim().parse::<i32>(), right.trim().parse::<i32>()) {
            (Ok(a), Ok(b)) => BusRange::new(a, b),
            _ => BusRange::INVALID,
        }
    }

    /// Returns `false` for [`BusRange::INVALID`].
    pub fn is_valid(&self) -> bool {
        *self != BusRange::INVALID
    }

    /// Number of bits covered.
    pub fn width(&self) -> u64 {
        (i64::from(self.high) - i64::from(self.low) + 1) as u64
    }

    /// Bit indices from `high` down to `low`.
    pub fn bits(&self) -> impl Iterator<Item = i32> {
        (self.low..=self.high).rev()
    }
}

impl fmt::Display for BusRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.high, self.low)
    }
}

/// Returns the first `[...]` in `text`, brackets included.
///
/// This is a text match, not a width computation: the first bracket pair
/// of a declaration is taken as its packed range.
pub fn find_bus_annotation(text: &str) -> Option<&str> {
    let open = text.find('[')?;
    let close = open + text[open..].find(']')?;
    Some(&text[open..=close])
}
