//! Cell values of a test-vector row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single test-vector cell.
///
/// Stimulus rows only ever carry driven values or the unknown marker:
/// - `Zero`: logic low
/// - `One`: logic high
/// - `X`: unknown / don't-care (used for expected outputs)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Logic low (0).
    Zero = 0,
    /// Logic high (1).
    One = 1,
    /// Unknown or don't-care.
    X = 2,
}

impl Logic {
    /// Returns the character written to a vector file for this value.
    pub fn to_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'X',
        }
    }

    /// Returns `true` for `Zero` and `One`.
    pub fn is_driven(self) -> bool {
        self != Logic::X
    }
}

impl From<bool> for Logic {
    fn from(b: bool) -> Self {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bool() {
        assert_eq!(Logic::from(true), Logic::One);
        assert_eq!(Logic::from(false), Logic::Zero);
    }

    #[test]
    fn display_matches_file_alphabet() {
        let row: String = [Logic::Zero, Logic::One, Logic::X]
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(row, "01X");
    }

    #[test]
    fn driven_values() {
        assert!(Logic::Zero.is_driven());
        assert!(Logic::One.is_driven());
        assert!(!Logic::X.is_driven());
    }
}
