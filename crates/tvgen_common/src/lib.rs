//! Shared foundational types used across the tvgen crates.
//!
//! Provides interned identifiers for module and port names, and the
//! three-valued [`Logic`] cell used in test-vector rows.

#![warn(missing_docs)]

pub mod ident;
pub mod logic;

pub use ident::{Ident, Interner};
pub use logic::Logic;
