//! Test-vector generation and serialization.
//!
//! A [`ColumnLayout`] is built from extracted ports, then [`write_vectors`]
//! renders the header, the baseline vector, N random vectors and the trailer,
//! and writes the whole file at once. Randomness comes from a caller-owned
//! [`rand::Rng`] so that seeded runs are reproducible.

#![warn(missing_docs)]

pub mod layout;
pub mod vector;
pub mod writer;

pub use layout::ColumnLayout;
pub use vector::{baseline, generate, random_vector, OutputPolicy, Vector};
pub use writer::{render, write_vectors, WriteError};
