//! Serialization of vectors to the `.tv` text format.

use crate::layout::ColumnLayout;
use crate::vector::{format_vector, generate, OutputPolicy};
use rand::Rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// First header line.
pub const PORTS_HEADER: &str = "# Ports:";
/// Second header line, including its trailing space.
pub const SECTIONS_HEADER: &str = "#\t\tINPUT\t|\tOUTPUT ";
/// Last line of every vector file, including its trailing space.
pub const TRAILER: &str = "#End of testvector file! ";

/// Vector file write failures.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The output file could not be created or written.
    #[error("cannot write vector file '{}': {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Renders a complete vector file: header, baseline, `count` random vectors
/// and the trailer.
pub fn render(
    layout: &ColumnLayout,
    count: u32,
    policy: OutputPolicy,
    rng: &mut impl Rng,
) -> String {
    let mut out = String::new();
    out.push_str(PORTS_HEADER);
    out.push('\n');
    out.push_str(SECTIONS_HEADER);
    out.push('\n');
    out.push_str(&layout.header_line());
    out.push_str("\n\n");
    for row in generate(layout, count, policy, rng) {
        out.push_str(&format_vector(&row));
        out.push('\n');
    }
    out.push_str(TRAILER);
    out.push('\n');
    out
}

/// Renders the vector file and writes it to `path` in one operation,
/// replacing any existing file.
pub fn write_vectors(
    path: &Path,
    layout: &ColumnLayout,
    count: u32,
    policy: OutputPolicy,
    rng: &mut impl Rng,
) -> Result<(), WriteError> {
    let contents = render(layout, count, policy, rng);
    fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
