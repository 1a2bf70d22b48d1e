use crate::core::models::mesh::{MeshData, MeshIntegrityError};
use std::io;
use thiserror::Error;

/// Error raised while parsing an external surface file.
///
/// Parse failures are fatal for the request: no partial mesh is delivered and
/// the error carries the offending line number so the caller can diagnose the
/// input.
#[derive(Debug, Error)]
pub enum SurfaceParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(
        "Parse error on line {line}: vertex index {index} out of range (vertex count {vertex_count})"
    )]
    IndexOutOfRange {
        line: usize,
        index: i64,
        vertex_count: usize,
    },

    #[error("Unexpected end of input after line {line}")]
    Truncated { line: usize },

    #[error("Mesh integrity violation: {0}")]
    Integrity(#[from] MeshIntegrityError),
}

/// The contract every format-specific surface parser must implement.
///
/// A parser is constructed around one input source, consumed by a single
/// `parse_surface` call, and produces a complete mesh satisfying the
/// [`MeshData`] invariant or fails with a [`SurfaceParseError`].
pub trait SurfaceParser {
    /// A short name for the on-disk format, used in provenance headers.
    fn format_name(&self) -> &'static str;

    /// Parses the input into a complete triangulated mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceParseError`] on malformed input; implementations must
    /// not return a partially populated mesh.
    fn parse_surface(&mut self) -> Result<MeshData, SurfaceParseError>;
}
