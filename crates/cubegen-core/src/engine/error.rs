use crate::core::io::traits::SurfaceParseError;
use crate::engine::volumetric::ReaderState;
use crate::fields::CalculationError;
use thiserror::Error;

/// The error taxonomy for one generation request.
///
/// No error is swallowed or converted to a default value; every failure
/// surfaces to the request's caller with enough context to diagnose it, and
/// no recovery is attempted at this layer.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The pipeline was invoked out of order. This is a programming error in
    /// the caller, reported immediately.
    #[error("pipeline invoked out of order: {operation} requires state {expected:?}, but the reader is in {actual:?}")]
    OutOfOrder {
        operation: &'static str,
        expected: ReaderState,
        actual: ReaderState,
    },

    /// The selection yielded zero usable atoms for a field type that requires
    /// at least one.
    #[error("selection contains no usable atoms for field type '{field_type}'")]
    EmptySelection { field_type: String },

    /// The input selection referenced an atom outside the structure.
    #[error("selection references atom index {index}, but the structure has {atom_count} atoms")]
    InvalidSelection { index: usize, atom_count: usize },

    /// The grid-range parameters violate their invariants.
    #[error("invalid grid parameters: {0}")]
    InvalidGridParams(String),

    /// No scalar-field provider is registered under the requested key.
    #[error("no scalar-field provider registered under key '{key}'")]
    ProviderNotFound { key: String },

    /// The provider signaled an internal failure; propagated unchanged.
    #[error("field calculation for '{field_type}' failed: {source}")]
    Calculation {
        field_type: String,
        #[source]
        source: CalculationError,
    },

    /// A surface file could not be parsed; fatal for the request.
    #[error(transparent)]
    Parse(#[from] SurfaceParseError),

    /// A pipeline invariant was broken internally.
    #[error("internal logic error: {0}")]
    Internal(String),
}
