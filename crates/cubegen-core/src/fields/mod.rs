//! # Fields Module
//!
//! Pluggable scalar-field providers: one implementation per supported field
//! type, resolved by name at runtime through the
//! [`crate::engine::registry::ProviderRegistry`].
//!
//! A provider is stateless across invocations; each call receives everything
//! it needs through a [`CalculationRequest`] and fills every entry of the
//! target cube in grid order without resizing the buffer.

pub mod distance;
pub mod esp;

use crate::core::models::selection::SelectionMask;
use crate::core::models::structure::StructureData;
use crate::core::models::volume::VolumeData;
use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;

/// The calculation subtype key, refining how a field type evaluates its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcSubtype {
    /// Plain Coulomb summation (q / r).
    #[default]
    Coulomb,
    /// Distance-screened summation (q / r²), damping far-field contributions.
    Screened,
}

impl FromStr for CalcSubtype {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coulomb" => Ok(CalcSubtype::Coulomb),
            "screened" => Ok(CalcSubtype::Screened),
            _ => Err(()),
        }
    }
}

/// Error signaled by a provider mid-computation.
///
/// Propagated unchanged to the request's caller; a partially filled cube is
/// discarded by the pipeline, never delivered.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("field type '{field_type}' requires per-atom properties, but none were supplied")]
    MissingProperties { field_type: &'static str },

    #[error(
        "field type '{field_type}' received {actual} property values for {expected} atoms"
    )]
    PropertyCountMismatch {
        field_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("field type '{field_type}' requires at least one selected atom")]
    EmptySelection { field_type: &'static str },

    #[error("non-finite field value at grid point {index}")]
    NonFiniteValue { index: usize },
}

/// Everything a provider needs for one fill pass.
///
/// Constructed once per generation call and discarded after the provider
/// returns. The cube is the only mutable sink; structure data, selection, and
/// properties are borrowed read-only from the request's owner.
pub struct CalculationRequest<'a> {
    /// The target cube, allocated and zero-filled by the pipeline.
    pub volume: &'a mut VolumeData,
    /// The atoms participating in the calculation.
    pub selection: &'a SelectionMask,
    /// Read-only view of the structure store.
    pub structure: &'a StructureData<'a>,
    /// Per-atom property values (e.g., partial charges), if supplied.
    pub properties: Option<&'a [f64]>,
    /// The calculation subtype requested by the caller.
    pub subtype: CalcSubtype,
}

/// The capability interface every scalar-field provider implements.
///
/// Providers are registered once at startup and shared read-only across
/// requests, hence `Send + Sync`.
pub trait ScalarFieldProvider: Send + Sync + std::fmt::Debug {
    /// The field type name this provider is registered under (e.g., `"Esp"`).
    fn field_type(&self) -> &'static str;

    /// Computes the field value at every grid point of `request.volume`,
    /// in grid order.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the computation cannot proceed or
    /// produces a non-finite value; the caller discards the cube in that case.
    fn compute(&self, request: &mut CalculationRequest<'_>) -> Result<(), CalculationError>;
}
