use crate::fields::CalcSubtype;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// The resolution/margin policy mapping physical coordinates to a discrete grid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridRangeParams {
    /// Grid density in points per Angstrom. Must be positive and finite.
    pub resolution: f64,
    /// Maximum spatial extent per axis in Angstroms; `0.0` means unbounded.
    /// When a denser grid would exceed it, the effective resolution for that
    /// axis is reduced instead, preserving origin alignment.
    #[serde(default)]
    pub max_extent: f64,
    /// Margin added around the selected atoms on every axis, in Angstroms.
    /// Must be non-negative.
    #[serde(default)]
    pub margin: f64,
}

impl GridRangeParams {
    /// Checks the parameter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if `resolution` is not a
    /// positive finite number, or if `margin` or `max_extent` is negative or
    /// non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "resolution must be a positive finite number of points per Angstrom ({})",
                self.resolution
            )));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "margin must be non-negative ({})",
                self.margin
            )));
        }
        if !(self.max_extent.is_finite() && self.max_extent >= 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "max_extent must be non-negative ({})",
                self.max_extent
            )));
        }
        Ok(())
    }
}

/// The full configuration of one volumetric generation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerationConfig {
    /// The field type name resolved against the provider registry.
    pub field_type: String,
    /// The calculation subtype key.
    #[serde(default)]
    pub subtype: CalcSubtype,
    /// The grid policy.
    pub grid: GridRangeParams,
    /// Whether hydrogens are dropped from the selection before grid setup.
    #[serde(default)]
    pub exclude_hydrogens: bool,
    /// Free-form comment recorded in the provenance header.
    #[serde(default)]
    pub comment: Option<String>,
}

impl GenerationConfig {
    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse as
    /// TOML, or violates the parameter invariants.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.grid.validate()?;
        Ok(config)
    }
}

/// Builder for [`GenerationConfig`].
///
/// `field_type` and `resolution` are required; every other parameter has a
/// conservative default (no margin, unbounded extent, hydrogens kept).
#[derive(Default)]
pub struct GenerationConfigBuilder {
    field_type: Option<String>,
    subtype: Option<CalcSubtype>,
    resolution: Option<f64>,
    max_extent: Option<f64>,
    margin: Option<f64>,
    exclude_hydrogens: Option<bool>,
    comment: Option<String>,
}

impl GenerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_type(mut self, name: impl Into<String>) -> Self {
        self.field_type = Some(name.into());
        self
    }
    pub fn subtype(mut self, subtype: CalcSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }
    pub fn resolution(mut self, points_per_angstrom: f64) -> Self {
        self.resolution = Some(points_per_angstrom);
        self
    }
    pub fn max_extent(mut self, angstroms: f64) -> Self {
        self.max_extent = Some(angstroms);
        self
    }
    pub fn margin(mut self, angstroms: f64) -> Self {
        self.margin = Some(angstroms);
        self
    }
    pub fn exclude_hydrogens(mut self, exclude: bool) -> Self {
        self.exclude_hydrogens = Some(exclude);
        self
    }
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Finalizes the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] if a required parameter was
    /// never set, or [`ConfigError::InvalidParameter`] if the grid invariants
    /// are violated.
    pub fn build(self) -> Result<GenerationConfig, ConfigError> {
        let grid = GridRangeParams {
            resolution: self
                .resolution
                .ok_or(ConfigError::MissingParameter("resolution"))?,
            max_extent: self.max_extent.unwrap_or(0.0),
            margin: self.margin.unwrap_or(0.0),
        };
        grid.validate()?;
        Ok(GenerationConfig {
            field_type: self
                .field_type
                .ok_or(ConfigError::MissingParameter("field_type"))?,
            subtype: self.subtype.unwrap_or_default(),
            grid,
            exclude_hydrogens: self.exclude_hydrogens.unwrap_or(false),
            comment: self.comment,
        })
    }
}
