//! # Engine Module
//!
//! This module implements the generation pipeline for Cubegen: the stateful
//! layer that drives one request from atom selection to a deliverable voxel
//! cube or mesh.
//!
//! ## Overview
//!
//! A request runs single-threaded and synchronously through a fixed sequence
//! of stages. The volumetric path selects atoms, derives discrete grid ranges
//! from a resolution/margin policy, writes the provenance header, and invokes
//! a scalar-field provider to fill the cube. The mesh path skips the grid
//! entirely and delegates to a format-specific surface parser.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Grid-range parameters and the request
//!   configuration builder, with TOML loading
//! - **Atom Selection** ([`selection`]) - Selection masking, hydrogen
//!   exclusion, and bounding-region computation
//! - **Grid Ranges** ([`ranges`]) - Deterministic mapping from a bounding
//!   region and resolution policy to voxel counts and step vectors
//! - **Volumetric Reader** ([`volumetric`]) - The request state machine
//! - **Mesh Reader** ([`mesh`]) - The grid-free ingestion path
//! - **Provider Registry** ([`registry`]) - Runtime lookup of scalar-field
//!   providers by composite string key
//! - **Error Handling** ([`error`]) - The request error taxonomy

pub mod config;
pub mod error;
pub mod mesh;
pub mod ranges;
pub mod registry;
pub mod selection;
pub mod volumetric;
