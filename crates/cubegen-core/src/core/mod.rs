//! # Core Module
//!
//! This module provides the fundamental building blocks for volumetric-data
//! generation in Cubegen, serving as the stateless foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the essential data structures exchanged between
//! the pipeline layers: the borrowed atom view supplied by the external
//! structure store, the voxel cube handed to the downstream isosurface engine,
//! and the triangulated mesh produced by the grid-free ingestion path.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Data Models** ([`models`]) - Structure views, selection masks, voxel
//!   cubes, meshes, and the provenance header
//! - **Surface I/O** ([`io`]) - Parsers for file formats that already encode a
//!   triangulated surface
//! - **Utilities** ([`utils`]) - Bounding regions and element lookup tables

pub mod io;
pub mod models;
pub mod utils;
