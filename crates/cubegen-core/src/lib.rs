//! # Cubegen Core Library
//!
//! A volumetric-data generation framework that produces discrete 3D scalar
//! fields ("voxel cubes") over molecular structures, or ingests externally
//! precomputed polygon meshes, for consumption by a downstream
//! isosurface-extraction engine.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict layered architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`StructureData`, `VolumeData`, `MeshData`), the append-only provenance
//!   header, and format parsers for pre-triangulated surfaces.
//!
//! - **[`engine`]: The Pipeline Core.** This stateful layer drives one
//!   generation request through its lifecycle: atom selection, grid-range
//!   calculation, header emission, and voxel fill. It also owns the
//!   scalar-field provider registry and the error taxonomy.
//!
//! - **[`fields`]: The Plugins.** Scalar-field providers implementing a shared
//!   capability trait, resolved by name at runtime. One concrete provider per
//!   supported field type (e.g., electrostatic potential).
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine`, `fields`, and `core` together to execute a
//!   complete generation request from structure data to deliverable output.

pub mod core;
pub mod engine;
pub mod fields;
pub mod workflows;
