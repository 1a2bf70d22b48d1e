//! Parsers for file formats that already encode a triangulated surface.
//!
//! These formats bypass the voxel pipeline entirely: a parser produces a
//! complete [`crate::core::models::mesh::MeshData`] and the mesh-path reader
//! hands it straight to the consumer.

pub mod pmesh;
pub mod traits;
