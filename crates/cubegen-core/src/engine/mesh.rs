use crate::core::io::traits::{SurfaceParseError, SurfaceParser};
use crate::core::models::header::HeaderRecord;
use crate::core::models::mesh::MeshData;
use crate::engine::error::GenerationError;
use tracing::{info, instrument};

/// The shared pipeline interface every reader family implements.
///
/// The volume-related steps carry default success implementations so a reader
/// family can opt out of the stages it does not need explicitly, instead of
/// inheriting silently empty bodies.
pub trait SurfaceSource {
    /// Prepares volume parameters (grid geometry). Defaults to a no-op.
    fn read_volume_parameters(&mut self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Produces volume data (the scalar field). Defaults to a no-op.
    fn read_volume_data(&mut self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Produces surface data. Defaults to a no-op for families whose surface
    /// is extracted downstream from the filled cube.
    fn read_surface_data(&mut self) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Whether the source delivers only vertex/triangle data, with no
    /// per-voxel scalar field for the consumer to contour.
    fn vertex_data_only(&self) -> bool {
        false
    }
}

/// The grid-free ingestion path for formats that already encode a
/// triangulated surface.
///
/// No `VolumeData` is ever allocated on this path; the reader writes a
/// timestamped provenance entry, delegates parsing to the format-specific
/// parser, and re-checks the mesh invariant before delivery. The volume
/// pipeline steps are deliberate no-ops (see [`SurfaceSource`]).
pub struct PolygonMeshReader<P: SurfaceParser> {
    parser: P,
    header: HeaderRecord,
    mesh: Option<MeshData>,
}

impl<P: SurfaceParser> PolygonMeshReader<P> {
    /// Creates a reader around one format-specific parser.
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            header: HeaderRecord::new(),
            mesh: None,
        }
    }

    /// The provenance header accumulated so far.
    pub fn header(&self) -> &HeaderRecord {
        &self.header
    }

    /// Parses the surface file into a mesh.
    ///
    /// The header entry is written unconditionally before parsing begins, so
    /// even a failed read leaves a provenance trace.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Parse`] on malformed input; no mesh is
    /// retained in that case.
    #[instrument(skip_all, name = "read_surface")]
    pub fn read_surface(&mut self) -> Result<(), GenerationError> {
        self.header.stamp(
            self.parser.format_name(),
            "vertex and triangle data only",
        );
        let mesh = self.parser.parse_surface()?;
        mesh.validate().map_err(SurfaceParseError::from)?;
        info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "surface data read"
        );
        self.mesh = Some(mesh);
        Ok(())
    }

    /// Hands the completed mesh and header to the consumer.
    ///
    /// # Errors
    ///
    /// Returns an error if `read_surface` has not completed successfully.
    pub fn deliver(self) -> Result<(MeshData, HeaderRecord), GenerationError> {
        let Some(mesh) = self.mesh else {
            return Err(GenerationError::Internal(
                "mesh delivery requested before read_surface completed".to_string(),
            ));
        };
        Ok((mesh, self.header))
    }
}

impl<P: SurfaceParser> SurfaceSource for PolygonMeshReader<P> {
    // read_volume_parameters / read_volume_data keep the default no-op
    // success: this family produces no scalar field by policy.

    fn read_surface_data(&mut self) -> Result<(), GenerationError> {
        self.read_surface()
    }

    fn vertex_data_only(&self) -> bool {
        true
    }
}
