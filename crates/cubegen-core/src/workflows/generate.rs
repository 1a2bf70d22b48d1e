use crate::core::io::traits::SurfaceParser;
use crate::core::models::header::HeaderRecord;
use crate::core::models::mesh::MeshData;
use crate::core::models::selection::SelectionMask;
use crate::core::models::structure::StructureData;
use crate::core::models::volume::VolumeData;
use crate::engine::config::GenerationConfig;
use crate::engine::error::GenerationError;
use crate::engine::mesh::PolygonMeshReader;
use crate::engine::registry::ProviderRegistry;
use crate::engine::volumetric::VolumetricReader;
use tracing::{info, instrument};

/// A completed voxel cube and its provenance header.
#[derive(Debug, Clone)]
pub struct VolumeResult {
    pub volume: VolumeData,
    pub header: HeaderRecord,
}

/// A completed mesh and its provenance header.
#[derive(Debug, Clone)]
pub struct MeshResult {
    pub mesh: MeshData,
    pub header: HeaderRecord,
}

/// Runs the volumetric pipeline end to end for one generation request.
///
/// # Errors
///
/// Returns the first [`GenerationError`] encountered; a failed request
/// delivers nothing.
#[instrument(skip_all, name = "volume_generation_workflow")]
pub fn generate_volume(
    structure: &StructureData<'_>,
    mask: &SelectionMask,
    config: &GenerationConfig,
    registry: &ProviderRegistry,
) -> Result<VolumeResult, GenerationError> {
    info!(
        field_type = %config.field_type,
        resolution = config.grid.resolution,
        margin = config.grid.margin,
        "starting volumetric generation"
    );

    let mut reader = VolumetricReader::new(structure, mask, config, registry);
    reader.setup(false)?;
    let shape = reader.compute_ranges()?;
    let [nx, ny, nz] = shape.counts();
    info!(nx, ny, nz, "grid ranges ready");
    reader.write_header()?;
    reader.generate_cube()?;
    let (volume, header) = reader.deliver()?;

    info!(
        total_points = volume.total_points(),
        "volumetric generation complete"
    );
    Ok(VolumeResult { volume, header })
}

/// Runs the grid-free mesh ingestion path for one request.
///
/// # Errors
///
/// Returns [`GenerationError::Parse`] on malformed input; no partial mesh is
/// delivered.
#[instrument(skip_all, name = "mesh_ingestion_workflow")]
pub fn ingest_mesh<P: SurfaceParser>(parser: P) -> Result<MeshResult, GenerationError> {
    let mut reader = PolygonMeshReader::new(parser);
    reader.read_surface()?;
    let (mesh, header) = reader.deliver()?;

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "mesh ingestion complete"
    );
    Ok(MeshResult { mesh, header })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pmesh::PmeshParser;
    use crate::engine::config::GenerationConfigBuilder;
    use nalgebra::Point3;
    use std::io::Cursor;

    #[test]
    fn generate_volume_runs_the_whole_pipeline() {
        let positions = vec![Point3::origin(), Point3::new(1.2, 0.0, 0.0)];
        let elements = vec!["C".to_string(), "O".to_string()];
        let charges = vec![0.4, -0.4];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let mask = SelectionMask::all(2);
        let config = GenerationConfigBuilder::new()
            .field_type("Esp")
            .resolution(2.0)
            .margin(3.0)
            .comment("carbon monoxide test cube")
            .build()
            .unwrap();
        let registry = ProviderRegistry::with_defaults();

        let result = generate_volume(&structure, &mask, &config, &registry).unwrap();
        assert!(result.volume.total_points() > 0);
        assert!(result.header.created_at().is_some());
        assert!(result.header.lines().iter().any(|l| l == "Esp"));
        // The header timestamp precedes delivery.
        assert!(result.header.created_at().unwrap() <= chrono::Utc::now());
    }

    #[test]
    fn generate_volume_bogus_field_type_delivers_nothing() {
        let positions = vec![Point3::origin()];
        let elements = vec!["C".to_string()];
        let charges = vec![1.0];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let mask = SelectionMask::all(1);
        let config = GenerationConfigBuilder::new()
            .field_type("Bogus")
            .resolution(1.0)
            .margin(1.0)
            .build()
            .unwrap();
        let registry = ProviderRegistry::with_defaults();

        let err = generate_volume(&structure, &mask, &config, &registry).unwrap_err();
        assert!(matches!(err, GenerationError::ProviderNotFound { .. }));
    }

    #[test]
    fn ingest_mesh_returns_a_validated_mesh() {
        let parser = PmeshParser::new(Cursor::new(
            "4\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n1\n5\n0\n1\n2\n3\n0\n",
        ));
        let result = ingest_mesh(parser).unwrap();
        assert_eq!(result.mesh.vertex_count(), 4);
        assert_eq!(result.mesh.triangle_count(), 2);
        assert!(result.mesh.validate().is_ok());
        assert!(result.header.created_at().is_some());
    }

    #[test]
    fn ingest_mesh_propagates_parse_failures() {
        let parser = PmeshParser::new(Cursor::new("3\n0 0 0\n1 0 0\n0 1 0\n1\n3\n0\n1\n5\n"));
        let err = ingest_mesh(parser).unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }
}
