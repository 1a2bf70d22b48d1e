use nalgebra::Point3;
use thiserror::Error;

/// Error raised when a mesh violates its structural invariant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "triangle {triangle} references vertex index {index}, but the mesh has {vertex_count} vertices"
)]
pub struct MeshIntegrityError {
    /// The index of the offending triangle.
    pub triangle: usize,
    /// The out-of-range vertex index.
    pub index: usize,
    /// The number of vertices in the mesh.
    pub vertex_count: usize,
}

/// A pre-triangulated surface produced by a format-specific parser.
///
/// Invariant: every triangle index is less than the vertex count. Parsers
/// enforce this at read time; [`MeshData::validate`] re-checks it before the
/// mesh is delivered to the consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in Angstroms.
    pub vertices: Vec<Point3<f64>>,
    /// Triangles as triples of vertex indices.
    pub triangles: Vec<[usize; 3]>,
}

impl MeshData {
    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Checks that every triangle references a valid vertex.
    ///
    /// # Errors
    ///
    /// Returns [`MeshIntegrityError`] for the first out-of-range index found.
    pub fn validate(&self) -> Result<(), MeshIntegrityError> {
        let vertex_count = self.vertices.len();
        for (triangle, indices) in self.triangles.iter().enumerate() {
            for &index in indices {
                if index >= vertex_count {
                    return Err(MeshIntegrityError {
                        triangle,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn validate_accepts_a_well_formed_mesh() {
        let mesh = MeshData {
            vertices: unit_triangle(),
            triangles: vec![[0, 1, 2]],
        };
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn validate_rejects_an_out_of_range_index() {
        let mesh = MeshData {
            vertices: unit_triangle(),
            triangles: vec![[0, 1, 2], [1, 2, 3]],
        };
        let err = mesh.validate().unwrap_err();
        assert_eq!(err.triangle, 1);
        assert_eq!(err.index, 3);
        assert_eq!(err.vertex_count, 3);
    }

    #[test]
    fn empty_mesh_is_valid() {
        assert!(MeshData::default().validate().is_ok());
    }
}
