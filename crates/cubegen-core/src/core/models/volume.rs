use nalgebra::{Point3, Vector3};

/// The discrete 3D scalar-field grid over a spatial region.
///
/// Values are stored as a flat array in x-major grid order
/// (`index = (x * ny + y) * nz + z`), zero-initialized at allocation.
/// A cube is created once per generation request, exclusively owned by the
/// pipeline until the fill phase completes, and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeData {
    origin: Point3<f64>,
    voxel_counts: [usize; 3],
    step_vectors: [Vector3<f64>; 3],
    values: Vec<f64>,
}

impl VolumeData {
    /// Allocates a zero-filled cube with the given geometry.
    pub fn allocate(
        origin: Point3<f64>,
        voxel_counts: [usize; 3],
        step_vectors: [Vector3<f64>; 3],
    ) -> Self {
        let total = voxel_counts[0] * voxel_counts[1] * voxel_counts[2];
        Self {
            origin,
            voxel_counts,
            step_vectors,
            values: vec![0.0; total],
        }
    }

    /// The grid origin (the corner at grid index `(0, 0, 0)`).
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// The number of grid points along each axis.
    pub fn voxel_counts(&self) -> [usize; 3] {
        self.voxel_counts
    }

    /// The step vector along each axis.
    pub fn step_vectors(&self) -> [Vector3<f64>; 3] {
        self.step_vectors
    }

    /// The total number of grid points.
    pub fn total_points(&self) -> usize {
        self.values.len()
    }

    /// The flat index of grid point `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.voxel_counts[1] + y) * self.voxel_counts[2] + z
    }

    /// The Cartesian position of grid point `(x, y, z)`.
    #[inline]
    pub fn grid_point(&self, x: usize, y: usize, z: usize) -> Point3<f64> {
        self.origin
            + self.step_vectors[0] * x as f64
            + self.step_vectors[1] * y as f64
            + self.step_vectors[2] * z as f64
    }

    /// The scalar values in grid order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the scalar values for the fill phase.
    ///
    /// A slice is handed out deliberately: providers may rewrite every entry
    /// but cannot resize or reallocate the buffer.
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}
