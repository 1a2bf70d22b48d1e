use crate::core::models::volume::VolumeData;
use crate::core::utils::bounds::BoundingRegion;
use crate::engine::config::GridRangeParams;
use crate::engine::error::GenerationError;
use nalgebra::{Point3, Vector3};
use tracing::info;

// An axis narrower than this is treated as degenerate (e.g., a single atom
// with no margin) and widened to a default span so the grid stays usable.
const MIN_AXIS_EXTENT: f64 = 1.0e-4;
const DEGENERATE_HALF_SPAN: f64 = 10.0;

/// The discrete shape of a voxel cube: origin, per-axis point counts, and
/// axis-aligned step vectors.
///
/// Computed deterministically from a bounding region and a
/// [`GridRangeParams`] policy; identical inputs always yield identical shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridShape {
    origin: Point3<f64>,
    counts: [usize; 3],
    steps: [Vector3<f64>; 3],
}

impl GridShape {
    /// Maps a bounding region to discrete voxel counts per axis.
    ///
    /// Per axis, the point count is `floor(extent * resolution) + 1` (the
    /// fencepost rule: grid points, not cells). Degenerate axes are widened
    /// symmetrically before discretization. When `max_extent` is positive and
    /// the count would exceed the points that extent allows, the count is
    /// clamped and the effective resolution for that axis reduced instead,
    /// keeping the origin and full coverage intact.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidGridParams`] if the policy violates
    /// its invariants (see [`GridRangeParams::validate`]).
    pub fn compute(
        region: &BoundingRegion,
        params: &GridRangeParams,
    ) -> Result<Self, GenerationError> {
        params
            .validate()
            .map_err(|e| GenerationError::InvalidGridParams(e.to_string()))?;

        let mut origin = Point3::origin();
        let mut counts = [0usize; 3];
        let mut steps = [Vector3::zeros(); 3];
        for axis in 0..3 {
            let (min, count, step) = axis_range(
                region.min()[axis],
                region.max()[axis],
                params.resolution,
                params.max_extent,
            );
            origin[axis] = min;
            counts[axis] = count;
            steps[axis][axis] = step;
        }

        info!(
            nx = counts[0],
            ny = counts[1],
            nz = counts[2],
            total = counts[0] * counts[1] * counts[2],
            "grid ranges computed"
        );
        Ok(Self {
            origin,
            counts,
            steps,
        })
    }

    /// The grid origin.
    pub fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// The per-axis grid point counts.
    pub fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// The per-axis step vectors.
    pub fn steps(&self) -> [Vector3<f64>; 3] {
        self.steps
    }

    /// The total number of grid points.
    pub fn total_points(&self) -> usize {
        self.counts.iter().product()
    }

    /// Allocates a zero-filled cube with this shape.
    pub fn allocate(&self) -> VolumeData {
        VolumeData::allocate(self.origin, self.counts, self.steps)
    }
}

fn axis_range(min: f64, max: f64, resolution: f64, max_extent: f64) -> (f64, usize, f64) {
    let (min, max) = if max - min < MIN_AXIS_EXTENT {
        let mid = (min + max) / 2.0;
        (mid - DEGENERATE_HALF_SPAN, mid + DEGENERATE_HALF_SPAN)
    } else {
        (min, max)
    };
    let extent = max - min;

    let mut count = (extent * resolution).floor() as usize + 1;
    if max_extent > 0.0 {
        let limit = ((max_extent * resolution).floor() as usize + 1).max(2);
        if count > limit {
            info!(
                count,
                limit, "grid axis exceeds the maximum extent; reducing effective resolution"
            );
            count = limit;
        }
    }
    if count < 2 {
        count = 2;
    }

    let step = extent / (count - 1) as f64;
    (min, count, step)
}
