use super::{CalculationError, CalculationRequest, ScalarFieldProvider};
use tracing::instrument;

/// Nearest-atom distance provider.
///
/// Fills each grid point with the distance (in Angstroms) to the closest
/// selected atom. Isosurfaces of this field are the inflation surfaces of the
/// selection, which makes it a convenient end-to-end check of the grid
/// geometry. The calculation subtype has no effect here and per-atom
/// properties are not required.
#[derive(Debug)]
pub struct DistanceProvider;

impl ScalarFieldProvider for DistanceProvider {
    fn field_type(&self) -> &'static str {
        "Distance"
    }

    #[instrument(skip_all, name = "distance_field")]
    fn compute(&self, request: &mut CalculationRequest<'_>) -> Result<(), CalculationError> {
        if request.selection.is_empty() {
            return Err(CalculationError::EmptySelection {
                field_type: "Distance",
            });
        }

        let atoms: Vec<_> = request
            .selection
            .iter()
            .map(|i| request.structure.position(i))
            .collect();

        let [nx, ny, nz] = request.volume.voxel_counts();
        let mut index = 0;
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let point = request.volume.grid_point(x, y, z);
                    let nearest = atoms
                        .iter()
                        .map(|a| (point - a).norm())
                        .fold(f64::INFINITY, f64::min);
                    request.volume.values_mut()[index] = nearest;
                    index += 1;
                }
            }
        }
        Ok(())
    }
}
