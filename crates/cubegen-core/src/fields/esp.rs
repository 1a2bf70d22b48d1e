use super::{CalcSubtype, CalculationError, CalculationRequest, ScalarFieldProvider};
use tracing::instrument;

const COULOMB_CONSTANT: f64 = 332.0637; // In kcal·Å/(mol·e²)

// Grid points can land arbitrarily close to a nucleus; the potential is
// clamped below this separation instead of diverging.
const MIN_DISTANCE: f64 = 1.0e-3;

/// Electrostatic potential provider.
///
/// Sums the contribution of every selected atom's partial charge at each grid
/// point. The per-atom property array supplies the charges in elementary
/// charge units; the result is in kcal/(mol·e).
#[derive(Debug)]
pub struct EspProvider;

impl EspProvider {
    #[inline]
    fn contribution(subtype: CalcSubtype, charge: f64, dist: f64) -> f64 {
        let d = dist.max(MIN_DISTANCE);
        match subtype {
            CalcSubtype::Coulomb => COULOMB_CONSTANT * charge / d,
            CalcSubtype::Screened => COULOMB_CONSTANT * charge / (d * d),
        }
    }
}

impl ScalarFieldProvider for EspProvider {
    fn field_type(&self) -> &'static str {
        "Esp"
    }

    #[instrument(skip_all, name = "esp_field")]
    fn compute(&self, request: &mut CalculationRequest<'_>) -> Result<(), CalculationError> {
        let charges = request
            .properties
            .ok_or(CalculationError::MissingProperties { field_type: "Esp" })?;
        let atom_count = request.structure.atom_count();
        if charges.len() < atom_count {
            return Err(CalculationError::PropertyCountMismatch {
                field_type: "Esp",
                expected: atom_count,
                actual: charges.len(),
            });
        }
        if request.selection.is_empty() {
            return Err(CalculationError::EmptySelection { field_type: "Esp" });
        }

        let subtype = request.subtype;
        let atoms: Vec<_> = request
            .selection
            .iter()
            .map(|i| (request.structure.position(i), charges[i]))
            .collect();

        let [nx, ny, nz] = request.volume.voxel_counts();
        let mut index = 0;
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    let point = request.volume.grid_point(x, y, z);
                    let mut value = 0.0;
                    for &(position, charge) in &atoms {
                        value += Self::contribution(subtype, charge, (point - position).norm());
                    }
                    if !value.is_finite() {
                        return Err(CalculationError::NonFiniteValue { index });
                    }
                    request.volume.values_mut()[index] = value;
                    index += 1;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::selection::SelectionMask;
    use crate::core::models::structure::StructureData;
    use crate::core::models::volume::VolumeData;
    use nalgebra::{Point3, Vector3};

    const TOLERANCE: f64 = 1e-9;

    fn unit_cube() -> VolumeData {
        VolumeData::allocate(
            Point3::new(-1.0, -1.0, -1.0),
            [3, 3, 3],
            [
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
                Vector3::new(0.0, 0.0, 1.0),
            ],
        )
    }

    #[test]
    fn coulomb_potential_of_a_unit_charge() {
        let positions = vec![Point3::origin()];
        let elements = vec!["C".to_string()];
        let charges = vec![1.0];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let selection = SelectionMask::all(1);
        let mut volume = unit_cube();

        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &selection,
            structure: &structure,
            properties: Some(&charges),
            subtype: CalcSubtype::Coulomb,
        };
        EspProvider.compute(&mut request).unwrap();

        // Grid point (2, 1, 1) sits 1 Å from the charge.
        let index = volume.index(2, 1, 1);
        assert!((volume.values()[index] - COULOMB_CONSTANT).abs() < TOLERANCE);
        // The corner sits sqrt(3) Å away.
        let corner = volume.values()[volume.index(0, 0, 0)];
        assert!((corner - COULOMB_CONSTANT / 3.0_f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn potential_is_clamped_at_the_nucleus() {
        let positions = vec![Point3::origin()];
        let elements = vec!["C".to_string()];
        let charges = vec![1.0];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let selection = SelectionMask::all(1);
        let mut volume = unit_cube();

        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &selection,
            structure: &structure,
            properties: Some(&charges),
            subtype: CalcSubtype::Coulomb,
        };
        EspProvider.compute(&mut request).unwrap();

        // The center grid point coincides with the atom; the clamp keeps it finite.
        let center = volume.values()[volume.index(1, 1, 1)];
        assert!(center.is_finite());
        assert!((center - COULOMB_CONSTANT / MIN_DISTANCE).abs() < TOLERANCE);
    }

    #[test]
    fn screened_subtype_decays_faster() {
        let positions = vec![Point3::origin()];
        let elements = vec!["C".to_string()];
        let charges = vec![1.0];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let selection = SelectionMask::all(1);

        let mut coulomb = unit_cube();
        let mut request = CalculationRequest {
            volume: &mut coulomb,
            selection: &selection,
            structure: &structure,
            properties: Some(&charges),
            subtype: CalcSubtype::Coulomb,
        };
        EspProvider.compute(&mut request).unwrap();

        let mut screened = unit_cube();
        let mut request = CalculationRequest {
            volume: &mut screened,
            selection: &selection,
            structure: &structure,
            properties: Some(&charges),
            subtype: CalcSubtype::Screened,
        };
        EspProvider.compute(&mut request).unwrap();

        let corner = coulomb.index(0, 0, 0);
        assert!(screened.values()[corner] < coulomb.values()[corner]);
    }

    #[test]
    fn missing_charges_fail_explicitly() {
        let positions = vec![Point3::origin()];
        let elements = vec!["C".to_string()];
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        let selection = SelectionMask::all(1);
        let mut volume = unit_cube();

        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &selection,
            structure: &structure,
            properties: None,
            subtype: CalcSubtype::Coulomb,
        };
        let err = EspProvider.compute(&mut request).unwrap_err();
        assert!(matches!(err, CalculationError::MissingProperties { .. }));
    }

    #[test]
    fn short_property_slice_fails_instead_of_panicking() {
        let positions = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let elements = vec!["C".to_string(), "O".to_string()];
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        let selection = SelectionMask::all(2);
        let mut volume = unit_cube();
        // One charge for a two-atom structure.
        let short = vec![0.5];

        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &selection,
            structure: &structure,
            properties: Some(&short),
            subtype: CalcSubtype::Coulomb,
        };
        let err = EspProvider.compute(&mut request).unwrap_err();
        assert!(matches!(
            err,
            CalculationError::PropertyCountMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn only_selected_atoms_contribute() {
        let positions = vec![Point3::origin(), Point3::new(100.0, 0.0, 0.0)];
        let elements = vec!["C".to_string(), "C".to_string()];
        let charges = vec![0.0, 5.0];
        let structure = StructureData::new(&positions, &elements, Some(&charges)).unwrap();
        let selection = SelectionMask::from_indices(2, [0]).unwrap();
        let mut volume = unit_cube();

        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &selection,
            structure: &structure,
            properties: Some(&charges),
            subtype: CalcSubtype::Coulomb,
        };
        EspProvider.compute(&mut request).unwrap();
        assert!(volume.values().iter().all(|&v| v == 0.0));
    }
}
