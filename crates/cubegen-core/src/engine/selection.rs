use crate::core::models::selection::SelectionMask;
use crate::core::models::structure::StructureData;
use crate::core::utils::bounds::BoundingRegion;
use crate::engine::error::GenerationError;
use tracing::debug;

/// Gathers the subset of atoms relevant to one generation request.
///
/// Returns the filtered selection and, unless it is empty, the bounding region
/// tightly enclosing the selected coordinates expanded by `margin` on every
/// axis. The returned mask is always a subset of the input mask; the structure
/// store is never mutated.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidSelection`] if the input mask references
/// an atom index outside the structure.
pub fn select_atoms(
    structure: &StructureData<'_>,
    mask: &SelectionMask,
    exclude_hydrogens: bool,
    margin: f64,
) -> Result<(SelectionMask, Option<BoundingRegion>), GenerationError> {
    let atom_count = structure.atom_count();
    let mut selected = Vec::new();
    let mut region: Option<BoundingRegion> = None;

    for index in mask.iter() {
        if index >= atom_count {
            return Err(GenerationError::InvalidSelection { index, atom_count });
        }
        if exclude_hydrogens && structure.is_hydrogen(index) {
            continue;
        }
        let position = structure.position(index);
        match region.as_mut() {
            Some(r) => r.enclose(position),
            None => region = Some(BoundingRegion::from_point(position)),
        }
        selected.push(index);
    }

    debug!(
        selected = selected.len(),
        requested = mask.selected_count(),
        exclude_hydrogens,
        "atom selection resolved"
    );

    let selection = SelectionMask::from_indices(atom_count, selected)
        .map_err(|e| GenerationError::InvalidSelection {
            index: e.index,
            atom_count: e.atom_count,
        })?;
    Ok((selection, region.map(|r| r.expanded(margin))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn water() -> (Vec<Point3<f64>>, Vec<String>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.96, 0.0, 0.0),
            Point3::new(-0.24, 0.93, 0.0),
        ];
        let elements = vec!["O".to_string(), "H".to_string(), "H".to_string()];
        (positions, elements)
    }

    #[test]
    fn selection_is_a_subset_after_hydrogen_exclusion() {
        let (positions, elements) = water();
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        let mask = SelectionMask::all(3);

        let (selection, region) = select_atoms(&structure, &mask, true, 0.0).unwrap();
        assert!(selection.is_subset_of(&mask));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0]);
        let region = region.unwrap();
        assert_eq!(region.min(), Point3::origin());
        assert_eq!(region.max(), Point3::origin());
    }

    #[test]
    fn region_encloses_all_selected_atoms_plus_margin() {
        let (positions, elements) = water();
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        let mask = SelectionMask::all(3);

        let (selection, region) = select_atoms(&structure, &mask, false, 1.5).unwrap();
        assert_eq!(selection.selected_count(), 3);
        let region = region.unwrap();
        assert_eq!(region.min(), Point3::new(-0.24 - 1.5, -1.5, -1.5));
        assert_eq!(region.max(), Point3::new(0.96 + 1.5, 0.93 + 1.5, 1.5));
        for i in selection.iter() {
            assert!(region.contains(&structure.position(i)));
        }
    }

    #[test]
    fn empty_result_has_no_region() {
        let (positions, elements) = water();
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        let mask = SelectionMask::from_indices(3, [1, 2]).unwrap();

        let (selection, region) = select_atoms(&structure, &mask, true, 2.0).unwrap();
        assert!(selection.is_empty());
        assert!(region.is_none());
    }

    #[test]
    fn out_of_range_mask_is_rejected() {
        let (positions, elements) = water();
        let structure = StructureData::new(&positions, &elements, None).unwrap();
        // A mask sized for a larger structure than the one supplied.
        let mask = SelectionMask::from_indices(5, [0, 4]).unwrap();

        let err = select_atoms(&structure, &mask, false, 0.0).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidSelection {
                index: 4,
                atom_count: 3
            }
        ));
    }
}
