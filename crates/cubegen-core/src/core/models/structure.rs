use crate::core::utils::elements;
use nalgebra::Point3;
use thiserror::Error;

/// Error raised when the parallel per-atom arrays of a structure view disagree.
#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "parallel atom arrays differ in length (positions: {positions}, elements: {elements}, properties: {properties:?})"
)]
pub struct ArrayLengthMismatch {
    /// Number of atom positions supplied.
    pub positions: usize,
    /// Number of element symbols supplied.
    pub elements: usize,
    /// Number of per-atom property values supplied, if any.
    pub properties: Option<usize>,
}

/// A read-only view over the atoms of an external structure store.
///
/// The store owns the coordinate and property arrays; this view borrows them
/// for the duration of a single generation request and never mutates them.
/// Per-atom properties (e.g., partial charges) are optional, since not every
/// field type consumes them.
#[derive(Debug, Clone, Copy)]
pub struct StructureData<'a> {
    positions: &'a [Point3<f64>],
    elements: &'a [String],
    properties: Option<&'a [f64]>,
}

impl<'a> StructureData<'a> {
    /// Creates a structure view from parallel per-atom arrays.
    ///
    /// # Arguments
    ///
    /// * `positions` - Atom coordinates in Angstroms.
    /// * `elements` - Element symbols, parallel to `positions`.
    /// * `properties` - Optional per-atom property values, parallel to `positions`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayLengthMismatch`] if the arrays are not the same length.
    pub fn new(
        positions: &'a [Point3<f64>],
        elements: &'a [String],
        properties: Option<&'a [f64]>,
    ) -> Result<Self, ArrayLengthMismatch> {
        let consistent = elements.len() == positions.len()
            && properties.is_none_or(|p| p.len() == positions.len());
        if !consistent {
            return Err(ArrayLengthMismatch {
                positions: positions.len(),
                elements: elements.len(),
                properties: properties.map(<[f64]>::len),
            });
        }
        Ok(Self {
            positions,
            elements,
            properties,
        })
    }

    /// The number of atoms in the underlying store.
    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    /// The position of atom `index` in Angstroms.
    pub fn position(&self, index: usize) -> Point3<f64> {
        self.positions[index]
    }

    /// The element symbol of atom `index`.
    pub fn element(&self, index: usize) -> &str {
        &self.elements[index]
    }

    /// The per-atom property array, if the store supplied one.
    pub fn properties(&self) -> Option<&'a [f64]> {
        self.properties
    }

    /// Whether atom `index` is a hydrogen (including the D/T isotopes).
    pub fn is_hydrogen(&self, index: usize) -> bool {
        elements::is_hydrogen(&self.elements[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_accepts_consistent_arrays() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let elements = symbols(&["O", "H"]);
        let charges = vec![-0.8, 0.4];
        let view = StructureData::new(&positions, &elements, Some(&charges)).unwrap();

        assert_eq!(view.atom_count(), 2);
        assert_eq!(view.element(1), "H");
        assert_eq!(view.position(1), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(view.properties(), Some(&charges[..]));
    }

    #[test]
    fn new_rejects_mismatched_elements() {
        let positions = vec![Point3::origin()];
        let elements = symbols(&["C", "N"]);
        let err = StructureData::new(&positions, &elements, None).unwrap_err();
        assert_eq!(err.positions, 1);
        assert_eq!(err.elements, 2);
    }

    #[test]
    fn new_rejects_mismatched_properties() {
        let positions = vec![Point3::origin()];
        let elements = symbols(&["C"]);
        let charges = vec![0.1, 0.2];
        assert!(StructureData::new(&positions, &elements, Some(&charges)).is_err());
    }

    #[test]
    fn is_hydrogen_uses_element_symbols() {
        let positions = vec![Point3::origin(), Point3::origin(), Point3::origin()];
        let elements = symbols(&["C", "H", "D"]);
        let view = StructureData::new(&positions, &elements, None).unwrap();
        assert!(!view.is_hydrogen(0));
        assert!(view.is_hydrogen(1));
        assert!(view.is_hydrogen(2));
    }
}
