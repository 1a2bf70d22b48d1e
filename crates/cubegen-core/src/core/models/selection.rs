use bitvec::prelude::*;
use thiserror::Error;

/// Error raised when a selection references an atom outside the structure.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("selection references atom index {index}, but the structure has {atom_count} atoms")]
pub struct InvalidAtomIndex {
    /// The offending atom index.
    pub index: usize,
    /// The number of atoms in the structure the mask was built against.
    pub atom_count: usize,
}

/// The set of atom indices considered for one generation request.
///
/// Bitset semantics: membership test, no duplicates, iteration in ascending
/// index order. A mask is constructed fresh per request and is immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMask {
    bits: BitVec,
}

impl SelectionMask {
    /// Creates a mask selecting every atom of a structure with `atom_count` atoms.
    pub fn all(atom_count: usize) -> Self {
        Self {
            bits: bitvec![1; atom_count],
        }
    }

    /// Creates a mask selecting nothing, sized for `atom_count` atoms.
    pub fn none(atom_count: usize) -> Self {
        Self {
            bits: bitvec![0; atom_count],
        }
    }

    /// Creates a mask from explicit atom indices.
    ///
    /// Duplicate indices collapse to a single membership bit.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAtomIndex`] if any index is `>= atom_count`.
    pub fn from_indices<I>(atom_count: usize, indices: I) -> Result<Self, InvalidAtomIndex>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bits = bitvec![0; atom_count];
        for index in indices {
            if index >= atom_count {
                return Err(InvalidAtomIndex { index, atom_count });
            }
            bits.set(index, true);
        }
        Ok(Self { bits })
    }

    /// The number of atoms the mask was sized against.
    pub fn atom_count(&self) -> usize {
        self.bits.len()
    }

    /// Whether atom `index` is a member of the selection.
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|b| *b)
    }

    /// The number of selected atoms.
    pub fn selected_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Iterates over the selected atom indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Whether `self` selects only atoms that `other` also selects.
    pub fn is_subset_of(&self, other: &SelectionMask) -> bool {
        self.iter().all(|i| other.contains(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_indices_builds_expected_membership() {
        let mask = SelectionMask::from_indices(5, [0, 3, 3]).unwrap();
        assert!(mask.contains(0));
        assert!(!mask.contains(1));
        assert!(mask.contains(3));
        assert_eq!(mask.selected_count(), 2);
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![0, 3]);
    }

    #[test]
    fn from_indices_rejects_out_of_range() {
        let err = SelectionMask::from_indices(3, [1, 7]).unwrap_err();
        assert_eq!(err, InvalidAtomIndex { index: 7, atom_count: 3 });
    }

    #[test]
    fn all_and_none_cover_the_extremes() {
        let all = SelectionMask::all(4);
        let none = SelectionMask::none(4);
        assert_eq!(all.selected_count(), 4);
        assert!(none.is_empty());
        assert!(none.is_subset_of(&all));
        assert!(!all.is_subset_of(&none));
    }

    #[test]
    fn contains_is_false_beyond_capacity() {
        let mask = SelectionMask::all(2);
        assert!(!mask.contains(2));
    }

    #[test]
    fn subset_relation_holds_after_filtering() {
        let full = SelectionMask::from_indices(6, [1, 2, 4]).unwrap();
        let filtered = SelectionMask::from_indices(6, [2, 4]).unwrap();
        assert!(filtered.is_subset_of(&full));
    }
}
