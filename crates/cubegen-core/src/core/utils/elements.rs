use phf::{Map, phf_map};

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "D" => 1, "T" => 1,
    "HE" => 2,
    "LI" => 3, "BE" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8, "F" => 9,
    "NE" => 10, "NA" => 11, "MG" => 12, "AL" => 13, "SI" => 14, "P" => 15,
    "S" => 16, "CL" => 17, "AR" => 18, "K" => 19, "CA" => 20,
    "MN" => 25, "FE" => 26, "CO" => 27, "NI" => 28, "CU" => 29, "ZN" => 30,
    "SE" => 34, "BR" => 35, "I" => 53,
};

/// Looks up the atomic number for an element symbol.
///
/// Symbols are matched case-insensitively after trimming. Returns `None` for
/// unknown symbols rather than guessing.
pub fn atomic_number(symbol: &str) -> Option<u8> {
    ATOMIC_NUMBERS
        .get(symbol.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Whether `symbol` denotes hydrogen, including the D/T isotope labels.
pub fn is_hydrogen(symbol: &str) -> bool {
    atomic_number(symbol) == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_number_covers_common_elements() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("N"), Some(7));
        assert_eq!(atomic_number("Fe"), Some(26));
        assert_eq!(atomic_number("cl"), Some(17));
        assert_eq!(atomic_number(" O "), Some(8));
    }

    #[test]
    fn atomic_number_is_none_for_unknown_symbols() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number(""), None);
    }

    #[test]
    fn is_hydrogen_includes_isotope_labels() {
        assert!(is_hydrogen("H"));
        assert!(is_hydrogen("d"));
        assert!(is_hydrogen("T"));
        assert!(!is_hydrogen("He"));
        assert!(!is_hydrogen("C"));
    }
}
