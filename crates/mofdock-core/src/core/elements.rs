use phf::{Map, phf_map};

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15, "S" => 16,
    "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22, "V" => 23, "Cr" => 24,
    "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29, "Zn" => 30, "Ga" => 31, "Ge" => 32,
    "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36, "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40,
    "Nb" => 41, "Mo" => 42, "Tc" => 43, "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48,
    "In" => 49, "Sn" => 50, "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54, "Cs" => 55, "Ba" => 56,
    "La" => 57, "Ce" => 58, "Pr" => 59, "Nd" => 60, "Pm" => 61, "Sm" => 62, "Eu" => 63, "Gd" => 64,
    "Tb" => 65, "Dy" => 66, "Ho" => 67, "Er" => 68, "Tm" => 69, "Yb" => 70, "Lu" => 71, "Hf" => 72,
    "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78, "Au" => 79, "Hg" => 80,
    "Tl" => 81, "Pb" => 82, "Bi" => 83, "Po" => 84, "At" => 85, "Rn" => 86, "Fr" => 87, "Ra" => 88,
    "Ac" => 89, "Th" => 90, "Pa" => 91, "U" => 92, "Np" => 93, "Pu" => 94, "Am" => 95, "Cm" => 96,
    "Bk" => 97, "Cf" => 98, "Es" => 99, "Fm" => 100, "Md" => 101, "No" => 102, "Lr" => 103, "Rf" => 104,
    "Db" => 105, "Sg" => 106, "Bh" => 107, "Hs" => 108, "Mt" => 109, "Ds" => 110, "Rg" => 111, "Cn" => 112,
    "Nh" => 113, "Fl" => 114, "Mc" => 115, "Lv" => 116, "Ts" => 117, "Og" => 118,
};

const NOBLE_GAS_ATOMIC_NUMBERS: [u8; 6] = [2, 10, 18, 36, 54, 86];

/// Looks up the atomic number of an element symbol.
///
/// The symbol is matched after trimming and normalizing its case, so "ZN",
/// "zn" and "Zn" all resolve to zinc.
pub fn atomic_number(symbol: &str) -> Option<u8> {
    let symbol = normalize_symbol(symbol);
    ATOMIC_NUMBERS.get(symbol.as_str()).copied()
}

/// Number of electrons outside the preceding noble-gas core.
///
/// This is the atomic number minus the atomic number of the heaviest noble
/// gas that is strictly lighter than the element (zero core electrons for
/// hydrogen and helium).
pub fn valence_electrons(symbol: &str) -> Option<u8> {
    let z = atomic_number(symbol)?;
    let core = NOBLE_GAS_ATOMIC_NUMBERS
        .iter()
        .copied()
        .filter(|&n| n < z)
        .max()
        .unwrap_or(0);
    Some(z - core)
}

fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_symbols() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Zn"), Some(30));
        assert_eq!(atomic_number("Og"), Some(118));
    }

    #[test]
    fn symbol_lookup_normalizes_case_and_whitespace() {
        assert_eq!(atomic_number(" ZN "), Some(30));
        assert_eq!(atomic_number("cu"), Some(29));
        assert_eq!(atomic_number("o"), Some(8));
    }

    #[test]
    fn unknown_symbols_return_none() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number(""), None);
        assert_eq!(valence_electrons("Qq"), None);
    }

    #[test]
    fn valence_electrons_subtract_preceding_noble_gas_core() {
        assert_eq!(valence_electrons("H"), Some(1));
        assert_eq!(valence_electrons("He"), Some(2));
        assert_eq!(valence_electrons("C"), Some(4));
        assert_eq!(valence_electrons("O"), Some(6));
        assert_eq!(valence_electrons("Ne"), Some(8));
        assert_eq!(valence_electrons("Na"), Some(1));
        assert_eq!(valence_electrons("Zn"), Some(12));
        assert_eq!(valence_electrons("Zr"), Some(4));
    }
}
