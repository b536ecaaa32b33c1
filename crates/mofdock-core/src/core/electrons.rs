//! Per-atom electron bookkeeping derived from a population analysis.
//!
//! Docking never depends on this module. It turns partial charges and bond
//! orders that an external electronic-structure run already produced into
//! per-atom records, which a caller can inspect when deciding which atoms to
//! group into bonding sites.

use super::elements::valence_electrons;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectronError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown element '{element}' for atom {index}")]
    UnknownElement { index: usize, element: String },
    #[error("Atom {0} is listed more than once")]
    DuplicateAtom(usize),
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomCharge {
    pub index: usize,
    pub element: String,
    pub charge: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BondOrder {
    pub atoms: [usize; 2],
    pub order: f64,
}

/// Parsed output of a population analysis: charges per atom and bond orders per pair.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PopulationAnalysis {
    pub atoms: Vec<AtomCharge>,
    #[serde(default)]
    pub bonds: Vec<BondOrder>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElectronRecord {
    pub element: String,
    pub partial_charge: f64,
    /// Valence electrons minus the partial charge.
    pub available_electrons: f64,
    /// Sum of the bond orders of every bond the atom takes part in.
    pub bonding_electrons: f64,
    /// Available electrons not already committed to bonds.
    pub free_electrons: f64,
}

impl PopulationAnalysis {
    pub fn load(path: &Path) -> Result<Self, ElectronError> {
        let content = std::fs::read_to_string(path).map_err(|e| ElectronError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ElectronError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    /// Derives one [`ElectronRecord`] per listed atom, keyed by atom index.
    ///
    /// A bond listed twice (in either atom order) counts once, with the last
    /// listed order winning. Bonds that mention atoms without a charge entry
    /// still count for the atoms that have one.
    ///
    /// # Errors
    ///
    /// Returns [`ElectronError::UnknownElement`] for an unrecognized element
    /// symbol and [`ElectronError::DuplicateAtom`] when an atom index repeats.
    pub fn electron_records(&self) -> Result<BTreeMap<usize, ElectronRecord>, ElectronError> {
        let mut unique_bonds: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for bond in &self.bonds {
            let [a, b] = bond.atoms;
            unique_bonds.insert((a.min(b), a.max(b)), bond.order);
        }

        let mut records = BTreeMap::new();
        for atom in &self.atoms {
            let valence =
                valence_electrons(&atom.element).ok_or_else(|| ElectronError::UnknownElement {
                    index: atom.index,
                    element: atom.element.clone(),
                })?;
            let available_electrons = f64::from(valence) - atom.charge;
            let bonding_electrons: f64 = unique_bonds
                .iter()
                .filter(|((a, b), _)| *a == atom.index || *b == atom.index)
                .map(|(_, order)| order)
                .sum();

            let record = ElectronRecord {
                element: atom.element.clone(),
                partial_charge: atom.charge,
                available_electrons,
                bonding_electrons,
                free_electrons: available_electrons - bonding_electrons,
            };
            if records.insert(atom.index, record).is_some() {
                return Err(ElectronError::DuplicateAtom(atom.index));
            }
        }
        Ok(records)
    }
}
