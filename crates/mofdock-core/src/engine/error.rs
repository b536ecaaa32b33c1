use std::fmt;
use thiserror::Error;

/// What a clashing cluster atom came too close to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClashPartner {
    /// A ligand atom, by ligand index.
    Ligand { atom: usize },
    /// An atom of a cluster placed at an earlier site, by that site's index
    /// and the atom's index in the cluster template.
    PlacedCluster { site: usize, atom: usize },
}

impl fmt::Display for ClashPartner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClashPartner::Ligand { atom } => write!(f, "ligand atom {}", atom),
            ClashPartner::PlacedCluster { site, atom } => {
                write!(f, "atom {} of the cluster placed at site {}", atom, site)
            }
        }
    }
}

/// Which input structure a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStructure {
    Ligand,
    Template,
}

impl fmt::Display for InputStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputStructure::Ligand => write!(f, "ligand"),
            InputStructure::Template => write!(f, "metal-cluster template"),
        }
    }
}

/// Diagnostics for the first steric clash found after a rotation was optimized.
#[derive(Debug, Clone, PartialEq)]
pub struct ClashReport {
    /// Index of the failing site in the caller's site list.
    pub site_index: usize,
    /// Index of the offending atom in the cluster template.
    pub cluster_atom: usize,
    pub partner: ClashPartner,
    pub distance: f64,
    /// The bond distance the separation had to reach.
    pub threshold: f64,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Steric clash at site {}: cluster atom {} is {:.4} Å from {} (minimum {:.4} Å)",
        .0.site_index, .0.cluster_atom, .0.distance, .0.partner, .0.threshold
    )]
    StericClash(ClashReport),

    #[error("Bonding site {site_index} contains no atoms")]
    EmptySite { site_index: usize },

    #[error(
        "Bonding site {site_index} references atom {atom_index}, but the ligand has only {ligand_len} atoms"
    )]
    InvalidSite {
        site_index: usize,
        atom_index: usize,
        ligand_len: usize,
    },

    #[error("The metal-cluster template contains no atoms")]
    EmptyTemplate,

    #[error("Atom {atom} of the {structure} has a non-finite coordinate")]
    NonFiniteCoordinate {
        structure: InputStructure,
        atom: usize,
    },
}
