use super::atom::Atom;
use nalgebra::Point3;

/// An ordered collection of atoms forming one rigid structure.
///
/// This is the single structural type used throughout docking: the ligand,
/// the metal-cluster template and the combined output are all an
/// `AtomicStructure`. Atom order is significant, since bonding sites and
/// coordinating atoms refer to atoms by their 0-based index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomicStructure {
    atoms: Vec<Atom>,
}

impl AtomicStructure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a structure from parallel slices of element labels and positions.
    ///
    /// # Arguments
    ///
    /// * `elements` - The element symbol of each atom.
    /// * `positions` - The position of each atom, in the same order.
    ///
    /// # Return
    ///
    /// Returns `None` if the two slices differ in length.
    pub fn from_parts<S: AsRef<str>>(elements: &[S], positions: &[Point3<f64>]) -> Option<Self> {
        if elements.len() != positions.len() {
            return None;
        }
        let atoms = elements
            .iter()
            .zip(positions)
            .map(|(element, position)| Atom::new(element.as_ref(), *position))
            .collect();
        Some(Self { atoms })
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Appends one atom to the end of the structure.
    ///
    /// # Return
    ///
    /// The index assigned to the new atom.
    pub fn push(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the positions of all atoms in structure order.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Concatenates another structure onto this one.
    ///
    /// The appended atoms keep their relative order; their indices in the
    /// combined structure are offset by the length this structure had before
    /// the call.
    ///
    /// # Return
    ///
    /// The index offset applied to the appended atoms.
    pub fn extend_from(&mut self, other: &AtomicStructure) -> usize {
        let offset = self.atoms.len();
        self.atoms.extend(other.atoms.iter().cloned());
        offset
    }
}

impl FromIterator<Atom> for AtomicStructure {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}
