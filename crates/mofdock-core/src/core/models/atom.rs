use nalgebra::Point3;

/// A single atom of a rigid structure.
///
/// Atoms carry only what docking needs: the element label, used when the
/// structure is written back out, and the Cartesian position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as read from the input (e.g., "Zn", "O").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.position - other.position).norm()
    }
}
