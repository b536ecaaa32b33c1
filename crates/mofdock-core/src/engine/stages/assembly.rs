use crate::core::models::atom::Atom;
use crate::core::models::structure::AtomicStructure;
use crate::core::utils::geometry::nearest_in;
use crate::engine::error::ClashPartner;
use nalgebra::Point3;

/// Non-coordinating atoms of every committed cluster, flattened in commit
/// order, each tagged with its site index and template atom index.
#[derive(Debug, Clone, Default)]
pub struct PlacedAtoms {
    positions: Vec<Point3<f64>>,
    origins: Vec<(usize, usize)>,
}

impl PlacedAtoms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    fn push(&mut self, site_index: usize, template_atom: usize, position: Point3<f64>) {
        self.positions.push(position);
        self.origins.push((site_index, template_atom));
    }
}

/// Everything a new cluster must keep clear of: the ligand and the
/// non-coordinating atoms of earlier clusters.
#[derive(Debug, Clone, Copy)]
pub struct Obstacles<'a> {
    ligand: &'a [Point3<f64>],
    placed: &'a PlacedAtoms,
}

impl<'a> Obstacles<'a> {
    pub fn new(ligand: &'a [Point3<f64>], placed: &'a PlacedAtoms) -> Self {
        Self { ligand, placed }
    }

    pub fn is_empty(&self) -> bool {
        self.ligand.is_empty() && self.placed.is_empty()
    }

    /// Distance from `point` to the closest obstacle, or infinity if there
    /// are none.
    pub fn min_distance(&self, point: &Point3<f64>) -> f64 {
        self.ligand
            .iter()
            .chain(self.placed.positions.iter())
            .map(|q| (point - q).norm())
            .fold(f64::INFINITY, f64::min)
    }

    /// The closest obstacle to `point`. Ligand atoms win ties.
    pub fn nearest(&self, point: &Point3<f64>) -> Option<(ClashPartner, f64)> {
        let ligand = nearest_in(point, self.ligand)
            .map(|(atom, d)| (ClashPartner::Ligand { atom }, d));
        let placed = nearest_in(point, &self.placed.positions).map(|(i, d)| {
            let (site, atom) = self.placed.origins[i];
            (ClashPartner::PlacedCluster { site, atom }, d)
        });
        match (ligand, placed) {
            (Some(l), Some(c)) if c.1 < l.1 => Some(c),
            (l, c) => l.or(c),
        }
    }
}

/// Owns the growing combined structure and the placed-atom accumulator for
/// one docking run.
#[derive(Debug, Clone)]
pub struct Assembler {
    structure: AtomicStructure,
    ligand_positions: Vec<Point3<f64>>,
    placed: PlacedAtoms,
}

impl Assembler {
    pub fn new(ligand: &AtomicStructure) -> Self {
        Self {
            structure: ligand.clone(),
            ligand_positions: ligand.positions(),
            placed: PlacedAtoms::new(),
        }
    }

    pub fn ligand_positions(&self) -> &[Point3<f64>] {
        &self.ligand_positions
    }

    pub fn placed(&self) -> &PlacedAtoms {
        &self.placed
    }

    pub fn obstacles(&self) -> Obstacles<'_> {
        Obstacles::new(&self.ligand_positions, &self.placed)
    }

    /// Appends one cluster copy with the given final positions.
    ///
    /// Elements come from `template`; `positions` must be in template order.
    /// Returns the combined-structure index of the cluster's first atom.
    pub fn commit(
        &mut self,
        site_index: usize,
        template: &AtomicStructure,
        positions: &[Point3<f64>],
        coordinating: usize,
    ) -> usize {
        let cluster: AtomicStructure = template
            .atoms()
            .iter()
            .zip(positions)
            .map(|(atom, position)| Atom::new(&atom.element, *position))
            .collect();
        let offset = self.structure.extend_from(&cluster);

        for (i, position) in positions.iter().enumerate() {
            if i != coordinating {
                self.placed.push(site_index, i, *position);
            }
        }
        offset
    }

    pub fn structure(&self) -> &AtomicStructure {
        &self.structure
    }

    pub fn into_structure(self) -> AtomicStructure {
        self.structure
    }
}
