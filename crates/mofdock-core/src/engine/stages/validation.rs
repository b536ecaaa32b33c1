use super::assembly::Obstacles;
use crate::core::models::structure::AtomicStructure;
use crate::engine::error::{ClashReport, EngineError, InputStructure};
use nalgebra::Point3;

/// Rejects a structure with any NaN or infinite coordinate, naming the
/// first such atom.
pub fn check_finite(structure: &AtomicStructure, role: InputStructure) -> Result<(), EngineError> {
    match structure
        .atoms()
        .iter()
        .position(|a| !a.position.coords.iter().all(|c| c.is_finite()))
    {
        Some(atom) => Err(EngineError::NonFiniteCoordinate {
            structure: role,
            atom,
        }),
        None => Ok(()),
    }
}

/// Checks that every non-coordinating atom is at least `bond_distance` from
/// all obstacles.
///
/// Atoms are checked in template order and the first one that comes too
/// close is reported. A distance that is not a number counts as too
/// close. On success, returns the smallest clearance found, or
/// `None` when no atom had anything to measure against.
pub fn check_clearance(
    positions: &[Point3<f64>],
    coordinating: usize,
    obstacles: &Obstacles<'_>,
    bond_distance: f64,
    site_index: usize,
) -> Result<Option<f64>, EngineError> {
    let mut min_clearance: Option<f64> = None;

    for (atom, position) in positions.iter().enumerate() {
        if atom == coordinating {
            continue;
        }
        let Some((partner, distance)) = obstacles.nearest(position) else {
            continue;
        };
        if distance.is_nan() || distance < bond_distance {
            return Err(EngineError::StericClash(ClashReport {
                site_index,
                cluster_atom: atom,
                partner,
                distance,
                threshold: bond_distance,
            }));
        }
        min_clearance = Some(min_clearance.map_or(distance, |m| m.min(distance)));
    }

    Ok(min_clearance)
}
