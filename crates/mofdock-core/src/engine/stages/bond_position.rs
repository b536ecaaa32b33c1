use super::site_geometry::SiteGeometry;
use crate::core::utils::optimize::{MinimizerOptions, minimize};
use nalgebra::{DVector, Point3, Unit, Vector3};

/// Squared deviation of the site-atom distances from `bond_distance` for a
/// candidate point `centroid + offset · direction`.
pub fn position_objective(
    site_positions: &[Point3<f64>],
    centroid: &Point3<f64>,
    direction: &Unit<Vector3<f64>>,
    bond_distance: f64,
    offset: f64,
) -> f64 {
    let candidate = centroid + direction.into_inner() * offset;
    site_positions
        .iter()
        .map(|p| {
            let deviation = (candidate - p).norm() - bond_distance;
            deviation * deviation
        })
        .sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BondPosition {
    /// Signed distance travelled from the site centroid along the direction.
    pub offset: f64,
    pub position: Point3<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// Finds where the metal should sit along the site direction.
///
/// The search starts one bond distance out from the centroid. Negative
/// offsets are allowed, so the result can land behind the centroid.
pub fn solve(
    geometry: &SiteGeometry,
    bond_distance: f64,
    options: &MinimizerOptions,
) -> BondPosition {
    let objective = |x: &DVector<f64>| {
        position_objective(
            &geometry.site_positions,
            &geometry.centroid,
            &geometry.direction,
            bond_distance,
            x[0],
        )
    };
    let minimum = minimize(objective, DVector::from_element(1, bond_distance), options);
    let offset = minimum.x[0];

    BondPosition {
        offset,
        position: geometry.centroid + geometry.direction.into_inner() * offset,
        iterations: minimum.iterations,
        converged: minimum.converged(),
    }
}
