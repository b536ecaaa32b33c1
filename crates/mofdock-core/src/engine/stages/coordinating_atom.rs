use crate::core::utils::hull::hull_vertices;
use nalgebra::Point3;

/// Picks the template atom that bonds to the site: the lowest-indexed
/// vertex of the template's convex hull.
///
/// Returns `None` only for an empty template.
pub fn select(template_positions: &[Point3<f64>]) -> Option<usize> {
    hull_vertices(template_positions).first().copied()
}
