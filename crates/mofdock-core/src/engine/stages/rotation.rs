use super::assembly::Obstacles;
use crate::core::utils::geometry::{euler_rotation, rotate_about};
use crate::core::utils::optimize::{MinimizerOptions, minimize};
use nalgebra::{DVector, Point3, Rotation3, Vector3};

/// Negated summed clearance of the non-coordinating atoms after rotating
/// `aligned` about `pivot` by Euler `angles` (θx, θy, θz).
///
/// Atoms with nothing to keep clear of contribute zero.
pub fn clearance_objective(
    aligned: &[Point3<f64>],
    pivot: &Point3<f64>,
    coordinating: usize,
    obstacles: &Obstacles<'_>,
    angles: &Vector3<f64>,
) -> f64 {
    let rotation = euler_rotation(angles.x, angles.y, angles.z);
    let total: f64 = aligned
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != coordinating)
        .map(|(_, p)| obstacles.min_distance(&(pivot + rotation * (p - pivot))))
        .filter(|d| *d != f64::INFINITY)
        .sum();
    -total
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationFit {
    pub angles: Vector3<f64>,
    pub rotation: Rotation3<f64>,
    /// Final cluster positions, in template order.
    pub positions: Vec<Point3<f64>>,
    /// Summed clearance at the optimum (the objective with its sign flipped).
    pub total_clearance: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Orients the aligned cluster about the bond position to push its
/// non-coordinating atoms away from all obstacles.
///
/// The search starts from zero angles and reports whichever local optimum
/// it reaches; clashes are left to the validator.
pub fn optimize(
    aligned: &[Point3<f64>],
    pivot: &Point3<f64>,
    coordinating: usize,
    obstacles: &Obstacles<'_>,
    options: &MinimizerOptions,
) -> RotationFit {
    let objective = |x: &DVector<f64>| {
        clearance_objective(
            aligned,
            pivot,
            coordinating,
            obstacles,
            &Vector3::new(x[0], x[1], x[2]),
        )
    };
    let minimum = minimize(objective, DVector::zeros(3), options);

    let angles = Vector3::new(minimum.x[0], minimum.x[1], minimum.x[2]);
    let rotation = euler_rotation(angles.x, angles.y, angles.z);
    RotationFit {
        angles,
        rotation,
        positions: rotate_about(aligned, pivot, &rotation),
        total_clearance: -minimum.value,
        iterations: minimum.iterations,
        converged: minimum.converged(),
    }
}
