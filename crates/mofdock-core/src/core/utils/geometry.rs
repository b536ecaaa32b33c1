use nalgebra::{Point3, Rotation3, Vector3};

/// Arithmetic mean of a set of points, or `None` for an empty set.
pub fn centroid<'a, I>(points: I) -> Option<Point3<f64>>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

/// Rotation for extrinsic Euler angles in radians, composed as `Rz · Ry · Rx`.
pub fn euler_rotation(theta_x: f64, theta_y: f64, theta_z: f64) -> Rotation3<f64> {
    Rotation3::from_euler_angles(theta_x, theta_y, theta_z)
}

/// Rotates every point about `pivot`. A point located at the pivot stays put.
pub fn rotate_about(
    points: &[Point3<f64>],
    pivot: &Point3<f64>,
    rotation: &Rotation3<f64>,
) -> Vec<Point3<f64>> {
    points
        .iter()
        .map(|p| pivot + rotation * (p - pivot))
        .collect()
}

/// Distance from `point` to the nearest point of `pool`, with that point's index.
///
/// Returns `None` when the pool is empty.
pub fn nearest_in<'a, I>(point: &Point3<f64>, pool: I) -> Option<(usize, f64)>
where
    I: IntoIterator<Item = &'a Point3<f64>>,
{
    pool.into_iter()
        .enumerate()
        .map(|(i, q)| (i, (point - q).norm()))
        .fold(None, |best, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
}
