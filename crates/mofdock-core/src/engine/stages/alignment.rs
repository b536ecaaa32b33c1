use nalgebra::Point3;

/// Rigidly translates the template so its coordinating atom lands on `target`.
///
/// The coordinating atom is assigned `target` directly, so it matches the
/// solved bond position bit for bit.
///
/// # Panics
///
/// Panics if `coordinating` is not an index into `template_positions`.
pub fn align(
    template_positions: &[Point3<f64>],
    coordinating: usize,
    target: &Point3<f64>,
) -> Vec<Point3<f64>> {
    let shift = target - template_positions[coordinating];
    let mut aligned: Vec<Point3<f64>> =
        template_positions.iter().map(|p| p + shift).collect();
    aligned[coordinating] = *target;
    aligned
}
