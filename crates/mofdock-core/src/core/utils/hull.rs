//! Convex hull vertex detection for small point sets.
//!
//! Metal-cluster templates rarely exceed a few dozen atoms, so the hull is
//! found by testing every non-degenerate triple as a candidate supporting
//! plane (O(n⁴)). Points that lie on a hull face or edge without being a
//! corner of it are not reported, which matches what a triangulating hull
//! reports as facet vertices.

use nalgebra::{Point3, Vector3};

const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Returns the sorted indices of the convex hull vertices of `points`.
///
/// Lower-dimensional inputs are handled explicitly: a single point (or a set
/// of coincident points) yields the first index, a collinear set yields its
/// two end points and a planar set yields the corners of its 2D hull.
pub fn hull_vertices(points: &[Point3<f64>]) -> Vec<usize> {
    if points.is_empty() {
        return Vec::new();
    }
    let scale = extent(points);
    if scale == 0.0 {
        return vec![0];
    }
    let tol = RELATIVE_TOLERANCE * scale;
    let area_tol = tol * scale;

    let mut is_vertex = vec![false; points.len()];
    let mut found_solid_face = false;
    let mut planar_normal = None;

    let n = points.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let normal = (points[j] - points[i]).cross(&(points[k] - points[i]));
                let norm = normal.norm();
                if norm <= area_tol {
                    continue;
                }
                let normal = normal / norm;

                let mut above = false;
                let mut below = false;
                let mut on_plane = Vec::new();
                for (m, p) in points.iter().enumerate() {
                    let d = normal.dot(&(p - points[i]));
                    if d > tol {
                        above = true;
                    } else if d < -tol {
                        below = true;
                    } else {
                        on_plane.push(m);
                    }
                    if above && below {
                        break;
                    }
                }

                if above && below {
                    continue;
                }
                if !above && !below {
                    planar_normal = Some(normal);
                    continue;
                }
                found_solid_face = true;
                for v in polygon_corners(points, &on_plane, &normal, area_tol) {
                    is_vertex[v] = true;
                }
            }
        }
    }

    if found_solid_face {
        return is_vertex
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
            .collect();
    }

    match planar_normal {
        Some(normal) => {
            let all: Vec<usize> = (0..n).collect();
            let mut corners = polygon_corners(points, &all, &normal, area_tol);
            corners.sort_unstable();
            corners
        }
        None => segment_ends(points),
    }
}

fn extent(points: &[Point3<f64>]) -> f64 {
    let origin = points[0];
    points
        .iter()
        .map(|p| (p - origin).norm())
        .fold(0.0, f64::max)
}

/// Corners of the 2D hull of the given coplanar points (Andrew's monotone chain).
fn polygon_corners(
    points: &[Point3<f64>],
    members: &[usize],
    normal: &Vector3<f64>,
    area_tol: f64,
) -> Vec<usize> {
    if members.len() < 3 {
        return members.to_vec();
    }
    let (u, v) = plane_basis(normal);
    let origin = points[members[0]];
    let mut projected: Vec<(f64, f64, usize)> = members
        .iter()
        .map(|&m| {
            let d = points[m] - origin;
            (d.dot(&u), d.dot(&v), m)
        })
        .collect();
    projected.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .then(a.2.cmp(&b.2))
    });

    let turn = |o: &(f64, f64, usize), a: &(f64, f64, usize), b: &(f64, f64, usize)| {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    };

    let mut lower: Vec<(f64, f64, usize)> = Vec::new();
    for p in &projected {
        while let [.., o, a] = lower.as_slice() {
            if turn(o, a, p) > area_tol {
                break;
            }
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<(f64, f64, usize)> = Vec::new();
    for p in projected.iter().rev() {
        while let [.., o, a] = upper.as_slice() {
            if turn(o, a, p) > area_tol {
                break;
            }
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower.into_iter().map(|(_, _, m)| m).collect()
}

fn plane_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = normal.cross(&helper).normalize();
    let v = normal.cross(&u);
    (u, v)
}

fn segment_ends(points: &[Point3<f64>]) -> Vec<usize> {
    let origin = points[0];
    let far = points
        .iter()
        .max_by(|a, b| {
            (*a - origin)
                .norm()
                .partial_cmp(&(*b - origin).norm())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .copied()
        .unwrap_or(origin);
    let axis = (far - origin).normalize();

    let mut lo = (f64::INFINITY, 0);
    let mut hi = (f64::NEG_INFINITY, 0);
    for (i, p) in points.iter().enumerate() {
        let t = axis.dot(&(p - origin));
        if t < lo.0 {
            lo = (t, i);
        }
        if t > hi.0 {
            hi = (t, i);
        }
    }
    let mut ends = vec![lo.1, hi.1];
    ends.sort_unstable();
    ends.dedup();
    ends
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_vertices() {
        assert!(hull_vertices(&[]).is_empty());
    }

    #[test]
    fn single_point_is_its_own_hull() {
        assert_eq!(hull_vertices(&[Point3::new(1.0, 2.0, 3.0)]), vec![0]);
    }

    #[test]
    fn coincident_points_report_first_index() {
        let p = Point3::new(0.5, 0.5, 0.5);
        assert_eq!(hull_vertices(&[p, p, p]), vec![0]);
    }

    #[test]
    fn collinear_points_report_segment_ends() {
        let points = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert_eq!(hull_vertices(&points), vec![1, 2]);
    }

    #[test]
    fn planar_square_with_center_reports_corners_only() {
        let points = [
            Point3::new(0.5, 0.5, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
        ];
        assert_eq!(hull_vertices(&points), vec![1, 2, 3, 4]);
    }

    #[test]
    fn tetrahedron_excludes_interior_point() {
        let points = [
            Point3::new(0.25, 0.25, 0.25),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        assert_eq!(hull_vertices(&points), vec![1, 2, 3, 4]);
    }

    #[test]
    fn cube_excludes_face_and_edge_midpoints() {
        let mut points = vec![
            Point3::new(0.5, 0.5, 0.0), // face center
            Point3::new(0.5, 0.0, 0.0), // edge midpoint
            Point3::new(0.5, 0.5, 0.5), // body center
        ];
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    points.push(Point3::new(x, y, z));
                }
            }
        }
        assert_eq!(hull_vertices(&points), (3..11).collect::<Vec<_>>());
    }

    #[test]
    fn octahedral_cluster_reports_all_ligand_atoms() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(-2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, -2.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, -2.0),
        ];
        assert_eq!(hull_vertices(&points), vec![1, 2, 3, 4, 5, 6]);
    }
}
