use crate::core::models::site::BondingSite;
use crate::core::utils::geometry::centroid;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Unit, Vector3};
use tracing::debug;

/// Below this length the site-minus-rest vector is treated as having no direction.
const DEGENERATE_DIRECTION_NORM: f64 = 1e-10;

/// Where a cluster should approach a site from.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteGeometry {
    /// Positions of the site atoms, in site order.
    pub site_positions: Vec<Point3<f64>>,
    pub centroid: Point3<f64>,
    /// Unit vector pointing from the rest of the ligand towards the site.
    pub direction: Unit<Vector3<f64>>,
    /// Set when `direction` is the +Z fallback rather than a computed vector.
    pub is_fallback_direction: bool,
}

pub fn fallback_direction() -> Unit<Vector3<f64>> {
    Vector3::z_axis()
}

/// Checks that a site is non-empty and only references existing ligand atoms.
pub fn validate_site(
    site: &BondingSite,
    site_index: usize,
    ligand_len: usize,
) -> Result<(), EngineError> {
    if site.is_empty() {
        return Err(EngineError::EmptySite { site_index });
    }
    if let Some(atom_index) = site.first_out_of_range(ligand_len) {
        return Err(EngineError::InvalidSite {
            site_index,
            atom_index,
            ligand_len,
        });
    }
    Ok(())
}

/// Computes the site centroid and the outward direction for one site.
///
/// The direction runs from the centroid of all ligand atoms outside the site
/// to the site centroid. When every ligand atom belongs to the site, or the
/// two centroids coincide, +Z is used instead.
///
/// # Errors
///
/// Returns [`EngineError::EmptySite`] or [`EngineError::InvalidSite`] when
/// the site fails [`validate_site`].
pub fn extract(
    ligand_positions: &[Point3<f64>],
    site: &BondingSite,
    site_index: usize,
) -> Result<SiteGeometry, EngineError> {
    validate_site(site, site_index, ligand_positions.len())?;
    let site_positions: Vec<Point3<f64>> =
        site.indices().iter().map(|&i| ligand_positions[i]).collect();
    let Some(site_centroid) = centroid(&site_positions) else {
        return Err(EngineError::EmptySite { site_index });
    };

    let rest_centroid = centroid(
        ligand_positions
            .iter()
            .enumerate()
            .filter(|(i, _)| !site.contains(*i))
            .map(|(_, p)| p),
    );

    let computed = rest_centroid
        .map(|rest| site_centroid - rest)
        .filter(|v| v.norm() >= DEGENERATE_DIRECTION_NORM)
        .map(Unit::new_normalize);

    let (direction, is_fallback_direction) = match computed {
        Some(direction) => (direction, false),
        None => {
            debug!(
                site = site_index,
                site_atoms = site.len(),
                "No usable outward direction for site; falling back to +Z."
            );
            (fallback_direction(), true)
        }
    };

    Ok(SiteGeometry {
        site_positions,
        centroid: site_centroid,
        direction,
        is_fallback_direction,
    })
}
