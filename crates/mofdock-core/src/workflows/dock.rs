use crate::core::models::site::BondingSite;
use crate::core::models::structure::AtomicStructure;
use crate::engine::config::DockingConfig;
use crate::engine::error::{EngineError, InputStructure};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stages::assembly::Assembler;
use crate::engine::stages::{
    alignment, bond_position, coordinating_atom, rotation, site_geometry, validation,
};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument, warn};

/// Diagnostics for one committed cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRecord {
    /// Position of the site in the caller's list.
    pub site_index: usize,
    /// The coordinating atom, as an index into the template.
    pub coordinating_atom: usize,
    /// The coordinating atom, as an index into the combined structure.
    pub combined_index: usize,
    pub bond_position: Point3<f64>,
    /// Signed distance from the site centroid to `bond_position`.
    pub offset: f64,
    pub direction: Vector3<f64>,
    /// Whether `direction` is the +Z fallback for a degenerate site.
    pub fallback_direction: bool,
    /// Optimized rotation as (θx, θy, θz) in radians, applied as `Rz · Ry · Rx`.
    pub euler_angles: Vector3<f64>,
    pub position_iterations: usize,
    pub position_converged: bool,
    pub rotation_iterations: usize,
    pub rotation_converged: bool,
    /// Smallest distance from a non-coordinating atom to anything placed
    /// before it, or `None` for a single-atom cluster.
    pub min_clearance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockingResult {
    /// The ligand followed by one cluster per site, in site order.
    pub structure: AtomicStructure,
    pub placements: Vec<PlacementRecord>,
}

/// Docks one copy of `template` at each bonding site of `ligand`.
///
/// Sites are processed strictly in the given order. Each copy is placed so
/// that its coordinating atom sits at `config.bond_distance` from the site
/// atoms, then rotated to keep its other atoms away from the ligand and
/// every earlier copy. All inputs are checked before anything is placed.
///
/// # Errors
///
/// Returns [`EngineError::EmptySite`], [`EngineError::InvalidSite`],
/// [`EngineError::EmptyTemplate`] or [`EngineError::NonFiniteCoordinate`]
/// for bad inputs, and
/// [`EngineError::StericClash`] as soon as one copy cannot be placed clear
/// of the others. No partial result is returned.
#[instrument(skip_all, name = "docking_workflow", fields(sites = sites.len()))]
pub fn run(
    ligand: &AtomicStructure,
    template: &AtomicStructure,
    sites: &[BondingSite],
    config: &DockingConfig,
    reporter: &ProgressReporter,
) -> Result<DockingResult, EngineError> {
    validation::check_finite(ligand, InputStructure::Ligand)?;
    for (site_index, site) in sites.iter().enumerate() {
        site_geometry::validate_site(site, site_index, ligand.len())?;
    }
    if sites.is_empty() {
        info!("No bonding sites given; returning the ligand unchanged.");
        return Ok(DockingResult {
            structure: ligand.clone(),
            placements: Vec::new(),
        });
    }

    validation::check_finite(template, InputStructure::Template)?;
    let template_positions = template.positions();
    let coordinating =
        coordinating_atom::select(&template_positions).ok_or(EngineError::EmptyTemplate)?;
    debug!(
        coordinating,
        template_atoms = template.len(),
        "Selected coordinating atom from the template hull."
    );

    reporter.report(Progress::PhaseStart { name: "Docking" });
    reporter.report(Progress::TaskStart {
        total_steps: sites.len() as u64,
    });
    info!(
        ligand_atoms = ligand.len(),
        bond_distance = config.bond_distance,
        "Docking {} cluster(s).",
        sites.len()
    );

    let mut assembler = Assembler::new(ligand);
    let mut placements = Vec::with_capacity(sites.len());

    for (site_index, site) in sites.iter().enumerate() {
        let record = place_site(
            &mut assembler,
            template,
            &template_positions,
            coordinating,
            site,
            site_index,
            config,
            reporter,
        )?;
        reporter.report(Progress::SitePlaced {
            site_index,
            min_clearance: record.min_clearance,
        });
        reporter.report(Progress::TaskIncrement);
        placements.push(record);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let structure = assembler.into_structure();
    info!(
        total_atoms = structure.len(),
        "Docking complete. Placed {} cluster(s).",
        placements.len()
    );
    Ok(DockingResult {
        structure,
        placements,
    })
}

fn place_site(
    assembler: &mut Assembler,
    template: &AtomicStructure,
    template_positions: &[Point3<f64>],
    coordinating: usize,
    site: &BondingSite,
    site_index: usize,
    config: &DockingConfig,
    reporter: &ProgressReporter,
) -> Result<PlacementRecord, EngineError> {
    let geometry = site_geometry::extract(assembler.ligand_positions(), site, site_index)?;
    if geometry.is_fallback_direction {
        reporter.report(Progress::Message(format!(
            "Site {} has no usable bonding direction; placing along +Z.",
            site_index
        )));
    }

    let bond = bond_position::solve(&geometry, config.bond_distance, &config.position_solver);
    if !bond.converged {
        warn!(
            site = site_index,
            iterations = bond.iterations,
            "Bond-position solver stopped before converging."
        );
    }
    debug!(
        site = site_index,
        offset = bond.offset,
        iterations = bond.iterations,
        "Solved bond position."
    );

    let aligned = alignment::align(template_positions, coordinating, &bond.position);

    let obstacles = assembler.obstacles();
    let fit = rotation::optimize(
        &aligned,
        &bond.position,
        coordinating,
        &obstacles,
        &config.rotation_optimizer,
    );
    if !fit.converged {
        warn!(
            site = site_index,
            iterations = fit.iterations,
            "Rotation optimizer stopped before converging."
        );
    }
    debug!(
        site = site_index,
        total_clearance = fit.total_clearance,
        iterations = fit.iterations,
        "Optimized cluster orientation."
    );

    let min_clearance = validation::check_clearance(
        &fit.positions,
        coordinating,
        &obstacles,
        config.bond_distance,
        site_index,
    )?;

    let first_atom = assembler.commit(site_index, template, &fit.positions, coordinating);
    info!(site = site_index, "Placed cluster at site {}.", site_index);

    Ok(PlacementRecord {
        site_index,
        coordinating_atom: coordinating,
        combined_index: first_atom + coordinating,
        bond_position: bond.position,
        offset: bond.offset,
        direction: geometry.direction.into_inner(),
        fallback_direction: geometry.is_fallback_direction,
        euler_angles: fit.angles,
        position_iterations: bond.iterations,
        position_converged: bond.converged,
        rotation_iterations: fit.iterations,
        rotation_converged: fit.converged,
        min_clearance,
    })
}
