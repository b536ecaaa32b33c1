use crate::cli::DockArgs;
use crate::config::{DockSettings, PartialDockingConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::{BatchProgress, CliProgressHandler};
use mofdock::{
    core::io::{
        traits::StructureFile,
        xyz::{XyzFile, XyzMetadata},
    },
    core::models::structure::AtomicStructure,
    engine::progress::ProgressReporter,
    workflows::{self, dock::DockingResult},
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub fn run(args: DockArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialDockingConfig::from_file(path)?,
        None => PartialDockingConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let settings = partial_config.merge_with_cli(&args)?;
    if settings.sites.is_empty() {
        warn!("No bonding sites were given; ligands will be written back unchanged.");
    }

    info!("Loading metal-cluster template from {:?}", &args.metal);
    let template = read_structure(&args.metal)?;

    let total = args.ligands.len();
    let jobs: Vec<(&PathBuf, PathBuf)> = args
        .ligands
        .iter()
        .enumerate()
        .map(|(i, ligand)| (ligand, generate_output_path(&args.output, i + 1, total)))
        .collect();

    if let [(ligand, output)] = jobs.as_slice() {
        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
        println!("Docking {} site(s) onto {}...", settings.sites.len(), ligand.display());
        let result = dock_one(ligand, output, &template, &settings, &reporter)?;
        print_summary(&result, output);
        return Ok(());
    }

    println!("Docking {} ligands...", total);
    let batch = BatchProgress::new(total as u64);
    let outcomes: Vec<(&PathBuf, &PathBuf, Result<DockingResult>)> = jobs
        .par_iter()
        .map(|(ligand, output)| {
            let outcome = dock_one(ligand, output, &template, &settings, &ProgressReporter::new());
            batch.job_finished(&ligand.display().to_string(), outcome.is_ok());
            (*ligand, output, outcome)
        })
        .collect();
    batch.finish();

    let mut failed = 0;
    for (ligand, output, outcome) in outcomes {
        match outcome {
            Ok(result) => print_summary(&result, output),
            Err(e) => {
                failed += 1;
                error!("Docking failed for {}: {}", ligand.display(), e);
                eprintln!("✗ {}: {}", ligand.display(), e);
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Batch { failed, total });
    }
    Ok(())
}

fn dock_one(
    ligand_path: &Path,
    output_path: &Path,
    template: &AtomicStructure,
    settings: &DockSettings,
    reporter: &ProgressReporter,
) -> Result<DockingResult> {
    info!("Loading ligand from {:?}", ligand_path);
    let ligand = read_structure(ligand_path)?;

    let result = workflows::dock::run(
        &ligand,
        template,
        &settings.sites,
        &settings.config,
        reporter,
    )?;

    let metadata = XyzMetadata {
        comment: format!(
            "{} with {} docked metal cluster(s)",
            ligand_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| ligand_path.display().to_string()),
            result.placements.len()
        ),
    };
    info!("Writing combined structure to {:?}", output_path);
    XyzFile::write_to_path(&result.structure, &metadata, output_path).map_err(|e| {
        CliError::FileParsing {
            path: output_path.to_path_buf(),
            source: e.into(),
        }
    })?;
    Ok(result)
}

fn read_structure(path: &Path) -> Result<AtomicStructure> {
    let (structure, _) = XyzFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(structure)
}

fn print_summary(result: &DockingResult, output: &Path) {
    println!(
        "✓ {} cluster(s) docked, {} atoms written to: {}",
        result.placements.len(),
        result.structure.len(),
        output.display()
    );
    for record in &result.placements {
        let clearance = record
            .min_clearance
            .map_or_else(|| "-".to_string(), |c| format!("{:.3} Å", c));
        println!(
            "  Site {:>3}: metal atom {:>5} at ({:>9.4}, {:>9.4}, {:>9.4}), clearance {}",
            record.site_index,
            record.combined_index,
            record.bond_position.x,
            record.bond_position.y,
            record.bond_position.z,
            clearance
        );
    }
}

/// Output path for job `index` (1-based) of `total`.
///
/// A single job writes to `base` itself; otherwise `_index` is inserted
/// before the extension.
fn generate_output_path(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    base.with_file_name(file_name)
}
