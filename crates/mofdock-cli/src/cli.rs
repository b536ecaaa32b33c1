use crate::utils::parser;
use clap::{Args, Parser, Subcommand};
use mofdock::core::models::site::BondingSite;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mofdock - dock rigid metal clusters onto the bonding sites of organic ligands.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used when docking several ligands.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dock one metal-cluster copy onto each bonding site of one or more ligands.
    Dock(DockArgs),
    /// Print per-atom electron records from a parsed population analysis.
    Electrons(ElectronsArgs),
}

/// Arguments for the `dock` subcommand.
#[derive(Args, Debug)]
pub struct DockArgs {
    /// Ligand structure file(s) in XYZ format. Each ligand is docked independently.
    #[arg(short, long = "ligand", required = true, num_args(1..), value_name = "PATH")]
    pub ligands: Vec<PathBuf>,

    /// Metal-cluster template in XYZ format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub metal: PathBuf,

    /// Output structure file. With several ligands, `_N` is appended to the file stem.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the metal-to-site bond distance in Angstroms.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub bond_distance: Option<f64>,

    /// A bonding site as comma-separated 0-based ligand atom indices, ranges allowed
    /// (e.g. '0,2-4'). Repeat for several sites; replaces the sites of the config file.
    #[arg(short = 's', long = "site", value_name = "SITE", value_parser = parser::parse_site)]
    pub sites: Vec<BondingSite>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S rotation-optimizer.max-iterations=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `electrons` subcommand.
#[derive(Args, Debug)]
pub struct ElectronsArgs {
    /// Population analysis in TOML format (`[[atoms]]` charges and `[[bonds]]` orders).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dock_accepts_several_ligands_and_sites() {
        let cli = Cli::parse_from([
            "mofdock", "dock", "-l", "a.xyz", "b.xyz", "-m", "zn.xyz", "-o", "out.xyz", "-s",
            "0,2-3", "-s", "5", "-d", "2.1",
        ]);
        let Commands::Dock(args) = cli.command else {
            panic!("expected the dock subcommand");
        };
        assert_eq!(args.ligands, vec![PathBuf::from("a.xyz"), PathBuf::from("b.xyz")]);
        assert_eq!(args.sites.len(), 2);
        assert_eq!(args.sites[0].indices(), &[0, 2, 3]);
        assert_eq!(args.bond_distance, Some(2.1));
        assert!(args.config.is_none());
    }

    #[test]
    fn malformed_site_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from([
            "mofdock", "dock", "-l", "a.xyz", "-m", "zn.xyz", "-o", "out.xyz", "-s", "4-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from(["mofdock", "electrons", "-i", "charges.toml", "-vv", "-j", "4"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, Some(4));
        assert!(matches!(cli.command, Commands::Electrons(_)));
    }
}
