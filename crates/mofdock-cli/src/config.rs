use crate::cli::DockArgs;
use crate::error::{CliError, Result};
use mofdock::core::models::site::BondingSite;
use mofdock::core::utils::optimize::MinimizerOptions;
use mofdock::engine::config::{DockingConfig, DockingConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialMinimizerConfig {
    max_iterations: Option<usize>,
    gradient_tolerance: Option<f64>,
    function_tolerance: Option<f64>,
    finite_difference_step: Option<f64>,
}

impl PartialMinimizerConfig {
    fn into_options(self) -> MinimizerOptions {
        let defaults = MinimizerOptions::default();
        MinimizerOptions {
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            gradient_tolerance: self
                .gradient_tolerance
                .unwrap_or(defaults.gradient_tolerance),
            function_tolerance: self
                .function_tolerance
                .unwrap_or(defaults.function_tolerance),
            finite_difference_step: self
                .finite_difference_step
                .unwrap_or(defaults.finite_difference_step),
        }
    }

    fn set(&mut self, option: &str, key: &str, value: &str) -> Result<()> {
        match option {
            "max-iterations" => self.max_iterations = Some(parse_value(key, value, "integer")?),
            "gradient-tolerance" => {
                self.gradient_tolerance = Some(parse_value(key, value, "float")?)
            }
            "function-tolerance" => {
                self.function_tolerance = Some(parse_value(key, value, "float")?)
            }
            "finite-difference-step" => {
                self.finite_difference_step = Some(parse_value(key, value, "float")?)
            }
            _ => return Err(unsupported_key(key)),
        }
        Ok(())
    }
}

/// Docking settings as read from a TOML file, before CLI overrides.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialDockingConfig {
    bond_distance: Option<f64>,
    sites: Option<Vec<BondingSite>>,
    position_solver: Option<PartialMinimizerConfig>,
    rotation_optimizer: Option<PartialMinimizerConfig>,
}

/// Everything the `dock` command needs besides the structure files.
#[derive(Debug, Clone, PartialEq)]
pub struct DockSettings {
    pub config: DockingConfig,
    pub sites: Vec<BondingSite>,
}

impl PartialDockingConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Layers `-S` values over the file, then explicit flags over both.
    pub fn merge_with_cli(mut self, args: &DockArgs) -> Result<DockSettings> {
        self.apply_set_values(&args.set_values)?;

        let bond_distance = args.bond_distance.or(self.bond_distance).ok_or_else(|| {
            CliError::Config(
                "A value for 'bond-distance' is required either in the config file or via --bond-distance."
                    .to_string(),
            )
        })?;

        let sites = if args.sites.is_empty() {
            self.sites.unwrap_or_default()
        } else {
            args.sites.clone()
        };

        let config = DockingConfigBuilder::new()
            .bond_distance(bond_distance)
            .position_solver(self.position_solver.unwrap_or_default().into_options())
            .rotation_optimizer(self.rotation_optimizer.unwrap_or_default().into_options())
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        Ok(DockSettings { config, sites })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let (key, value) = (key.trim(), value.trim());

            match key.split_once('.') {
                None if key == "bond-distance" => {
                    self.bond_distance = Some(parse_value(key, value, "float")?);
                }
                Some(("position-solver", option)) => self
                    .position_solver
                    .get_or_insert_with(Default::default)
                    .set(option, key, value)?,
                Some(("rotation-optimizer", option)) => self
                    .rotation_optimizer
                    .get_or_insert_with(Default::default)
                    .set(option, key, value)?,
                _ => return Err(unsupported_key(key)),
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn unsupported_key(key: &str) -> CliError {
    CliError::Config(format!(
        "Unsupported configuration key for --set: '{}'",
        key
    ))
}
