use crate::core::utils::optimize::MinimizerOptions;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Bond distance must be positive and finite (got {0})")]
    InvalidBondDistance(String),
    #[error("Invalid {optimizer} options: {reason}")]
    InvalidOptimizer {
        optimizer: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockingConfig {
    /// Target metal-to-site distance, also the minimum allowed separation
    /// between a placed cluster and everything placed before it.
    pub bond_distance: f64,
    /// Settings for the 1-D search along the site direction.
    pub position_solver: MinimizerOptions,
    /// Settings for the Euler-angle search about the bond position.
    pub rotation_optimizer: MinimizerOptions,
}

#[derive(Default)]
pub struct DockingConfigBuilder {
    bond_distance: Option<f64>,
    position_solver: Option<MinimizerOptions>,
    rotation_optimizer: Option<MinimizerOptions>,
}

impl DockingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_distance(mut self, distance: f64) -> Self {
        self.bond_distance = Some(distance);
        self
    }
    pub fn position_solver(mut self, options: MinimizerOptions) -> Self {
        self.position_solver = Some(options);
        self
    }
    pub fn rotation_optimizer(mut self, options: MinimizerOptions) -> Self {
        self.rotation_optimizer = Some(options);
        self
    }

    pub fn build(self) -> Result<DockingConfig, ConfigError> {
        let bond_distance = self
            .bond_distance
            .ok_or(ConfigError::MissingParameter("bond_distance"))?;
        if !(bond_distance.is_finite() && bond_distance > 0.0) {
            return Err(ConfigError::InvalidBondDistance(bond_distance.to_string()));
        }

        let position_solver = self.position_solver.unwrap_or_default();
        position_solver
            .validate()
            .map_err(|reason| ConfigError::InvalidOptimizer {
                optimizer: "position-solver",
                reason,
            })?;
        let rotation_optimizer = self.rotation_optimizer.unwrap_or_default();
        rotation_optimizer
            .validate()
            .map_err(|reason| ConfigError::InvalidOptimizer {
                optimizer: "rotation-optimizer",
                reason,
            })?;

        Ok(DockingConfig {
            bond_distance,
            position_solver,
            rotation_optimizer,
        })
    }
}
