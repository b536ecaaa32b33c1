use mofdock::core::electrons::ElectronError;
use mofdock::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Electrons(#[from] ElectronError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{failed} of {total} docking job(s) failed")]
    Batch { failed: usize, total: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
