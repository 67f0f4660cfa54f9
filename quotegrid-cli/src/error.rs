//! CLI error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    ParseConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Grid(#[from] quotegrid_lib::error::Error),
    #[error(transparent)]
    Column(#[from] quotegrid_lib::error::ColumnError),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
