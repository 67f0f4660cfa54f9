//! Crate-level error type

use super::ColumnError;
use super::ConfigError;
use super::LoadError;

/// Umbrella error for grid operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid column set.
    #[error(transparent)]
    Column(#[from] ColumnError),

    /// A page load failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
