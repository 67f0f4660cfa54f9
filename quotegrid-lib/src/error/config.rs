//! Configuration error types

/// Errors raised while validating a [`GridConfig`](crate::GridConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The endpoint is not an absolute URL.
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A page size setting is zero or exceeds the maximum.
    #[error("Invalid page size {size} (max {max})")]
    InvalidPageSize { size: u32, max: u32 },

    /// A static parameter uses a name owned by the query protocol.
    #[error("Extra parameter '{name}' is reserved by the query protocol")]
    ReservedParam { name: String },
}
