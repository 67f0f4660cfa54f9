//! Column model error types

/// Errors raised while building or querying a [`ColumnModel`](crate::model::ColumnModel).
///
/// All of these are construction-time failures: a grid with an invalid column
/// set should not start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// No column with the given key exists.
    #[error("Unknown column '{key}'")]
    UnknownColumn { key: String },

    /// Two column specs share the same key.
    #[error("Duplicate column '{key}'")]
    DuplicateColumn { key: String },

    /// The column key collides with a protocol parameter name.
    #[error("Column key '{key}' is reserved by the query protocol")]
    ReservedKey { key: String },

    /// A column set must contain at least one column.
    #[error("Column set is empty")]
    Empty,
}

impl ColumnError {
    /// Creates a new unknown column error.
    pub fn unknown(key: impl Into<String>) -> Self {
        Self::UnknownColumn { key: key.into() }
    }

    /// Creates a new duplicate column error.
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::DuplicateColumn { key: key.into() }
    }

    /// Returns the offending column key, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownColumn { key } | Self::DuplicateColumn { key } | Self::ReservedKey { key } => {
                Some(key)
            }
            Self::Empty => None,
        }
    }
}
