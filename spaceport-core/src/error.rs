//! Error types for Spaceport core.

use std::{error::Error, fmt};

/// Error type for ship registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipError {
    /// A field required on creation was absent.
    MissingField(&'static str),
    /// A supplied value is outside its allowed shape or range, or an
    /// identifier is malformed.
    InvalidField(&'static str),
    /// A well-formed identifier matched no stored ship.
    NotFound,
}

impl fmt::Display for ShipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::InvalidField(field) => write!(f, "invalid value for field: {field}"),
            Self::NotFound => write!(f, "ship not found"),
        }
    }
}

impl Error for ShipError {}

/// Convenience result type for Spaceport core.
pub type Result<T> = std::result::Result<T, ShipError>;
