//! Error types for mycelia_core.
//!
//! Only construction of misconfigured components fails; every runtime
//! shortfall in the simulation is a policy outcome, not an error.

use mycelia_data::DataError;
use thiserror::Error;

/// Main error type for mycelia_core construction.
#[derive(Error, Debug)]
pub enum SimError {
    /// Grid with a zero dimension
    #[error("Grid must have positive dimensions, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid data parameters
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result type alias for mycelia_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
