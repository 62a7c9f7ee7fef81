//! Error types for state space operations

use thiserror::Error;

/// Errors that can occur while creating, mutating or sampling a state space
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// Amplitude index outside `[0, 2^n)`
    #[error("Amplitude index {index} out of range for state of dimension {dimension}")]
    IndexOutOfRange { index: u64, dimension: usize },

    /// Sampling or amplitude access before `create_state`
    #[error("State has not been created; call create_state first")]
    NotInitialized,

    /// Factory or configuration preconditions violated
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Probabilities sum to zero (or to a non-finite value)
    #[error("Cannot sample from a degenerate distribution, total probability = {total}")]
    DegenerateDistribution { total: f64 },

    /// Memory allocation error
    #[error("Failed to allocate {size} bytes for amplitude store")]
    AllocationError { size: usize },
}

impl StateError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        StateError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Result type for state space operations
pub type Result<T> = std::result::Result<T, StateError>;
