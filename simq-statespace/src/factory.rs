//! Backend selection
//!
//! The factory is a pure function of the register size, the thread budget
//! and the configuration thresholds. Every backend it can return samples
//! with identical semantics, so the choice is purely a performance decision.

use crate::backend::{Backend, ParallelStateSpace, ScalarStateSpace, SimdStateSpace};
use crate::config::StateSpaceConfig;
use crate::error::{Result, StateError};
use crate::state_space::StateSpace;
use tracing::debug;

/// Pick the backend for a register of `num_qubits` with `num_threads`
///
/// - more than one thread and at least `parallel_threshold` qubits → Parallel
/// - at least `simd_threshold` qubits → Simd
/// - otherwise → Scalar
pub fn select_backend(num_qubits: usize, num_threads: usize, config: &StateSpaceConfig) -> Backend {
    if num_threads > 1 && num_qubits >= config.parallel_threshold {
        Backend::Parallel
    } else if num_qubits >= config.simd_threshold {
        Backend::Simd
    } else {
        Backend::Scalar
    }
}

/// Create a state space with the default configuration
///
/// # Errors
/// `InvalidConfiguration` if `num_threads` is zero or `num_qubits` exceeds
/// the supported maximum
///
/// # Example
/// ```
/// use simq_statespace::{get_state_space, Backend, StateSpace};
///
/// let space = get_state_space(3, 1).unwrap();
/// assert_eq!(space.num_qubits(), 3);
/// assert_eq!(space.backend(), Backend::Scalar);
/// ```
pub fn get_state_space(num_qubits: usize, num_threads: usize) -> Result<Box<dyn StateSpace>> {
    get_state_space_with_config(num_qubits, num_threads, StateSpaceConfig::default())
}

/// Create a state space with an explicit configuration
pub fn get_state_space_with_config(
    num_qubits: usize,
    num_threads: usize,
    config: StateSpaceConfig,
) -> Result<Box<dyn StateSpace>> {
    config.validate()?;

    if num_threads == 0 {
        return Err(StateError::invalid_config("thread_count must be at least 1"));
    }
    if num_qubits > config.max_qubits {
        return Err(StateError::invalid_config(format!(
            "{} qubits exceeds the configured maximum of {}",
            num_qubits, config.max_qubits
        )));
    }

    let backend = select_backend(num_qubits, num_threads, &config);
    debug!(num_qubits, num_threads, %backend, "selected state space backend");

    Ok(match backend {
        Backend::Scalar => Box::new(ScalarStateSpace::new(num_qubits, num_threads, config)?),
        Backend::Simd => Box::new(SimdStateSpace::new(num_qubits, num_threads, config)?),
        Backend::Parallel => Box::new(ParallelStateSpace::new(num_qubits, num_threads, config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_backend_thresholds() {
        let config = StateSpaceConfig::default();

        assert_eq!(select_backend(0, 1, &config), Backend::Scalar);
        assert_eq!(select_backend(3, 1, &config), Backend::Scalar);
        assert_eq!(select_backend(4, 1, &config), Backend::Simd);
        assert_eq!(select_backend(20, 1, &config), Backend::Simd);
        assert_eq!(select_backend(11, 8, &config), Backend::Simd);
        assert_eq!(select_backend(12, 2, &config), Backend::Parallel);
    }

    #[test]
    fn test_select_backend_custom_thresholds() {
        let config = StateSpaceConfig::new()
            .with_simd_threshold(10)
            .with_parallel_threshold(0);

        assert_eq!(select_backend(1, 1, &config), Backend::Scalar);
        assert_eq!(select_backend(1, 2, &config), Backend::Parallel);
    }

    #[test]
    fn test_factory_returns_selected_backend() {
        let space = get_state_space(1, 1).unwrap();
        assert_eq!(space.backend(), Backend::Scalar);
        assert_eq!(space.num_threads(), 1);
        assert!(!space.is_initialized());

        let space = get_state_space(12, 2).unwrap();
        assert_eq!(space.backend(), Backend::Parallel);
        assert_eq!(space.dimension(), 4096);
    }

    #[test]
    fn test_factory_rejects_invalid_configuration() {
        assert!(matches!(
            get_state_space(2, 0),
            Err(StateError::InvalidConfiguration { .. })
        ));
        assert!(get_state_space(31, 1).is_err());

        let config = StateSpaceConfig::new().with_max_qubits(4);
        assert!(get_state_space_with_config(5, 1, config).is_err());
    }
}
