//! Scalar backend for small registers

use crate::backend::Backend;
use crate::config::StateSpaceConfig;
use crate::error::Result;
use crate::simd::probabilities_scalar;
use crate::state_space::{impl_core_delegation, StateCore, StateSpace};
use tracing::trace;

/// Single-threaded state space with a plain per-amplitude kernel
pub struct ScalarStateSpace {
    core: StateCore,
}

impl ScalarStateSpace {
    /// Create a scalar state space
    ///
    /// The store is not allocated until `create_state`.
    pub fn new(num_qubits: usize, num_threads: usize, config: StateSpaceConfig) -> Result<Self> {
        Ok(Self {
            core: StateCore::new(num_qubits, num_threads, config)?,
        })
    }
}

impl StateSpace for ScalarStateSpace {
    impl_core_delegation!();

    fn backend(&self) -> Backend {
        Backend::Scalar
    }

    fn probabilities(&self) -> Result<Vec<f64>> {
        let amplitudes = self.core.store.amplitudes()?;
        let mut probabilities = vec![0.0; amplitudes.len()];
        probabilities_scalar(amplitudes, &mut probabilities);
        Ok(probabilities)
    }

    fn sample_state(&mut self, count: usize, out: &mut Vec<u64>) -> Result<()> {
        if !self.core.begin_sample(count, out)? {
            return Ok(());
        }

        let probabilities = self.probabilities()?;
        self.core.sample_sequential(&probabilities, count, out)?;

        trace!(backend = "scalar", count, strategy = ?self.core.config.strategy, "sampled state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use num_complex::Complex32;

    fn space(num_qubits: usize) -> ScalarStateSpace {
        ScalarStateSpace::new(num_qubits, 1, StateSpaceConfig::new().with_seed(17)).unwrap()
    }

    #[test]
    fn test_not_initialized() {
        let mut state = space(2);
        assert!(!state.is_initialized());
        assert_eq!(state.sample(4), Err(StateError::NotInitialized));
        assert_eq!(
            state.set_amplitude(0, Complex32::new(1.0, 0.0)),
            Err(StateError::NotInitialized)
        );
    }

    #[test]
    fn test_ground_state_samples() {
        let mut state = space(2);
        state.create_state().unwrap();
        assert_eq!(state.sample(100).unwrap(), vec![0; 100]);
    }

    #[test]
    fn test_normalize() {
        let mut state = space(1);
        state.create_state().unwrap();
        state.set_amplitude(0, Complex32::new(3.0, 0.0)).unwrap();
        state.set_amplitude(1, Complex32::new(0.0, 4.0)).unwrap();

        state.normalize().unwrap();
        let total = state.total_probability().unwrap();
        assert!((total - 1.0).abs() < 1e-6);
        assert!((state.get_amplitude(0).unwrap().re - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_state() {
        let mut state = space(1);
        state.create_state().unwrap();
        state.set_amplitude(0, Complex32::new(0.0, 0.0)).unwrap();

        let mut out = vec![1, 2, 3];
        assert!(matches!(
            state.sample_state(5, &mut out),
            Err(StateError::DegenerateDistribution { .. })
        ));
        assert!(out.is_empty());
    }
}
