//! Vectorized single-threaded backend

use crate::backend::Backend;
use crate::config::StateSpaceConfig;
use crate::error::Result;
use crate::simd::probabilities_simd;
use crate::state_space::{impl_core_delegation, StateCore, StateSpace};
use tracing::trace;

/// Single-threaded state space using the SIMD probability kernel
pub struct SimdStateSpace {
    core: StateCore,
}

impl SimdStateSpace {
    pub fn new(num_qubits: usize, num_threads: usize, config: StateSpaceConfig) -> Result<Self> {
        Ok(Self {
            core: StateCore::new(num_qubits, num_threads, config)?,
        })
    }

    /// Check if the amplitude buffer is aligned for the vector kernels
    pub fn is_simd_aligned(&self) -> bool {
        self.core.store.is_simd_aligned()
    }
}

impl StateSpace for SimdStateSpace {
    impl_core_delegation!();

    fn backend(&self) -> Backend {
        Backend::Simd
    }

    fn probabilities(&self) -> Result<Vec<f64>> {
        let amplitudes = self.core.store.amplitudes()?;
        let mut probabilities = vec![0.0; amplitudes.len()];
        probabilities_simd(amplitudes, &mut probabilities);
        Ok(probabilities)
    }

    fn sample_state(&mut self, count: usize, out: &mut Vec<u64>) -> Result<()> {
        if !self.core.begin_sample(count, out)? {
            return Ok(());
        }

        let probabilities = self.probabilities()?;
        self.core.sample_sequential(&probabilities, count, out)?;

        trace!(backend = "simd", count, strategy = ?self.core.config.strategy, "sampled state");
        Ok(())
    }
}
