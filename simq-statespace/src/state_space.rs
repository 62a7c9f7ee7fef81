//! The state space interface shared by every backend

use crate::amplitudes::AmplitudeStore;
use crate::backend::Backend;
use crate::config::StateSpaceConfig;
use crate::error::{Result, StateError};
use crate::measurement::SampleCounts;
use crate::sampling::Sampler;
use crate::simd;
use num_complex::Complex32;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A live n-qubit register together with its sampling capability
///
/// Obtain one from [`get_state_space`](crate::get_state_space). Every
/// implementation shares the same contract; backends differ only in how
/// probabilities are computed and how draws are scheduled.
///
/// # Example
///
/// ```
/// use simq_statespace::{get_state_space, StateSpace};
/// use num_complex::Complex32;
///
/// let mut space = get_state_space(1, 1).unwrap();
/// space.create_state().unwrap();
/// space.set_amplitude(0, Complex32::new(0.0, 0.0)).unwrap();
/// space.set_amplitude(1, Complex32::new(1.0, 0.0)).unwrap();
///
/// let mut samples = Vec::new();
/// space.sample_state(10, &mut samples).unwrap();
/// assert_eq!(samples, vec![1; 10]);
/// ```
pub trait StateSpace: Send {
    /// Backend strategy implementing this state space
    fn backend(&self) -> Backend;

    /// Number of qubits, fixed at construction
    fn num_qubits(&self) -> usize;

    /// Thread budget requested at construction
    fn num_threads(&self) -> usize;

    /// Number of basis states (2^num_qubits)
    fn dimension(&self) -> usize {
        1usize << self.num_qubits()
    }

    /// Whether `create_state` has been called
    fn is_initialized(&self) -> bool;

    /// Reset the register to |0...0⟩
    ///
    /// Safe to call repeatedly; each call discards every amplitude written
    /// since the previous one.
    fn create_state(&mut self) -> Result<()>;

    /// Write the amplitude of basis state `index`
    ///
    /// # Errors
    /// `IndexOutOfRange` if `index >= 2^n`, `NotInitialized` before
    /// `create_state`
    fn set_amplitude(&mut self, index: u64, value: Complex32) -> Result<()>;

    /// Read the amplitude of basis state `index`
    fn get_amplitude(&self, index: u64) -> Result<Complex32>;

    /// All amplitudes, indexed by basis state
    fn amplitudes(&self) -> Result<&[Complex32]>;

    /// Overwrite all amplitudes; `amplitudes.len()` must equal 2^n
    fn set_amplitudes(&mut self, amplitudes: &[Complex32]) -> Result<()>;

    /// Per-basis-state probabilities |aᵢ|², not renormalized
    fn probabilities(&self) -> Result<Vec<f64>>;

    /// Sum of all |aᵢ|²
    fn total_probability(&self) -> Result<f64> {
        Ok(self.probabilities()?.iter().sum())
    }

    /// Rescale the amplitudes to unit norm
    ///
    /// # Errors
    /// `DegenerateDistribution` if every amplitude is zero
    fn normalize(&mut self) -> Result<()>;

    /// Reset the random number generator to a fixed seed
    fn reseed(&mut self, seed: u64);

    /// Draw `count` outcomes from the Born-rule distribution into `out`
    ///
    /// `out` is cleared first and holds exactly `count` indices on success.
    /// Outcome `i` is drawn with probability |aᵢ|² / Σⱼ|aⱼ|², so
    /// unnormalized states are sampled as if renormalized.
    ///
    /// # Errors
    /// `NotInitialized` before `create_state`; `DegenerateDistribution` if
    /// the total probability is zero or not finite (then `out` is left
    /// empty)
    fn sample_state(&mut self, count: usize, out: &mut Vec<u64>) -> Result<()>;

    /// Draw `count` outcomes into a new vector
    fn sample(&mut self, count: usize) -> Result<Vec<u64>> {
        let mut out = Vec::with_capacity(count);
        self.sample_state(count, &mut out)?;
        Ok(out)
    }

    /// Draw `count` outcomes and tally them
    fn sample_counts(&mut self, count: usize) -> Result<SampleCounts> {
        Ok(SampleCounts::from_samples(&self.sample(count)?))
    }
}

/// Storage, generator and configuration common to every backend
pub(crate) struct StateCore {
    pub(crate) store: AmplitudeStore,
    pub(crate) rng: StdRng,
    pub(crate) config: StateSpaceConfig,
    pub(crate) num_threads: usize,
}

impl StateCore {
    pub(crate) fn new(
        num_qubits: usize,
        num_threads: usize,
        config: StateSpaceConfig,
    ) -> Result<Self> {
        if num_threads == 0 {
            return Err(StateError::invalid_config(
                "thread_count must be at least 1",
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            store: AmplitudeStore::new(num_qubits)?,
            rng,
            config,
            num_threads,
        })
    }

    pub(crate) fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub(crate) fn normalize(&mut self, total: f64) -> Result<()> {
        if !total.is_finite() || total <= 0.0 {
            return Err(StateError::DegenerateDistribution { total });
        }
        let factor = 1.0 / total.sqrt();
        simd::scale(self.store.amplitudes_mut()?, factor);
        Ok(())
    }

    /// Shared preamble of `sample_state`: clears `out` and reports whether
    /// any draws are needed
    pub(crate) fn begin_sample(&self, count: usize, out: &mut Vec<u64>) -> Result<bool> {
        if !self.store.is_allocated() {
            return Err(StateError::NotInitialized);
        }
        out.clear();
        Ok(count > 0)
    }

    /// Draw `count` outcomes on the calling thread
    pub(crate) fn sample_sequential(
        &mut self,
        probabilities: &[f64],
        count: usize,
        out: &mut Vec<u64>,
    ) -> Result<()> {
        let sampler = Sampler::new(probabilities, self.config.strategy)?;
        out.resize(count, 0);
        sampler.fill(&mut self.rng, out);
        Ok(())
    }
}

/// Implements the `StateSpace` methods that only touch `self.core`
macro_rules! impl_core_delegation {
    () => {
        fn num_qubits(&self) -> usize {
            self.core.store.num_qubits()
        }

        fn num_threads(&self) -> usize {
            self.core.num_threads
        }

        fn is_initialized(&self) -> bool {
            self.core.store.is_allocated()
        }

        fn create_state(&mut self) -> $crate::error::Result<()> {
            self.core.store.create()
        }

        fn set_amplitude(
            &mut self,
            index: u64,
            value: ::num_complex::Complex32,
        ) -> $crate::error::Result<()> {
            self.core.store.set(index, value)
        }

        fn get_amplitude(&self, index: u64) -> $crate::error::Result<::num_complex::Complex32> {
            self.core.store.get(index)
        }

        fn amplitudes(&self) -> $crate::error::Result<&[::num_complex::Complex32]> {
            self.core.store.amplitudes()
        }

        fn set_amplitudes(
            &mut self,
            amplitudes: &[::num_complex::Complex32],
        ) -> $crate::error::Result<()> {
            self.core.store.copy_from(amplitudes)
        }

        fn normalize(&mut self) -> $crate::error::Result<()> {
            let total = self.total_probability()?;
            self.core.normalize(total)
        }

        fn reseed(&mut self, seed: u64) {
            self.core.reseed(seed)
        }
    };
}

pub(crate) use impl_core_delegation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_rejects_zero_threads() {
        let result = StateCore::new(2, 0, StateSpaceConfig::default());
        assert!(matches!(
            result,
            Err(StateError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_begin_sample() {
        let mut core = StateCore::new(1, 1, StateSpaceConfig::default()).unwrap();
        let mut out = vec![7, 7];

        assert_eq!(
            core.begin_sample(3, &mut out),
            Err(StateError::NotInitialized)
        );
        assert_eq!(out, vec![7, 7]);

        core.store.create().unwrap();
        assert_eq!(core.begin_sample(0, &mut out), Ok(false));
        assert!(out.is_empty());
        assert_eq!(core.begin_sample(3, &mut out), Ok(true));
    }

    #[test]
    fn test_normalize_zero_vector() {
        let mut core = StateCore::new(1, 1, StateSpaceConfig::default()).unwrap();
        core.store.create().unwrap();
        assert!(matches!(
            core.normalize(0.0),
            Err(StateError::DegenerateDistribution { .. })
        ));
    }

    #[test]
    fn test_normalize_subnormal_state() {
        let mut core = StateCore::new(1, 1, StateSpaceConfig::default()).unwrap();
        core.store.create().unwrap();
        core.store.set(0, Complex32::new(1e-39, 0.0)).unwrap();

        let total = simd::norm_sqr_f64(core.store.get(0).unwrap());
        core.normalize(total).unwrap();

        let amp = core.store.get(0).unwrap();
        assert!(amp.re.is_finite() && amp.im.is_finite());
        assert!((simd::norm_sqr_f64(amp) - 1.0).abs() < 1e-2);
    }
}
