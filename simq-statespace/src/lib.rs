//! Dense quantum state spaces with fast Born-rule sampling
//!
//! This crate holds the full amplitude vector of an n-qubit register and
//! draws batches of measurement outcomes from it. Gate application lives
//! elsewhere in SimQ; here amplitudes are written directly.
//!
//! # Backends
//!
//! [`get_state_space`] picks one of three implementations of the
//! [`StateSpace`] trait from the register size and thread budget:
//!
//! - **Scalar**: plain per-amplitude kernel, single thread
//! - **Simd**: vectorized probability kernel over 64-byte aligned storage
//! - **Parallel**: probabilities, prefix sum and draws split across a rayon pool
//!
//! All backends sample with the same semantics: outcome `i` is drawn with
//! probability |aᵢ|² / Σⱼ|aⱼ|².
//!
//! # Example
//!
//! ```
//! use simq_statespace::{get_state_space, SampleCounts, StateSpace};
//! use num_complex::Complex32;
//!
//! let mut space = get_state_space(1, 1).unwrap();
//! space.create_state().unwrap();
//!
//! let amp = Complex32::new(std::f32::consts::FRAC_1_SQRT_2, 0.0);
//! space.set_amplitude(0, amp).unwrap();
//! space.set_amplitude(1, amp).unwrap();
//!
//! let mut samples = Vec::new();
//! space.sample_state(1000, &mut samples).unwrap();
//! assert_eq!(samples.len(), 1000);
//!
//! let counts = SampleCounts::from_samples(&samples);
//! assert_eq!(counts.get_count(0) + counts.get_count(1), 1000);
//! ```

pub mod amplitudes;
pub mod backend;
pub mod config;
pub mod error;
pub mod factory;
pub mod measurement;
pub mod sampling;
pub mod simd;
pub mod state_space;

pub use amplitudes::AmplitudeStore;
pub use backend::{Backend, ParallelStateSpace, ScalarStateSpace, SimdStateSpace};
pub use config::{SamplingStrategy, StateSpaceConfig, MAX_QUBITS};
pub use error::{Result, StateError};
pub use factory::{get_state_space, get_state_space_with_config, select_backend};
pub use measurement::SampleCounts;
pub use sampling::{AliasTable, CumulativeTable, Sampler};
pub use state_space::StateSpace;
