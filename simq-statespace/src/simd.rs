//! Vectorized probability kernels
//!
//! Squared magnitudes are accumulated in `f64` so that the cumulative table
//! built on top of them does not lose resolution on large registers, even
//! though amplitudes are stored as `Complex32`.

pub mod kernels;

use num_complex::Complex32;

/// Number of amplitudes processed per vector step
pub const LANES: usize = 4;

/// Squared magnitude of a single amplitude, widened to `f64`
#[inline(always)]
pub fn norm_sqr_f64(amplitude: Complex32) -> f64 {
    let re = amplitude.re as f64;
    let im = amplitude.im as f64;
    re * re + im * im
}

/// Write |aᵢ|² into `out[i]` one amplitude at a time
///
/// # Panics
/// Panics if `out` is shorter than `amplitudes`
pub fn probabilities_scalar(amplitudes: &[Complex32], out: &mut [f64]) {
    assert!(out.len() >= amplitudes.len());
    for (p, &a) in out.iter_mut().zip(amplitudes) {
        *p = norm_sqr_f64(a);
    }
}

/// Write |aᵢ|² into `out[i]` using the widest kernel available
///
/// Uses AVX2 when the crate is compiled with that target feature, and the
/// lane-blocked portable kernel otherwise.
///
/// # Panics
/// Panics if `out` is shorter than `amplitudes`
#[inline]
pub fn probabilities_simd(amplitudes: &[Complex32], out: &mut [f64]) {
    assert!(out.len() >= amplitudes.len());

    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    {
        unsafe {
            kernels::probabilities_avx2(amplitudes, out);
        }
    }

    #[cfg(not(all(target_arch = "x86_64", target_feature = "avx2")))]
    {
        kernels::probabilities_lanes(amplitudes, out);
    }
}

/// Multiply every amplitude by `factor`
///
/// The product is formed in `f64`, so factors beyond `f32` range still
/// rescale subnormal amplitudes to finite values.
pub fn scale(amplitudes: &mut [Complex32], factor: f64) {
    for amp in amplitudes.iter_mut() {
        *amp = Complex32::new(
            (amp.re as f64 * factor) as f32,
            (amp.im as f64 * factor) as f32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_amplitudes(len: usize) -> Vec<Complex32> {
        (0..len)
            .map(|i| Complex32::new(0.1 * i as f32, -0.05 * i as f32))
            .collect()
    }

    #[test]
    fn test_norm_sqr_f64() {
        assert_relative_eq!(norm_sqr_f64(Complex32::new(0.6, 0.8)), 1.0, epsilon = 1e-6);
        assert_eq!(norm_sqr_f64(Complex32::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_simd_matches_scalar() {
        // Lengths that exercise both the vector body and the tail
        for len in [1, 3, 4, 7, 16, 33] {
            let amps = sample_amplitudes(len);
            let mut scalar = vec![0.0; len];
            let mut simd = vec![0.0; len];

            probabilities_scalar(&amps, &mut scalar);
            probabilities_simd(&amps, &mut simd);

            for (a, b) in scalar.iter().zip(&simd) {
                assert_relative_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_scale() {
        let mut amps = vec![Complex32::new(2.0, 0.0), Complex32::new(0.0, -4.0)];
        scale(&mut amps, 0.5);
        assert_eq!(amps[0], Complex32::new(1.0, 0.0));
        assert_eq!(amps[1], Complex32::new(0.0, -2.0));
    }

    #[test]
    fn test_scale_subnormal_amplitude() {
        // 1e39 does not fit in an f32
        let mut amps = vec![Complex32::new(1e-39, 0.0), Complex32::new(0.0, 0.0)];
        scale(&mut amps, 1e39);
        assert!(amps[0].re.is_finite());
        assert_relative_eq!(amps[0].re, 1.0, epsilon = 1e-2);
        assert_eq!(amps[1], Complex32::new(0.0, 0.0));
    }
}
