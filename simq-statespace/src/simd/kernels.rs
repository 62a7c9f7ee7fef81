//! Low-level probability kernels

use super::{norm_sqr_f64, LANES};
use num_complex::Complex32;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Portable kernel: fixed-width blocks the compiler can vectorize
pub fn probabilities_lanes(amplitudes: &[Complex32], out: &mut [f64]) {
    let blocks = amplitudes.len() / LANES * LANES;

    for (dst, src) in out[..blocks]
        .chunks_exact_mut(LANES)
        .zip(amplitudes[..blocks].chunks_exact(LANES))
    {
        let mut re = [0.0f64; LANES];
        let mut im = [0.0f64; LANES];
        for k in 0..LANES {
            re[k] = src[k].re as f64;
            im[k] = src[k].im as f64;
        }
        for k in 0..LANES {
            dst[k] = re[k] * re[k] + im[k] * im[k];
        }
    }

    for (p, &a) in out[blocks..amplitudes.len()]
        .iter_mut()
        .zip(&amplitudes[blocks..])
    {
        *p = norm_sqr_f64(a);
    }
}

/// Compute probabilities using AVX2
///
/// Processes 4 amplitudes (8 `f32`) per step, widening to `f64` before
/// squaring.
///
/// # Safety
/// The CPU must support AVX2 and `out.len() >= amplitudes.len()`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
pub unsafe fn probabilities_avx2(amplitudes: &[Complex32], out: &mut [f64]) {
    let len = amplitudes.len();
    let src = amplitudes.as_ptr() as *const f32;
    let dst = out.as_mut_ptr();

    let mut i = 0;
    while i + 4 <= len {
        // [re0, im0, re1, im1] and [re2, im2, re3, im3]
        let lo = _mm256_cvtps_pd(_mm_loadu_ps(src.add(i * 2)));
        let hi = _mm256_cvtps_pd(_mm_loadu_ps(src.add(i * 2 + 4)));

        // [p0, p2, p1, p3]
        let sums = _mm256_hadd_pd(_mm256_mul_pd(lo, lo), _mm256_mul_pd(hi, hi));

        // [p0, p1, p2, p3]
        let ordered = _mm256_permute4x64_pd(sums, 0b11_01_10_00);
        _mm256_storeu_pd(dst.add(i), ordered);

        i += 4;
    }

    // Handle remaining elements
    while i < len {
        *dst.add(i) = norm_sqr_f64(amplitudes[i]);
        i += 1;
    }
}
