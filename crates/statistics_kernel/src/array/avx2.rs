//! AVX2 array kernels.
//!
//! Horizontal max is a permute/max tree since AVX2 has no
//! `_mm256_reduce_max_ps`.

use std::arch::x86_64::*;

use super::portable::{highest_lane, horizontal_sum};
use super::INVALID_INDEX;
use crate::simd::F32_LANES;

/// # Safety
/// AVX2 must be available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn fill(value: f32, xs: &mut [f32]) {
    let v = _mm256_set1_ps(value);
    let len = xs.len();
    let p = xs.as_mut_ptr();
    let mut i = 0;
    while i + 4 * F32_LANES <= len {
        _mm256_storeu_ps(p.add(i), v);
        _mm256_storeu_ps(p.add(i + F32_LANES), v);
        _mm256_storeu_ps(p.add(i + 2 * F32_LANES), v);
        _mm256_storeu_ps(p.add(i + 3 * F32_LANES), v);
        i += 4 * F32_LANES;
    }
    while i + 2 * F32_LANES <= len {
        _mm256_storeu_ps(p.add(i), v);
        _mm256_storeu_ps(p.add(i + F32_LANES), v);
        i += 2 * F32_LANES;
    }
    while i + F32_LANES <= len {
        _mm256_storeu_ps(p.add(i), v);
        i += F32_LANES;
    }
    for x in &mut xs[i..] {
        *x = value;
    }
}

/// # Safety
/// AVX2 must be available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn sum(xs: &[f32]) -> f32 {
    let len = xs.len();
    let p = xs.as_ptr();
    let mut acc = _mm256_setzero_ps();
    let mut i = 0;
    if len >= F32_LANES {
        acc = _mm256_loadu_ps(p);
        i = F32_LANES;
        while i + F32_LANES <= len {
            acc = _mm256_add_ps(acc, _mm256_loadu_ps(p.add(i)));
            i += F32_LANES;
        }
    }
    let mut lanes = [0.0f32; F32_LANES];
    _mm256_storeu_ps(lanes.as_mut_ptr(), acc);
    let mut total = horizontal_sum(&lanes);
    for &x in &xs[i..] {
        total += x;
    }
    total
}

/// # Safety
/// AVX2 must be available.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn argmax(xs: &[f32]) -> usize {
    let len = xs.len();
    let p = xs.as_ptr();
    let mut max = f32::NEG_INFINITY;
    let mut index = INVALID_INDEX;
    let mut i = 0;
    while i + F32_LANES <= len {
        let x = _mm256_loadu_ps(p.add(i));
        // Swap the 128-bit halves.
        let m0 = _mm256_permute2f128_ps::<1>(x, x);
        let m1 = _mm256_max_ps(x, m0);
        // [0,1,2,3] -> [2,3,0,1] within each half.
        let m2 = _mm256_permute_ps::<0x4e>(m1);
        let m3 = _mm256_max_ps(m1, m2);
        // [0,1,2,3] -> [1,0,3,2] within each half.
        let m4 = _mm256_permute_ps::<0xb1>(m3);
        let m = _mm256_max_ps(m3, m4);
        let group_max = _mm256_cvtss_f32(m);
        if group_max > max {
            let eq = _mm256_cmp_ps::<_CMP_EQ_OQ>(x, m);
            let mask = _mm256_movemask_ps(eq) as u32;
            max = group_max;
            index = i + highest_lane(mask);
        }
        i += F32_LANES;
    }
    while i < len {
        let x = *p.add(i);
        if x > max {
            max = x;
            index = i;
        }
        i += 1;
    }
    index
}
