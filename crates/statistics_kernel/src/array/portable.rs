//! Portable lane-array kernels.
//!
//! Each routine mirrors the AVX2 kernel operation for operation (same group
//! width, same reduction tree, same max/compare semantics) so the two paths
//! agree bit for bit.

use super::INVALID_INDEX;
use crate::simd::F32_LANES;

/// De Bruijn table mapping `(v * 0x07C4ACDD) >> 27` to `log2(v)` for every
/// `v` of the form `2^(k+1) - 1`.
///
/// See <http://graphics.stanford.edu/~seander/bithacks.html#IntegerLogDeBruijn>.
const LOG2_DEBRUIJN_OFFSETS: [usize; 32] = [
    0, 9, 1, 10, 13, 21, 2, 29, 11, 14, 16, 18, 22, 25, 3, 30, 8, 12, 20, 28, 15, 17, 24, 7, 19,
    27, 23, 6, 26, 5, 4, 31,
];

const DEBRUIJN_MULTIPLIER: u32 = 0x07C4_ACDD;

/// Position of the highest set bit of an 8-lane equality mask.
///
/// The mask is smeared so every bit at or below its highest set bit is set,
/// then the position is recovered from the De Bruijn table.
#[inline(always)]
pub(crate) fn highest_lane(mask: u32) -> usize {
    let mut smeared = mask & 0xff;
    smeared |= smeared >> 1;
    smeared |= smeared >> 2;
    smeared |= smeared >> 4;
    LOG2_DEBRUIJN_OFFSETS[(smeared.wrapping_mul(DEBRUIJN_MULTIPLIER) >> 27) as usize]
}

/// `maxps` semantics: the second operand wins on equality or NaN.
#[inline(always)]
fn lane_max(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Horizontal maximum tree: swap 128-bit halves, then swap pairs, then swap
/// neighbours, taking the lane-wise max after each permutation.
#[inline(always)]
fn group_max(x: &[f32; F32_LANES]) -> [f32; F32_LANES] {
    let m1: [f32; F32_LANES] = std::array::from_fn(|i| lane_max(x[i], x[i ^ 4]));
    let m3: [f32; F32_LANES] = std::array::from_fn(|i| lane_max(m1[i], m1[i ^ 2]));
    std::array::from_fn(|i| lane_max(m3[i], m3[i ^ 1]))
}

/// Left-to-right sum of the lane partials.
#[inline(always)]
pub(crate) fn horizontal_sum(lanes: &[f32; F32_LANES]) -> f32 {
    let mut total = lanes[0];
    for &lane in &lanes[1..] {
        total += lane;
    }
    total
}

pub(crate) fn fill(value: f32, xs: &mut [f32]) {
    let len = xs.len();
    let mut i = 0;
    for tier in [4 * F32_LANES, 2 * F32_LANES, F32_LANES] {
        while i + tier <= len {
            xs[i..i + tier].fill(value);
            i += tier;
        }
    }
    for x in &mut xs[i..] {
        *x = value;
    }
}

pub(crate) fn sum(xs: &[f32]) -> f32 {
    let mut groups = xs.chunks_exact(F32_LANES);
    let mut acc = [0.0f32; F32_LANES];
    if let Some(first) = groups.next() {
        acc.copy_from_slice(first);
        for group in groups.by_ref() {
            for (lane, &x) in acc.iter_mut().zip(group) {
                *lane += x;
            }
        }
    }
    let mut total = horizontal_sum(&acc);
    for &x in groups.remainder() {
        total += x;
    }
    total
}

pub(crate) fn argmax(xs: &[f32]) -> usize {
    let mut max = f32::NEG_INFINITY;
    let mut index = INVALID_INDEX;
    let mut groups = xs.chunks_exact(F32_LANES);
    for (g, group) in groups.by_ref().enumerate() {
        let x: [f32; F32_LANES] = std::array::from_fn(|lane| group[lane]);
        let m = group_max(&x);
        if m[0] > max {
            let mut mask = 0u32;
            for lane in 0..F32_LANES {
                if x[lane] == m[lane] {
                    mask |= 1 << lane;
                }
            }
            max = m[0];
            index = g * F32_LANES + highest_lane(mask);
        }
    }
    let offset = xs.len() - groups.remainder().len();
    for (j, &x) in groups.remainder().iter().enumerate() {
        if x > max {
            max = x;
            index = offset + j;
        }
    }
    index
}
