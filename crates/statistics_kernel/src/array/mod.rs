//! # Array Kernels
//!
//! Reductions and search over contiguous `f32` buffers. All kernels are
//! synchronous, allocation-free and total: they never panic on any input
//! length and report "no position" through [`INVALID_INDEX`].
//!
//! ## Grouping
//!
//! `sum` and `argmax` scan the buffer in groups of
//! [`F32_LANES`](crate::simd::F32_LANES) elements followed by a scalar tail.
//! The AVX2 and portable implementations use the same grouping, so results
//! are bit-identical on every host:
//!
//! - `sum` accumulates lane-interleaved partial sums and reduces them
//!   left-to-right, which differs in the low-order bits from a sequential sum.
//! - `argmax` lets the first group reaching the eventual maximum win, resolves
//!   duplicates inside that group to the highest lane, and only lets the tail
//!   win on a strictly greater value.
//!
//! ## Module Structure
//!
//! - `portable`: lane-array implementations (all targets)
//! - `avx2`: 256-bit implementations (x86-64, runtime-detected)

#[cfg(target_arch = "x86_64")]
mod avx2;
mod portable;


#[cfg(target_arch = "x86_64")]
use crate::simd::detect_simd;
use crate::simd::prefetch_read;

/// Sentinel returned when no valid index exists: `argmax` of an empty buffer,
/// or `binary_search` for a query below the first table entry.
///
/// Equal to the unsigned decrement of zero; never a valid position.
pub const INVALID_INDEX: usize = usize::MAX;

/// Writes `value` into every element of `xs`.
///
/// Wide stores are used first (4, 2, then 1 vector per iteration) and a scalar
/// loop finishes the tail; the result is identical for every tier.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::array::fill;
///
/// let mut xs = vec![0.0f32; 37];
/// fill(2.5, &mut xs);
/// assert!(xs.iter().all(|&x| x == 2.5));
/// ```
#[inline]
pub fn fill(value: f32, xs: &mut [f32]) {
    #[cfg(target_arch = "x86_64")]
    {
        if detect_simd().has_avx2() {
            // SAFETY: AVX2 availability was checked at runtime.
            unsafe { avx2::fill(value, xs) };
            return;
        }
    }
    portable::fill(value, xs)
}

/// Returns the total of all elements.
///
/// Elements are summed in lane-interleaved groups, the lane partials are then
/// combined, and the tail is added last. Compare against sequential sums with
/// a tolerance, not bit equality. An empty buffer sums to `0.0`.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::array::sum;
///
/// let xs = vec![0.5f32; 100];
/// assert_eq!(sum(&xs), 50.0);
/// ```
#[inline]
pub fn sum(xs: &[f32]) -> f32 {
    #[cfg(target_arch = "x86_64")]
    {
        if detect_simd().has_avx2() {
            // SAFETY: AVX2 availability was checked at runtime.
            return unsafe { avx2::sum(xs) };
        }
    }
    portable::sum(xs)
}

/// Returns the index of the maximum element.
///
/// # Tie-break
///
/// - Across groups, a group replaces the running maximum only when its own
///   maximum is strictly greater, so the earliest group wins.
/// - Within the winning group, the highest lane equal to the group maximum is
///   reported, so the latest duplicate wins.
/// - The tail past the last full group only wins on a strictly greater value.
///
/// Returns [`INVALID_INDEX`] for an empty buffer, and also when no element
/// exceeds negative infinity (all `-inf` or all NaN).
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::array::{argmax, INVALID_INDEX};
///
/// // One full group with two equal maxima: the later one wins.
/// let xs = [1.0f32, 5.0, 3.0, 5.0, 2.0, 0.0, 0.0, 0.0];
/// assert_eq!(argmax(&xs), 3);
///
/// assert_eq!(argmax(&[]), INVALID_INDEX);
/// ```
#[inline]
pub fn argmax(xs: &[f32]) -> usize {
    #[cfg(target_arch = "x86_64")]
    {
        if detect_simd().has_avx2() {
            // SAFETY: AVX2 availability was checked at runtime.
            return unsafe { avx2::argmax(xs) };
        }
    }
    portable::argmax(xs)
}

/// Returns the highest index `i` with `sorted[i] <= query`.
///
/// `sorted` must be ascending (not checked). Returns [`INVALID_INDEX`] when
/// `query` is below every element or the table is empty. The halving loop
/// selects the next base without branching on the comparison and prefetches
/// both candidate probes of the following round.
///
/// Given an inclusive CDF table and a uniform query, the sampled bucket is the
/// result plus one (see [`crate::sampling::sample_discrete_cdf`]).
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::array::{binary_search, INVALID_INDEX};
///
/// let cdf = [0.1f32, 0.3, 0.6, 1.0];
/// assert_eq!(binary_search(&cdf, 0.05), INVALID_INDEX);
/// assert_eq!(binary_search(&cdf, 0.3), 1);
/// assert_eq!(binary_search(&cdf, 0.99), 2);
/// assert_eq!(binary_search(&cdf, 1.0), 3);
/// ```
pub fn binary_search(sorted: &[f32], query: f32) -> usize {
    if sorted.is_empty() {
        return INVALID_INDEX;
    }
    let mut base = 0usize;
    let mut n = sorted.len();
    while n > 1 {
        let half = n / 2;
        prefetch_read(sorted, base + half / 2);
        prefetch_read(sorted, base + half + half / 2);
        // Written as a negated `>` so a NaN query walks right.
        #[allow(clippy::neg_cmp_op_on_partial_ord)]
        let step = usize::from(!(sorted[base + half] > query));
        base += half * step;
        n -= half;
    }
    base.wrapping_sub(usize::from(sorted[base] > query))
}

/// Writes the inclusive running sum of `src` into `dst`.
///
/// Turns a probability table into the CDF consumed by [`binary_search`].
/// Only the first `min(src.len(), dst.len())` elements are written.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::array::prefix_sum;
///
/// let pdf = [0.1f32, 0.2, 0.3, 0.4];
/// let mut cdf = [0.0f32; 4];
/// prefix_sum(&pdf, &mut cdf);
/// assert!((cdf[3] - 1.0).abs() < 1e-6);
/// ```
pub fn prefix_sum(src: &[f32], dst: &mut [f32]) {
    let mut running = 0.0f32;
    for (out, &x) in dst.iter_mut().zip(src) {
        running += x;
        *out = running;
    }
}
