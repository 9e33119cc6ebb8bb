//! # Distribution Samplers
//!
//! Transforms of the raw bit stream into Gaussian, Beta-approximation and
//! discrete draws. All samplers write into caller buffers and advance the
//! caller's [`XorShift128PlusState`].
//!
//! ## Box-Muller Pairing
//!
//! One `(u1, u2)` uniform pair yields a shared radius and angle, which feed two
//! outputs: a cosine sample and a sine sample. The two outputs of a pair are
//! therefore dependent, even when they are rescaled to different targets.
//!
//! - Blocks of 16 outputs draw two vector steps. Lane `j` pairs output `j`
//!   (cosine) with output `j + 8` (sine).
//! - Remaining outputs are paired consecutively, `(i, i + 1)`, each pair
//!   costing two lane-0 steps.
//! - An odd final output also costs two lane-0 steps and keeps only the
//!   cosine sample.
//!
//! A request of `count` outputs thus consumes `2 * ceil(count / 2)` uniform
//! draws regardless of parity.
//!
//! ## Module Structure
//!
//! - `sample_gaussian`: standard normal variates
//! - `sample_beta_approx`: Gaussian approximation to Beta posteriors
//! - `sample_discrete_cdf` / `sample_discrete_cdf_scaled`: one draw from a
//!   CDF table

use std::f32::consts::PI;

use crate::array::{binary_search, INVALID_INDEX};
use crate::rng::{step_word, unit_f32, XorShift128PlusState};
use crate::simd::F32_LANES;


const TWO_PI: f32 = 2.0 * PI;

/// Outputs produced by one pair of vector steps.
const BLOCK: usize = 2 * F32_LANES;

/// Radius and angle of the Box-Muller transform for one uniform pair.
#[inline(always)]
fn polar(u1: f32, u2: f32) -> (f32, f32) {
    let radius = (-2.0 * (1.0 - u1).ln()).sqrt();
    (radius, TWO_PI * u2)
}

#[inline(always)]
fn rescale((mu, sd): (f32, f32), z: f32) -> f32 {
    mu + sd * z
}

/// Shared Box-Muller driver. `params(i)` returns the `(mean, sd)` target of
/// output `i`.
fn box_muller_fill<P>(state: &mut XorShift128PlusState, out: &mut [f32], params: P)
where
    P: Fn(usize) -> (f32, f32),
{
    let mut blocks = out.chunks_exact_mut(BLOCK);
    let mut base = 0;
    for block in blocks.by_ref() {
        let r1 = state.step_vector();
        let r2 = state.step_vector();
        let (cos_half, sin_half) = block.split_at_mut(F32_LANES);
        for lane in 0..F32_LANES {
            let (radius, theta) = polar(
                unit_f32(step_word(&r1, lane)),
                unit_f32(step_word(&r2, lane)),
            );
            let (sin, cos) = theta.sin_cos();
            cos_half[lane] = rescale(params(base + lane), radius * cos);
            sin_half[lane] = rescale(params(base + F32_LANES + lane), radius * sin);
        }
        base += BLOCK;
    }

    let mut pairs = blocks.into_remainder().chunks_exact_mut(2);
    for pair in pairs.by_ref() {
        let u1 = unit_f32(state.step_lane0() as u32);
        let u2 = unit_f32(state.step_lane0() as u32);
        let (radius, theta) = polar(u1, u2);
        let (sin, cos) = theta.sin_cos();
        pair[0] = rescale(params(base), radius * cos);
        pair[1] = rescale(params(base + 1), radius * sin);
        base += 2;
    }

    if let [last] = pairs.into_remainder() {
        let u1 = unit_f32(state.step_lane0() as u32);
        let u2 = unit_f32(state.step_lane0() as u32);
        let (radius, theta) = polar(u1, u2);
        *last = rescale(params(base), radius * theta.cos());
    }
}

/// Fills `out` with standard normal variates.
///
/// Uses the same batching and pairing as [`sample_beta_approx`], with every
/// target fixed at mean 0 and standard deviation 1.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::rng::XorShift128PlusState;
/// use statistics_kernel::sampling::sample_gaussian;
///
/// let mut state = XorShift128PlusState::from_seed_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
/// let mut zs = vec![0.0f32; 33];
/// sample_gaussian(&mut state, &mut zs);
/// assert!(zs.iter().all(|z| z.is_finite()));
/// ```
pub fn sample_gaussian(state: &mut XorShift128PlusState, out: &mut [f32]) {
    box_muller_fill(state, out, |_| (0.0, 1.0));
}

/// Fills `out` with Gaussian approximations to Beta posteriors.
///
/// Output `i` targets mean `succ_ratio[i]` and standard deviation
/// `sqrt(succ_ratio[i] * (1 - succ_ratio[i]) / num_trials[i])`, the normal
/// approximation to a binomial proportion. Parameters are not validated:
/// ratios outside `[0, 1]` or non-positive trial counts yield NaN or Inf.
///
/// # Panics
///
/// Panics if either parameter slice is shorter than `out`. Use
/// [`crate::checked::sample_approx_beta`] to get an error instead.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::rng::XorShift128PlusState;
/// use statistics_kernel::sampling::sample_beta_approx;
///
/// let mut state = XorShift128PlusState::from_seed_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
/// let succ_ratio = [0.2f32, 0.8, 0.5];
/// let num_trials = [1000.0f32, 1000.0, 50.0];
/// let mut xs = [0.0f32; 3];
/// sample_beta_approx(&mut state, &succ_ratio, &num_trials, &mut xs);
/// assert!((xs[0] - 0.2).abs() < 0.1);
/// ```
pub fn sample_beta_approx(
    state: &mut XorShift128PlusState,
    succ_ratio: &[f32],
    num_trials: &[f32],
    out: &mut [f32],
) {
    box_muller_fill(state, out, |i| {
        let mu = succ_ratio[i];
        (mu, (mu * (1.0 - mu) / num_trials[i]).sqrt())
    });
}

/// Maps a uniform draw to the bucket of an inclusive CDF table containing it.
#[inline]
pub(crate) fn cdf_bucket(cdf: &[f32], u: f32) -> usize {
    binary_search(cdf, u).wrapping_add(1).min(cdf.len() - 1)
}

/// Draws one bucket index from an inclusive CDF table.
///
/// Bucket `k` covers `[cdf[k - 1], cdf[k])` (with `cdf[-1] = 0`). Draws landing
/// at or past the last entry are clamped to the last bucket. Consumes a single
/// uniform, i.e. one lane-0 step. Returns [`INVALID_INDEX`] for an empty
/// table without touching the generator.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::rng::XorShift128PlusState;
/// use statistics_kernel::sampling::sample_discrete_cdf;
///
/// let mut state = XorShift128PlusState::from_seed_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
/// let cdf = [0.1f32, 0.3, 0.6, 1.0];
/// let bucket = sample_discrete_cdf(&cdf, &mut state);
/// assert!(bucket < cdf.len());
/// ```
pub fn sample_discrete_cdf(cdf: &[f32], state: &mut XorShift128PlusState) -> usize {
    if cdf.is_empty() {
        return INVALID_INDEX;
    }
    let mut u = [0.0f32; 1];
    state.stream_uniform(&mut u);
    cdf_bucket(cdf, u[0])
}

/// Like [`sample_discrete_cdf`], for an unnormalised table: the draw is scaled
/// by the last entry first.
pub fn sample_discrete_cdf_scaled(cdf: &[f32], state: &mut XorShift128PlusState) -> usize {
    let Some(&total) = cdf.last() else {
        return INVALID_INDEX;
    };
    let mut u = [0.0f32; 1];
    state.stream_uniform(&mut u);
    cdf_bucket(cdf, u[0] * total)
}
