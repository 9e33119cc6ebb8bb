//! # Bit-Stream Generator
//!
//! Four XorShift128+ lanes advanced in lockstep. One vector step yields four
//! 64-bit outputs, read as eight consecutive 32-bit words (low half first).
//!
//! ## Reproducibility
//!
//! - Identically seeded generators driven by the same sequence of request
//!   sizes produce identical streams.
//! - A request shorter than one vector step, and the tail of any longer
//!   request, is served by a scalar step that advances **lane 0 only**.
//!   Two sessions drawing the same total through different batchings diverge
//!   from the first point where their batching differs.
//!
//! ## Module Structure
//!
//! - `state`: [`XorShift128PlusState`], the raw recurrence and word streaming
//! - `stream`: [`XorShift128PlusStreamRng`], seeding, burn-in and
//!   `rand::RngCore` / `rand::SeedableRng` integration
//!
//! ## Usage Example
//!
//! ```rust
//! use statistics_kernel::rng::{StreamRng, XorShift128PlusStreamRng};
//!
//! let mut rng = XorShift128PlusStreamRng::new(&[1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! let mut words = [0u32; 19];
//! rng.sample_u32(&mut words);
//!
//! let mut normals = vec![0.0f32; 1000];
//! rng.sample_normal_f32(&mut normals);
//! assert!(normals.iter().all(|x| x.is_finite()));
//! ```

mod state;
mod stream;

pub use state::{unit_f32, XorShift128PlusState, UNIFORM_DISCARD_BITS, WORDS_PER_STEP};
pub use stream::{StreamSeed, XorShift128PlusStreamRng, BURN_IN, SEED_WORDS};

pub(crate) use state::step_word;

use rand::RngCore;

/// Batch sampling interface over a bit-stream generator.
///
/// Every method fills the caller's buffer in place and advances the
/// generator by exactly the steps the request size dictates.
pub trait StreamRng: RngCore {
    /// Fills `xs` with raw 32-bit words.
    fn sample_u32(&mut self, xs: &mut [u32]);

    /// Fills `xs` with uniform floats in `[0, 1)`.
    fn sample_uniform_f32(&mut self, xs: &mut [f32]);

    /// Fills `xs` with standard normal variates (Box-Muller, paired outputs
    /// share one radius/angle draw).
    fn sample_normal_f32(&mut self, xs: &mut [f32]);

    /// Fills `xs` with Gaussian approximations to Beta posteriors.
    ///
    /// Element `i` has mean `succ_ratio[i]` and standard deviation
    /// `sqrt(succ_ratio[i] * (1 - succ_ratio[i]) / num_trials[i])`. Parameter
    /// slices must be as long as `xs`; out-of-domain values yield NaN/Inf.
    fn sample_approx_beta_f32(&mut self, succ_ratio: &[f32], num_trials: &[f32], xs: &mut [f32]);
}
