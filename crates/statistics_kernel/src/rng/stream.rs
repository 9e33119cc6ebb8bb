//! Owning stream generator with seed management and `rand` integration.

use rand::{Error, Rng, RngCore, SeedableRng};
use tracing::debug;

use super::state::{XorShift128PlusState, WORDS_PER_STEP};
use super::StreamRng;
use crate::sampling;

/// Number of 64-bit seed words (two per lane).
pub const SEED_WORDS: usize = 8;

/// `next_u64` draws discarded after seeding.
///
/// Sparse seeds (many zero bits) leave the early outputs poorly mixed; see
/// Figure 4 of <http://arxiv.org/abs/1404.0390>. The draws are tail requests,
/// so burn-in advances lane 0 only.
pub const BURN_IN: usize = 20;

/// 64-byte seed for [`SeedableRng`]: eight little-endian words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamSeed(
    /// Raw seed bytes.
    pub [u8; 8 * SEED_WORDS],
);

impl Default for StreamSeed {
    fn default() -> Self {
        Self([0; 8 * SEED_WORDS])
    }
}

impl AsMut<[u8]> for StreamSeed {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

/// Vectorised XorShift128+ generator.
///
/// Wraps a [`XorShift128PlusState`] and exposes it through [`StreamRng`] and
/// [`RngCore`]. Bulk requests run four lanes in lockstep; short requests and
/// the tail of long ones advance lane 0 only.
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::rng::{StreamRng, XorShift128PlusStreamRng};
///
/// let mut rng1 = XorShift128PlusStreamRng::new(&[11, 12, 13, 14, 15, 16, 17, 18]);
/// let mut rng2 = XorShift128PlusStreamRng::new(&[11, 12, 13, 14, 15, 16, 17, 18]);
///
/// let mut xs = vec![0.0f32; 100];
/// let mut ys = vec![0.0f32; 100];
/// rng1.sample_uniform_f32(&mut xs);
/// rng2.sample_uniform_f32(&mut ys);
/// assert_eq!(xs, ys);
/// assert!(xs.iter().all(|&x| (0.0..1.0).contains(&x)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XorShift128PlusStreamRng {
    state: XorShift128PlusState,
}

impl XorShift128PlusStreamRng {
    /// Number of seed words accepted by [`Self::new`].
    #[inline]
    pub const fn seed_len() -> usize {
        SEED_WORDS
    }

    /// Seeds the generator and runs the [`BURN_IN`] draws.
    pub fn new(seed: &[u64]) -> Self {
        let mut rng = Self::new_unseeded();
        rng.seed(seed);
        rng.burn(BURN_IN);
        debug!(
            seed_words = seed.len().min(SEED_WORDS),
            burn_in = BURN_IN,
            "seeded xorshift128+ stream generator"
        );
        rng
    }

    /// Creates a generator with all-zero (degenerate) state.
    ///
    /// Must be seeded before use; an unseeded generator emits only zeros.
    pub fn new_unseeded() -> Self {
        Self {
            state: XorShift128PlusState::default(),
        }
    }

    /// Seeds from eight words drawn from another generator.
    pub fn with_rng_seed<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let seed: [u64; SEED_WORDS] = std::array::from_fn(|_| rng.next_u64());
        Self::new(&seed)
    }

    /// Wraps an existing state as-is, without burn-in.
    pub fn from_state(state: XorShift128PlusState) -> Self {
        Self { state }
    }

    /// Overwrites the state words covered by `seed` (see
    /// [`XorShift128PlusState::reseed`]).
    pub fn seed(&mut self, seed: &[u64]) {
        self.state.reseed(seed);
    }

    /// Discards `burn64` outputs of `next_u64`.
    pub fn burn(&mut self, burn64: usize) {
        for _ in 0..burn64 {
            self.next_u64();
        }
    }

    /// Returns the generator state.
    #[inline]
    pub fn state(&self) -> &XorShift128PlusState {
        &self.state
    }

    /// Returns the generator state mutably, for the free sampling functions.
    #[inline]
    pub fn state_mut(&mut self) -> &mut XorShift128PlusState {
        &mut self.state
    }

    /// Consumes the generator, returning its state.
    #[inline]
    pub fn into_state(self) -> XorShift128PlusState {
        self.state
    }
}

impl RngCore for XorShift128PlusStreamRng {
    /// One-word stream request: the low half of a lane-0 step.
    fn next_u32(&mut self) -> u32 {
        let mut xs = [0u32; 1];
        self.sample_u32(&mut xs);
        xs[0]
    }

    /// Two-word stream request: one full lane-0 output.
    fn next_u64(&mut self) -> u64 {
        let mut xs = [0u32; 2];
        self.sample_u32(&mut xs);
        u64::from(xs[0]) | (u64::from(xs[1]) << 32)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut blocks = dest.chunks_exact_mut(4 * WORDS_PER_STEP);
        for block in blocks.by_ref() {
            let mut words = [0u32; WORDS_PER_STEP];
            self.state.stream_words(&mut words);
            for (bytes, word) in block.chunks_exact_mut(4).zip(words) {
                bytes.copy_from_slice(&word.to_le_bytes());
            }
        }
        for chunk in blocks.into_remainder().chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift128PlusStreamRng {
    type Seed = StreamSeed;

    fn from_seed(seed: StreamSeed) -> Self {
        let words: [u64; SEED_WORDS] = std::array::from_fn(|i| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&seed.0[8 * i..8 * i + 8]);
            u64::from_le_bytes(bytes)
        });
        Self::new(&words)
    }
}

impl StreamRng for XorShift128PlusStreamRng {
    #[inline]
    fn sample_u32(&mut self, xs: &mut [u32]) {
        self.state.stream_words(xs);
    }

    #[inline]
    fn sample_uniform_f32(&mut self, xs: &mut [f32]) {
        self.state.stream_uniform(xs);
    }

    #[inline]
    fn sample_normal_f32(&mut self, xs: &mut [f32]) {
        sampling::sample_gaussian(&mut self.state, xs);
    }

    #[inline]
    fn sample_approx_beta_f32(&mut self, succ_ratio: &[f32], num_trials: &[f32], xs: &mut [f32]) {
        sampling::sample_beta_approx(&mut self.state, succ_ratio, num_trials, xs);
    }
}
