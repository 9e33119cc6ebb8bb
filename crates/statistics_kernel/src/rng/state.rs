//! Lane-parallel XorShift128+ state and raw word streaming.

use crate::error::KernelError;
use crate::simd::U64_LANES;

/// 32-bit words produced by one vector step (four 64-bit outputs).
pub const WORDS_PER_STEP: usize = 2 * U64_LANES;

/// Low-order bits discarded when turning a raw word into a uniform float.
pub const UNIFORM_DISCARD_BITS: u32 = 8;

const UNIFORM_SCALE: f32 = 1.0 / (1u32 << (32 - UNIFORM_DISCARD_BITS)) as f32;

/// Maps a raw 32-bit word to `[0, 1)` using its top 24 bits.
#[inline(always)]
pub fn unit_f32(word: u32) -> f32 {
    (word >> UNIFORM_DISCARD_BITS) as f32 * UNIFORM_SCALE
}

/// The `k`-th 32-bit word of a vector step: lane `k / 2`, low half first.
#[inline(always)]
pub(crate) fn step_word(outputs: &[u64; U64_LANES], k: usize) -> u32 {
    (outputs[k / 2] >> (32 * (k % 2))) as u32
}

/// State of four interleaved XorShift128+ generators.
///
/// Lane `i` is the word pair `(s0[i], s1[i])`. A step reads `s1[i]` as the
/// recurrence's first operand and `s0[i]` as its second, then stores the old
/// first operand into `s0[i]` and the freshly mixed word into `s1[i]`:
///
/// ```text
/// x = s1[i], y = s0[i]
/// y ^= y << 23
/// y  = y ^ x ^ (y >> 17) ^ (x >> 26)
/// s0[i] = x, s1[i] = y, output = x + y
/// ```
///
/// A lane whose two words are both zero emits zeros forever; it is never
/// repaired. Use [`XorShift128PlusState::try_from_words`] to reject such seeds.
///
/// The state is caller-owned and must not be advanced concurrently; distinct
/// instances are fully independent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct XorShift128PlusState {
    s0: [u64; U64_LANES],
    s1: [u64; U64_LANES],
}

impl XorShift128PlusState {
    /// Creates a state from its raw word arrays without validation.
    #[inline]
    pub const fn from_words(s0: [u64; U64_LANES], s1: [u64; U64_LANES]) -> Self {
        Self { s0, s1 }
    }

    /// Creates a state from raw words, rejecting any all-zero lane.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateLane`] naming the first all-zero lane.
    pub fn try_from_words(
        s0: [u64; U64_LANES],
        s1: [u64; U64_LANES],
    ) -> Result<Self, KernelError> {
        let state = Self::from_words(s0, s1);
        match state.degenerate_lane() {
            Some(lane) => Err(KernelError::DegenerateLane { lane }),
            None => Ok(state),
        }
    }

    /// Creates a state from up to eight seed words.
    ///
    /// Words `0..4` fill `s0`, words `4..8` fill `s1`; missing words stay zero
    /// and extra words are ignored.
    pub fn from_seed_slice(seed: &[u64]) -> Self {
        let mut state = Self::default();
        state.reseed(seed);
        state
    }

    /// Overwrites the words covered by `seed`, leaving the rest untouched.
    pub fn reseed(&mut self, seed: &[u64]) {
        for (dst, &word) in self.s0.iter_mut().chain(self.s1.iter_mut()).zip(seed) {
            *dst = word;
        }
    }

    /// Returns the raw `(s0, s1)` word arrays.
    #[inline]
    pub fn words(&self) -> ([u64; U64_LANES], [u64; U64_LANES]) {
        (self.s0, self.s1)
    }

    /// Returns the first lane whose two words are both zero, if any.
    pub fn degenerate_lane(&self) -> Option<usize> {
        (0..U64_LANES).find(|&lane| self.s0[lane] == 0 && self.s1[lane] == 0)
    }

    #[inline(always)]
    fn step_lane(&mut self, lane: usize) -> u64 {
        let x = self.s1[lane];
        let mut y = self.s0[lane];
        self.s0[lane] = x;
        y ^= y << 23;
        y = y ^ x ^ (y >> 17) ^ (x >> 26);
        self.s1[lane] = y;
        x.wrapping_add(y)
    }

    /// Scalar tail step: advances lane 0 only and returns its 64-bit output.
    ///
    /// Lanes 1-3 stay frozen, which is why streams depend on request sizes.
    #[inline(always)]
    pub fn step_lane0(&mut self) -> u64 {
        self.step_lane(0)
    }

    /// Vector step: advances all four lanes in lockstep.
    #[inline(always)]
    pub fn step_vector(&mut self) -> [u64; U64_LANES] {
        std::array::from_fn(|lane| self.step_lane(lane))
    }

    /// Fills `out` with raw 32-bit words.
    ///
    /// Full blocks of [`WORDS_PER_STEP`] words come from vector steps, each
    /// 64-bit lane output split into its low then high half. The remainder is
    /// served two words per lane-0 step, and an odd last word takes the low
    /// half of one more lane-0 step.
    pub fn stream_words(&mut self, out: &mut [u32]) {
        let mut blocks = out.chunks_exact_mut(WORDS_PER_STEP);
        for block in blocks.by_ref() {
            let outputs = self.step_vector();
            for (k, word) in block.iter_mut().enumerate() {
                *word = step_word(&outputs, k);
            }
        }
        let mut pairs = blocks.into_remainder().chunks_exact_mut(2);
        for pair in pairs.by_ref() {
            let output = self.step_lane0();
            pair[0] = output as u32;
            pair[1] = (output >> 32) as u32;
        }
        if let [last] = pairs.into_remainder() {
            *last = self.step_lane0() as u32;
        }
    }

    /// Fills `out` with uniform floats in `[0, 1)` with 24-bit precision.
    ///
    /// Full blocks of [`WORDS_PER_STEP`] come from vector steps (one word per
    /// float). Each remaining float costs one lane-0 step and uses the low
    /// word of its output.
    pub fn stream_uniform(&mut self, out: &mut [f32]) {
        let mut blocks = out.chunks_exact_mut(WORDS_PER_STEP);
        for block in blocks.by_ref() {
            let outputs = self.step_vector();
            for (k, x) in block.iter_mut().enumerate() {
                *x = unit_f32(step_word(&outputs, k));
            }
        }
        for x in blocks.into_remainder() {
            *x = unit_f32(self.step_lane0() as u32);
        }
    }
}
