//! SIMD capability detection.
//!
//! The CPU is probed once per process and the result cached. Kernels with a
//! vector implementation dispatch on [`detect_simd`]; every vector path has a
//! portable twin producing bit-identical output, so the detected level never
//! changes observable results.
//!
//! | Architecture | Instruction Set | f32 lanes | Status   |
//! |--------------|-----------------|-----------|----------|
//! | x86-64       | AVX2            | 8         | Vector   |
//! | Any          | Scalar          | 8 (array) | Fallback |

use std::sync::OnceLock;

/// Number of `f32` lanes in one vector group. Fixed at the AVX2 width on
/// every target so that grouping (and therefore `sum` rounding and `argmax`
/// tie-breaks) does not depend on the host.
pub const F32_LANES: usize = 8;

/// Number of 64-bit generator lanes.
pub const U64_LANES: usize = 4;

static SIMD_LEVEL: OnceLock<SimdLevel> = OnceLock::new();

/// SIMD capability level detected at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// Portable lane-array code.
    Scalar,
    /// AVX2 (256-bit vectors).
    Avx2,
}

impl SimdLevel {
    /// Returns true if 256-bit integer and float operations are available.
    #[inline]
    pub const fn has_avx2(self) -> bool {
        matches!(self, Self::Avx2)
    }
}

/// Returns the detected SIMD level, probing the CPU on first call.
#[inline]
pub fn detect_simd() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(probe)
}

fn probe() -> SimdLevel {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            tracing::debug!("AVX2 detected, using 256-bit array kernels");
            return SimdLevel::Avx2;
        }
    }
    tracing::debug!("no supported vector extension, using portable array kernels");
    SimdLevel::Scalar
}

/// Hints that `xs[index]` will be read soon, with no temporal locality.
///
/// Has no effect on results; out-of-range indices are ignored.
#[inline(always)]
pub fn prefetch_read(xs: &[f32], index: usize) {
    #[cfg(target_arch = "x86_64")]
    {
        use std::arch::x86_64::{_mm_prefetch, _MM_HINT_NTA};
        if index < xs.len() {
            // SAFETY: the pointer is in bounds and prefetch never faults.
            unsafe { _mm_prefetch::<_MM_HINT_NTA>(xs.as_ptr().add(index).cast::<i8>()) };
        }
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = (xs, index);
    }
}
