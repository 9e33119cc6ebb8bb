//! # statistics_kernel: Numeric Kernels for Bandit Statistics
//!
//! ## Kernel Layer Role
//!
//! statistics_kernel is the bottom layer consumed by the statistics and
//! experimentation engine. It provides:
//! - Array kernels over contiguous `f32` buffers: `fill`, `sum`, `argmax`,
//!   `binary_search`, `prefix_sum` (`array`)
//! - A 4-lane XorShift128+ bit-stream generator (`rng`)
//! - Uniform, Gaussian and Beta-approximation samplers built on the raw
//!   generator output (`sampling`)
//! - Runtime SIMD capability detection (`simd`)
//! - An optional validating boundary layer (`checked`) and its error type
//!   (`error`)
//!
//! ## Unchecked Preconditions
//!
//! The hot paths are total functions. Buffer length mismatches, degenerate
//! (all-zero) generator lanes and out-of-domain distribution parameters are
//! the caller's responsibility: they produce NaN/Inf or a frozen stream, never
//! an error. The only error-like return value is [`array::INVALID_INDEX`].
//! Callers wanting validation route through [`checked`].
//!
//! ## Reproducibility
//!
//! Generator output depends on the exact sequence of request sizes. Requests
//! shorter than one vector step advance lane 0 only; see [`rng`].
//!
//! ## Usage Examples
//!
//! ```rust
//! use statistics_kernel::array::{argmax, binary_search, INVALID_INDEX};
//! use statistics_kernel::rng::{StreamRng, XorShift128PlusStreamRng};
//!
//! let mut rng = XorShift128PlusStreamRng::new(&[1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! let succ_ratio = vec![0.5f32; 64];
//! let num_trials = vec![400.0f32; 64];
//! let mut samples = vec![0.0f32; 64];
//! rng.sample_approx_beta_f32(&succ_ratio, &num_trials, &mut samples);
//!
//! let best_arm = argmax(&samples);
//! assert!(best_arm < samples.len());
//!
//! let cdf = [0.1f32, 0.3, 0.6, 1.0];
//! assert_eq!(binary_search(&cdf, 0.05), INVALID_INDEX);
//! assert_eq!(binary_search(&cdf, 0.3), 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation of `XorShift128PlusState`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod array;
pub mod checked;
pub mod error;
pub mod rng;
pub mod sampling;
pub mod simd;

pub use array::INVALID_INDEX;
pub use error::KernelError;
pub use rng::{StreamRng, XorShift128PlusState, XorShift128PlusStreamRng};
