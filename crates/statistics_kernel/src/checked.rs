//! # Checked Boundary Layer
//!
//! Validating wrappers around the unchecked kernels. Each wrapper verifies the
//! preconditions its kernel leaves to the caller, logs a warning and returns
//! [`KernelError`] on violation, and otherwise forwards to the kernel
//! unchanged. Results are identical to calling the kernel directly.

use tracing::warn;

use crate::array;
use crate::error::KernelError;
use crate::rng::XorShift128PlusState;
use crate::sampling;

fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<(), KernelError> {
    if expected == actual {
        return Ok(());
    }
    warn!(name, expected, actual, "rejected parameter buffer: length mismatch");
    Err(KernelError::LengthMismatch {
        name,
        expected,
        actual,
    })
}

fn check_sorted(sorted: &[f32]) -> Result<(), KernelError> {
    // `!(a <= b)` also rejects NaN entries.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    let unsorted = sorted.windows(2).position(|w| !(w[0] <= w[1]));
    match unsorted {
        Some(i) => {
            warn!(index = i + 1, "rejected table: not sorted ascending");
            Err(KernelError::UnsortedInput { index: i + 1 })
        }
        None => Ok(()),
    }
}

fn check_state(state: &XorShift128PlusState) -> Result<(), KernelError> {
    match state.degenerate_lane() {
        Some(lane) => {
            warn!(lane, "rejected generator: degenerate lane");
            Err(KernelError::DegenerateLane { lane })
        }
        None => Ok(()),
    }
}

/// Validated [`sampling::sample_beta_approx`].
///
/// # Errors
///
/// - [`KernelError::LengthMismatch`] if a parameter slice differs in length
///   from `out`
/// - [`KernelError::DegenerateLane`] if the generator has an all-zero lane
///
/// # Examples
///
/// ```rust
/// use statistics_kernel::checked;
/// use statistics_kernel::rng::XorShift128PlusState;
/// use statistics_kernel::KernelError;
///
/// let mut state = XorShift128PlusState::from_seed_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
/// let mut xs = [0.0f32; 4];
/// let err = checked::sample_approx_beta(&mut state, &[0.5; 4], &[10.0; 3], &mut xs)
///     .unwrap_err();
/// assert!(matches!(err, KernelError::LengthMismatch { name: "num_trials", .. }));
/// ```
pub fn sample_approx_beta(
    state: &mut XorShift128PlusState,
    succ_ratio: &[f32],
    num_trials: &[f32],
    out: &mut [f32],
) -> Result<(), KernelError> {
    check_len("succ_ratio", out.len(), succ_ratio.len())?;
    check_len("num_trials", out.len(), num_trials.len())?;
    check_state(state)?;
    sampling::sample_beta_approx(state, succ_ratio, num_trials, out);
    Ok(())
}

/// Validated [`array::binary_search`].
///
/// The sentinel is still returned for a query below the first entry; only
/// unsorted tables are rejected.
///
/// # Errors
///
/// Returns [`KernelError::UnsortedInput`] naming the first descending (or NaN)
/// position.
pub fn binary_search(sorted: &[f32], query: f32) -> Result<usize, KernelError> {
    check_sorted(sorted)?;
    Ok(array::binary_search(sorted, query))
}

/// Validated [`array::prefix_sum`].
///
/// # Errors
///
/// Returns [`KernelError::LengthMismatch`] if `dst` is not as long as `src`.
pub fn prefix_sum(src: &[f32], dst: &mut [f32]) -> Result<(), KernelError> {
    check_len("dst", src.len(), dst.len())?;
    array::prefix_sum(src, dst);
    Ok(())
}

/// Validated [`sampling::sample_discrete_cdf`].
///
/// # Errors
///
/// - [`KernelError::EmptyInput`] for an empty table
/// - [`KernelError::UnsortedInput`] for a table that is not ascending
/// - [`KernelError::DegenerateLane`] if the generator has an all-zero lane
pub fn sample_discrete_cdf(
    cdf: &[f32],
    state: &mut XorShift128PlusState,
) -> Result<usize, KernelError> {
    if cdf.is_empty() {
        warn!("rejected empty CDF table");
        return Err(KernelError::EmptyInput("cdf"));
    }
    check_sorted(cdf)?;
    check_state(state)?;
    Ok(sampling::sample_discrete_cdf(cdf, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> XorShift128PlusState {
        XorShift128PlusState::from_seed_slice(&[1, 2, 3, 4, 5, 6, 7, 8])
    }

    #[test]
    fn test_sample_approx_beta_matches_unchecked() {
        let succ_ratio = [0.3f32; 21];
        let num_trials = [80.0f32; 21];

        let mut a = state();
        let mut xs = [0.0f32; 21];
        sample_approx_beta(&mut a, &succ_ratio, &num_trials, &mut xs).unwrap();

        let mut b = state();
        let mut ys = [0.0f32; 21];
        sampling::sample_beta_approx(&mut b, &succ_ratio, &num_trials, &mut ys);

        assert_eq!(xs, ys);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_approx_beta_rejects_lengths() {
        let mut s = state();
        let before = s.clone();
        let mut xs = [0.0f32; 8];

        let err = sample_approx_beta(&mut s, &[0.5; 7], &[10.0; 8], &mut xs).unwrap_err();
        assert_eq!(
            err,
            KernelError::LengthMismatch {
                name: "succ_ratio",
                expected: 8,
                actual: 7
            }
        );
        // Rejected calls leave the generator untouched.
        assert_eq!(s, before);
    }

    #[test]
    fn test_sample_approx_beta_rejects_degenerate_state() {
        let mut s = XorShift128PlusState::from_words([1, 2, 3, 0], [5, 6, 7, 0]);
        let mut xs = [0.0f32; 4];
        let err = sample_approx_beta(&mut s, &[0.5; 4], &[10.0; 4], &mut xs).unwrap_err();
        assert_eq!(err, KernelError::DegenerateLane { lane: 3 });
    }

    #[test]
    fn test_binary_search_sortedness() {
        assert_eq!(binary_search(&[0.1, 0.3, 0.6, 1.0], 0.45), Ok(1));
        assert_eq!(binary_search(&[0.1, 0.3, 0.6, 1.0], 0.0), Ok(crate::INVALID_INDEX));
        assert_eq!(binary_search(&[], 0.5), Ok(crate::INVALID_INDEX));
        assert_eq!(
            binary_search(&[0.1, 0.5, 0.3], 0.2),
            Err(KernelError::UnsortedInput { index: 2 })
        );
        assert_eq!(
            binary_search(&[0.1, f32::NAN, 0.3], 0.2),
            Err(KernelError::UnsortedInput { index: 1 })
        );
    }

    #[test]
    fn test_prefix_sum_lengths() {
        let mut dst = [0.0f32; 3];
        assert!(prefix_sum(&[1.0, 2.0, 3.0], &mut dst).is_ok());
        assert_eq!(dst, [1.0, 3.0, 6.0]);

        let mut short = [0.0f32; 2];
        assert!(matches!(
            prefix_sum(&[1.0, 2.0, 3.0], &mut short),
            Err(KernelError::LengthMismatch { name: "dst", .. })
        ));
    }

    #[test]
    fn test_sample_discrete_cdf_validation() {
        let mut s = state();
        assert_eq!(
            sample_discrete_cdf(&[], &mut s),
            Err(KernelError::EmptyInput("cdf"))
        );
        assert!(matches!(
            sample_discrete_cdf(&[0.5, 0.2, 1.0], &mut s),
            Err(KernelError::UnsortedInput { index: 1 })
        ));
        let bucket = sample_discrete_cdf(&[0.5, 1.0], &mut s).unwrap();
        assert!(bucket < 2);
    }
}
