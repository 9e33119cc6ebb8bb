//! Statistical integration tests for the samplers.
//!
//! The Gaussian sampler is compared against `rand_distr::StandardNormal`
//! through empirical quantiles, and the Beta approximation against its
//! target moments across a grid of parameters.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use statistics_kernel::array::argmax;
use statistics_kernel::{StreamRng, XorShift128PlusStreamRng};

fn sorted(mut xs: Vec<f32>) -> Vec<f32> {
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    xs
}

fn quantile(sorted: &[f32], q: f64) -> f32 {
    sorted[((sorted.len() - 1) as f64 * q) as usize]
}

// ============================================================================
// Gaussian
// ============================================================================

#[test]
fn test_gaussian_quantiles_match_reference_distribution() {
    let n = 200_000;
    let mut rng = XorShift128PlusStreamRng::new(&[3, 1, 4, 1, 5, 9, 2, 6]);
    let mut ours = vec![0.0f32; n];
    rng.sample_normal_f32(&mut ours);
    let ours = sorted(ours);

    let mut reference_rng = StdRng::seed_from_u64(11);
    let reference: Vec<f32> = (0..n)
        .map(|_| StandardNormal.sample(&mut reference_rng))
        .collect();
    let reference = sorted(reference);

    for q in [0.01, 0.05, 0.25, 0.5, 0.75, 0.95, 0.99] {
        let a = quantile(&ours, q);
        let b = quantile(&reference, q);
        assert!((a - b).abs() < 0.05, "q={}: ours={} reference={}", q, a, b);
    }
}

#[test]
fn test_gaussian_tail_is_bounded_by_uniform_precision() {
    // 1 - u1 >= 2^-24, so |z| <= sqrt(-2 ln 2^-24) ~ 5.77.
    let mut rng = XorShift128PlusStreamRng::new(&[1, 1, 2, 3, 5, 8, 13, 21]);
    let mut zs = vec![0.0f32; 1 << 18];
    rng.sample_normal_f32(&mut zs);
    let bound = (-2.0 * (2.0f32).powi(-24).ln()).sqrt();
    assert!(zs.iter().all(|z| z.abs() <= bound + 1e-4));
}

// ============================================================================
// Beta approximation
// ============================================================================

#[test]
fn test_beta_approx_moments_over_parameter_grid() {
    let n = 50_000;
    let mut rng = XorShift128PlusStreamRng::new(&[10, 20, 30, 40, 50, 60, 70, 80]);

    for p in [0.05f32, 0.3, 0.5, 0.8] {
        for trials in [100.0f32, 1_000.0, 10_000.0] {
            let succ_ratio = vec![p; n];
            let num_trials = vec![trials; n];
            let mut xs = vec![0.0f32; n];
            rng.sample_approx_beta_f32(&succ_ratio, &num_trials, &mut xs);

            let mean = xs.iter().map(|&x| x as f64).sum::<f64>() / n as f64;
            let var = xs.iter().map(|&x| (x as f64 - mean).powi(2)).sum::<f64>() / n as f64;
            let target_sd = ((p * (1.0 - p)) as f64 / trials as f64).sqrt();

            assert!(
                (mean - p as f64).abs() < 5.0 * target_sd / (n as f64).sqrt() + 1e-6,
                "p={} trials={}: mean={}",
                p,
                trials,
                mean
            );
            assert!(
                (var.sqrt() / target_sd - 1.0).abs() < 0.03,
                "p={} trials={}: sd={} target={}",
                p,
                trials,
                var.sqrt(),
                target_sd
            );
        }
    }
}

#[test]
fn test_thompson_selection_prefers_better_arm() {
    // Arm 5 has the highest success ratio with plenty of evidence.
    let arms = 12;
    let mut succ_ratio = vec![0.40f32; arms];
    succ_ratio[5] = 0.55;
    let num_trials = vec![2_000.0f32; arms];

    let mut rng = XorShift128PlusStreamRng::new(&[7, 7, 7, 7, 9, 9, 9, 9]);
    let mut samples = vec![0.0f32; arms];
    let mut wins = 0;
    let rounds = 1_000;
    for _ in 0..rounds {
        rng.sample_approx_beta_f32(&succ_ratio, &num_trials, &mut samples);
        if argmax(&samples) == 5 {
            wins += 1;
        }
    }
    assert!(wins > rounds * 99 / 100, "wins={}", wins);
}
