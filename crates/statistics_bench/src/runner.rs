//! Timed sampling loops.
//!
//! Every worker owns an independently seeded generator. Worker seeds are drawn
//! sequentially from one master generator, so a fixed master seed reproduces
//! every worker's stream regardless of thread scheduling.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use statistics_kernel::array::{argmax, sum};
use statistics_kernel::rng::unit_f32;
use statistics_kernel::simd::detect_simd;
use statistics_kernel::{checked, KernelError, StreamRng, XorShift128PlusStreamRng};

use crate::config::{BenchConfig, Workload};
use crate::error::{BenchError, Result};

/// Timing and summary of one workload across all workers.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadResult {
    /// Workload name
    pub workload: Workload,
    /// Worker count
    pub threads: usize,
    /// Elements per sampling call
    pub batch_size: usize,
    /// Sampling calls per worker
    pub iterations: usize,
    /// Elements produced across all workers
    pub samples: u64,
    /// Wall-clock time for the whole workload
    pub elapsed_secs: f64,
    /// `samples / elapsed_secs`
    pub samples_per_sec: f64,
    /// Argmax of worker 0's final batch (float workloads only)
    pub last_argmax: Option<usize>,
    /// Mean of worker 0's final batch (words mapped to `[0, 1)`)
    pub last_batch_mean: f64,
}

/// Full benchmark report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Tool version
    pub version: &'static str,
    /// Detected SIMD level of the array kernels
    pub simd_level: String,
    /// Master seed, when one was configured
    pub seed: Option<u64>,
    /// One entry per workload run
    pub results: Vec<WorkloadResult>,
}

struct WorkerOutcome {
    last_argmax: Option<usize>,
    last_batch_mean: f64,
}

/// Seeds one generator per worker from the master seed (or OS entropy).
pub fn seed_workers(seed: Option<u64>, threads: usize) -> Result<Vec<XorShift128PlusStreamRng>> {
    let mut master = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let workers: Vec<_> = (0..threads)
        .map(|_| XorShift128PlusStreamRng::with_rng_seed(&mut master))
        .collect();
    for rng in &workers {
        if let Some(lane) = rng.state().degenerate_lane() {
            return Err(KernelError::DegenerateLane { lane }.into());
        }
    }
    Ok(workers)
}

fn mean_f32(xs: &[f32]) -> f64 {
    sum(xs) as f64 / xs.len() as f64
}

fn run_worker(
    workload: Workload,
    rng: &mut XorShift128PlusStreamRng,
    config: &BenchConfig,
) -> Result<WorkerOutcome> {
    let n = config.batch_size;
    let outcome = match workload {
        Workload::Words => {
            let mut buf = vec![0u32; n];
            for _ in 0..config.iterations {
                rng.sample_u32(&mut buf);
            }
            let total: f64 = buf.iter().map(|&w| unit_f32(w) as f64).sum();
            WorkerOutcome {
                last_argmax: None,
                last_batch_mean: total / n as f64,
            }
        }
        Workload::Uniform => {
            let mut buf = vec![0.0f32; n];
            for _ in 0..config.iterations {
                rng.sample_uniform_f32(&mut buf);
            }
            WorkerOutcome {
                last_argmax: Some(argmax(&buf)),
                last_batch_mean: mean_f32(&buf),
            }
        }
        Workload::Gaussian => {
            let mut buf = vec![0.0f32; n];
            for _ in 0..config.iterations {
                rng.sample_normal_f32(&mut buf);
            }
            WorkerOutcome {
                last_argmax: Some(argmax(&buf)),
                last_batch_mean: mean_f32(&buf),
            }
        }
        Workload::Beta => {
            let succ_ratio = vec![config.succ_ratio; n];
            let num_trials = vec![config.num_trials; n];
            let mut buf = vec![0.0f32; n];
            // First batch through the checked layer, the rest unchecked.
            checked::sample_approx_beta(rng.state_mut(), &succ_ratio, &num_trials, &mut buf)?;
            let mut best = argmax(&buf);
            for _ in 1..config.iterations {
                rng.sample_approx_beta_f32(&succ_ratio, &num_trials, &mut buf);
                best = argmax(&buf);
            }
            WorkerOutcome {
                last_argmax: Some(best),
                last_batch_mean: mean_f32(&buf),
            }
        }
        Workload::All => return Err(BenchError::InvalidWorkload("all".to_string())),
    };
    Ok(outcome)
}

/// Times one workload across the given workers.
pub fn run_workload(
    workload: Workload,
    workers: &mut [XorShift128PlusStreamRng],
    config: &BenchConfig,
) -> Result<WorkloadResult> {
    info!(
        workload = %workload,
        threads = workers.len(),
        batch_size = config.batch_size,
        iterations = config.iterations,
        "Starting workload"
    );
    let start = Instant::now();
    let outcomes = workers
        .par_iter_mut()
        .enumerate()
        .map(|(worker, rng)| {
            let outcome = run_worker(workload, rng, config);
            debug!(worker, workload = %workload, "Worker finished");
            outcome
        })
        .collect::<Result<Vec<_>>>()?;
    let elapsed_secs = start.elapsed().as_secs_f64();

    let samples = (workers.len() * config.iterations * config.batch_size) as u64;
    let first = &outcomes[0];
    let result = WorkloadResult {
        workload,
        threads: workers.len(),
        batch_size: config.batch_size,
        iterations: config.iterations,
        samples,
        elapsed_secs,
        samples_per_sec: samples as f64 / elapsed_secs.max(f64::MIN_POSITIVE),
        last_argmax: first.last_argmax,
        last_batch_mean: first.last_batch_mean,
    };
    info!(
        workload = %workload,
        elapsed_secs = result.elapsed_secs,
        samples_per_sec = result.samples_per_sec,
        "Workload finished"
    );
    Ok(result)
}

/// Runs every configured workload on a dedicated worker pool.
pub fn run(config: &BenchConfig) -> Result<Report> {
    config.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;
    let mut workers = seed_workers(config.seed, config.threads)?;

    let results = pool.install(|| {
        config
            .workload
            .expand()
            .iter()
            .map(|&workload| run_workload(workload, &mut workers, config))
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(Report {
        version: crate::VERSION,
        simd_level: format!("{:?}", detect_simd()),
        seed: config.seed,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_config(workload: Workload) -> BenchConfig {
        BenchConfig {
            workload,
            batch_size: 100,
            iterations: 20,
            threads: 2,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_seed_workers_is_reproducible() {
        let a = seed_workers(Some(1), 4).unwrap();
        let b = seed_workers(Some(1), 4).unwrap();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn test_run_all_workloads() {
        let report = run(&small_config(Workload::All)).unwrap();
        assert_eq!(report.results.len(), 4);
        assert_eq!(report.seed, Some(7));
        for result in &report.results {
            assert_eq!(result.samples, 2 * 20 * 100);
            assert!(result.samples_per_sec > 0.0);
        }
        assert_eq!(report.results[0].last_argmax, None);
        assert!(report.results[3].last_argmax.unwrap() < 100);
    }

    #[test]
    fn test_beta_workload_centres_on_succ_ratio() {
        let config = BenchConfig {
            batch_size: 4096,
            succ_ratio: 0.3,
            num_trials: 10_000.0,
            ..small_config(Workload::Beta)
        };
        let report = run(&config).unwrap();
        assert_relative_eq!(report.results[0].last_batch_mean, 0.3, epsilon = 1e-3);
    }

    #[test]
    fn test_fixed_seed_reproduces_summaries() {
        let config = small_config(Workload::Uniform);
        let a = run(&config).unwrap();
        let b = run(&config).unwrap();
        assert_eq!(a.results[0].last_argmax, b.results[0].last_argmax);
        assert_eq!(a.results[0].last_batch_mean, b.results[0].last_batch_mean);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let config = BenchConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(run(&config).is_err());
    }
}
