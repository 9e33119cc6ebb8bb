//! statistics-bench
//!
//! Times batch sampling from the lane-parallel XorShift128+ generator.

use anyhow::Context;
use clap::Parser;
use statistics_bench::config::{build_config, CliArgs};
use statistics_bench::{report, runner};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Throughput benchmark for the statistics kernel generator and samplers
#[derive(Parser, Debug)]
#[command(name = "statistics-bench")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE", env = "STATS_BENCH_CONFIG")]
    config: Option<PathBuf>,

    /// Workload: words, uniform, gaussian, beta or all
    #[arg(short, long)]
    workload: Option<String>,

    /// Elements per sampling call
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Sampling calls per worker
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Independent generators run in parallel
    #[arg(short, long)]
    threads: Option<usize>,

    /// Master seed (OS entropy when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Success ratio for the beta workload
    #[arg(long)]
    succ_ratio: Option<f32>,

    /// Trial count for the beta workload
    #[arg(long)]
    num_trials: Option<f32>,

    /// Output format (table, json)
    #[arg(short, long)]
    format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for CliArgs {
    fn from(args: Args) -> Self {
        CliArgs {
            config_file: args.config,
            workload: args.workload,
            batch_size: args.batch_size,
            iterations: args.iterations,
            threads: args.threads,
            seed: args.seed,
            succ_ratio: args.succ_ratio,
            num_trials: args.num_trials,
            format: args.format,
            log_level: args.log_level,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: CliArgs = args.into();
    let config = build_config(&cli_args).context("failed to load benchmark configuration")?;

    init_tracing(config.log_level.as_filter_str());
    tracing::info!(
        version = statistics_bench::VERSION,
        workload = %config.workload,
        threads = config.threads,
        batch_size = config.batch_size,
        iterations = config.iterations,
        "Benchmark configuration loaded"
    );

    let report = runner::run(&config).context("benchmark run failed")?;
    let rendered = report::render(&report, config.format).context("failed to render report")?;
    println!("{}", rendered);
    Ok(())
}
