//! # statistics_bench: Generator Throughput Benchmarks
//!
//! Operational tool timing the statistics kernel's bit-stream generator and
//! samplers. Each worker seeds its own generator, runs repeated batches of the
//! selected workload, and the tool reports elapsed time, throughput and a
//! summary (argmax and mean) of the final batch.
//!
//! ## Module Structure
//!
//! - `config`: layered configuration (defaults, TOML file, `STATS_BENCH_*`
//!   environment, CLI)
//! - `runner`: worker seeding and timed sampling loops
//! - `report`: table and JSON rendering
//! - `error`: [`BenchError`]

pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use error::{BenchError, Result};

/// Tool version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
