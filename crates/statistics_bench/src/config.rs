//! Benchmark configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! CLI arguments.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BenchError, Result};

const MAX_THREADS: usize = 1024;

/// Log levels supported by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(BenchError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Generator workload to time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    /// Raw 32-bit words
    Words,
    /// Uniform floats in `[0, 1)`
    Uniform,
    /// Standard normal variates
    Gaussian,
    /// Beta-approximation samples followed by an argmax
    Beta,
    /// Every workload in turn
    #[default]
    All,
}

impl FromStr for Workload {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "words" | "u32" => Ok(Workload::Words),
            "uniform" => Ok(Workload::Uniform),
            "gaussian" | "normal" => Ok(Workload::Gaussian),
            "beta" => Ok(Workload::Beta),
            "all" => Ok(Workload::All),
            _ => Err(BenchError::InvalidWorkload(s.to_string())),
        }
    }
}

impl Workload {
    /// Concrete workloads this selection expands to
    pub fn expand(self) -> &'static [Workload] {
        match self {
            Workload::Words => &[Workload::Words],
            Workload::Uniform => &[Workload::Uniform],
            Workload::Gaussian => &[Workload::Gaussian],
            Workload::Beta => &[Workload::Beta],
            Workload::All => &[
                Workload::Words,
                Workload::Uniform,
                Workload::Gaussian,
                Workload::Beta,
            ],
        }
    }

    /// Short name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            Workload::Words => "words",
            Workload::Uniform => "uniform",
            Workload::Gaussian => "gaussian",
            Workload::Beta => "beta",
            Workload::All => "all",
        }
    }
}

impl std::fmt::Display for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(BenchError::InvalidFormat(s.to_string())),
        }
    }
}

/// Benchmark configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Workload(s) to time
    pub workload: Workload,
    /// Elements per sampling call
    pub batch_size: usize,
    /// Sampling calls per worker
    pub iterations: usize,
    /// Independent generators run in parallel
    pub threads: usize,
    /// Master seed; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Success ratio fed to every Beta-approximation element
    pub succ_ratio: f32,
    /// Trial count fed to every Beta-approximation element
    pub num_trials: f32,
    /// Report format
    pub format: OutputFormat,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            workload: Workload::All,
            batch_size: 1024,
            iterations: 10_000,
            threads: 1,
            seed: None,
            succ_ratio: 0.5,
            num_trials: 400.0,
            format: OutputFormat::Table,
            log_level: LogLevel::Info,
        }
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BenchError::EnvError { var, value })
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(content)
            .map_err(|e| BenchError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STATS_BENCH_*` overrides from an arbitrary lookup
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("STATS_BENCH_WORKLOAD") {
            self.workload = Workload::from_str(&v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_BATCH_SIZE") {
            self.batch_size = parse_env("STATS_BENCH_BATCH_SIZE", v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_ITERATIONS") {
            self.iterations = parse_env("STATS_BENCH_ITERATIONS", v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_THREADS") {
            self.threads = parse_env("STATS_BENCH_THREADS", v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_SEED") {
            self.seed = Some(parse_env("STATS_BENCH_SEED", v)?);
        }
        if let Some(v) = lookup("STATS_BENCH_SUCC_RATIO") {
            self.succ_ratio = parse_env("STATS_BENCH_SUCC_RATIO", v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_NUM_TRIALS") {
            self.num_trials = parse_env("STATS_BENCH_NUM_TRIALS", v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_FORMAT") {
            self.format = OutputFormat::from_str(&v)?;
        }
        if let Some(v) = lookup("STATS_BENCH_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&v)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<()> {
        if let Some(workload) = &cli.workload {
            self.workload = Workload::from_str(workload)?;
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(iterations) = cli.iterations {
            self.iterations = iterations;
        }
        if let Some(threads) = cli.threads {
            self.threads = threads;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(succ_ratio) = cli.succ_ratio {
            self.succ_ratio = succ_ratio;
        }
        if let Some(num_trials) = cli.num_trials {
            self.num_trials = num_trials;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = LogLevel::from_str(log_level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(BenchError::InvalidValue {
                field: "batch_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.iterations == 0 {
            return Err(BenchError::InvalidValue {
                field: "iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.threads == 0 || self.threads > MAX_THREADS {
            return Err(BenchError::InvalidValue {
                field: "threads",
                reason: format!("must be between 1 and {}", MAX_THREADS),
            });
        }
        if !(self.succ_ratio > 0.0 && self.succ_ratio < 1.0) {
            return Err(BenchError::InvalidValue {
                field: "succ_ratio",
                reason: format!("{} is outside (0, 1)", self.succ_ratio),
            });
        }
        if !(self.num_trials.is_finite() && self.num_trials > 0.0) {
            return Err(BenchError::InvalidValue {
                field: "num_trials",
                reason: format!("{} is not a positive count", self.num_trials),
            });
        }
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Workload override
    pub workload: Option<String>,
    /// Batch size override
    pub batch_size: Option<usize>,
    /// Iteration count override
    pub iterations: Option<usize>,
    /// Worker count override
    pub threads: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
    /// Success ratio override
    pub succ_ratio: Option<f32>,
    /// Trial count override
    pub num_trials: Option<f32>,
    /// Output format override
    pub format: Option<String>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<BenchConfig> {
    build_config_with(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<BenchConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => BenchConfig::from_file(path)?,
        None => BenchConfig::default(),
    };
    config.apply_env_with(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;
    Ok(config)
}
