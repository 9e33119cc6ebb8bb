//! Error types for the benchmark tool.

use thiserror::Error;

/// Errors raised while configuring or running a benchmark.
///
/// # Variants
/// - `InvalidValue`: A configuration field is out of range
/// - `InvalidLogLevel` / `InvalidWorkload` / `InvalidFormat`: Unrecognised name
/// - `FileError`: The TOML configuration file could not be read or parsed
/// - `EnvError`: An environment override could not be parsed
/// - `Kernel`: The kernel rejected a benchmark input
/// - `ThreadPool`: The worker pool could not be built
/// - `Serialise`: The report could not be rendered as JSON
#[derive(Debug, Error)]
pub enum BenchError {
    /// Field out of range.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Configuration field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Unknown log level.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown workload.
    #[error("Invalid workload: {0}. Must be one of: words, uniform, gaussian, beta, all")]
    InvalidWorkload(String),

    /// Unknown output format.
    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    /// Configuration file could not be loaded.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment override could not be parsed.
    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },

    /// Kernel-side validation failure.
    #[error("Kernel error: {0}")]
    Kernel(#[from] statistics_kernel::KernelError),

    /// Worker pool construction failure.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// JSON rendering failure.
    #[error("Serialisation error: {0}")]
    Serialise(#[from] serde_json::Error),
}

/// Result alias for benchmark operations.
pub type Result<T> = std::result::Result<T, BenchError>;
