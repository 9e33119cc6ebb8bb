//! Integration tests for configuration loading and a short end-to-end run.

use statistics_bench::config::{build_config_with, BenchConfig, CliArgs, OutputFormat, Workload};
use statistics_bench::{report, runner};
use std::path::PathBuf;

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "statistics-bench-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_file_then_env_then_cli() {
    let path = write_config(
        "layering",
        r#"
        workload = "gaussian"
        batch_size = 256
        iterations = 5
        threads = 3
        seed = 99
        "#,
    );
    let cli = CliArgs {
        config_file: Some(path.clone()),
        iterations: Some(7),
        ..Default::default()
    };
    let config = build_config_with(&cli, |key| match key {
        "STATS_BENCH_THREADS" => Some("2".to_string()),
        "STATS_BENCH_ITERATIONS" => Some("100".to_string()),
        _ => None,
    })
    .unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.workload, Workload::Gaussian);
    assert_eq!(config.batch_size, 256);
    assert_eq!(config.threads, 2);
    assert_eq!(config.iterations, 7);
    assert_eq!(config.seed, Some(99));
}

#[test]
fn test_end_to_end_json_report() {
    let config = BenchConfig {
        workload: Workload::Beta,
        batch_size: 361,
        iterations: 50,
        threads: 1,
        seed: Some(1234),
        format: OutputFormat::Json,
        ..Default::default()
    };
    let result = runner::run(&config).unwrap();
    let text = report::render(&result, config.format).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["results"][0]["workload"], "beta");
    assert_eq!(value["results"][0]["samples"], 361 * 50);
    assert!(value["results"][0]["last_argmax"].as_u64().unwrap() < 361);
}
