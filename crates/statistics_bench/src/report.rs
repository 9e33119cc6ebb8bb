//! Report rendering.

use std::fmt::Write;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::runner::Report;

/// Renders `report` in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(render_table(report)),
    }
}

fn render_table(report: &Report) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "statistics-bench v{} (simd: {}, seed: {})",
        report.version,
        report.simd_level,
        report
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    let _ = writeln!(
        out,
        "{:<10} {:>7} {:>10} {:>10} {:>14} {:>10} {:>14} {:>10} {:>10}",
        "workload",
        "threads",
        "batch",
        "iters",
        "samples",
        "elapsed_s",
        "samples/s",
        "argmax",
        "mean"
    );
    for r in &report.results {
        let _ = writeln!(
            out,
            "{:<10} {:>7} {:>10} {:>10} {:>14} {:>10.3} {:>14.3e} {:>10} {:>10.5}",
            r.workload.name(),
            r.threads,
            r.batch_size,
            r.iterations,
            r.samples,
            r.elapsed_secs,
            r.samples_per_sec,
            r.last_argmax.map_or_else(|| "-".to_string(), |j| j.to_string()),
            r.last_batch_mean
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Workload;
    use crate::runner::WorkloadResult;

    fn sample_report() -> Report {
        Report {
            version: "0.1.0",
            simd_level: "Avx2".to_string(),
            seed: Some(1234),
            results: vec![
                WorkloadResult {
                    workload: Workload::Words,
                    threads: 1,
                    batch_size: 361,
                    iterations: 10,
                    samples: 3610,
                    elapsed_secs: 0.5,
                    samples_per_sec: 7220.0,
                    last_argmax: None,
                    last_batch_mean: 0.5,
                },
                WorkloadResult {
                    workload: Workload::Beta,
                    threads: 1,
                    batch_size: 361,
                    iterations: 10,
                    samples: 3610,
                    elapsed_secs: 0.25,
                    samples_per_sec: 14440.0,
                    last_argmax: Some(17),
                    last_batch_mean: 0.5,
                },
            ],
        }
    }

    #[test]
    fn test_render_table() {
        let text = render(&sample_report(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("seed: 1234"));
        assert!(lines[2].starts_with("words"));
        assert!(lines[2].contains(" - "));
        assert!(lines[3].starts_with("beta"));
        assert!(lines[3].contains("17"));
    }

    #[test]
    fn test_render_json() {
        let text = render(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 1234);
        assert_eq!(value["results"][0]["workload"], "words");
        assert!(value["results"][0]["last_argmax"].is_null());
        assert_eq!(value["results"][1]["last_argmax"], 17);
    }
}
