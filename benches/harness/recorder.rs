//! Result recorder for saving benchmark results to JSON files.
//!
//! Creates JSON files in the `results/` directory following the schema
//! defined in `mapper_benchmarks::schema`.

use super::{read_cpu_model, read_total_ram_gb};
use mapper_benchmarks::cases::TestCase;
use mapper_benchmarks::driver::{Generation, Operation};
use mapper_benchmarks::schema::*;
use mapper_benchmarks::stats::Percentiles;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

/// Accumulates benchmark results and writes them to a JSON file.
pub struct ResultRecorder {
    category: String,
    metadata: RunMetadata,
    results: Vec<BenchmarkResult>,
}

impl ResultRecorder {
    /// Create a new recorder for the given category.
    ///
    /// Captures metadata (hardware, git, timestamp) at construction time.
    pub fn new(category: &str) -> Self {
        Self {
            category: category.to_string(),
            metadata: RunMetadata {
                timestamp: iso8601_now(),
                git_commit: git_short_commit(),
                git_branch: git_branch(),
                git_dirty: git_is_dirty(),
                harness_version: env!("CARGO_PKG_VERSION").to_string(),
                hardware: capture_hardware(),
            },
            results: Vec::new(),
        }
    }

    /// Record one mapper measurement, named `<category>/<op>/<generation>/<case>`.
    pub fn record_mapper(
        &mut self,
        case: TestCase,
        generation: Generation,
        operation: Operation,
        p: &Percentiles,
    ) {
        let mut parameters = HashMap::new();
        parameters.insert("case".into(), serde_json::json!(case.label()));
        parameters.insert("generation".into(), serde_json::json!(generation.label()));
        parameters.insert("operation".into(), serde_json::json!(operation.label()));

        self.results.push(BenchmarkResult {
            benchmark: format!(
                "{}/{}/{}/{}",
                self.category,
                operation.label(),
                generation.label(),
                case.label()
            ),
            category: self.category.clone(),
            parameters,
            metrics: p.to_metrics(),
        });
    }

    /// Write all accumulated results to a JSON file in `results/`.
    ///
    /// File naming: `<category>-<timestamp>-<commit>.json`
    pub fn save(self) -> io::Result<PathBuf> {
        let report = BenchmarkReport {
            schema_version: SCHEMA_VERSION,
            metadata: self.metadata.clone(),
            results: self.results,
        };

        // Build filename
        let commit = self
            .metadata
            .git_commit
            .as_deref()
            .unwrap_or("unknown");
        // Sanitize timestamp for filename (replace colons)
        let ts = self.metadata.timestamp.replace(':', "-");
        let filename = format!("{}-{}-{}.json", self.category, ts, commit);

        let results_dir = PathBuf::from("results");
        std::fs::create_dir_all(&results_dir)?;
        let path = results_dir.join(&filename);

        report.write(&path)?;

        eprintln!("Results saved to {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Metadata capture
// ---------------------------------------------------------------------------

/// UTC now as `YYYY-MM-DDTHH:MM:SSZ`.
fn iso8601_now() -> String {
    let secs = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    let rem = secs % 86_400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        rem / 3_600,
        rem % 3_600 / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian date (Hinnant's algorithm).
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

/// Stdout of a successful `git` invocation.
fn git(args: &[&str]) -> Option<Vec<u8>> {
    std::process::Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| o.stdout)
}

fn git_line(args: &[&str]) -> Option<String> {
    git(args).map(|out| String::from_utf8_lossy(&out).trim().to_string())
}

fn git_short_commit() -> Option<String> {
    git_line(&["rev-parse", "--short", "HEAD"])
}

fn git_branch() -> Option<String> {
    git_line(&["rev-parse", "--abbrev-ref", "HEAD"])
}

fn git_is_dirty() -> Option<bool> {
    git(&["status", "--porcelain"]).map(|out| !out.is_empty())
}

fn capture_hardware() -> HardwareInfo {
    HardwareInfo {
        cpu: read_cpu_model(),
        cores: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0),
        ram_gb: read_total_ram_gb(),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    }
}
