//! Run configuration, read from the environment because criterion owns the
//! command line.

use std::time::Duration;

use log::warn;

use crate::cases::TestCase;

pub const CASES_VAR: &str = "MAPPER_BENCH_CASES";
pub const WARMUP_VAR: &str = "MAPPER_BENCH_WARMUP_SECS";
pub const MEASURE_VAR: &str = "MAPPER_BENCH_MEASURE_SECS";
pub const SAMPLES_VAR: &str = "MAPPER_BENCH_SAMPLES";
pub const RECORD_VAR: &str = "MAPPER_BENCH_RECORD";

// Five one-second warmup iterations and five one-second measurement iterations.
const DEFAULT_WARMUP_SECS: u64 = 5;
const DEFAULT_MEASURE_SECS: u64 = 5;
const DEFAULT_PERCENTILE_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub cases: Vec<TestCase>,
    pub warmup_secs: u64,
    pub measure_secs: u64,
    pub percentile_samples: usize,
    pub record: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            cases: TestCase::ALL.to_vec(),
            warmup_secs: DEFAULT_WARMUP_SECS,
            measure_secs: DEFAULT_MEASURE_SECS,
            percentile_samples: DEFAULT_PERCENTILE_SAMPLES,
            record: true,
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset or
    /// unparsable values. Unknown case labels are skipped with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(list) = lookup(CASES_VAR) {
            let mut cases = Vec::new();
            for label in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match label.parse::<TestCase>() {
                    Ok(case) if !cases.contains(&case) => cases.push(case),
                    Ok(_) => {}
                    Err(e) => warn!("{}, skipping", e),
                }
            }
            config.cases = cases;
        }
        if let Some(secs) = lookup(WARMUP_VAR) {
            config.warmup_secs = secs.trim().parse::<u64>().unwrap_or(DEFAULT_WARMUP_SECS).max(1);
        }
        if let Some(secs) = lookup(MEASURE_VAR) {
            config.measure_secs = secs.trim().parse::<u64>().unwrap_or(DEFAULT_MEASURE_SECS).max(1);
        }
        if let Some(samples) = lookup(SAMPLES_VAR) {
            config.percentile_samples = samples
                .trim()
                .parse::<usize>()
                .unwrap_or(DEFAULT_PERCENTILE_SAMPLES)
                .max(1);
        }
        if let Some(record) = lookup(RECORD_VAR) {
            config.record = !matches!(
                record.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "off" | "no"
            );
        }
        config
    }

    pub fn warm_up_time(&self) -> Duration {
        Duration::from_secs(self.warmup_secs)
    }

    pub fn measurement_time(&self) -> Duration {
        Duration::from_secs(self.measure_secs)
    }
}
