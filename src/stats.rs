//! Latency percentiles over a batch of timed samples.

use std::time::Duration;

use crate::schema::BenchmarkMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    pub samples: usize,
    pub ops_per_sec: f64,
    pub avg: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl Percentiles {
    /// `None` for an empty batch. Throughput is samples over the summed
    /// latency, so it excludes time spent between samples.
    pub fn from_samples(mut latencies: Vec<Duration>) -> Option<Self> {
        if latencies.is_empty() {
            return None;
        }
        latencies.sort_unstable();
        let len = latencies.len();
        let sum: Duration = latencies.iter().sum();
        let secs = sum.as_secs_f64();

        Some(Percentiles {
            samples: len,
            ops_per_sec: if secs > 0.0 { len as f64 / secs } else { 0.0 },
            avg: sum / len as u32,
            p50: latencies[len * 50 / 100],
            p95: latencies[(len * 95 / 100).min(len - 1)],
            p99: latencies[(len * 99 / 100).min(len - 1)],
            min: latencies[0],
            max: latencies[len - 1],
        })
    }
}

impl Percentiles {
    pub fn to_metrics(&self) -> BenchmarkMetrics {
        BenchmarkMetrics {
            ops_per_sec: Some(self.ops_per_sec),
            p50_ns: Some(self.p50.as_nanos() as u64),
            p95_ns: Some(self.p95.as_nanos() as u64),
            p99_ns: Some(self.p99.as_nanos() as u64),
            min_ns: Some(self.min.as_nanos() as u64),
            max_ns: Some(self.max.as_nanos() as u64),
            avg_ns: Some(self.avg.as_nanos() as u64),
            samples: Some(self.samples as u64),
        }
    }
}
