//! Comparison of benchmark metrics, across runs or across mapper generations.

use std::collections::BTreeMap;

use crate::schema::{BenchmarkMetrics, BenchmarkReport, BenchmarkResult};

/// Changes within this many percent count as noise.
const NOISE_PCT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Faster,
    Slower,
    Same,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Faster => "faster",
            Trend::Slower => "slower",
            Trend::Same => "~same",
        }
    }
}

/// Which metric a [`Delta`] was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Basis {
    P50 { base_ns: u64, candidate_ns: u64 },
    Throughput { base_ops: f64, candidate_ops: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    /// Signed change of the candidate relative to the base, in percent.
    pub pct: f64,
    pub trend: Trend,
    pub basis: Basis,
}

/// Compares p50 latency when both sides have it, otherwise ops/s.
pub fn compare_metrics(base: &BenchmarkMetrics, candidate: &BenchmarkMetrics) -> Option<Delta> {
    if let (Some(base_ns), Some(candidate_ns)) = (base.p50_ns, candidate.p50_ns) {
        let pct = if base_ns > 0 {
            (candidate_ns as f64 - base_ns as f64) / base_ns as f64 * 100.0
        } else {
            0.0
        };
        let trend = if pct < -NOISE_PCT {
            Trend::Faster
        } else if pct > NOISE_PCT {
            Trend::Slower
        } else {
            Trend::Same
        };
        return Some(Delta {
            pct,
            trend,
            basis: Basis::P50 {
                base_ns,
                candidate_ns,
            },
        });
    }

    if let (Some(base_ops), Some(candidate_ops)) = (base.ops_per_sec, candidate.ops_per_sec) {
        let pct = if base_ops > 0.0 {
            (candidate_ops - base_ops) / base_ops * 100.0
        } else {
            0.0
        };
        let trend = if pct > NOISE_PCT {
            Trend::Faster
        } else if pct < -NOISE_PCT {
            Trend::Slower
        } else {
            Trend::Same
        };
        return Some(Delta {
            pct,
            trend,
            basis: Basis::Throughput {
                base_ops,
                candidate_ops,
            },
        });
    }

    None
}

/// Legacy and enhanced results for the same case and operation.
#[derive(Debug, Clone)]
pub struct GenerationPair<'a> {
    pub case: String,
    pub operation: String,
    pub legacy: &'a BenchmarkResult,
    pub enhanced: &'a BenchmarkResult,
}

/// Pairs the results of one report by case and operation, sorted by both.
/// Results without a partner are left out.
pub fn generation_pairs(report: &BenchmarkReport) -> Vec<GenerationPair<'_>> {
    type Slot<'a> = (Option<&'a BenchmarkResult>, Option<&'a BenchmarkResult>);
    let mut slots: BTreeMap<(String, String), Slot<'_>> = BTreeMap::new();

    for result in &report.results {
        let (Some(case), Some(operation), Some(generation)) = (
            result.parameter("case"),
            result.parameter("operation"),
            result.parameter("generation"),
        ) else {
            continue;
        };
        let slot = slots
            .entry((case.to_string(), operation.to_string()))
            .or_default();
        match generation {
            "legacy" => slot.0 = Some(result),
            "enhanced" => slot.1 = Some(result),
            _ => {}
        }
    }

    slots
        .into_iter()
        .filter_map(|((case, operation), slot)| match slot {
            (Some(legacy), Some(enhanced)) => Some(GenerationPair {
                case,
                operation,
                legacy,
                enhanced,
            }),
            _ => None,
        })
        .collect()
}

pub fn format_ns(ns: u64) -> String {
    if ns < 1_000 {
        format!("{} ns", ns)
    } else if ns < 1_000_000 {
        format!("{:.2} us", ns as f64 / 1_000.0)
    } else if ns < 1_000_000_000 {
        format!("{:.2} ms", ns as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", ns as f64 / 1_000_000_000.0)
    }
}

pub fn format_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
