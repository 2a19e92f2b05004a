//! Benchmark comparison tool.
//!
//! Compares two JSON result files, or the legacy and enhanced generations
//! inside one file, and prints a table showing performance deltas.
//!
//! Usage:
//!   `cargo run --bin bench-compare -- <baseline.json> <candidate.json>`
//!   `cargo run --bin bench-compare -- --generations <report.json>`

use mapper_benchmarks::compare::{
    compare_metrics, format_ns, format_num, generation_pairs, Basis, Delta,
};
use mapper_benchmarks::schema::{BenchmarkReport, BenchmarkResult};
use std::collections::HashMap;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        3 if args[1] == "--generations" => compare_generations(&args[2]),
        3 => compare_runs(&args[1], &args[2]),
        _ => {
            eprintln!("Usage: {} <baseline.json> <candidate.json>", args[0]);
            eprintln!("       {} --generations <report.json>", args[0]);
            std::process::exit(1);
        }
    }
}

fn compare_runs(baseline_path: &str, candidate_path: &str) {
    let baseline = load_report(baseline_path);
    let candidate = load_report(candidate_path);

    // Build lookup by benchmark name
    let base_map: HashMap<&str, &BenchmarkResult> = baseline
        .results
        .iter()
        .map(|r| (r.benchmark.as_str(), r))
        .collect();

    eprintln!("Baseline: {} ({})", baseline_path, baseline.metadata.timestamp);
    eprintln!("Candidate: {} ({})", candidate_path, candidate.metadata.timestamp);
    eprintln!();

    print_header("Benchmark", "Base", "New");

    let mut matched = 0u32;
    let mut only_cand = 0u32;

    for cand in &candidate.results {
        if let Some(base) = base_map.get(cand.benchmark.as_str()) {
            matched += 1;
            if let Some(delta) = compare_metrics(&base.metrics, &cand.metrics) {
                print_row(&cand.benchmark, &delta);
            }
        } else {
            only_cand += 1;
        }
    }

    let cand_names: Vec<&str> = candidate
        .results
        .iter()
        .map(|r| r.benchmark.as_str())
        .collect();
    let only_base = baseline
        .results
        .iter()
        .filter(|r| !cand_names.contains(&r.benchmark.as_str()))
        .count();

    println!("{}", "-".repeat(84));
    println!(
        "Compared: {} | Baseline only: {} | Candidate only: {}",
        matched, only_base, only_cand
    );
}

fn compare_generations(path: &str) {
    let report = load_report(path);
    eprintln!("Report: {} ({})", path, report.metadata.timestamp);
    eprintln!();

    print_header("Case / operation", "Legacy", "Enhanced");

    let pairs = generation_pairs(&report);
    for pair in &pairs {
        let name = format!("{} / {}", pair.case, pair.operation);
        if let Some(delta) = compare_metrics(&pair.legacy.metrics, &pair.enhanced.metrics) {
            print_row(&name, &delta);
        }
    }

    println!("{}", "-".repeat(84));
    println!("Compared: {} case/operation pairs", pairs.len());
}

fn load_report(path: &str) -> BenchmarkReport {
    BenchmarkReport::load(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    })
}

fn print_header(name: &str, base: &str, candidate: &str) {
    println!(
        "{:<40} | {:>12} | {:>12} | {:>12}",
        name, base, candidate, "Delta"
    );
    println!("{}", "-".repeat(84));
}

fn print_row(name: &str, delta: &Delta) {
    match delta.basis {
        Basis::P50 {
            base_ns,
            candidate_ns,
        } => println!(
            "{:<40} | {:>12} | {:>12} | {:>+.1}% ({})",
            name,
            format_ns(base_ns),
            format_ns(candidate_ns),
            delta.pct,
            delta.trend.label(),
        ),
        Basis::Throughput {
            base_ops,
            candidate_ops,
        } => println!(
            "{:<40} | {:>10} ops/s | {:>10} ops/s | {:>+.1}% ({})",
            name,
            format_num(base_ops as u64),
            format_num(candidate_ops as u64),
            delta.pct,
            delta.trend.label(),
        ),
    }
}
