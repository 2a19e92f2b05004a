//! Shared helpers for the mapper benchmarks: timing loops, percentile
//! reporting and hardware capture.

pub mod recorder;

use std::hint::black_box;
use std::time::Instant;

use mapper_benchmarks::compare::{format_ns, format_num};
use mapper_benchmarks::stats::Percentiles;

/// Calls run before a percentile pass starts timing.
pub const WARMUP_COUNT: usize = 1_000;

/// Times `samples` calls of `f` after a short warmup.
pub fn measure<R, F: FnMut() -> R>(samples: usize, mut f: F) -> Percentiles {
    for _ in 0..WARMUP_COUNT {
        black_box(f());
    }
    let mut latencies = Vec::with_capacity(samples);
    for _ in 0..samples.max(1) {
        let start = Instant::now();
        black_box(f());
        latencies.push(start.elapsed());
    }
    // samples.max(1) guarantees a non-empty batch
    Percentiles::from_samples(latencies).unwrap()
}

pub fn report_percentiles(label: &str, p: &Percentiles) {
    eprintln!(
        "  {:<36} p50={:>10} p95={:>10} p99={:>10} max={:>10} ({} ops/s)",
        label,
        format_ns(p.p50.as_nanos() as u64),
        format_ns(p.p95.as_nanos() as u64),
        format_ns(p.p99.as_nanos() as u64),
        format_ns(p.max.as_nanos() as u64),
        format_num(p.ops_per_sec as u64),
    );
}

pub fn print_hardware_info() {
    eprintln!("=== Hardware ===");
    eprintln!("  CPU:   {}", read_cpu_model());
    eprintln!(
        "  Cores: {}",
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(0)
    );
    eprintln!("  RAM:   {} GB", read_total_ram_gb());
    eprintln!("  OS:    {} ({})", std::env::consts::OS, std::env::consts::ARCH);
    eprintln!();
}

pub fn read_cpu_model() -> String {
    std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|line| line.starts_with("model name"))
                .and_then(|line| line.split(':').nth(1))
                .map(|model| model.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn read_total_ram_gb() -> u64 {
    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|line| line.starts_with("MemTotal:"))
                .and_then(|line| line.split_whitespace().nth(1))
                .and_then(|kb| kb.parse::<u64>().ok())
        })
        .map(|kb| kb / (1024 * 1024))
        .unwrap_or(0)
}
