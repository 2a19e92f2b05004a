//! Legacy vs enhanced mapper throughput: get and put for every item shape.
//!
//! Both mappers run against stub clients, so only mapping cost is measured.
//!
//! Run:    `cargo bench --bench mapper_compare`
//! Subset: `MAPPER_BENCH_CASES=tiny,huge-flat cargo bench --bench mapper_compare`
//! Quick:  `MAPPER_BENCH_WARMUP_SECS=1 MAPPER_BENCH_MEASURE_SECS=1 cargo bench --bench mapper_compare`

#[allow(unused)]
#[path = "../harness/mod.rs"]
mod harness;

use std::sync::Mutex;

use criterion::{criterion_group, BenchmarkId, Criterion, Throughput};
use harness::recorder::ResultRecorder;
use harness::{measure, print_hardware_info, report_percentiles};
use mapper_benchmarks::cases::{CaseVisitor, Shape};
use mapper_benchmarks::config::BenchConfig;
use mapper_benchmarks::driver::{BenchmarkState, Generation, Operation};

static RECORDER: Mutex<Option<ResultRecorder>> = Mutex::new(None);

struct BenchOperation<'a> {
    c: &'a mut Criterion,
    operation: Operation,
    samples: usize,
}

impl CaseVisitor for BenchOperation<'_> {
    type Output = ();

    fn visit<T: Shape>(self) {
        let case = T::CASE;
        let state = BenchmarkState::<T>::setup();

        let mut group = self
            .c
            .benchmark_group(format!("mapper/{}", self.operation.label()));
        group.throughput(Throughput::Elements(1));
        for generation in Generation::ALL {
            let id = BenchmarkId::new(generation.label(), case.label());
            match (generation, self.operation) {
                (Generation::Enhanced, Operation::Get) => {
                    group.bench_function(id, |b| b.iter(|| state.read_new().unwrap()))
                }
                (Generation::Legacy, Operation::Get) => {
                    group.bench_function(id, |b| b.iter(|| state.read_old().unwrap()))
                }
                (Generation::Enhanced, Operation::Put) => {
                    group.bench_function(id, |b| b.iter(|| state.write_new().unwrap()))
                }
                (Generation::Legacy, Operation::Put) => {
                    group.bench_function(id, |b| b.iter(|| state.write_old().unwrap()))
                }
            };
        }
        group.finish();

        for generation in Generation::ALL {
            let label = format!(
                "mapper/{}/{}/{}",
                self.operation.label(),
                generation.label(),
                case.label()
            );
            let p = measure(self.samples, || state.run(generation, self.operation).unwrap());
            report_percentiles(&label, &p);

            if let Some(rec) = RECORDER.lock().unwrap().as_mut() {
                rec.record_mapper(case, generation, self.operation, &p);
            }
        }
    }
}

fn run_operation(c: &mut Criterion, operation: Operation) {
    let config = BenchConfig::from_env();
    eprintln!(
        "\n--- Latency Percentiles: mapper/{} ---",
        operation.label()
    );
    for case in &config.cases {
        case.visit(BenchOperation {
            c: &mut *c,
            operation,
            samples: config.percentile_samples,
        });
    }
}

fn mapper_get(c: &mut Criterion) {
    run_operation(c, Operation::Get);
}

fn mapper_put(c: &mut Criterion) {
    run_operation(c, Operation::Put);
}

fn configured() -> Criterion {
    let config = BenchConfig::from_env();
    Criterion::default()
        .warm_up_time(config.warm_up_time())
        .measurement_time(config.measurement_time())
}

criterion_group! {
    name = benches;
    config = configured();
    targets = mapper_get, mapper_put
}

fn main() {
    let _ = env_logger::try_init();
    let config = BenchConfig::from_env();
    print_hardware_info();
    eprintln!(
        "Cases: {}",
        config
            .cases
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if config.record {
        *RECORDER.lock().unwrap() = Some(ResultRecorder::new("mapper"));
    }
    benches();
    Criterion::default().configure_from_args().final_summary();
    if let Some(recorder) = RECORDER.lock().unwrap().take() {
        if let Err(e) = recorder.save() {
            eprintln!("Failed to save results: {}", e);
        }
    }
}
