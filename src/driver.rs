//! Benchmark state and the four timed operations.
//!
//! [`BenchmarkState::setup`] does all wiring up front; each operation is then
//! a single mapper call against a stub. Errors are returned untouched so the
//! bench loop fails loudly on any integration breakage.

use std::hint::black_box;
use std::sync::Arc;

use log::{debug, warn};

use crate::cases::{Shape, TestCase};
use crate::enhanced::{EnhancedClient, Key, Table};
use crate::legacy::Mapper;
use crate::stub::{SideEffects, StubLegacyClient, StubStoreClient};
use crate::Result;

/// Partition key used for every enhanced read. The stub ignores it.
pub const PARTITION_KEY: &str = "key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generation {
    Legacy,
    Enhanced,
}

impl Generation {
    pub const ALL: [Generation; 2] = [Generation::Legacy, Generation::Enhanced];

    pub fn label(self) -> &'static str {
        match self {
            Generation::Legacy => "legacy",
            Generation::Enhanced => "enhanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Put,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Get, Operation::Put];

    pub fn label(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Put => "put",
        }
    }
}

pub struct BenchmarkState<T: Shape> {
    case: TestCase,
    key: Key,
    table: Table<StubStoreClient, T>,
    mapper: Mapper<StubLegacyClient>,
    new_effects: Arc<SideEffects>,
    old_effects: Arc<SideEffects>,
}

impl<T: Shape> BenchmarkState<T> {
    pub fn setup() -> Self {
        let fixtures = T::fixtures();
        let case = T::CASE;

        match fixtures.is_equivalent() {
            Ok(true) => debug!("{}: enhanced and legacy canned responses agree", case),
            Ok(false) => warn!("{}: enhanced and legacy canned responses differ", case),
            Err(e) => warn!("{}: canned responses do not decode: {}", case, e),
        }

        let new_effects = SideEffects::new();
        let enhanced = EnhancedClient::new(StubStoreClient::new(
            fixtures.new_response.clone(),
            Arc::clone(&new_effects),
        ));
        let table = enhanced.table(case.table_name(), Arc::clone(&fixtures.schema));

        let old_effects = SideEffects::new();
        let mapper = Mapper::new(StubLegacyClient::new(
            fixtures.old_response.clone(),
            Arc::clone(&old_effects),
        ));

        debug!("benchmark state ready for case {}", case);
        Self {
            case,
            key: Key::partition(PARTITION_KEY),
            table,
            mapper,
            new_effects,
            old_effects,
        }
    }

    pub fn case(&self) -> TestCase {
        self.case
    }

    pub fn table(&self) -> &Table<StubStoreClient, T> {
        &self.table
    }

    pub fn mapper(&self) -> &Mapper<StubLegacyClient> {
        &self.mapper
    }

    /// Calls recorded by the stub under the enhanced table.
    pub fn new_effects(&self) -> &SideEffects {
        &self.new_effects
    }

    /// Calls recorded by the stub under the legacy mapper.
    pub fn old_effects(&self) -> &SideEffects {
        &self.old_effects
    }

    pub fn read_new(&self) -> Result<Option<T>> {
        self.table.get_item(&self.key)
    }

    pub fn read_old(&self) -> Result<Option<T>> {
        self.mapper.load(&T::fixtures().old_key)
    }

    pub fn write_new(&self) -> Result<()> {
        self.table.put_item(&T::fixtures().new_item)
    }

    pub fn write_old(&self) -> Result<()> {
        self.mapper.save(&T::fixtures().old_item)
    }

    /// Runs one operation. Items read are sunk through `black_box`.
    pub fn run(&self, generation: Generation, operation: Operation) -> Result<()> {
        match (generation, operation) {
            (Generation::Enhanced, Operation::Get) => self.read_new().map(|item| {
                black_box(item);
            }),
            (Generation::Legacy, Operation::Get) => self.read_old().map(|item| {
                black_box(item);
            }),
            (Generation::Enhanced, Operation::Put) => self.write_new(),
            (Generation::Legacy, Operation::Put) => self.write_old(),
        }
    }
}
