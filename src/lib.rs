//! Throughput benchmarks comparing two generations of object mappers.
//!
//! The legacy mapper marshals items reflectively through serde; the enhanced
//! mapper walks a static [`enhanced::TableSchema`]. Both talk to a stubbed
//! key-value store client that answers from canned responses, so a benchmark
//! measures mapper cost alone.

pub mod cases;
pub mod compare;
pub mod config;
pub mod driver;
pub mod enhanced;
pub mod error;
pub mod fixtures;
pub mod legacy;
pub mod model;
pub mod schema;
pub mod stats;
pub mod stub;

pub use error::{MapperError, Result};
