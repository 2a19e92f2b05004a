//! The fixed set of item shapes a benchmark run can select, and the fixtures
//! attached to each.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::enhanced::TableSchema;
use crate::fixtures::{
    huge_bean_flat_table_schema, huge_bean_table_schema, small_bean_table_schema,
    tiny_bean_table_schema, HugeBean, HugeBeanFlat, ItemFactory, SmallBean, TinyBean,
    HASH_KEY_VALUE,
};
use crate::legacy::{self, LegacyItem};
use crate::model::GetItemResponse;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestCase {
    Tiny,
    Small,
    Huge,
    HugeFlat,
}

impl TestCase {
    pub const ALL: [TestCase; 4] = [
        TestCase::Tiny,
        TestCase::Small,
        TestCase::Huge,
        TestCase::HugeFlat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TestCase::Tiny => "tiny",
            TestCase::Small => "small",
            TestCase::Huge => "huge",
            TestCase::HugeFlat => "huge-flat",
        }
    }

    /// Name of the enhanced table the case binds to.
    pub fn table_name(self) -> &'static str {
        match self {
            TestCase::Tiny => "TINY",
            TestCase::Small => "SMALL",
            TestCase::Huge => "HUGE",
            TestCase::HugeFlat => "HUGE_FLAT",
        }
    }

    /// Runs `visitor` with the item type of this case.
    pub fn visit<V: CaseVisitor>(self, visitor: V) -> V::Output {
        match self {
            TestCase::Tiny => visitor.visit::<TinyBean>(),
            TestCase::Small => visitor.visit::<SmallBean>(),
            TestCase::Huge => visitor.visit::<HugeBean>(),
            TestCase::HugeFlat => visitor.visit::<HugeBeanFlat>(),
        }
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown test case '{0}' (expected tiny, small, huge or huge-flat)")]
pub struct ParseCaseError(pub String);

impl FromStr for TestCase {
    type Err = ParseCaseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "tiny" => Ok(TestCase::Tiny),
            "small" => Ok(TestCase::Small),
            "huge" => Ok(TestCase::Huge),
            "huge-flat" => Ok(TestCase::HugeFlat),
            _ => Err(ParseCaseError(s.to_string())),
        }
    }
}

/// Generic code to run against whichever item type a [`TestCase`] selects.
pub trait CaseVisitor {
    type Output;

    fn visit<T: Shape>(self) -> Self::Output;
}

/// An item type with a test case and fixtures.
pub trait Shape: LegacyItem + Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const CASE: TestCase;

    /// Built on first use, then shared for the life of the process.
    fn fixtures() -> &'static Fixtures<Self>;
}

/// Everything a benchmark state needs for one item shape.
pub struct Fixtures<T> {
    pub schema: Arc<TableSchema<T>>,
    pub new_response: GetItemResponse,
    pub new_item: T,
    pub old_key: T,
    pub old_response: legacy::GetItemResult,
    pub old_item: T,
}

impl<T: Shape> Fixtures<T> {
    /// The enhanced canned response, decoded by the enhanced schema.
    pub fn decode_new(&self) -> Result<Option<T>> {
        self.new_response
            .item
            .as_deref()
            .map(|item| self.schema.map_to_item(item))
            .transpose()
    }

    /// The legacy canned response, decoded by the legacy marshaller.
    pub fn decode_old(&self) -> Result<Option<T>> {
        self.old_response
            .item
            .as_deref()
            .map(legacy::from_attribute_map::<T>)
            .transpose()
    }

    /// True when both canned responses describe the same item.
    pub fn is_equivalent(&self) -> Result<bool> {
        Ok(self.decode_new()? == self.decode_old()?)
    }
}

macro_rules! impl_shape {
    ($bean:ty, $case:expr, $schema:ident, $item:ident, $legacy_item:ident, $sample:ident) => {
        impl Shape for $bean {
            const CASE: TestCase = $case;

            fn fixtures() -> &'static Fixtures<Self> {
                static FIXTURES: OnceLock<Fixtures<$bean>> = OnceLock::new();
                FIXTURES.get_or_init(|| {
                    let factory = ItemFactory::new();
                    Fixtures {
                        schema: Arc::new($schema()),
                        new_response: GetItemResponse::with_item(factory.$item()),
                        new_item: factory.$sample(),
                        old_key: <$bean>::keyed(HASH_KEY_VALUE),
                        old_response: legacy::GetItemResult::with_item(factory.$legacy_item()),
                        old_item: factory.$sample(),
                    }
                })
            }
        }

        impl $bean {
            /// A key object: only the hash key is set.
            pub fn keyed(hash_key: &str) -> Self {
                Self {
                    hash_key: hash_key.to_string(),
                    ..Default::default()
                }
            }
        }
    };
}

impl_shape!(TinyBean, TestCase::Tiny, tiny_bean_table_schema, tiny, legacy_tiny, tiny_bean);
impl_shape!(SmallBean, TestCase::Small, small_bean_table_schema, small, legacy_small, small_bean);
impl_shape!(HugeBean, TestCase::Huge, huge_bean_table_schema, huge, legacy_huge, huge_bean);
impl_shape!(
    HugeBeanFlat,
    TestCase::HugeFlat,
    huge_bean_flat_table_schema,
    huge_flat,
    legacy_huge_flat,
    huge_bean_flat
);
