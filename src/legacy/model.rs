//! Wire model of the previous-generation store client.
//!
//! Attribute values are a struct of optional members; exactly one member is
//! expected to be set.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeValue {
    pub s: Option<String>,
    pub n: Option<String>,
    pub b: Option<Vec<u8>>,
    pub bool: Option<bool>,
    pub null: Option<bool>,
    pub l: Option<Vec<AttributeValue>>,
    pub m: Option<AttributeMap>,
    pub ss: Option<Vec<String>>,
}

impl AttributeValue {
    pub fn with_s(s: impl Into<String>) -> Self {
        Self {
            s: Some(s.into()),
            ..Default::default()
        }
    }

    pub fn with_n(n: impl Into<String>) -> Self {
        Self {
            n: Some(n.into()),
            ..Default::default()
        }
    }

    pub fn with_b(b: impl Into<Vec<u8>>) -> Self {
        Self {
            b: Some(b.into()),
            ..Default::default()
        }
    }

    pub fn with_bool(b: bool) -> Self {
        Self {
            bool: Some(b),
            ..Default::default()
        }
    }

    pub fn with_null() -> Self {
        Self {
            null: Some(true),
            ..Default::default()
        }
    }

    pub fn with_l(l: Vec<AttributeValue>) -> Self {
        Self {
            l: Some(l),
            ..Default::default()
        }
    }

    pub fn with_m(m: AttributeMap) -> Self {
        Self {
            m: Some(m),
            ..Default::default()
        }
    }
}

pub type AttributeMap = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: AttributeMap,
}

/// The item is shared: cloning a result never copies it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetItemResult {
    pub item: Option<Arc<AttributeMap>>,
}

impl GetItemResult {
    pub fn with_item(item: AttributeMap) -> Self {
        Self {
            item: Some(Arc::new(item)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutItemResult;

/// Store client consumed by [`super::Mapper`].
pub trait StoreClient {
    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResult>;

    fn put_item(&self, request: PutItemRequest) -> Result<PutItemResult>;
}
