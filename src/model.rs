//! Wire model of the current store client, used by the enhanced mapper.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::Result;

/// One attribute of a stored item.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    S(String),
    /// Numbers travel as their decimal string form.
    N(String),
    B(Vec<u8>),
    Bool(bool),
    Null,
    L(Vec<AttributeValue>),
    M(Item),
    Ss(Vec<String>),
}

impl AttributeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null => "NULL",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
            AttributeValue::Ss(_) => "SS",
        }
    }
}

/// An item as the store sees it: attribute name to value.
pub type Item = BTreeMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub struct GetItemRequest {
    pub table_name: String,
    pub key: Item,
}

/// The item is shared: cloning a response never copies it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetItemResponse {
    pub item: Option<Arc<Item>>,
}

impl GetItemResponse {
    pub fn with_item(item: Item) -> Self {
        Self {
            item: Some(Arc::new(item)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutItemRequest {
    pub table_name: String,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutItemResponse;

/// Low-level store client consumed by [`crate::enhanced::EnhancedClient`].
pub trait StoreClient {
    fn get_item(&self, request: GetItemRequest) -> Result<GetItemResponse>;

    fn put_item(&self, request: PutItemRequest) -> Result<PutItemResponse>;
}
