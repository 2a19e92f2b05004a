//! The enhanced (current generation) mapper.
//!
//! A [`Table`] binds a table name to a [`TableSchema`] and converts items
//! through the schema's accessors on every call.

mod schema;

pub use schema::{AttributeConverter, TableSchema, TableSchemaBuilder};

use std::sync::Arc;

use log::debug;

use crate::model::{AttributeValue, GetItemRequest, Item, PutItemRequest, StoreClient};
use crate::{MapperError, Result};

/// Primary key of an item in an enhanced table.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    partition_value: AttributeValue,
}

impl Key {
    pub fn partition(value: impl Into<String>) -> Self {
        Self {
            partition_value: AttributeValue::S(value.into()),
        }
    }

    pub fn partition_value(&self) -> &AttributeValue {
        &self.partition_value
    }
}

/// Entry point of the enhanced mapper; hands out typed tables.
pub struct EnhancedClient<C> {
    client: Arc<C>,
}

impl<C: StoreClient> EnhancedClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn table<T>(&self, name: &str, schema: Arc<TableSchema<T>>) -> Table<C, T> {
        debug!(
            "enhanced table '{}' bound to schema with partition key {:?}",
            name,
            schema.partition_key()
        );
        Table {
            name: name.to_string(),
            schema,
            client: Arc::clone(&self.client),
        }
    }
}

/// A handle on one table, typed by its item.
pub struct Table<C, T> {
    name: String,
    schema: Arc<TableSchema<T>>,
    client: Arc<C>,
}

impl<C: StoreClient, T> Table<C, T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &TableSchema<T> {
        &self.schema
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Point read. `Ok(None)` when the store has no item for the key.
    pub fn get_item(&self, key: &Key) -> Result<Option<T>> {
        let key_name = self
            .schema
            .partition_key()
            .ok_or_else(|| MapperError::MissingKey {
                table: self.name.clone(),
                key: "<partition key>".to_string(),
            })?;
        let mut key_item = Item::new();
        key_item.insert(key_name.to_string(), key.partition_value.clone());

        let response = self.client.get_item(GetItemRequest {
            table_name: self.name.clone(),
            key: key_item,
        })?;
        response
            .item
            .as_deref()
            .map(|item| self.schema.map_to_item(item))
            .transpose()
    }

    pub fn put_item(&self, item: &T) -> Result<()> {
        let map = self.schema.item_to_map(item);
        if let Some(key) = self.schema.partition_key() {
            let blank = match map.get(key) {
                None | Some(AttributeValue::Null) => true,
                Some(AttributeValue::S(s)) => s.is_empty(),
                Some(_) => false,
            };
            if blank {
                return Err(MapperError::MissingKey {
                    table: self.name.clone(),
                    key: key.to_string(),
                });
            }
        }
        self.client.put_item(PutItemRequest {
            table_name: self.name.clone(),
            item: map,
        })?;
        Ok(())
    }
}
