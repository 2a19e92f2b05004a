//! The legacy (previous generation) mapper.
//!
//! Items are any serde type implementing [`LegacyItem`]. Every call marshals
//! the whole item reflectively, which is the cost the enhanced mapper avoids.

pub mod binary;
mod marshal;
pub mod model;

pub use marshal::{from_attribute_map, to_attribute_map};
pub use model::{
    AttributeMap, AttributeValue, GetItemRequest, GetItemResult, PutItemRequest, PutItemResult,
    StoreClient,
};

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{MapperError, Result};

/// An item type the legacy mapper can load and save.
pub trait LegacyItem: Serialize + DeserializeOwned {
    const TABLE_NAME: &'static str;
    const HASH_KEY: &'static str;
}

pub struct Mapper<C> {
    client: C,
}

impl<C: StoreClient> Mapper<C> {
    pub fn new(client: C) -> Self {
        debug!("legacy mapper created");
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Loads the item whose hash key matches `key_object`'s. Only the hash
    /// key attribute of `key_object` is sent; its other fields are ignored.
    pub fn load<T: LegacyItem>(&self, key_object: &T) -> Result<Option<T>> {
        let mut attributes = to_attribute_map(key_object)?;
        let hash = attributes
            .remove(T::HASH_KEY)
            .filter(|v| v.null != Some(true))
            .ok_or_else(|| missing_key::<T>())?;

        let mut key = AttributeMap::new();
        key.insert(T::HASH_KEY.to_string(), hash);
        let result = self.client.get_item(GetItemRequest {
            table_name: T::TABLE_NAME.to_string(),
            key,
        })?;
        result
            .item
            .as_deref()
            .map(from_attribute_map)
            .transpose()
    }

    pub fn save<T: LegacyItem>(&self, item: &T) -> Result<()> {
        let attributes = to_attribute_map(item)?;
        match attributes.get(T::HASH_KEY) {
            None => return Err(missing_key::<T>()),
            Some(v) if v.null == Some(true) || v.s.as_deref() == Some("") => {
                return Err(missing_key::<T>())
            }
            Some(_) => {}
        }
        self.client.put_item(PutItemRequest {
            table_name: T::TABLE_NAME.to_string(),
            item: attributes,
        })?;
        Ok(())
    }
}

fn missing_key<T: LegacyItem>() -> MapperError {
    MapperError::MissingKey {
        table: T::TABLE_NAME.to_string(),
        key: T::HASH_KEY.to_string(),
    }
}
