//! Static table schemas: per-attribute accessors instead of reflection.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{AttributeValue, Item};
use crate::{MapperError, Result};

/// Converts a field value to and from its wire attribute.
pub trait AttributeConverter: Sized {
    fn to_attribute(&self) -> AttributeValue;

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self>;
}

fn mismatch(attribute: &str, expected: &'static str) -> MapperError {
    MapperError::TypeMismatch {
        attribute: attribute.to_string(),
        expected,
    }
}

fn string_of(attribute: &str, value: &AttributeValue) -> Result<String> {
    match value {
        AttributeValue::S(s) => Ok(s.clone()),
        _ => Err(mismatch(attribute, "S")),
    }
}

fn bytes_of(attribute: &str, value: &AttributeValue) -> Result<Vec<u8>> {
    match value {
        AttributeValue::B(b) => Ok(b.clone()),
        _ => Err(mismatch(attribute, "B")),
    }
}

fn list_of<V>(
    attribute: &str,
    value: &AttributeValue,
    element: impl Fn(&str, &AttributeValue) -> Result<V>,
) -> Result<Vec<V>> {
    match value {
        AttributeValue::L(values) => values.iter().map(|v| element(attribute, v)).collect(),
        _ => Err(mismatch(attribute, "L")),
    }
}

fn map_of<V>(
    attribute: &str,
    value: &AttributeValue,
    element: impl Fn(&str, &AttributeValue) -> Result<V>,
) -> Result<BTreeMap<String, V>> {
    match value {
        AttributeValue::M(entries) => entries
            .iter()
            .map(|(k, v)| Ok::<_, MapperError>((k.clone(), element(attribute, v)?)))
            .collect(),
        _ => Err(mismatch(attribute, "M")),
    }
}

impl AttributeConverter for String {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::S(self.clone())
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        string_of(attribute, value)
    }
}

impl AttributeConverter for i64 {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::N(self.to_string())
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::N(n) => n.parse().map_err(|_| MapperError::InvalidNumber {
                attribute: attribute.to_string(),
                value: n.clone(),
            }),
            _ => Err(mismatch(attribute, "N")),
        }
    }
}

impl AttributeConverter for bool {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::Bool(*self)
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        match value {
            AttributeValue::Bool(b) => Ok(*b),
            _ => Err(mismatch(attribute, "BOOL")),
        }
    }
}

impl AttributeConverter for Vec<u8> {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::B(self.clone())
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        bytes_of(attribute, value)
    }
}

impl AttributeConverter for Vec<String> {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::L(self.iter().map(|s| AttributeValue::S(s.clone())).collect())
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        list_of(attribute, value, string_of)
    }
}

impl AttributeConverter for BTreeMap<String, String> {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::M(
            self.iter()
                .map(|(k, v)| (k.clone(), AttributeValue::S(v.clone())))
                .collect(),
        )
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        map_of(attribute, value, string_of)
    }
}

impl AttributeConverter for BTreeMap<String, Vec<String>> {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::M(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_attribute()))
                .collect(),
        )
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        map_of(attribute, value, |a, v| list_of(a, v, string_of))
    }
}

impl AttributeConverter for Vec<BTreeMap<String, Vec<u8>>> {
    fn to_attribute(&self) -> AttributeValue {
        AttributeValue::L(
            self.iter()
                .map(|m| {
                    AttributeValue::M(
                        m.iter()
                            .map(|(k, v)| (k.clone(), AttributeValue::B(v.clone())))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn from_attribute(attribute: &str, value: &AttributeValue) -> Result<Self> {
        list_of(attribute, value, |a, v| map_of(a, v, bytes_of))
    }
}

type Getter<T> = Box<dyn Fn(&T) -> AttributeValue + Send + Sync>;
type Setter<T> = Box<dyn Fn(&mut T, &AttributeValue) -> Result<()> + Send + Sync>;

struct Attribute<T> {
    name: String,
    get: Getter<T>,
    set: Setter<T>,
}

/// Maps an item type to its wire form through a fixed list of attributes.
pub struct TableSchema<T> {
    attributes: Vec<Attribute<T>>,
    partition_key: Option<usize>,
    new_item: fn() -> T,
}

impl<T: 'static> TableSchema<T> {
    /// Starts a schema; `new_item` creates the blank item that reads fill in.
    pub fn builder(new_item: fn() -> T) -> TableSchemaBuilder<T> {
        TableSchemaBuilder {
            schema: TableSchema {
                attributes: Vec::new(),
                partition_key: None,
                new_item,
            },
        }
    }
}

impl<T> TableSchema<T> {
    pub fn partition_key(&self) -> Option<&str> {
        self.partition_key
            .map(|i| self.attributes[i].name.as_str())
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn item_to_map(&self, item: &T) -> Item {
        self.attributes
            .iter()
            .map(|a| (a.name.clone(), (a.get)(item)))
            .collect()
    }

    /// Builds an item from its wire form. Attributes absent from `map` (or
    /// stored as NULL) keep their blank value; unknown attributes are ignored.
    pub fn map_to_item(&self, map: &Item) -> Result<T> {
        let mut item = (self.new_item)();
        for attribute in &self.attributes {
            match map.get(&attribute.name) {
                None | Some(AttributeValue::Null) => {}
                Some(value) => (attribute.set)(&mut item, value)?,
            }
        }
        Ok(item)
    }
}

impl<T> fmt::Debug for TableSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableSchema")
            .field("partition_key", &self.partition_key())
            .field("attributes", &self.attributes.len())
            .finish()
    }
}

pub struct TableSchemaBuilder<T> {
    schema: TableSchema<T>,
}

impl<T: 'static> TableSchemaBuilder<T> {
    /// Adds the partition key attribute. A later call replaces the key.
    pub fn partition_key<V: AttributeConverter + 'static>(
        mut self,
        name: &str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self {
        self.schema.partition_key = Some(self.schema.attributes.len());
        self.attribute(name, get, set)
    }

    pub fn attribute<V: AttributeConverter + 'static>(
        mut self,
        name: &str,
        get: fn(&T) -> &V,
        set: fn(&mut T, V),
    ) -> Self {
        let owned = name.to_string();
        self.schema.attributes.push(Attribute {
            name: name.to_string(),
            get: Box::new(move |item: &T| get(item).to_attribute()),
            set: Box::new(move |item: &mut T, value: &AttributeValue| {
                set(item, V::from_attribute(&owned, value)?);
                Ok(())
            }),
        });
        self
    }

    pub fn build(self) -> TableSchema<T> {
        self.schema
    }
}
