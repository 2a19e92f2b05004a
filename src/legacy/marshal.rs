//! Reflective marshalling: a serde data format over legacy attribute values.
//!
//! Every call walks the item through its `Serialize` or `Deserialize` impl.
//! Byte vectors are carried in the `b` member only when the field opts in
//! through [`super::binary`]; a plain `Vec<u8>` is a list of numbers.

use std::collections::btree_map;
use std::slice;

use serde::de::value::StrDeserializer;
use serde::de::{
    DeserializeOwned, DeserializeSeed, Deserializer, IntoDeserializer, MapAccess, SeqAccess,
    Visitor,
};
use serde::forward_to_deserialize_any;
use serde::ser::{self, Impossible, Serialize};

use super::model::{AttributeMap, AttributeValue};
use crate::{MapperError, Result};

pub fn to_attribute_map<T: Serialize + ?Sized>(item: &T) -> Result<AttributeMap> {
    match item.serialize(AttributeSerializer)? {
        AttributeValue { m: Some(map), .. } => Ok(map),
        other => Err(MapperError::Unsupported(format!(
            "top-level item must be a struct or map, got {:?}",
            other
        ))),
    }
}

pub fn from_attribute_map<T: DeserializeOwned>(map: &AttributeMap) -> Result<T> {
    T::deserialize(ItemDeserializer(map))
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

struct AttributeSerializer;

fn no_legacy_form(what: &str) -> MapperError {
    MapperError::Unsupported(format!("{} has no legacy attribute form", what))
}

impl ser::Serializer for AttributeSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    type SerializeSeq = ListSerializer;
    type SerializeTuple = ListSerializer;
    type SerializeTupleStruct = ListSerializer;
    type SerializeTupleVariant = Impossible<AttributeValue, MapperError>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = Impossible<AttributeValue, MapperError>;

    fn serialize_bool(self, v: bool) -> Result<AttributeValue> {
        Ok(AttributeValue::with_bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<AttributeValue> {
        Ok(AttributeValue::with_n(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<AttributeValue> {
        finite(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<AttributeValue> {
        finite(v)
    }

    fn serialize_char(self, v: char) -> Result<AttributeValue> {
        Ok(AttributeValue::with_s(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<AttributeValue> {
        Ok(AttributeValue::with_s(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<AttributeValue> {
        Ok(AttributeValue::with_b(v))
    }

    fn serialize_none(self) -> Result<AttributeValue> {
        Ok(AttributeValue::with_null())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<AttributeValue> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<AttributeValue> {
        Ok(AttributeValue::with_null())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<AttributeValue> {
        Ok(AttributeValue::with_null())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<AttributeValue> {
        Ok(AttributeValue::with_s(variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<AttributeValue> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<AttributeValue> {
        let mut map = AttributeMap::new();
        map.insert(variant.to_string(), value.serialize(AttributeSerializer)?);
        Ok(AttributeValue::with_m(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ListSerializer> {
        Ok(ListSerializer::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<ListSerializer> {
        Ok(ListSerializer::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ListSerializer> {
        Ok(ListSerializer::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(no_legacy_form(&format!("tuple variant {}::{}", name, variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapSerializer> {
        Ok(MapSerializer::default())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<MapSerializer> {
        Ok(MapSerializer::default())
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(no_legacy_form(&format!("struct variant {}::{}", name, variant)))
    }
}

fn finite(v: f64) -> Result<AttributeValue> {
    if v.is_finite() {
        Ok(AttributeValue::with_n(v.to_string()))
    } else {
        Err(no_legacy_form(&format!("number {}", v)))
    }
}

struct ListSerializer {
    values: Vec<AttributeValue>,
}

impl ListSerializer {
    fn with_capacity(len: usize) -> Self {
        Self {
            values: Vec::with_capacity(len),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.values.push(value.serialize(AttributeSerializer)?);
        Ok(())
    }

    fn finish(self) -> Result<AttributeValue> {
        Ok(AttributeValue::with_l(self.values))
    }
}

impl ser::SerializeSeq for ListSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<AttributeValue> {
        self.finish()
    }
}

impl ser::SerializeTuple for ListSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<AttributeValue> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ListSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.push(value)
    }

    fn end(self) -> Result<AttributeValue> {
        self.finish()
    }
}

#[derive(Default)]
struct MapSerializer {
    entries: AttributeMap,
    key: Option<String>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        match key.serialize(AttributeSerializer)? {
            AttributeValue { s: Some(key), .. } => {
                self.key = Some(key);
                Ok(())
            }
            other => Err(no_legacy_form(&format!("map key {:?}", other))),
        }
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self
            .key
            .take()
            .ok_or_else(|| no_legacy_form("map value without a key"))?;
        self.entries.insert(key, value.serialize(AttributeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<AttributeValue> {
        Ok(AttributeValue::with_m(self.entries))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = AttributeValue;
    type Error = MapperError;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.entries
            .insert(key.to_string(), value.serialize(AttributeSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<AttributeValue> {
        Ok(AttributeValue::with_m(self.entries))
    }
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

/// A whole item: a map whose keys name the attributes.
struct ItemDeserializer<'a>(&'a AttributeMap);

impl<'de, 'a> Deserializer<'de> for ItemDeserializer<'a> {
    type Error = MapperError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_map(Entries::new(self.0, None))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

/// One attribute value. `name` is the top-level attribute it belongs to and
/// is only used in error reports.
struct AttributeDeserializer<'a> {
    name: &'a str,
    value: &'a AttributeValue,
}

impl<'de, 'a> Deserializer<'de> for AttributeDeserializer<'a> {
    type Error = MapperError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let AttributeDeserializer { name, value } = self;
        if let Some(s) = &value.s {
            return visitor.visit_str(s);
        }
        if let Some(n) = &value.n {
            return visit_number(name, n, visitor);
        }
        if let Some(b) = value.bool {
            return visitor.visit_bool(b);
        }
        if value.null == Some(true) {
            return visitor.visit_unit();
        }
        if let Some(l) = &value.l {
            return visitor.visit_seq(Elements {
                name,
                iter: l.iter(),
            });
        }
        if let Some(m) = &value.m {
            return visitor.visit_map(Entries::new(m, Some(name)));
        }
        if let Some(ss) = &value.ss {
            return serde::de::value::SeqDeserializer::<_, MapperError>::new(ss.iter().cloned())
                .deserialize_any(visitor);
        }
        if let Some(b) = &value.b {
            return visitor.visit_bytes(b);
        }
        Err(MapperError::Unsupported(format!(
            "attribute '{}' has no member set",
            name
        )))
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.value.null == Some(true) {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct enum
        identifier ignored_any
    }
}

fn visit_number<'de, V: Visitor<'de>>(name: &str, n: &str, visitor: V) -> Result<V::Value> {
    if let Ok(i) = n.parse::<i64>() {
        return visitor.visit_i64(i);
    }
    if let Ok(u) = n.parse::<u64>() {
        return visitor.visit_u64(u);
    }
    match n.parse::<f64>() {
        Ok(f) if f.is_finite() => visitor.visit_f64(f),
        _ => Err(MapperError::InvalidNumber {
            attribute: name.to_string(),
            value: n.to_string(),
        }),
    }
}

struct Elements<'a> {
    name: &'a str,
    iter: slice::Iter<'a, AttributeValue>,
}

impl<'de, 'a> SeqAccess<'de> for Elements<'a> {
    type Error = MapperError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(AttributeDeserializer {
                    name: self.name,
                    value,
                })
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Entries of an item (`parent` is `None`) or of a nested map attribute.
struct Entries<'a> {
    parent: Option<&'a str>,
    iter: btree_map::Iter<'a, String, AttributeValue>,
    pending: Option<(&'a str, &'a AttributeValue)>,
}

impl<'a> Entries<'a> {
    fn new(map: &'a AttributeMap, parent: Option<&'a str>) -> Self {
        Self {
            parent,
            iter: map.iter(),
            pending: None,
        }
    }
}

impl<'de, 'a> MapAccess<'de> for Entries<'a> {
    type Error = MapperError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        match self.iter.next() {
            Some((key, value)) => {
                self.pending = Some((key.as_str(), value));
                let key: StrDeserializer<'a, MapperError> = key.as_str().into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let (key, value) = self
            .pending
            .take()
            .ok_or_else(|| MapperError::Unsupported("map value read before its key".to_string()))?;
        seed.deserialize(AttributeDeserializer {
            name: self.parent.unwrap_or(key),
            value,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}
