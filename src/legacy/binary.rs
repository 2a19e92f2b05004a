//! Field adapters that mark byte vectors as binary values for the legacy
//! mapper. Without them serde sees a `Vec<u8>` as a list of numbers.
//!
//! ```ignore
//! #[serde(with = "crate::legacy::binary")]
//! pub binary_attr: Vec<u8>,
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bytes(bytes)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    deserializer.deserialize_byte_buf(BytesVisitor)
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a binary value")
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
        Ok(v)
    }

    // Number lists written before the field was marked binary.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<u8>, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element()? {
            bytes.push(byte);
        }
        Ok(bytes)
    }
}

struct Binary<'a>(&'a [u8]);

impl Serialize for Binary<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.0)
    }
}

struct OwnedBinary(Vec<u8>);

impl<'de> Deserialize<'de> for OwnedBinary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(OwnedBinary)
    }
}

/// For a list of maps whose values are binary.
pub mod maps {
    use super::*;

    struct BinaryMap<'a>(&'a BTreeMap<String, Vec<u8>>);

    impl Serialize for BinaryMap<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.0.iter().map(|(k, v)| (k, Binary(v))))
        }
    }

    pub fn serialize<S: Serializer>(
        maps: &[BTreeMap<String, Vec<u8>>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(maps.iter().map(BinaryMap))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<BTreeMap<String, Vec<u8>>>, D::Error> {
        let maps = Vec::<BTreeMap<String, OwnedBinary>>::deserialize(deserializer)?;
        Ok(maps
            .into_iter()
            .map(|m| m.into_iter().map(|(k, OwnedBinary(v))| (k, v)).collect())
            .collect())
    }
}
