//! Item shapes and the factory that produces their sample values.
//!
//! Every shape is one serde struct, which makes it usable by the legacy
//! mapper (byte fields are marked binary), plus a hand-written
//! [`TableSchema`] for the enhanced mapper. The
//! factory builds both wire forms directly from a bean, without going through
//! either mapper, so decoding them is a genuine cross-check.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enhanced::TableSchema;
use crate::legacy::{self, LegacyItem};
use crate::model::{AttributeValue, Item};

pub const HASH_KEY: &str = "hashKey";
pub const HASH_KEY_VALUE: &str = "hashKey";

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TinyBean {
    pub hash_key: String,
    pub string_attr: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SmallBean {
    pub hash_key: String,
    pub string_attr: String,
    #[serde(with = "crate::legacy::binary")]
    pub binary_attr: Vec<u8>,
    pub list_attr: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HugeBean {
    pub hash_key: String,
    pub string_attr: String,
    #[serde(with = "crate::legacy::binary")]
    pub binary_attr: Vec<u8>,
    pub list_attr: Vec<String>,
    pub number_attr: i64,
    pub bool_attr: bool,
    pub map_attr1: BTreeMap<String, String>,
    pub map_attr2: BTreeMap<String, Vec<String>>,
    #[serde(with = "crate::legacy::binary::maps")]
    pub map_attr3: Vec<BTreeMap<String, Vec<u8>>>,
}

macro_rules! flat_bean {
    ($($field:ident => $attr:literal),+ $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(default, rename_all = "camelCase")]
        pub struct HugeBeanFlat {
            pub hash_key: String,
            $(pub $field: String,)+
        }

        impl HugeBeanFlat {
            pub const FLAT_ATTRIBUTES: &'static [&'static str] = &[$($attr),+];

            pub fn flat_values(&self) -> Vec<&String> {
                vec![$(&self.$field),+]
            }

            fn flat_values_mut(&mut self) -> Vec<&mut String> {
                vec![$(&mut self.$field),+]
            }
        }

        pub fn huge_bean_flat_table_schema() -> TableSchema<HugeBeanFlat> {
            TableSchema::builder(HugeBeanFlat::default)
                .partition_key(HASH_KEY, |b| &b.hash_key, |b, v| b.hash_key = v)
                $(.attribute($attr, |b| &b.$field, |b, v| b.$field = v))+
                .build()
        }
    };
}

flat_bean! {
    string_attr_1 => "stringAttr1",
    string_attr_2 => "stringAttr2",
    string_attr_3 => "stringAttr3",
    string_attr_4 => "stringAttr4",
    string_attr_5 => "stringAttr5",
    string_attr_6 => "stringAttr6",
    string_attr_7 => "stringAttr7",
    string_attr_8 => "stringAttr8",
    string_attr_9 => "stringAttr9",
    string_attr_10 => "stringAttr10",
    string_attr_11 => "stringAttr11",
    string_attr_12 => "stringAttr12",
    string_attr_13 => "stringAttr13",
    string_attr_14 => "stringAttr14",
    string_attr_15 => "stringAttr15",
    string_attr_16 => "stringAttr16",
    string_attr_17 => "stringAttr17",
    string_attr_18 => "stringAttr18",
    string_attr_19 => "stringAttr19",
    string_attr_20 => "stringAttr20",
    string_attr_21 => "stringAttr21",
    string_attr_22 => "stringAttr22",
    string_attr_23 => "stringAttr23",
    string_attr_24 => "stringAttr24",
    string_attr_25 => "stringAttr25",
    string_attr_26 => "stringAttr26",
    string_attr_27 => "stringAttr27",
    string_attr_28 => "stringAttr28",
    string_attr_29 => "stringAttr29",
    string_attr_30 => "stringAttr30",
    string_attr_31 => "stringAttr31",
    string_attr_32 => "stringAttr32",
}

impl LegacyItem for TinyBean {
    const TABLE_NAME: &'static str = "TinyBean";
    const HASH_KEY: &'static str = HASH_KEY;
}

impl LegacyItem for SmallBean {
    const TABLE_NAME: &'static str = "SmallBean";
    const HASH_KEY: &'static str = HASH_KEY;
}

impl LegacyItem for HugeBean {
    const TABLE_NAME: &'static str = "HugeBean";
    const HASH_KEY: &'static str = HASH_KEY;
}

impl LegacyItem for HugeBeanFlat {
    const TABLE_NAME: &'static str = "HugeBeanFlat";
    const HASH_KEY: &'static str = HASH_KEY;
}

// ---------------------------------------------------------------------------
// Enhanced schemas
// ---------------------------------------------------------------------------

pub fn tiny_bean_table_schema() -> TableSchema<TinyBean> {
    TableSchema::builder(TinyBean::default)
        .partition_key(HASH_KEY, |b| &b.hash_key, |b, v| b.hash_key = v)
        .attribute("stringAttr", |b| &b.string_attr, |b, v| b.string_attr = v)
        .build()
}

pub fn small_bean_table_schema() -> TableSchema<SmallBean> {
    TableSchema::builder(SmallBean::default)
        .partition_key(HASH_KEY, |b| &b.hash_key, |b, v| b.hash_key = v)
        .attribute("stringAttr", |b| &b.string_attr, |b, v| b.string_attr = v)
        .attribute("binaryAttr", |b| &b.binary_attr, |b, v| b.binary_attr = v)
        .attribute("listAttr", |b| &b.list_attr, |b, v| b.list_attr = v)
        .build()
}

pub fn huge_bean_table_schema() -> TableSchema<HugeBean> {
    TableSchema::builder(HugeBean::default)
        .partition_key(HASH_KEY, |b| &b.hash_key, |b, v| b.hash_key = v)
        .attribute("stringAttr", |b| &b.string_attr, |b, v| b.string_attr = v)
        .attribute("binaryAttr", |b| &b.binary_attr, |b, v| b.binary_attr = v)
        .attribute("listAttr", |b| &b.list_attr, |b, v| b.list_attr = v)
        .attribute("numberAttr", |b| &b.number_attr, |b, v| b.number_attr = v)
        .attribute("boolAttr", |b| &b.bool_attr, |b, v| b.bool_attr = v)
        .attribute("mapAttr1", |b| &b.map_attr1, |b, v| b.map_attr1 = v)
        .attribute("mapAttr2", |b| &b.map_attr2, |b, v| b.map_attr2 = v)
        .attribute("mapAttr3", |b| &b.map_attr3, |b, v| b.map_attr3 = v)
        .build()
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

struct SampleRng {
    state: u64,
}

impl SampleRng {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x5DEECE66D,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn string(&mut self, len: usize) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        (0..len)
            .map(|_| ALPHABET[(self.next_u64() >> 33) as usize % ALPHABET.len()] as char)
            .collect()
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| (self.next_u64() >> 56) as u8).collect()
    }

    fn strings(&mut self, count: usize, len: usize) -> Vec<String> {
        (0..count).map(|_| self.string(len)).collect()
    }
}

/// Produces sample beans and their wire items. Output is fully
/// deterministic: two calls return equal values.
#[derive(Debug, Default, Clone, Copy)]
pub struct ItemFactory;

impl ItemFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn tiny_bean(&self) -> TinyBean {
        let mut rng = SampleRng::new(1);
        TinyBean {
            hash_key: HASH_KEY_VALUE.to_string(),
            string_attr: rng.string(16),
        }
    }

    pub fn small_bean(&self) -> SmallBean {
        let mut rng = SampleRng::new(2);
        SmallBean {
            hash_key: HASH_KEY_VALUE.to_string(),
            string_attr: rng.string(32),
            binary_attr: rng.bytes(64),
            list_attr: rng.strings(3, 16),
        }
    }

    pub fn huge_bean(&self) -> HugeBean {
        let mut rng = SampleRng::new(3);
        let string_attr = rng.string(128);
        let binary_attr = rng.bytes(256);
        let list_attr = rng.strings(16, 32);
        let number_attr = (rng.next_u64() >> 1) as i64;
        let bool_attr = rng.next_u64() & 1 == 1;
        let map_attr1 = (0..16)
            .map(|i| (format!("key{}", i), rng.string(32)))
            .collect();
        let map_attr2 = (0..8)
            .map(|i| (format!("key{}", i), rng.strings(4, 16)))
            .collect();
        let map_attr3 = (0..4)
            .map(|_| {
                (0..4)
                    .map(|i| (format!("key{}", i), rng.bytes(32)))
                    .collect()
            })
            .collect();
        HugeBean {
            hash_key: HASH_KEY_VALUE.to_string(),
            string_attr,
            binary_attr,
            list_attr,
            number_attr,
            bool_attr,
            map_attr1,
            map_attr2,
            map_attr3,
        }
    }

    pub fn huge_bean_flat(&self) -> HugeBeanFlat {
        let mut rng = SampleRng::new(4);
        let mut bean = HugeBeanFlat {
            hash_key: HASH_KEY_VALUE.to_string(),
            ..Default::default()
        };
        for value in bean.flat_values_mut() {
            *value = rng.string(64);
        }
        bean
    }

    pub fn tiny(&self) -> Item {
        let bean = self.tiny_bean();
        let mut item = keyed_item(&bean.hash_key);
        item.insert("stringAttr".into(), AttributeValue::S(bean.string_attr));
        item
    }

    pub fn small(&self) -> Item {
        let bean = self.small_bean();
        let mut item = keyed_item(&bean.hash_key);
        item.insert("stringAttr".into(), AttributeValue::S(bean.string_attr));
        item.insert("binaryAttr".into(), AttributeValue::B(bean.binary_attr));
        item.insert("listAttr".into(), string_list(bean.list_attr));
        item
    }

    pub fn huge(&self) -> Item {
        let bean = self.huge_bean();
        let mut item = keyed_item(&bean.hash_key);
        item.insert("stringAttr".into(), AttributeValue::S(bean.string_attr));
        item.insert("binaryAttr".into(), AttributeValue::B(bean.binary_attr));
        item.insert("listAttr".into(), string_list(bean.list_attr));
        item.insert(
            "numberAttr".into(),
            AttributeValue::N(bean.number_attr.to_string()),
        );
        item.insert("boolAttr".into(), AttributeValue::Bool(bean.bool_attr));
        item.insert(
            "mapAttr1".into(),
            AttributeValue::M(
                bean.map_attr1
                    .into_iter()
                    .map(|(k, v)| (k, AttributeValue::S(v)))
                    .collect(),
            ),
        );
        item.insert(
            "mapAttr2".into(),
            AttributeValue::M(
                bean.map_attr2
                    .into_iter()
                    .map(|(k, v)| (k, string_list(v)))
                    .collect(),
            ),
        );
        item.insert(
            "mapAttr3".into(),
            AttributeValue::L(
                bean.map_attr3
                    .into_iter()
                    .map(|m| {
                        AttributeValue::M(
                            m.into_iter()
                                .map(|(k, v)| (k, AttributeValue::B(v)))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        );
        item
    }

    pub fn huge_flat(&self) -> Item {
        let bean = self.huge_bean_flat();
        let mut item = keyed_item(&bean.hash_key);
        for (name, value) in HugeBeanFlat::FLAT_ATTRIBUTES.iter().zip(bean.flat_values()) {
            item.insert(name.to_string(), AttributeValue::S(value.clone()));
        }
        item
    }

    pub fn legacy_tiny(&self) -> legacy::AttributeMap {
        to_legacy_map(&self.tiny())
    }

    pub fn legacy_small(&self) -> legacy::AttributeMap {
        to_legacy_map(&self.small())
    }

    pub fn legacy_huge(&self) -> legacy::AttributeMap {
        to_legacy_map(&self.huge())
    }

    pub fn legacy_huge_flat(&self) -> legacy::AttributeMap {
        to_legacy_map(&self.huge_flat())
    }
}

fn keyed_item(hash_key: &str) -> Item {
    let mut item = Item::new();
    item.insert(HASH_KEY.to_string(), AttributeValue::S(hash_key.to_string()));
    item
}

fn string_list(values: Vec<String>) -> AttributeValue {
    AttributeValue::L(values.into_iter().map(AttributeValue::S).collect())
}

/// Rewrites a current-generation item in the legacy wire model.
pub fn to_legacy_map(item: &Item) -> legacy::AttributeMap {
    item.iter()
        .map(|(k, v)| (k.clone(), to_legacy(v)))
        .collect()
}

fn to_legacy(value: &AttributeValue) -> legacy::AttributeValue {
    use legacy::AttributeValue as Legacy;
    match value {
        AttributeValue::S(s) => Legacy::with_s(s.clone()),
        AttributeValue::N(n) => Legacy::with_n(n.clone()),
        AttributeValue::B(b) => Legacy::with_b(b.clone()),
        AttributeValue::Bool(b) => Legacy::with_bool(*b),
        AttributeValue::Null => Legacy::with_null(),
        AttributeValue::L(values) => Legacy::with_l(values.iter().map(to_legacy).collect()),
        AttributeValue::M(entries) => Legacy::with_m(to_legacy_map(entries)),
        AttributeValue::Ss(values) => Legacy {
            ss: Some(values.clone()),
            ..Default::default()
        },
    }
}
