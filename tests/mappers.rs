//! Behaviour of each mapper generation against recording and failing
//! clients.

mod common;

use std::sync::Arc;

use common::{FailingClient, FailingLegacyClient, RecordingClient, RecordingLegacyClient};
use mapper_benchmarks::enhanced::{EnhancedClient, Key, TableSchema};
use mapper_benchmarks::fixtures::{
    huge_bean_table_schema, small_bean_table_schema, tiny_bean_table_schema, HugeBean, ItemFactory,
    SmallBean, TinyBean,
};
use mapper_benchmarks::legacy::{self, Mapper};
use mapper_benchmarks::model::{AttributeValue, GetItemResponse, Item};
use mapper_benchmarks::MapperError;

fn tiny_schema() -> Arc<TableSchema<TinyBean>> {
    Arc::new(tiny_bean_table_schema())
}

// =============================================================================
// Enhanced
// =============================================================================

#[test]
fn enhanced_get_sends_partition_key_to_the_bound_table() {
    let client = EnhancedClient::new(RecordingClient::answering(GetItemResponse::with_item(
        ItemFactory::new().tiny(),
    )));
    let table = client.table("TINY", tiny_schema());

    let got = table.get_item(&Key::partition("key")).unwrap();
    assert_eq!(got, Some(ItemFactory::new().tiny_bean()));

    let gets = table.client().gets.lock().unwrap();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].table_name, "TINY");
    assert_eq!(gets[0].key.len(), 1);
    assert_eq!(gets[0].key["hashKey"], AttributeValue::S("key".into()));
}

#[test]
fn enhanced_get_of_absent_item_is_none() {
    let client = EnhancedClient::new(RecordingClient::default());
    let table = client.table("TINY", tiny_schema());
    assert_eq!(table.get_item(&Key::partition("key")).unwrap(), None);
}

#[test]
fn enhanced_put_writes_every_schema_attribute() {
    let client = EnhancedClient::new(RecordingClient::default());
    let table = client.table("SMALL", Arc::new(small_bean_table_schema()));
    let bean = ItemFactory::new().small_bean();

    table.put_item(&bean).unwrap();

    let puts = table.client().puts.lock().unwrap();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].table_name, "SMALL");
    assert_eq!(puts[0].item, ItemFactory::new().small());
    assert_eq!(puts[0].item["binaryAttr"], AttributeValue::B(bean.binary_attr.clone()));
}

#[test]
fn enhanced_put_rejects_blank_partition_key() {
    let client = EnhancedClient::new(RecordingClient::default());
    let table = client.table("TINY", tiny_schema());

    let err = table.put_item(&TinyBean::default()).unwrap_err();
    assert!(matches!(err, MapperError::MissingKey { ref key, .. } if key == "hashKey"));
    assert!(table.client().puts.lock().unwrap().is_empty());
}

#[test]
fn enhanced_get_without_partition_key_fails() {
    let schema = TableSchema::builder(TinyBean::default)
        .attribute("stringAttr", |b| &b.string_attr, |b, v| b.string_attr = v)
        .build();
    let client = EnhancedClient::new(RecordingClient::default());
    let table = client.table("TINY", Arc::new(schema));

    let err = table.get_item(&Key::partition("key")).unwrap_err();
    assert!(matches!(err, MapperError::MissingKey { .. }));
}

#[test]
fn enhanced_decode_reports_type_mismatch() {
    let mut item = ItemFactory::new().tiny();
    item.insert("stringAttr".into(), AttributeValue::N("7".into()));

    let err = tiny_bean_table_schema().map_to_item(&item).unwrap_err();
    match err {
        MapperError::TypeMismatch { attribute, expected } => {
            assert_eq!(attribute, "stringAttr");
            assert_eq!(expected, "S");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn enhanced_decode_reports_bad_number() {
    let mut item = ItemFactory::new().huge();
    item.insert("numberAttr".into(), AttributeValue::N("twelve".into()));

    let err = huge_bean_table_schema().map_to_item(&item).unwrap_err();
    assert!(matches!(err, MapperError::InvalidNumber { ref value, .. } if value == "twelve"));
}

#[test]
fn enhanced_decode_keeps_defaults_for_missing_and_null_attributes() {
    let mut item = Item::new();
    item.insert("hashKey".into(), AttributeValue::S("k".into()));
    item.insert("binaryAttr".into(), AttributeValue::Null);
    item.insert("notInSchema".into(), AttributeValue::Bool(true));

    let bean: SmallBean = small_bean_table_schema().map_to_item(&item).unwrap();
    assert_eq!(
        bean,
        SmallBean {
            hash_key: "k".into(),
            ..Default::default()
        }
    );
}

#[test]
fn enhanced_client_errors_propagate() {
    let client = EnhancedClient::new(FailingClient);
    let table = client.table("TINY", tiny_schema());

    assert!(matches!(
        table.get_item(&Key::partition("key")),
        Err(MapperError::Client(_))
    ));
    assert!(matches!(
        table.put_item(&ItemFactory::new().tiny_bean()),
        Err(MapperError::Client(_))
    ));
}

// =============================================================================
// Legacy
// =============================================================================

#[test]
fn legacy_load_sends_only_the_hash_key() {
    let mapper = Mapper::new(RecordingLegacyClient::answering(
        legacy::GetItemResult::with_item(ItemFactory::new().legacy_tiny()),
    ));
    let key = TinyBean {
        hash_key: "hashKey".into(),
        string_attr: "ignored".into(),
    };

    let got = mapper.load(&key).unwrap();
    assert_eq!(got, Some(ItemFactory::new().tiny_bean()));

    let gets = mapper.client().gets.lock().unwrap();
    assert_eq!(gets.len(), 1);
    assert_eq!(gets[0].table_name, "TinyBean");
    assert_eq!(gets[0].key.len(), 1);
    assert_eq!(gets[0].key["hashKey"], legacy::AttributeValue::with_s("hashKey"));
}

#[test]
fn legacy_load_of_absent_item_is_none() {
    let mapper = Mapper::new(RecordingLegacyClient::default());
    assert_eq!(mapper.load(&TinyBean::keyed("hashKey")).unwrap(), None);
}

#[test]
fn legacy_save_marshals_marked_bytes_as_binary() {
    let mapper = Mapper::new(RecordingLegacyClient::default());
    let bean = SmallBean {
        hash_key: "k".into(),
        binary_attr: vec![0, 7, 255],
        ..Default::default()
    };

    mapper.save(&bean).unwrap();

    let puts = mapper.client().puts.lock().unwrap();
    assert_eq!(puts[0].table_name, "SmallBean");
    assert_eq!(puts[0].item["binaryAttr"], legacy::AttributeValue::with_b(vec![0, 7, 255]));
    assert_eq!(puts[0].item["listAttr"], legacy::AttributeValue::with_l(vec![]));
}

#[test]
fn legacy_binary_maps_round_trip() {
    let bean = ItemFactory::new().huge_bean();
    let map = legacy::to_attribute_map(&bean).unwrap();

    let maps = map["mapAttr3"].l.as_ref().unwrap();
    assert_eq!(maps.len(), bean.map_attr3.len());
    let first = maps[0].m.as_ref().unwrap();
    assert_eq!(
        first["key0"],
        legacy::AttributeValue::with_b(bean.map_attr3[0]["key0"].clone())
    );

    let back: HugeBean = legacy::from_attribute_map(&map).unwrap();
    assert_eq!(back, bean);
}

#[test]
fn legacy_decode_accepts_number_lists_for_binary_fields() {
    let mut map = ItemFactory::new().legacy_small();
    map.insert(
        "binaryAttr".into(),
        legacy::AttributeValue::with_l(vec![
            legacy::AttributeValue::with_n("1"),
            legacy::AttributeValue::with_n("2"),
        ]),
    );

    let bean: SmallBean = legacy::from_attribute_map(&map).unwrap();
    assert_eq!(bean.binary_attr, vec![1, 2]);
}

#[test]
fn legacy_save_rejects_blank_hash_key() {
    let mapper = Mapper::new(RecordingLegacyClient::default());
    let err = mapper.save(&HugeBean::default()).unwrap_err();
    assert!(matches!(err, MapperError::MissingKey { ref table, .. } if table == "HugeBean"));
    assert!(mapper.client().puts.lock().unwrap().is_empty());
}

#[test]
fn legacy_decode_rejects_attribute_without_member() {
    let mut map = ItemFactory::new().legacy_tiny();
    map.insert("stringAttr".into(), legacy::AttributeValue::default());

    let err = legacy::from_attribute_map::<TinyBean>(&map).unwrap_err();
    assert!(matches!(err, MapperError::Unsupported(_)));
}

#[test]
fn legacy_decode_reports_bad_number() {
    let mut map = ItemFactory::new().legacy_huge();
    map.insert("numberAttr".into(), legacy::AttributeValue::with_n("1e"));

    let err = legacy::from_attribute_map::<HugeBean>(&map).unwrap_err();
    assert!(matches!(err, MapperError::InvalidNumber { .. }));
}

#[test]
fn legacy_decode_type_mismatch_surfaces_as_marshal_error() {
    let mut map = ItemFactory::new().legacy_tiny();
    map.insert("stringAttr".into(), legacy::AttributeValue::with_bool(true));

    let err = legacy::from_attribute_map::<TinyBean>(&map).unwrap_err();
    assert!(matches!(err, MapperError::Marshal(_)));
}

#[test]
fn legacy_marshal_rejects_non_struct_items() {
    let err = legacy::to_attribute_map(&vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, MapperError::Unsupported(_)));
}

#[test]
fn legacy_client_errors_propagate() {
    let mapper = Mapper::new(FailingLegacyClient);

    assert!(matches!(
        mapper.load(&TinyBean::keyed("hashKey")),
        Err(MapperError::Client(ref msg)) if msg == "connection reset"
    ));
    assert!(matches!(
        mapper.save(&ItemFactory::new().tiny_bean()),
        Err(MapperError::Client(ref msg)) if msg == "connection reset"
    ));
}
