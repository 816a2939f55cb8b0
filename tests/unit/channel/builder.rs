use super::*;
use crate::condition::{selection_point, value, when};
use crate::data::{Column, DType, Table};
use serde_json::json;

fn cars() -> Table {
    Table::new()
        .with_column(Column::from_values("hp", vec![json!(130), json!(165)]))
        .with_column(Column::from_values("origin", vec![json!("USA"), json!("Japan")]))
        .with_column(Column::new(
            "size",
            DType::Categorical {
                ordered: true,
                categories: vec![json!("S"), json!("M"), json!("L")],
            },
            vec![json!("S"), json!("L")],
        ))
}

#[test]
fn shorthand_channels_resolve() {
    let enc = EncodingBuilder::new()
        .channel("x", "sum(hp):Q")
        .unwrap()
        .channel("y", "count()")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        enc.to_json(),
        json!({
            "x": {"field": "hp", "aggregate": "sum", "type": "quantitative"},
            "y": {"aggregate": "count", "type": "quantitative"}
        })
    );
}

#[test]
fn types_come_from_data() {
    let data = cars();
    let enc = EncodingBuilder::new()
        .data(&data)
        .channel("x", "hp")
        .unwrap()
        .channel("color", "origin")
        .unwrap()
        .channel("y", "size")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(enc.get("x").unwrap()["type"], "quantitative");
    assert_eq!(enc.get("color").unwrap()["type"], "nominal");
    assert_eq!(
        enc.get("y").unwrap(),
        &json!({"field": "size", "type": "ordinal", "sort": ["S", "M", "L"]})
    );
}

#[test]
fn inferred_sort_is_dropped_where_not_allowed() {
    let data = cars();
    let enc = EncodingBuilder::new()
        .data(&data)
        .channel("detail", "size")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(enc.get("detail").unwrap(), &json!({"field": "size", "type": "ordinal"}));
}

#[test]
fn type_fallbacks_without_data() {
    let enc = EncodingBuilder::new()
        .channel("x", FieldDescriptor::field("a").with_aggregate("mean"))
        .unwrap()
        .channel("y", ChannelSpec::from("b").with("bin", true))
        .unwrap()
        .channel("color", "c")
        .unwrap()
        .channel("order", ChannelDef::new().with("field", "d"))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(enc.get("x").unwrap()["type"], "quantitative");
    assert_eq!(enc.get("color").unwrap()["type"], "nominal");
    assert_eq!(enc.get("order").unwrap()["type"], "ordinal");
    assert_eq!(enc.get("y").unwrap()["type"], "quantitative");
    assert_eq!(enc.get("y").unwrap()["bin"], true);
}

#[test]
fn bin_and_time_unit_drive_types_for_definitions() {
    let enc = EncodingBuilder::new()
        .channel("color", ChannelDef::new().with("field", "a").with("bin", true))
        .unwrap()
        .channel("x", ChannelDef::new().with("field", "t").with("timeUnit", "month"))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(enc.get("color").unwrap()["type"], "quantitative");
    assert_eq!(enc.get("x").unwrap()["type"], "temporal");
}

#[test]
fn values_and_datums() {
    let enc = EncodingBuilder::new()
        .channel("color", value("steelblue"))
        .unwrap()
        .channel("y", ChannelSpec::Datum(json!(10)))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(enc.get("color").unwrap(), &json!({"value": "steelblue"}));
    assert_eq!(enc.get("y").unwrap(), &json!({"datum": 10}));
}

#[test]
fn unknown_and_duplicate_channels_fail() {
    let err = EncodingBuilder::new().channel("colour", "a").err().unwrap();
    assert!(matches!(err, VlError::Validation(_)));

    let err = EncodingBuilder::new()
        .channel("x", "a")
        .unwrap()
        .channel("x", "b")
        .err()
        .unwrap();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn illegal_properties_fail() {
    let err = EncodingBuilder::new()
        .channel("x", ChannelSpec::from("a:Q").with("legend", json!(null)))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("'legend'"));

    let err = EncodingBuilder::new()
        .channel("detail", value(1))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("'value'"));
}

#[test]
fn lists_only_on_multi_channels() {
    let enc = EncodingBuilder::new()
        .channel("tooltip", vec![ChannelSpec::from("a:N"), ChannelSpec::from("b:Q")])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        enc.get("tooltip").unwrap(),
        &json!([{"field": "a", "type": "nominal"}, {"field": "b", "type": "quantitative"}])
    );

    let err = EncodingBuilder::new()
        .channel("x", vec![ChannelSpec::from("a")])
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("list"));
}

#[test]
fn extras_cannot_reset_the_field() {
    let err = EncodingBuilder::new()
        .channel("x", ChannelSpec::from("a:Q").with("field", "b"))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, VlError::Validation(_)));
    assert!(err.to_string().contains("field"));

    let enc = EncodingBuilder::new()
        .channel(
            "x",
            ChannelSpec::from("a:Q")
                .with("title", "A")
                .with("axis", json!({"grid": false})),
        )
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        enc.get("x").unwrap(),
        &json!({"field": "a", "type": "quantitative", "title": "A", "axis": {"grid": false}})
    );
}

#[test]
fn conditions_are_typed_and_validated() {
    let data = cars();
    let sel = selection_point().name("pick").build().unwrap();
    let color = when(&sel).then("origin").otherwise(value("lightgray")).unwrap();
    let enc = EncodingBuilder::new()
        .data(&data)
        .mark("point")
        .channel("color", color)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        enc.get("color").unwrap(),
        &json!({
            "condition": {"param": "pick", "field": "origin", "type": "nominal"},
            "value": "lightgray"
        })
    );
    assert!(enc.validate().is_ok());
}

#[test]
fn inapplicable_channels_are_kept() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let enc = EncodingBuilder::new()
        .mark("bar")
        .channel("theta", "a:Q")
        .unwrap()
        .build()
        .unwrap();
    assert!(enc.get("theta").is_some());
    assert_eq!(enc.to_spec_json()["mark"], "bar");
}

#[test]
fn validate_with_uses_the_spec_fragment() {
    let enc = EncodingBuilder::new()
        .mark("bar")
        .channel("x", "a:N")
        .unwrap()
        .build()
        .unwrap();
    let schema = json!({"type": "object", "required": ["mark", "encoding"]});
    assert!(enc.validate_with(&crate::schema::SubsetValidator, &schema).is_ok());
    let strict = json!({"type": "object", "required": ["data"]});
    let errs = enc.validate_with(&crate::schema::SubsetValidator, &strict).unwrap_err();
    assert_eq!(errs.errors.len(), 1);
}

#[test]
fn specs_from_json() {
    assert_eq!(
        ChannelSpec::from_json(&json!("a:Q")).unwrap(),
        ChannelSpec::Shorthand("a:Q".into())
    );
    let spec = ChannelSpec::from_json(&json!({"shorthand": "a:Q", "title": "A"})).unwrap();
    assert_eq!(spec, ChannelSpec::from("a:Q").with("title", "A"));
    assert!(matches!(
        ChannelSpec::from_json(&json!([{"field": "a"}, "b"])).unwrap(),
        ChannelSpec::Many(items) if items.len() == 2
    ));
    let err = ChannelSpec::from_json(&json!(1)).unwrap_err();
    assert!(matches!(err, VlError::Type(_)));
    assert!(ChannelSpec::from_json(&json!({"shorthand": 1})).is_err());
}
