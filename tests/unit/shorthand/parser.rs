use super::*;
use crate::data::{Column, DType, Table};
use serde_json::json;

fn map(d: &FieldDescriptor) -> serde_json::Value {
    serde_json::Value::Object(d.to_map())
}

#[test]
fn empty_input_yields_empty_descriptor() {
    assert!(parse_shorthand("").is_empty());
}

#[test]
fn bare_names_are_fields() {
    for s in ["foobar", "blah:(fd ", "invalid(blah)", "blah:invalid", "a b c", "sum(x"] {
        assert_eq!(map(&parse_shorthand(s)), json!({ "field": s }), "{s}");
    }
}

#[test]
fn aggregate_forms() {
    assert_eq!(
        map(&parse_shorthand("avg(foobar)")),
        json!({"field": "foobar", "aggregate": "avg"})
    );
    assert_eq!(
        map(&parse_shorthand("sum(foobar):Q")),
        json!({"field": "foobar", "aggregate": "sum", "type": "quantitative"})
    );
    assert_eq!(
        map(&parse_shorthand("average(a b:(c\nd):Q")),
        json!({"field": "a b:(c\nd", "aggregate": "average", "type": "quantitative"})
    );
}

#[test]
fn count_defaults_to_quantitative() {
    assert_eq!(
        map(&parse_shorthand("count()")),
        json!({"aggregate": "count", "type": "quantitative"})
    );
    assert_eq!(
        map(&parse_shorthand("count():O")),
        json!({"aggregate": "count", "type": "ordinal"})
    );
}

#[test]
fn type_synonyms_are_equivalent() {
    let full = parse_shorthand("foobar:nominal");
    assert_eq!(map(&full), json!({"field": "foobar", "type": "nominal"}));
    assert_eq!(parse_shorthand("foobar:N"), full);
    assert_eq!(parse_shorthand("foobar:n"), full);
    assert_eq!(parse_shorthand("foobar:NOMINAL"), full);
}

#[test]
fn time_units_default_to_temporal() {
    assert_eq!(
        map(&parse_shorthand("month(x)")),
        json!({"field": "x", "timeUnit": "month", "type": "temporal"})
    );
    assert_eq!(
        map(&parse_shorthand("date(date):quantitative")),
        json!({"field": "date", "timeUnit": "date", "type": "quantitative"})
    );
    assert_eq!(
        map(&parse_shorthand("utcyearmonthdate(field)")),
        json!({"field": "field", "timeUnit": "utcyearmonthdate", "type": "temporal"})
    );
}

#[test]
fn invalid_call_with_invalid_suffix_is_literal() {
    assert_eq!(
        map(&parse_shorthand("invalid(blah):invalid")),
        json!({"field": "invalid(blah):invalid"})
    );
    assert_eq!(
        map(&parse_shorthand("invalid(blah):Q")),
        json!({"field": "invalid(blah)", "type": "quantitative"})
    );
}

#[test]
fn escaped_colon_is_not_split() {
    assert_eq!(map(&parse_shorthand("rate\\:Q")), json!({"field": "rate\\:Q"}));
    assert_eq!(
        map(&parse_shorthand("rate\\:x:Q")),
        json!({"field": "rate\\:x", "type": "quantitative"})
    );
}

#[test]
fn window_ops_produce_op() {
    let p = ShorthandParser::new().with_opts(ShorthandOpts {
        parse_aggregates: false,
        parse_window_ops: true,
        ..ShorthandOpts::default()
    });
    assert_eq!(map(&p.parse("rank(x)")), json!({"field": "x", "op": "rank"}));
    assert_eq!(map(&p.parse("sum(x)")), json!({"field": "x", "op": "sum"}));
    assert_eq!(map(&p.parse("count()")), json!({"op": "count"}));

    // aggregates take precedence when both are enabled
    let both = ShorthandParser::new().with_opts(ShorthandOpts::default().with_window_ops(true));
    assert_eq!(map(&both.parse("sum(x)")), json!({"field": "x", "aggregate": "sum"}));
    assert_eq!(map(&both.parse("rank(x)")), json!({"field": "x", "op": "rank"}));
    assert_eq!(map(&parse_shorthand("rank(x)")), json!({"field": "rank(x)"}));
}

#[test]
fn disabled_types_keep_colons() {
    let p = ShorthandParser::new().with_opts(ShorthandOpts::default().with_types(false));
    assert_eq!(map(&p.parse("foo:Q")), json!({"field": "foo:Q"}));
}

#[test]
fn data_fills_missing_type() {
    let table = Table::new()
        .with_column(Column::from_values("foo", vec![json!("A"), json!("B")]))
        .with_column(Column::from_values("bar", vec![json!(1), json!(2)]))
        .with_column(Column::new(
            "size",
            DType::Categorical {
                ordered: true,
                categories: vec![json!("S"), json!("M"), json!("L")],
            },
            vec![json!("M"), json!("S")],
        ));

    assert_eq!(
        map(&parse_shorthand_with_data("foo", &table)),
        json!({"field": "foo", "type": "nominal"})
    );
    assert_eq!(
        map(&parse_shorthand_with_data("bar", &table)),
        json!({"field": "bar", "type": "quantitative"})
    );
    assert_eq!(
        map(&parse_shorthand_with_data("bar:O", &table)),
        json!({"field": "bar", "type": "ordinal"})
    );
    assert_eq!(
        map(&parse_shorthand_with_data("sum(bar)", &table)),
        json!({"field": "bar", "aggregate": "sum", "type": "quantitative"})
    );
    assert_eq!(
        map(&parse_shorthand_with_data("size", &table)),
        json!({"field": "size", "type": "ordinal", "sort": ["S", "M", "L"]})
    );
    assert_eq!(
        map(&parse_shorthand_with_data("missing", &table)),
        json!({"field": "missing"})
    );
}

#[test]
fn escaped_field_names_match_columns() {
    let table = Table::new().with_column(Column::from_values("a:b", vec![json!(1.5)]));
    assert_eq!(
        map(&parse_shorthand_with_data("a\\:b", &table)),
        json!({"field": "a\\:b", "type": "quantitative"})
    );
}

#[test]
fn canonical_shorthand_round_trips() {
    for s in ["sum(foobar):Q", "foobar:N", "count():O", "month(x):T", "plain"] {
        let d = parse_shorthand(s);
        let back = d.to_shorthand().expect("canonical form");
        assert_eq!(parse_shorthand(&back), d, "{s}");
    }
}

#[test]
fn inexpressible_descriptors_have_no_shorthand() {
    assert_eq!(FieldDescriptor::field("rate:Q").to_shorthand(), None);
    assert_eq!(FieldDescriptor::field("sum(x)").to_shorthand(), None);
    assert_eq!(
        FieldDescriptor::field("x")
            .with_aggregate("sum")
            .with_time_unit("month")
            .to_shorthand(),
        None
    );
    assert_eq!(
        FieldDescriptor::field("x").with_time_unit("month").to_shorthand(),
        None
    );
}

#[test]
fn field_type_codes() {
    assert_eq!(FieldType::from_code("q"), Some(FieldType::Quantitative));
    assert_eq!(FieldType::from_code("Temporal"), Some(FieldType::Temporal));
    assert_eq!(FieldType::from_code("G"), Some(FieldType::Geojson));
    assert_eq!(FieldType::from_code("X"), None);
    assert!("bogus".parse::<FieldType>().is_err());
    assert_eq!(
        serde_json::to_value(FieldType::Ordinal).unwrap(),
        json!("ordinal")
    );
}

#[test]
fn descriptor_serde_uses_vega_lite_keys() {
    let d = parse_shorthand("month(x):O");
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v, json!({"field": "x", "timeUnit": "month", "type": "ordinal"}));
    let back: FieldDescriptor = serde_json::from_value(v).unwrap();
    assert_eq!(back, d);
}
