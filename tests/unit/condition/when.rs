use super::*;
use crate::condition::param::{param, selection_point};
use crate::condition::statement::value;
use serde_json::json;

fn p1() -> Predicate {
    Predicate::from(datum("x").gt(5))
}

fn p2() -> Predicate {
    Predicate::from(datum("x").lt(0))
}

#[test]
fn field_then_value_collapses_to_flat_form() {
    let def = when(p1()).then("field:Q").otherwise(value(0)).unwrap();
    assert_eq!(
        def.to_json(),
        json!({
            "condition": {"test": "(datum.x > 5)", "field": "field", "type": "quantitative"},
            "value": 0
        })
    );
}

#[test]
fn value_chain_serializes_as_list() {
    let def = when(p1())
        .then(value(5))
        .when(p2())
        .unwrap()
        .then(value(10))
        .unwrap()
        .otherwise(value(0))
        .unwrap();
    assert_eq!(
        def.to_json(),
        json!({
            "condition": [
                {"test": "(datum.x > 5)", "value": 5},
                {"test": "(datum.x < 0)", "value": 10}
            ],
            "value": 0
        })
    );
}

#[test]
fn chaining_after_a_field_outcome_fails() {
    let err = when(p1()).then("field1:Q").when(p2()).unwrap_err();
    assert!(matches!(err, VlError::Composition(_)));
    assert!(err.to_string().contains("field1"));
    assert!(err.to_string().contains(".otherwise()"));
}

#[test]
fn field_outcome_cannot_join_a_value_chain() {
    let chained = when(p1()).then(value(1)).when(p2()).unwrap();
    let err = chained.then("field2:Q").unwrap_err();
    assert!(matches!(err, VlError::Composition(_)));
    assert!(err.to_string().contains("field2"));
}

#[test]
fn two_fields_conflict_on_otherwise() {
    let err = when(p1()).then("a:Q").otherwise("b:N").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Only one field"));
    assert!(msg.contains(r#""field":"a""#));
    assert!(msg.contains(r#""field":"b""#));
}

#[test]
fn single_value_with_field_fallback_is_flat() {
    let def = when(p1()).then(value("red")).otherwise("c:N").unwrap();
    assert_eq!(
        def.to_json(),
        json!({
            "condition": {"test": "(datum.x > 5)", "value": "red"},
            "field": "c",
            "type": "nominal"
        })
    );
}

#[test]
fn longer_value_chain_with_field_fallback_fails() {
    let then = when(p1())
        .then(value(1))
        .when(p2())
        .unwrap()
        .then(value(2))
        .unwrap();
    assert!(then.otherwise("c:N").is_err());
}

#[test]
fn states_are_reusable() {
    let w = when(p1());
    let a = w.then(value(1));
    let b = w.then(value(2));
    assert_ne!(a, b);
    let first = a.otherwise(value(0)).unwrap();
    let second = a.otherwise(value(9)).unwrap();
    assert_eq!(first.condition(), second.condition());
}

#[test]
fn channel_fallback_receives_the_condition() {
    let fallback = ChannelDef::new().with("value", "gray").with("title", "T");
    let def = when(p1()).then(value("red")).otherwise(fallback).unwrap();
    assert_eq!(def.get("title"), Some(&json!("T")));
    assert_eq!(def.condition(), Some(&json!([{"test": "(datum.x > 5)", "value": "red"}])));
}

#[test]
fn then_alone_is_a_channel_def() {
    let def: ChannelDef = when(p1()).then("a:N").into();
    assert_eq!(
        def.to_json(),
        json!({"condition": {"test": "(datum.x > 5)", "field": "a", "type": "nominal"}})
    );
}

#[test]
fn when_with_requires_something() {
    let err = when_with(WhenArgs::new()).unwrap_err();
    assert!(matches!(err, VlError::Argument(_)));
    assert!(err.to_string().contains("At least one predicate"));
}

#[test]
fn constraints_and_predicates_are_and_combined() {
    let w = when_with(
        WhenArgs::new()
            .predicate(p1())
            .constraint("Origin", "USA")
            .constraint("Cylinders", 4),
    )
    .unwrap();
    let def = w.then(value(1)).otherwise(value(0)).unwrap();
    assert_eq!(
        def.condition(),
        Some(&json!([{
            "test": "(((datum.x > 5) && (datum.Origin == 'USA')) && (datum.Cylinders == 4))",
            "value": 1
        }]))
    );
}

#[test]
fn constraint_only_when() {
    let w = when_with(WhenArgs::new().constraint("a b", true)).unwrap();
    let def = w.then(value(1)).otherwise(value(0)).unwrap();
    assert_eq!(
        def.condition(),
        Some(&json!([{"test": "(datum['a b'] == true)", "value": 1}]))
    );
}

#[test]
fn non_composable_predicates_are_rejected_in_groups() {
    let err = when_with(WhenArgs::new().predicate("datum.x > 1").predicate(p1())).unwrap_err();
    assert!(matches!(err, VlError::Type(_)));
    assert!(err.to_string().contains("string"));

    // a single raw test is fine
    let w = when_with(WhenArgs::new().predicate("datum.x > 1")).unwrap();
    assert_eq!(
        w.then(value(1)).to_channel_def().condition(),
        Some(&json!([{"test": "datum.x > 1", "value": 1}]))
    );
}

#[test]
fn empty_override_applies_to_selections() {
    let sel = selection_point().name("s").build().unwrap();
    let w = when_with(WhenArgs::new().predicate(&sel).empty(false)).unwrap();
    let def = w.then("a:N").otherwise(value(0)).unwrap();
    assert_eq!(
        def.condition(),
        Some(&json!({"param": "s", "empty": false, "field": "a", "type": "nominal"}))
    );
}

#[test]
fn variable_params_compose_with_expressions() {
    let flag = param().name("flag").value(true).build().unwrap();
    let w = when_with(WhenArgs::new().predicate(&flag).predicate(p1())).unwrap();
    let def = w.then(value(1)).otherwise(value(0)).unwrap();
    assert_eq!(
        def.condition(),
        Some(&json!([{"test": "(flag && (datum.x > 5))", "value": 1}]))
    );
}

#[test]
fn two_branch_condition() {
    let sel = selection_point().name("s").build().unwrap();
    let def = condition(&sel, "a:N", value("gray")).unwrap();
    assert_eq!(
        def.to_json(),
        json!({"condition": {"param": "s", "field": "a", "type": "nominal"}, "value": "gray"})
    );

    let def = condition(p1(), value(1), value(0)).unwrap();
    assert_eq!(
        def.to_json(),
        json!({"condition": {"test": "(datum.x > 5)", "value": 1}, "value": 0})
    );
}

#[test]
fn two_branch_condition_rejects_two_fields() {
    let err = condition(p1(), "a:N", "b:N").unwrap_err();
    assert!(matches!(err, VlError::Composition(_)));
    assert!(err.to_string().contains("if_true"));
}

#[test]
fn condition_with_extras_and_empty() {
    let sel = selection_point().name("s").build().unwrap();
    let Value::Object(extra) = json!({"legend": null}) else {
        unreachable!()
    };
    let def = condition_with(&sel, "a:N", value(0), Some(true), extra).unwrap();
    assert_eq!(
        def.condition(),
        Some(&json!({"param": "s", "empty": true, "field": "a", "type": "nominal", "legend": null}))
    );
}

#[test]
fn field_predicate_keeps_its_own_field() {
    let pred = Predicate::from_json(&json!({"field": "x", "range": [0, 5]})).unwrap();

    let def = when(pred.clone()).then("y:N").otherwise(value(0)).unwrap();
    assert_eq!(
        def.to_json(),
        json!({
            "condition": {
                "test": {"field": "x", "range": [0, 5]},
                "field": "y",
                "type": "nominal"
            },
            "value": 0
        })
    );

    let def = when(pred).then(value("red")).otherwise(value("blue")).unwrap();
    let encoding = json!({ "color": def.to_json() });
    assert!(crate::schema::validate_encoding(&encoding).is_ok());
}

#[test]
fn then_and_otherwise_carry_extra_properties() {
    let Value::Object(legend) = json!({"legend": null}) else {
        unreachable!()
    };
    let Value::Object(title) = json!({"title": "Origin"}) else {
        unreachable!()
    };
    let def = when(p1())
        .then_with("Origin:N", legend)
        .otherwise_with(value("lightgray"), title)
        .unwrap();
    assert_eq!(
        def.to_json(),
        json!({
            "condition": {
                "test": "(datum.x > 5)",
                "field": "Origin",
                "type": "nominal",
                "legend": null
            },
            "value": "lightgray",
            "title": "Origin"
        })
    );
}
