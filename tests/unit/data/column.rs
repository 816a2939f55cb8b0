use super::*;
use serde_json::json;

#[test]
fn dtype_widens_integers_to_floats() {
    assert_eq!(DType::of_values(&[json!(1), json!(2.5)]), DType::Float);
    assert_eq!(DType::of_values(&[json!(1), json!(null)]), DType::Integer);
    assert_eq!(DType::of_values(&[json!(true), json!(1)]), DType::Object);
    assert_eq!(DType::of_values(&[]), DType::Object);
    assert_eq!(DType::of_values(&[json!({"a": 1})]), DType::Object);
}

#[test]
fn records_become_columns() {
    let records = vec![
        json!({"a": 1, "b": "x"}),
        json!({"a": 2, "c": true}),
    ];
    let t = Table::from_records(&records).unwrap();
    let names: Vec<_> = t.columns().iter().map(Column::name).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(t.column("a").unwrap().dtype(), &DType::Integer);
    assert_eq!(t.column("b").unwrap().values(), &[json!("x"), json!(null)]);
    assert_eq!(t.column("c").unwrap().non_null_count(), 1);
    assert!(t.has_column("b"));
    assert!(!t.has_column("z"));
}

#[test]
fn column_objects_are_accepted() {
    let t = Table::from_json(&json!({"x": [1.5, 2.5], "y": ["a", "b"]})).unwrap();
    assert_eq!(t.column("x").unwrap().dtype(), &DType::Float);
    assert_eq!(t.column("y").unwrap().len(), 2);
}

#[test]
fn non_record_input_is_a_type_error() {
    let err = Table::from_records(&[json!(3)]).unwrap_err();
    assert!(matches!(err, VlError::Type(_)));
    assert!(err.to_string().contains("number"));
    assert!(Table::from_json(&json!("nope")).is_err());
    assert!(Table::from_json(&json!({"x": 1})).is_err());
}

#[test]
fn insert_replaces_by_name() {
    let t = Table::new()
        .with_column(Column::from_values("a", vec![json!(1)]))
        .with_column(Column::from_values("a", vec![json!("s")]));
    assert_eq!(t.columns().len(), 1);
    assert_eq!(t.column("a").unwrap().dtype(), &DType::String);
}
