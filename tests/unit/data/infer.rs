use super::*;
use serde_json::json;

#[test]
fn numeric_values_are_quantitative() {
    let r = infer_type_of_values(&[json!(1.0), json!(2.0), json!(3.0)]);
    assert_eq!(r.field_type, FieldType::Quantitative);
    assert!(r.warnings.is_empty());
}

#[test]
fn nulls_do_not_break_numeric_columns() {
    let r = infer_type_of_values(&[json!(1), json!(null), json!(3)]);
    assert_eq!(r.field_type, FieldType::Quantitative);
}

#[test]
fn booleans_and_strings_are_nominal() {
    assert_eq!(
        infer_type_of_values(&[json!(true), json!(false)]).field_type,
        FieldType::Nominal
    );
    assert_eq!(
        infer_type_of_values(&[json!("a"), json!("b")]).field_type,
        FieldType::Nominal
    );
}

#[test]
fn temporal_dtypes_are_temporal() {
    for dtype in [DType::Date, DType::Datetime, DType::Time, DType::Duration] {
        let col = Column::new(
            "t",
            dtype,
            vec![json!("2020-01-01"), json!("2020-01-02"), json!("2020-01-03")],
        );
        assert_eq!(infer_type(&col).field_type, FieldType::Temporal);
    }
}

#[test]
fn ordered_categories_are_ordinal_with_sort() {
    let col = Column::new(
        "size",
        DType::Categorical {
            ordered: true,
            categories: vec![json!("S"), json!("M"), json!("L")],
        },
        vec![json!("L"), json!("S")],
    );
    let r = infer_type(&col);
    assert_eq!(r.field_type, FieldType::Ordinal);
    assert_eq!(r.sort, Some(vec![json!("S"), json!("M"), json!("L")]));

    let unordered = Column::new(
        "size",
        DType::Categorical {
            ordered: false,
            categories: vec![json!("S")],
        },
        vec![json!("S")],
    );
    assert_eq!(infer_type(&unordered).field_type, FieldType::Nominal);
}

#[test]
fn empty_column_warns_once() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let r = infer_type_of_values(&[]);
    assert_eq!(r.field_type, FieldType::Nominal);
    assert_eq!(r.warnings.len(), 1);
    assert!(r.warnings[0].contains("defaulting to nominal"));
}

#[test]
fn mixed_values_are_nominal_without_warning() {
    let r = infer_type_of_values(&[json!(1), json!("a")]);
    assert_eq!(r.field_type, FieldType::Nominal);
    assert!(r.warnings.is_empty());
}
