use serde_json::Value;

use crate::data::column::{Column, DType};
use crate::shorthand::FieldType;

/// Outcome of inferring an encoding type from a column.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeInference {
    /// Inferred type.
    pub field_type: FieldType,
    /// Category order, for ordered categorical columns.
    pub sort: Option<Vec<Value>>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

/// Infer the encoding type of a column.
///
/// Temporal dtypes win over numeric ones; booleans and plain categories are nominal;
/// ordered categories are ordinal and carry their order. Anything else falls back to
/// nominal, with a warning when the column has no values to look at.
pub fn infer_type(column: &Column) -> TypeInference {
    let mut out = TypeInference {
        field_type: FieldType::Nominal,
        sort: None,
        warnings: Vec::new(),
    };
    match column.dtype() {
        d if d.is_temporal() => out.field_type = FieldType::Temporal,
        d if d.is_numeric() => out.field_type = FieldType::Quantitative,
        DType::Boolean => {}
        DType::Categorical {
            ordered: true,
            categories,
        } => {
            out.field_type = FieldType::Ordinal;
            out.sort = Some(categories.clone());
        }
        DType::Categorical { ordered: false, .. } | DType::String => {}
        _ => {
            if column.non_null_count() == 0 {
                let msg = format!(
                    "column '{}' has no values to infer an encoding type from; defaulting to nominal",
                    column.name()
                );
                tracing::warn!("{msg}");
                out.warnings.push(msg);
            }
        }
    }
    out
}

/// Infer the encoding type of bare values.
pub fn infer_type_of_values(values: &[Value]) -> TypeInference {
    infer_type(&Column::from_values("", values.to_vec()))
}

#[cfg(test)]
#[path = "../../tests/unit/data/infer.rs"]
mod tests;
