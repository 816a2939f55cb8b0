use serde_json::{Map, Value};

use crate::foundation::error::json_kind;
use crate::schema::SchemaValidator;
use crate::schema::error::{SchemaError, SchemaErrors, SchemaPathElem};

/// Validator for a small subset of JSON Schema.
///
/// Understands `type`, `enum`, `const`, `required`, `properties`,
/// `additionalProperties`, `items`, `anyOf`, `minimum` and `maximum`. Other keywords,
/// `$ref` included, are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubsetValidator;

impl SchemaValidator for SubsetValidator {
    fn validate(&self, instance: &Value, schema: &Value) -> Result<(), SchemaErrors> {
        let mut errors = Vec::new();
        check(instance, schema, &mut Vec::new(), &mut errors);
        SchemaErrors::into_result(errors)
    }
}

fn check(
    instance: &Value,
    schema: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let schema = match schema {
        Value::Bool(true) => return,
        Value::Bool(false) => {
            errors.push(SchemaError::at(path, "no value is allowed here"));
            return;
        }
        Value::Object(map) => map,
        _ => return,
    };

    if let Some(ty) = schema.get("type") {
        let allowed: Vec<&str> = match ty {
            Value::String(s) => vec![s.as_str()],
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        };
        if !allowed.is_empty() && !allowed.iter().any(|t| has_type(instance, t)) {
            errors.push(SchemaError::at(
                path,
                format!("expected {}, got {}", allowed.join(" or "), json_kind(instance)),
            ));
            return;
        }
    }

    if let Some(Value::Array(options)) = schema.get("enum")
        && !options.contains(instance)
    {
        errors.push(SchemaError::at(
            path,
            format!("{instance} is not one of {}", Value::Array(options.clone())),
        ));
    }
    if let Some(expected) = schema.get("const")
        && expected != instance
    {
        errors.push(SchemaError::at(path, format!("expected constant {expected}")));
    }

    if let Some(n) = instance.as_f64() {
        if let Some(min) = schema.get("minimum").and_then(Value::as_f64)
            && n < min
        {
            errors.push(SchemaError::at(path, format!("{n} is less than the minimum {min}")));
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64)
            && n > max
        {
            errors.push(SchemaError::at(path, format!("{n} is greater than the maximum {max}")));
        }
    }

    if let Value::Object(obj) = instance {
        check_object(obj, schema, path, errors);
    }

    if let (Value::Array(items), Some(item_schema)) = (instance, schema.get("items")) {
        for (i, item) in items.iter().enumerate() {
            path.push(SchemaPathElem::Index(i));
            check(item, item_schema, path, errors);
            path.pop();
        }
    }

    if let Some(Value::Array(options)) = schema.get("anyOf") {
        let matched = options.iter().any(|option| {
            let mut scratch = Vec::new();
            check(instance, option, &mut path.clone(), &mut scratch);
            scratch.is_empty()
        });
        if !matched {
            errors.push(SchemaError::at(path, "value does not match any allowed schema"));
        }
    }
}

fn check_object(
    obj: &Map<String, Value>,
    schema: &Map<String, Value>,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    if let Some(Value::Array(required)) = schema.get("required") {
        for key in required.iter().filter_map(Value::as_str) {
            if !obj.contains_key(key) {
                errors.push(SchemaError::at(
                    path,
                    format!("missing required property '{key}'"),
                ));
            }
        }
    }

    let properties = schema.get("properties").and_then(Value::as_object);
    for (key, value) in obj {
        path.push(SchemaPathElem::Key(key.clone()));
        match properties.and_then(|p| p.get(key)) {
            Some(sub) => check(value, sub, path, errors),
            None => match schema.get("additionalProperties") {
                Some(Value::Bool(false)) => errors.push(SchemaError::at(
                    path,
                    format!("additional property '{key}' is not allowed"),
                )),
                Some(sub @ Value::Object(_)) => check(value, sub, path, errors),
                _ => {}
            },
        }
        path.pop();
    }
}

fn has_type(instance: &Value, ty: &str) -> bool {
    match ty {
        "null" => instance.is_null(),
        "boolean" => instance.is_boolean(),
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "number" => instance.is_number(),
        "integer" => {
            instance.is_i64()
                || instance.is_u64()
                || instance.as_f64().is_some_and(|f| f.fract() == 0.0)
        }
        _ => true,
    }
}
