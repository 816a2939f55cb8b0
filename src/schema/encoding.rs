use serde_json::{Map, Value};

use crate::channel::capability::{ChannelCapability, channel};
use crate::condition::SHORTHAND_KEYS;
use crate::schema::error::{SchemaError, SchemaErrors, SchemaPathElem};
use crate::shorthand::FieldType;

/// Check the structural invariants of an encoding.
///
/// Accepts either a unit spec with an `encoding` member or the encoding object itself.
/// Channel names, property keys, type names and condition shapes are checked; values of
/// channel-specific properties such as `scale` or `axis` are not.
pub fn validate_encoding(instance: &Value) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();
    let (encoding, mut path) = match instance.get("encoding") {
        Some(enc) => (enc, vec![SchemaPathElem::from("encoding")]),
        None => (instance, Vec::new()),
    };
    let Some(channels) = encoding.as_object() else {
        errors.push(SchemaError::at(&path, "encoding must be an object"));
        return SchemaErrors::into_result(errors);
    };

    for (name, def) in channels {
        path.push(SchemaPathElem::Key(name.clone()));
        match channel(name) {
            None => errors.push(SchemaError::at(
                &path,
                format!("unknown encoding channel '{name}'"),
            )),
            Some(cap) => match def {
                Value::Array(items) if cap.multi => {
                    for (i, item) in items.iter().enumerate() {
                        path.push(SchemaPathElem::Index(i));
                        validate_definition(cap, item, &mut path, &mut errors);
                        path.pop();
                    }
                }
                Value::Array(_) => errors.push(SchemaError::at(
                    &path,
                    format!("channel '{name}' does not accept a list of definitions"),
                )),
                other => validate_definition(cap, other, &mut path, &mut errors),
            },
        }
        path.pop();
    }

    SchemaErrors::into_result(errors)
}

fn validate_definition(
    cap: &ChannelCapability,
    def: &Value,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(map) = def.as_object() else {
        errors.push(SchemaError::at(path, "channel definition must be an object"));
        return;
    };
    for key in map.keys() {
        if key != "condition" && !cap.allows(key) {
            path.push(SchemaPathElem::Key(key.clone()));
            errors.push(SchemaError::at(
                path,
                format!("property '{key}' is not valid for channel '{}'", cap.name),
            ));
            path.pop();
        }
    }
    check_body(map, path, errors);

    if let Some(cond) = map.get("condition") {
        path.push(SchemaPathElem::from("condition"));
        if !cap.allows("condition") {
            errors.push(SchemaError::at(
                path,
                format!("channel '{}' does not accept conditions", cap.name),
            ));
        }
        match cond {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    path.push(SchemaPathElem::Index(i));
                    check_condition(item, true, path, errors);
                    path.pop();
                }
            }
            other => check_condition(other, false, path, errors),
        }
        path.pop();
    }
}

fn check_condition(
    cond: &Value,
    in_list: bool,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    let Some(map) = cond.as_object() else {
        errors.push(SchemaError::at(path, "condition must be an object"));
        return;
    };
    if !map.contains_key("test") && !map.contains_key("param") {
        errors.push(SchemaError::at(path, "condition needs a `test` or a `param`"));
    }
    if in_list && let Some(key) = map.keys().find(|k| SHORTHAND_KEYS.contains(&k.as_str())) {
        errors.push(SchemaError::at(
            path,
            format!("a list of conditions may only hold value conditions, found '{key}'"),
        ));
    }
    check_body(map, path, errors);
}

fn check_body(
    map: &Map<String, Value>,
    path: &mut Vec<SchemaPathElem>,
    errors: &mut Vec<SchemaError>,
) {
    if let Some(ty) = map.get("type") {
        let known = ty
            .as_str()
            .is_some_and(|s| FieldType::ALL.iter().any(|t| t.as_str() == s));
        if !known {
            path.push(SchemaPathElem::from("type"));
            errors.push(SchemaError::at(
                path,
                format!(
                    "unknown type {ty}; expected one of {}",
                    FieldType::ALL.map(FieldType::as_str).join(", ")
                ),
            ));
            path.pop();
        }
    }
    if map.contains_key("field") && map.contains_key("value") {
        errors.push(SchemaError::at(path, "`field` and `value` cannot both be set"));
    }
}
