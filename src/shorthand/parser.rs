use serde::{Deserialize, Serialize};

use crate::data::{Dataset, infer_type};
use crate::shorthand::descriptor::{FieldDescriptor, FieldType};
use crate::shorthand::vocab;

/// Which parts of the grammar are recognized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorthandOpts {
    /// Recognize `agg(field)` and `count()`.
    pub parse_aggregates: bool,
    /// Recognize window operations, producing `op` instead of `aggregate`.
    pub parse_window_ops: bool,
    /// Recognize `unit(field)` time units.
    pub parse_timeunits: bool,
    /// Recognize a `:type` suffix.
    pub parse_types: bool,
}

impl Default for ShorthandOpts {
    fn default() -> Self {
        Self {
            parse_aggregates: true,
            parse_window_ops: false,
            parse_timeunits: true,
            parse_types: true,
        }
    }
}

impl ShorthandOpts {
    /// Return options with window-op parsing toggled.
    pub fn with_window_ops(mut self, on: bool) -> Self {
        self.parse_window_ops = on;
        self
    }

    /// Return options with type-suffix parsing toggled.
    pub fn with_types(mut self, on: bool) -> Self {
        self.parse_types = on;
        self
    }
}

/// Parse a shorthand with default options and no data.
///
/// Never fails: anything that does not match the grammar becomes a literal field name.
pub fn parse_shorthand(input: &str) -> FieldDescriptor {
    ShorthandParser::new().parse(input)
}

/// Parse a shorthand, inferring a missing type from the named column of `data`.
pub fn parse_shorthand_with_data(input: &str, data: &dyn Dataset) -> FieldDescriptor {
    ShorthandParser::new().with_data(data).parse(input)
}

/// Configurable shorthand parser.
#[derive(Clone, Copy, Default)]
pub struct ShorthandParser<'a> {
    opts: ShorthandOpts,
    data: Option<&'a dyn Dataset>,
}

impl<'a> ShorthandParser<'a> {
    /// Parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the options.
    pub fn with_opts(mut self, opts: ShorthandOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Attach a dataset used to infer missing types.
    pub fn with_data(mut self, data: &'a dyn Dataset) -> Self {
        self.data = Some(data);
        self
    }

    /// Parse `input` into a descriptor.
    pub fn parse(&self, input: &str) -> FieldDescriptor {
        let mut out = FieldDescriptor::default();
        if input.is_empty() {
            return out;
        }

        let (body, explicit) = if self.opts.parse_types {
            split_type_suffix(input)
        } else {
            (input, None)
        };

        match self.match_call(body) {
            Some(Call::Aggregate { name, field }) => {
                out.aggregate = Some(name.to_owned());
                out.field = field.map(str::to_owned);
            }
            Some(Call::Window { name, field }) => {
                out.op = Some(name.to_owned());
                out.field = field.map(str::to_owned);
            }
            Some(Call::TimeUnit { name, field }) => {
                out.time_unit = Some(name.to_owned());
                out.field = Some(field.to_owned());
            }
            None => {
                if body.contains('(') {
                    tracing::debug!(shorthand = input, "no recognized call form; literal field");
                }
                out.field = Some(body.to_owned());
            }
        }

        out.field_type = explicit;
        if out.field_type.is_none() {
            if out.aggregate.as_deref() == Some("count") && out.field.is_none() {
                out.field_type = Some(FieldType::Quantitative);
            } else if out.time_unit.is_some() {
                out.field_type = Some(FieldType::Temporal);
            }
        }

        if out.field_type.is_none()
            && let (Some(data), Some(field)) = (self.data, out.field.as_deref())
        {
            let column_name = field.replace('\\', "");
            if let Some(column) = data.column(&column_name) {
                let inferred = infer_type(column);
                tracing::debug!(
                    column = column_name.as_str(),
                    field_type = inferred.field_type.as_str(),
                    "type inferred from data"
                );
                out.field_type = Some(inferred.field_type);
                out.sort = inferred.sort;
            }
        }

        out
    }

    fn match_call<'s>(&self, body: &'s str) -> Option<Call<'s>> {
        let (name, inner) = split_call(body)?;
        let field = (!inner.is_empty()).then_some(inner);

        if self.opts.parse_aggregates {
            if name == "count" && field.is_none() {
                return Some(Call::Aggregate { name, field: None });
            }
            if field.is_some() && vocab::is_aggregate(name) {
                return Some(Call::Aggregate { name, field });
            }
        }
        if self.opts.parse_window_ops {
            if name == "count" && field.is_none() {
                return Some(Call::Window { name, field: None });
            }
            if field.is_some() && vocab::is_window_op(name) {
                return Some(Call::Window { name, field });
            }
        }
        if self.opts.parse_timeunits
            && vocab::is_timeunit(name)
            && let Some(field) = field
        {
            return Some(Call::TimeUnit { name, field });
        }
        None
    }
}

enum Call<'s> {
    Aggregate { name: &'s str, field: Option<&'s str> },
    Window { name: &'s str, field: Option<&'s str> },
    TimeUnit { name: &'s str, field: &'s str },
}

/// Split off a `:type` suffix at the last colon, unless escaped or unrecognized.
fn split_type_suffix(s: &str) -> (&str, Option<FieldType>) {
    let Some(idx) = s.rfind(':') else {
        return (s, None);
    };
    let (body, suffix) = (&s[..idx], &s[idx + 1..]);
    if body.ends_with('\\') {
        return (s, None);
    }
    match FieldType::from_code(suffix) {
        Some(t) => (body, Some(t)),
        None => (s, None),
    }
}

/// Match `name(inner)` where the closing paren is the final, unescaped character.
fn split_call(body: &str) -> Option<(&str, &str)> {
    let open = body.find('(')?;
    let name = &body[..open];
    if !is_identifier(name) {
        return None;
    }
    let inner = body[open + 1..].strip_suffix(')')?;
    if inner.ends_with('\\') {
        return None;
    }
    Some((name, inner))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
#[path = "../../tests/unit/shorthand/parser.rs"]
mod tests;
