use std::collections::HashMap;
use std::sync::OnceLock;

use crate::shorthand::FieldType::{self, Nominal as N, Ordinal as O, Quantitative as Q};

/// What one encoding channel accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelCapability {
    /// Channel name as used in the `encoding` object.
    pub name: &'static str,
    /// Accepts field definitions.
    pub field: bool,
    /// Accepts `{"datum": ...}`.
    pub datum: bool,
    /// Accepts `{"value": ...}`.
    pub value: bool,
    /// Accepts a list of definitions.
    pub multi: bool,
    /// Channel-specific properties beyond the common field and value keys.
    pub props: &'static [&'static str],
    /// Marks the channel applies to; empty means every mark.
    pub marks: &'static [&'static str],
    /// Type used when a field has no explicit or inferable type.
    pub default_type: Option<FieldType>,
}

/// Keys every field definition may carry.
pub const FIELD_KEYS: &[&str] = &[
    "field",
    "type",
    "aggregate",
    "bin",
    "timeUnit",
    "title",
    "bandPosition",
];

impl ChannelCapability {
    /// Whether `key` is a legal top-level property of this channel's definition.
    pub fn allows(&self, key: &str) -> bool {
        match key {
            "value" => self.value,
            "datum" => self.datum,
            k if FIELD_KEYS.contains(&k) => self.field,
            k => self.props.contains(&k),
        }
    }

    /// Whether the channel has an effect on `mark`.
    pub fn applies_to(&self, mark: &str) -> bool {
        self.marks.is_empty() || self.marks.contains(&mark)
    }
}

const POSITION: &[&str] = &["axis", "scale", "sort", "stack", "impute"];
const SECONDARY: &[&str] = &[];
const OFFSET: &[&str] = &["scale", "sort"];
const POLAR: &[&str] = &["scale", "sort", "stack"];
const MARK_PROP: &[&str] = &["scale", "legend", "sort", "condition"];
const TEXT: &[&str] = &["format", "formatType", "condition"];
const FACET: &[&str] = &[
    "header", "sort", "spacing", "align", "bounds", "center", "columns",
];
const ROW_COLUMN: &[&str] = &["header", "sort", "spacing", "align", "center"];
const ORDER: &[&str] = &["sort", "condition"];

const RANGED: &[&str] = &["area", "bar", "rect", "rule", "image", "text"];
const POINT_LIKE: &[&str] = &["point", "circle", "square", "text"];
const SIZED: &[&str] = &[
    "point", "circle", "square", "bar", "tick", "text", "line", "trail",
];
const ARC: &[&str] = &["arc", "text"];

const fn ch(
    name: &'static str,
    datum: bool,
    value: bool,
    props: &'static [&'static str],
    marks: &'static [&'static str],
    default_type: Option<FieldType>,
) -> ChannelCapability {
    ChannelCapability {
        name,
        field: true,
        datum,
        value,
        multi: false,
        props,
        marks,
        default_type,
    }
}

const fn multi(
    name: &'static str,
    value: bool,
    props: &'static [&'static str],
    default_type: FieldType,
) -> ChannelCapability {
    ChannelCapability {
        name,
        field: true,
        datum: false,
        value,
        multi: true,
        props,
        marks: &[],
        default_type: Some(default_type),
    }
}

/// Every encoding channel.
pub static CHANNELS: &[ChannelCapability] = &[
    ch("x", true, true, POSITION, &[], Some(Q)),
    ch("y", true, true, POSITION, &[], Some(Q)),
    ch("x2", true, true, SECONDARY, RANGED, None),
    ch("y2", true, true, SECONDARY, RANGED, None),
    ch("xOffset", true, true, OFFSET, &[], Some(N)),
    ch("yOffset", true, true, OFFSET, &[], Some(N)),
    ch("xError", false, true, SECONDARY, &["errorbar", "errorband"], None),
    ch("yError", false, true, SECONDARY, &["errorbar", "errorband"], None),
    ch("xError2", false, true, SECONDARY, &["errorbar", "errorband"], None),
    ch("yError2", false, true, SECONDARY, &["errorbar", "errorband"], None),
    ch("theta", true, true, POLAR, ARC, Some(Q)),
    ch("theta2", true, true, SECONDARY, ARC, None),
    ch("radius", true, true, POLAR, ARC, Some(Q)),
    ch("radius2", true, true, SECONDARY, ARC, None),
    ch("longitude", true, false, SECONDARY, &[], Some(Q)),
    ch("latitude", true, false, SECONDARY, &[], Some(Q)),
    ch("longitude2", true, false, SECONDARY, &[], None),
    ch("latitude2", true, false, SECONDARY, &[], None),
    ch("color", true, true, MARK_PROP, &[], Some(N)),
    ch("fill", true, true, MARK_PROP, &[], Some(N)),
    ch("stroke", true, true, MARK_PROP, &[], Some(N)),
    ch("opacity", true, true, MARK_PROP, &[], Some(Q)),
    ch("fillOpacity", true, true, MARK_PROP, &[], Some(Q)),
    ch("strokeOpacity", true, true, MARK_PROP, &[], Some(Q)),
    ch("strokeWidth", true, true, MARK_PROP, &[], Some(Q)),
    ch("strokeDash", true, true, MARK_PROP, &[], Some(N)),
    ch("size", true, true, MARK_PROP, SIZED, Some(Q)),
    ch("angle", true, true, MARK_PROP, POINT_LIKE, Some(Q)),
    ch("shape", true, true, MARK_PROP, &["point", "geoshape"], Some(N)),
    ch("text", true, true, TEXT, &["text"], Some(N)),
    ch("href", false, true, TEXT, &[], Some(N)),
    ch("url", false, true, TEXT, &["image"], Some(N)),
    ch("description", false, true, TEXT, &[], Some(N)),
    ch("key", false, false, SECONDARY, &[], Some(N)),
    ch("facet", false, false, FACET, &[], Some(N)),
    ch("row", false, false, ROW_COLUMN, &[], Some(N)),
    ch("column", false, false, ROW_COLUMN, &[], Some(N)),
    multi("tooltip", true, TEXT, N),
    multi("detail", false, SECONDARY, N),
    multi("order", true, ORDER, O),
];

/// Capability entry for `name`.
pub fn channel(name: &str) -> Option<&'static ChannelCapability> {
    static INDEX: OnceLock<HashMap<&'static str, &'static ChannelCapability>> = OnceLock::new();
    INDEX
        .get_or_init(|| CHANNELS.iter().map(|c| (c.name, c)).collect())
        .get(name)
        .copied()
}

#[cfg(test)]
#[path = "../../tests/unit/channel/capability.rs"]
mod tests;
