//! Named constants and functions of the Vega expression language.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::expression::ast::Expr;
use crate::foundation::error::{VlError, VlResult};

/// Group a catalog function belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Category {
    TypeChecking,
    TypeCoercion,
    Control,
    Math,
    Statistics,
    DateTime,
    Array,
    Text,
    Object,
    Formatting,
    RegExp,
    Color,
    Event,
    Data,
    Scale,
    Geo,
    Tree,
    Browser,
    Logging,
    Selection,
}

/// Catalog entry for a function: its name, documentation and arity hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Name in the expression language.
    pub name: &'static str,
    /// Group.
    pub category: Category,
    /// Minimum number of arguments.
    pub min_args: usize,
    /// Maximum number of arguments; `None` for variadic functions.
    pub max_args: Option<usize>,
    /// One-line description.
    pub doc: &'static str,
}

impl FunctionSpec {
    /// Build a call node, forwarding every argument.
    pub fn call<I, A>(&self, args: I) -> Expr
    where
        I: IntoIterator<Item = A>,
        A: Into<Expr>,
    {
        Expr::call(self.name, args)
    }

    /// Build a call node where `None` marks an omitted optional argument.
    pub fn call_optional<I>(&self, args: I) -> Expr
    where
        I: IntoIterator<Item = Option<Expr>>,
    {
        Expr::call_optional(self.name, args)
    }

    /// Like [`FunctionSpec::call`], but reject argument counts outside the arity hints.
    pub fn try_call<I, A>(&self, args: I) -> VlResult<Expr>
    where
        I: IntoIterator<Item = A>,
        A: Into<Expr>,
    {
        let args: Vec<Expr> = args.into_iter().map(Into::into).collect();
        if !self.accepts(args.len()) {
            let expected = match self.max_args {
                Some(max) if max == self.min_args => format!("{max}"),
                Some(max) => format!("{}..={max}", self.min_args),
                None => format!("at least {}", self.min_args),
            };
            return Err(VlError::argument(format!(
                "{}() takes {expected} arguments, got {}",
                self.name,
                args.len()
            )));
        }
        Ok(Expr::call(self.name, args))
    }

    /// Whether `n` arguments fit the arity hints.
    pub fn accepts(&self, n: usize) -> bool {
        n >= self.min_args && self.max_args.is_none_or(|max| n <= max)
    }
}

/// Named constants and their documentation.
pub const CONSTANTS: &[(&str, &str)] = &[
    ("NaN", "not a number (same as JavaScript literal NaN)"),
    ("E", "the transcendental number e (alias to Math.E)"),
    ("LN2", "the natural log of 2 (alias to Math.LN2)"),
    ("LN10", "the natural log of 10 (alias to Math.LN10)"),
    ("LOG2E", "the base 2 logarithm of e (alias to Math.LOG2E)"),
    ("LOG10E", "the base 10 logarithm of e (alias to Math.LOG10E)"),
    ("PI", "the transcendental number pi (alias to Math.PI)"),
    ("SQRT1_2", "the square root of 0.5 (alias to Math.SQRT1_2)"),
    ("SQRT2", "the square root of 2 (alias to Math.SQRT2)"),
];

/// Constant node for `name`, if it is a known constant.
pub fn constant(name: &str) -> Option<Expr> {
    CONSTANTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(n, _)| Expr::Const((*n).to_owned()))
}

/// Catalog entry for `name`.
pub fn function(name: &str) -> Option<&'static FunctionSpec> {
    static INDEX: OnceLock<HashMap<&'static str, &'static FunctionSpec>> = OnceLock::new();
    INDEX
        .get_or_init(|| FUNCTIONS.iter().map(|f| (f.name, f)).collect())
        .get(name)
        .copied()
}

/// Every catalog entry, grouped by category.
pub fn functions() -> &'static [FunctionSpec] {
    FUNCTIONS
}

const fn fixed(
    name: &'static str,
    category: Category,
    min_args: usize,
    max_args: usize,
    doc: &'static str,
) -> FunctionSpec {
    FunctionSpec {
        name,
        category,
        min_args,
        max_args: Some(max_args),
        doc,
    }
}

const fn variadic(
    name: &'static str,
    category: Category,
    min_args: usize,
    doc: &'static str,
) -> FunctionSpec {
    FunctionSpec {
        name,
        category,
        min_args,
        max_args: None,
        doc,
    }
}

use Category::*;

static FUNCTIONS: &[FunctionSpec] = &[
    fixed("isArray", TypeChecking, 1, 1, "Returns true if value is an array, false otherwise."),
    fixed("isBoolean", TypeChecking, 1, 1, "Returns true if value is a boolean (true or false), false otherwise."),
    fixed("isDate", TypeChecking, 1, 1, "Returns true if value is a Date object, false otherwise."),
    fixed("isDefined", TypeChecking, 1, 1, "Returns true if value is a defined value, false if value equals undefined."),
    fixed("isNumber", TypeChecking, 1, 1, "Returns true if value is a number, false otherwise."),
    fixed("isObject", TypeChecking, 1, 1, "Returns true if value is an object (including arrays and Dates), false otherwise."),
    fixed("isRegExp", TypeChecking, 1, 1, "Returns true if value is a RegExp object, false otherwise."),
    fixed("isString", TypeChecking, 1, 1, "Returns true if value is a string, false otherwise."),
    fixed("isValid", TypeChecking, 1, 1, "Returns true if value is not null, undefined, or NaN, false otherwise."),
    fixed("toBoolean", TypeCoercion, 1, 1, "Coerces the input value to a boolean. Null values and empty strings are mapped to null."),
    fixed("toDate", TypeCoercion, 1, 1, "Coerces the input value to a Date instance. Null values and empty strings are mapped to null."),
    fixed("toNumber", TypeCoercion, 1, 1, "Coerces the input value to a number. Null values and empty strings are mapped to null."),
    fixed("toString", TypeCoercion, 1, 1, "Coerces the input value to a string. Null values and empty strings are mapped to null."),
    fixed("if", Control, 3, 3, "If test is truthy, returns thenValue. Otherwise, returns elseValue."),
    fixed("isNaN", Math, 1, 1, "Returns true if value is not a number. Same as JavaScript's isNaN."),
    fixed("isFinite", Math, 1, 1, "Returns true if value is a finite number. Same as JavaScript's isFinite."),
    fixed("abs", Math, 1, 1, "Returns the absolute value of value."),
    fixed("acos", Math, 1, 1, "Trigonometric arccosine."),
    fixed("asin", Math, 1, 1, "Trigonometric arcsine."),
    fixed("atan", Math, 1, 1, "Trigonometric arctangent."),
    fixed("atan2", Math, 2, 2, "Returns the arctangent of dy / dx."),
    fixed("ceil", Math, 1, 1, "Rounds value to the nearest integer of equal or greater value."),
    fixed("clamp", Math, 3, 3, "Restricts value to be between the specified min and max."),
    fixed("cos", Math, 1, 1, "Trigonometric cosine."),
    fixed("exp", Math, 1, 1, "Returns the value of e raised to the provided exponent."),
    fixed("exp2", Math, 1, 1, "Returns the value of 2 raised to the provided exponent."),
    fixed("floor", Math, 1, 1, "Rounds value to the nearest integer of equal or lower value."),
    variadic("hypot", Math, 0, "Returns the square root of the sum of squares of its arguments."),
    fixed("log", Math, 1, 1, "Returns the natural logarithm of value."),
    variadic("max", Math, 1, "Returns the maximum argument value."),
    variadic("min", Math, 1, "Returns the minimum argument value."),
    fixed("pow", Math, 2, 2, "Returns value raised to the given exponent."),
    fixed("random", Math, 0, 0, "Returns a pseudo-random number in the range [0,1)."),
    fixed("round", Math, 1, 1, "Rounds value to the nearest integer."),
    fixed("sin", Math, 1, 1, "Trigonometric sine."),
    fixed("sqrt", Math, 1, 1, "Square root function."),
    fixed("tan", Math, 1, 1, "Trigonometric tangent."),
    fixed("sampleNormal", Statistics, 0, 2, "Returns a sample from a univariate normal (Gaussian) probability distribution."),
    fixed("cumulativeNormal", Statistics, 1, 3, "Returns the value of the cumulative distribution function at the given input domain value for a normal distribution."),
    fixed("densityNormal", Statistics, 1, 3, "Returns the value of the probability density function at the given input domain value for a normal distribution."),
    fixed("quantileNormal", Statistics, 1, 3, "Returns the quantile value (the inverse of the cumulative distribution function) for the given input probability for a normal distribution."),
    fixed("sampleLogNormal", Statistics, 0, 2, "Returns a sample from a univariate log-normal probability distribution."),
    fixed("cumulativeLogNormal", Statistics, 1, 3, "Returns the value of the cumulative distribution function at the given input domain value for a log-normal distribution."),
    fixed("densityLogNormal", Statistics, 1, 3, "Returns the value of the probability density function at the given input domain value for a log-normal distribution."),
    fixed("quantileLogNormal", Statistics, 1, 3, "Returns the quantile value for the given input probability for a log-normal distribution."),
    fixed("sampleUniform", Statistics, 0, 2, "Returns a sample from a univariate continuous uniform probability distribution."),
    fixed("cumulativeUniform", Statistics, 1, 3, "Returns the value of the cumulative distribution function at the given input domain value for a uniform distribution."),
    fixed("densityUniform", Statistics, 1, 3, "Returns the value of the probability density function at the given input domain value for a uniform distribution."),
    fixed("quantileUniform", Statistics, 1, 3, "Returns the quantile value for the given input probability for a uniform distribution."),
    fixed("now", DateTime, 0, 0, "Returns the timestamp for the current time."),
    fixed("datetime", DateTime, 1, 7, "Returns a new Date instance. The month is 0-based."),
    fixed("date", DateTime, 1, 1, "Returns the day of the month for the given datetime value, in local time."),
    fixed("day", DateTime, 1, 1, "Returns the day of the week for the given datetime value, in local time."),
    fixed("dayofyear", DateTime, 1, 1, "Returns the one-based day of the year for the given datetime value, in local time."),
    fixed("year", DateTime, 1, 1, "Returns the year for the given datetime value, in local time."),
    fixed("quarter", DateTime, 1, 1, "Returns the quarter of the year (0-3) for the given datetime value, in local time."),
    fixed("month", DateTime, 1, 1, "Returns the (zero-based) month for the given datetime value, in local time."),
    fixed("week", DateTime, 1, 1, "Returns the week number of the year for the given datetime, in local time."),
    fixed("hours", DateTime, 1, 1, "Returns the hours component for the given datetime value, in local time."),
    fixed("minutes", DateTime, 1, 1, "Returns the minutes component for the given datetime value, in local time."),
    fixed("seconds", DateTime, 1, 1, "Returns the seconds component for the given datetime value, in local time."),
    fixed("milliseconds", DateTime, 1, 1, "Returns the milliseconds component for the given datetime value, in local time."),
    fixed("time", DateTime, 1, 1, "Returns the epoch-based timestamp for the given datetime value."),
    fixed("timezoneoffset", DateTime, 1, 1, "Returns the timezone offset from the local timezone to UTC for the given datetime value."),
    fixed("timeOffset", DateTime, 2, 3, "Returns a new Date instance that offsets the given date by the specified time unit in the local timezone."),
    fixed("timeSequence", DateTime, 3, 4, "Returns an array of Date instances from start to stop, separated by the given time unit in the local timezone."),
    fixed("utc", DateTime, 1, 7, "Returns a timestamp for the given UTC date. The month is 0-based."),
    fixed("utcdate", DateTime, 1, 1, "Returns the day of the month for the given datetime value, in UTC time."),
    fixed("utcday", DateTime, 1, 1, "Returns the day of the week for the given datetime value, in UTC time."),
    fixed("utcdayofyear", DateTime, 1, 1, "Returns the one-based day of the year for the given datetime value, in UTC time."),
    fixed("utcyear", DateTime, 1, 1, "Returns the year for the given datetime value, in UTC time."),
    fixed("utcquarter", DateTime, 1, 1, "Returns the quarter of the year (0-3) for the given datetime value, in UTC time."),
    fixed("utcmonth", DateTime, 1, 1, "Returns the (zero-based) month for the given datetime value, in UTC time."),
    fixed("utcweek", DateTime, 1, 1, "Returns the week number of the year for the given datetime, in UTC time."),
    fixed("utchours", DateTime, 1, 1, "Returns the hours component for the given datetime value, in UTC time."),
    fixed("utcminutes", DateTime, 1, 1, "Returns the minutes component for the given datetime value, in UTC time."),
    fixed("utcseconds", DateTime, 1, 1, "Returns the seconds component for the given datetime value, in UTC time."),
    fixed("utcmilliseconds", DateTime, 1, 1, "Returns the milliseconds component for the given datetime value, in UTC time."),
    fixed("utcOffset", DateTime, 2, 3, "Returns a new Date instance that offsets the given date by the specified time unit in UTC time."),
    fixed("utcSequence", DateTime, 3, 4, "Returns an array of Date instances from start to stop, separated by the given time unit in UTC time."),
    fixed("extent", Array, 1, 1, "Returns a new [min, max] array with the minimum and maximum values of the input array, ignoring null, undefined, and NaN values."),
    fixed("clampRange", Array, 3, 3, "Clamps a two-element range array in a span-preserving manner."),
    fixed("indexof", Array, 2, 2, "Returns the first index of value in the input array or string."),
    fixed("inrange", Array, 2, 2, "Tests whether value lies within (or is equal to either) the first and last values of the range array."),
    fixed("join", Array, 1, 2, "Returns a new string by concatenating all of the elements of the input array, separated by commas or a specified separator string."),
    fixed("lastindexof", Array, 2, 2, "Returns the last index of value in the input array or string."),
    fixed("length", Array, 1, 1, "Returns the length of the input array or string."),
    fixed("lerp", Array, 2, 2, "Returns the linearly interpolated value between the first and last entries in the array for the provided interpolation fraction."),
    fixed("peek", Array, 1, 1, "Returns the last element in the input array."),
    fixed("pluck", Array, 2, 2, "Retrieves the value for the specified field from a given array of objects."),
    fixed("reverse", Array, 1, 1, "Returns a new array with elements in a reverse order of the input array."),
    fixed("sequence", Array, 1, 3, "Returns an array containing an arithmetic sequence of numbers."),
    fixed("slice", Array, 2, 3, "Returns a section of array between the start and end indices."),
    fixed("span", Array, 1, 1, "Returns the span of array: the difference between the last and first elements."),
    fixed("lower", Text, 1, 1, "Transforms string to lower-case letters."),
    fixed("pad", Text, 2, 4, "Pads a string value with repeated instances of a character up to a specified length."),
    fixed("parseFloat", Text, 1, 1, "Parses the input string to a floating-point value."),
    fixed("parseInt", Text, 1, 2, "Parses the input string to an integer value."),
    fixed("replace", Text, 3, 3, "Returns a new string with some or all matches of pattern replaced by a replacement string."),
    fixed("split", Text, 2, 3, "Returns an array of tokens created by splitting the input string according to a provided separator pattern."),
    fixed("substring", Text, 2, 3, "Returns a section of string between the start and end indices."),
    fixed("trim", Text, 1, 1, "Returns a trimmed string with preceding and trailing whitespace removed."),
    fixed("truncate", Text, 2, 4, "Truncates an input string to a target length."),
    fixed("upper", Text, 1, 1, "Transforms string to upper-case letters."),
    variadic("merge", Object, 1, "Merges the input objects into a newly created object."),
    fixed("dayFormat", Formatting, 1, 1, "Formats a (0-6) weekday number as a full week day name, according to the current locale."),
    fixed("dayAbbrevFormat", Formatting, 1, 1, "Formats a (0-6) weekday number as an abbreviated week day name, according to the current locale."),
    fixed("format", Formatting, 2, 2, "Formats a numeric value as a string. The specifier must be a valid d3-format specifier."),
    fixed("monthFormat", Formatting, 1, 1, "Formats a (zero-based) month number as a full month name, according to the current locale."),
    fixed("monthAbbrevFormat", Formatting, 1, 1, "Formats a (zero-based) month number as an abbreviated month name, according to the current locale."),
    fixed("timeUnitSpecifier", Formatting, 1, 2, "Returns a time format specifier string for the given time units."),
    fixed("timeFormat", Formatting, 2, 2, "Formats a datetime value as a string, in local time. The specifier must be a valid d3-time-format specifier."),
    fixed("timeParse", Formatting, 2, 2, "Parses a string value to a Date object, in local time."),
    fixed("utcFormat", Formatting, 2, 2, "Formats a datetime value as a string, in UTC time."),
    fixed("utcParse", Formatting, 2, 2, "Parses a string value to a Date object, in UTC time."),
    fixed("regexp", RegExp, 1, 2, "Creates a regular expression instance from an input pattern string and optional flags."),
    fixed("test", RegExp, 2, 2, "Evaluates a regular expression against the given string, returning true if it matches and false otherwise."),
    fixed("rgb", Color, 1, 4, "Constructs a new RGB color."),
    fixed("hsl", Color, 1, 4, "Constructs a new HSL color."),
    fixed("lab", Color, 1, 4, "Constructs a new CIE LAB color."),
    fixed("hcl", Color, 1, 4, "Constructs a new HCL (hue, chroma, luminance) color."),
    fixed("luminance", Color, 1, 1, "Returns the luminance for the given color specifier."),
    fixed("contrast", Color, 2, 2, "Returns the contrast ratio between the input color specifiers as a float between 1 and 21."),
    fixed("item", Event, 0, 0, "Returns the current scenegraph item that is the target of the event."),
    fixed("group", Event, 0, 1, "Returns the scenegraph group mark item in which the current event has occurred."),
    fixed("xy", Event, 0, 1, "Returns the x- and y-coordinates for the current event as a two-element array."),
    fixed("x", Event, 0, 1, "Returns the x coordinate for the current event."),
    fixed("y", Event, 0, 1, "Returns the y coordinate for the current event."),
    fixed("pinchDistance", Event, 1, 1, "Returns the pixel distance between the first two touch points of a multi-touch event."),
    fixed("pinchAngle", Event, 1, 1, "Returns the angle of the line connecting the first two touch points of a multi-touch event."),
    fixed("inScope", Event, 1, 1, "Returns true if the given scenegraph item is a descendant of the group mark in which the event handler was defined."),
    fixed("data", Data, 1, 1, "Returns the array of data objects for the Vega data set with the given name."),
    fixed("indata", Data, 3, 3, "Tests if the data set with a given name contains a datum with a field value that matches the input value."),
    fixed("modify", Data, 2, 6, "Modifies the data set with the given name by inserting, removing or toggling values."),
    fixed("bandspace", Scale, 1, 3, "Returns the number of steps needed within a band scale."),
    fixed("bandwidth", Scale, 1, 2, "Returns the current band width for the given band scale name."),
    fixed("copy", Scale, 1, 2, "Returns a copy (a new cloned instance) of the named scale transform."),
    fixed("domain", Scale, 1, 2, "Returns the scale domain array for the named scale transform."),
    fixed("invert", Scale, 2, 3, "Inverts the named scale transform for the given range value."),
    fixed("range", Scale, 1, 2, "Returns the scale range array for the named scale transform."),
    fixed("scale", Scale, 2, 3, "Applies the named scale transform to the specified value."),
    fixed("gradient", Scale, 3, 5, "Returns a linear color gradient for the scale and starting and ending points."),
    fixed("panLinear", Scale, 2, 2, "Given a linear scale domain array with numeric values, shifts the domain by the given delta."),
    fixed("panLog", Scale, 2, 2, "Given a log scale domain array with numeric values, shifts the domain by the given delta."),
    fixed("panPow", Scale, 3, 3, "Given a power scale domain array with numeric values and the given exponent, shifts the domain by the given delta."),
    fixed("panSymlog", Scale, 3, 3, "Given a symmetric log scale domain array with numeric values, shifts the domain by the given delta."),
    fixed("zoomLinear", Scale, 3, 3, "Given a linear scale domain array with numeric values, zooms the domain by the given scale factor around the anchor."),
    fixed("zoomLog", Scale, 3, 3, "Given a log scale domain array with numeric values, zooms the domain by the given scale factor around the anchor."),
    fixed("zoomPow", Scale, 4, 4, "Given a power scale domain array with numeric values and the given exponent, zooms the domain by the given scale factor around the anchor."),
    fixed("zoomSymlog", Scale, 4, 4, "Given a symmetric log scale domain array with numeric values, zooms the domain by the given scale factor around the anchor."),
    fixed("geoArea", Geo, 2, 3, "Returns the projected planar area (typically in square pixels) of a GeoJSON feature."),
    fixed("geoBounds", Geo, 2, 3, "Returns the projected planar bounding box (typically in pixels) for the specified GeoJSON feature."),
    fixed("geoCentroid", Geo, 2, 3, "Returns the projected planar centroid (typically in pixels) for the specified GeoJSON feature."),
    fixed("geoScale", Geo, 1, 2, "Returns the scale value for the specified projection."),
    fixed("treePath", Tree, 3, 3, "For the hierarchy data set with the given name, returns the shortest path through from the source node id to the target node id."),
    fixed("treeAncestors", Tree, 2, 2, "For the hierarchy data set with the given name, returns the array of ancestors nodes, starting with the input node."),
    fixed("containerSize", Browser, 0, 0, "Returns the current CSS box size of the enclosing DOM element of the view."),
    fixed("screen", Browser, 0, 0, "Returns the window.screen object."),
    fixed("windowSize", Browser, 0, 0, "Returns the current window size as a two-element array."),
    variadic("warn", Logging, 0, "Logs a warning message and returns the last argument."),
    variadic("info", Logging, 0, "Logs an informative message and returns the last argument."),
    variadic("debug", Logging, 0, "Logs a debugging message and returns the last argument."),
    fixed("vlSelectionTest", Selection, 2, 3, "Tests if a data item lies within the named selection."),
    fixed("vlSelectionIdTest", Selection, 2, 3, "Tests if a data item lies within a point selection by its unique id."),
    fixed("vlSelectionResolve", Selection, 1, 4, "Resolves a selection across multiple views into a predicate-friendly object."),
];

#[cfg(test)]
#[path = "../../tests/unit/expression/catalog.rs"]
mod tests;
