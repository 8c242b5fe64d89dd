//! Internal parameter values and handler inputs

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Value a pipeline stage stores for one argument
///
/// Serializes to the JSON the stage consumes; `None` becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `NoneType`
    None,
    /// `bool`
    Bool(bool),
    /// `int`
    Int(i64),
    /// `float`
    Float(f64),
    /// `str`
    Str(String),
    /// `dict`
    Dict(Map<String, Value>),
    /// `list`
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Declared type name of the value's variant
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            ParamValue::None => "NoneType",
            ParamValue::Bool(_) => "bool",
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "str",
            ParamValue::Dict(_) => "dict",
            ParamValue::List(_) => "list",
        }
    }

    /// Convert into a JSON value
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::None => Value::Null,
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Int(i) => Value::from(*i),
            // Non-finite floats have no JSON form
            ParamValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ParamValue::Str(s) => Value::String(s.clone()),
            ParamValue::Dict(map) => Value::Object(map.clone()),
            ParamValue::List(items) => Value::Array(items.iter().map(ParamValue::to_json).collect()),
        }
    }
}

/// Raw input handed to a type handler
///
/// Field text arrives as [`Input::Text`]; container elements and values that
/// are already native (numbers, booleans) arrive as [`Input::Json`]. A field
/// that was never edited has no value at all and arrives as [`Input::Absent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input<'a> {
    /// No value
    Absent,
    /// User text
    Text(&'a str),
    /// Already-decoded JSON value
    Json(&'a Value),
}

impl<'a> Input<'a> {
    /// Textual view used by scalar handlers
    ///
    /// Strings are borrowed; other JSON values are stringified.
    #[must_use]
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            Input::Absent => Cow::Borrowed(""),
            Input::Text(s) => Cow::Borrowed(s),
            Input::Json(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Input::Json(Value::Number(n)) => Cow::Owned(number_text(n)),
            Input::Json(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Check if the input is absent or JSON `null`
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Input::Absent | Input::Json(Value::Null))
    }

    /// Decode the input as JSON
    ///
    /// Text is parsed; JSON inputs are returned as-is.
    ///
    /// # Errors
    /// Returns the parse error for malformed or absent text.
    pub fn to_json(&self) -> Result<Cow<'a, Value>, serde_json::Error> {
        match *self {
            Input::Absent => serde_json::from_str::<Value>("").map(Cow::Owned),
            Input::Text(s) => serde_json::from_str::<Value>(s).map(Cow::Owned),
            Input::Json(Value::String(s)) => serde_json::from_str::<Value>(s).map(Cow::Owned),
            Input::Json(v) => Ok(Cow::Borrowed(v)),
        }
    }
}

/// Largest integer an `f64` holds exactly
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Whole-valued floats print without a fraction (`1.0` -> `1`, `1e3` -> `1000`)
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT => {
            // -0.0 prints as 0
            format!("{:.0}", f + 0.0)
        }
        _ => n.to_string(),
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(value: &'a str) -> Self {
        Input::Text(value)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(value: &'a String) -> Self {
        Input::Text(value.as_str())
    }
}

impl<'a> From<&'a Value> for Input<'a> {
    fn from(value: &'a Value) -> Self {
        Input::Json(value)
    }
}

impl<'a> From<Option<&'a str>> for Input<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Input::Absent, Input::Text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn none_serializes_as_null() {
        assert_eq!(serde_json::to_string(&ParamValue::None).unwrap(), "null");
        let list = ParamValue::List(vec![ParamValue::Int(1), ParamValue::Str("a".into())]);
        assert_eq!(serde_json::to_string(&list).unwrap(), "[1,\"a\"]");
    }

    #[test]
    fn to_json_matches_serialization() {
        let value = ParamValue::List(vec![ParamValue::Bool(true), ParamValue::Float(1.5)]);
        assert_eq!(value.to_json(), json!([true, 1.5]));
    }

    #[test]
    fn numeric_json_input_is_stringified() {
        let n = json!(1234);
        assert_eq!(Input::from(&n).as_text(), "1234");
        let s = json!("12");
        assert_eq!(Input::from(&s).as_text(), "12");
    }

    #[test]
    fn whole_floats_drop_fraction() {
        let whole: Value = serde_json::from_str("[1.0, 1e3, -0.0, 2.5, 1e300]").unwrap();
        let texts: Vec<_> = whole
            .as_array()
            .unwrap()
            .iter()
            .map(|v| Input::Json(v).as_text().into_owned())
            .collect();
        assert_eq!(texts[..4], ["1", "1000", "0", "2.5"]);
        assert_eq!(texts[4], "1e300");
    }

    #[test]
    fn absent_and_null_are_null() {
        assert!(Input::Absent.is_null());
        assert!(Input::Json(&Value::Null).is_null());
        assert!(!Input::Text("").is_null());
    }

    #[test]
    fn absent_text_is_not_json() {
        assert!(Input::Absent.to_json().is_err());
        assert!(Input::Text("{").to_json().is_err());
        assert_eq!(Input::Text("[1]").to_json().unwrap().into_owned(), json!([1]));
    }
}
