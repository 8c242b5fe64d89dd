//! `dict` and `list` handlers
//!
//! Container text must be JSON-compatible. Malformed text is a validation
//! failure, not a distinct error path.

use super::{ensure_valid, TypeHandler};
use crate::error::TypeError;
use crate::registry::HandlerRegistry;
use crate::signature::TypeSignature;
use crate::value::{Input, ParamValue};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Serialize with a configurable indent width
pub(crate) fn to_pretty_string(value: &Value, indent: usize) -> Option<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}

/// Handler for `dict`
///
/// Accepts JSON objects only; arrays and primitives are rejected.
/// `parse` keeps the user's formatting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictHandler;

impl TypeHandler for DictHandler {
    fn name(&self) -> &'static str {
        "dict"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        input.to_json().is_ok_and(|v| v.is_object())
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        ensure_valid(self, input)?;
        Ok(input.as_text().into_owned())
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        match input.to_json()?.into_owned() {
            Value::Object(map) => Ok(ParamValue::Dict(map)),
            _ => Err(TypeError::Invalid {
                expected: self.name().to_string(),
            }),
        }
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            ParamValue::Dict(map) => Ok(serde_json::to_string(map)?),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}

/// Handler for `list` of an element signature
///
/// Element operations dispatch back through the registry, so union
/// elements get first-match semantics too.
#[derive(Debug, Clone, Copy)]
pub struct ListHandler<'r> {
    registry: &'r HandlerRegistry,
    element: &'r TypeSignature,
}

impl<'r> ListHandler<'r> {
    /// Create handler for `List[element]`
    #[inline]
    #[must_use]
    pub fn new(registry: &'r HandlerRegistry, element: &'r TypeSignature) -> Self {
        Self { registry, element }
    }

    fn elements(&self, input: Input<'_>) -> Result<Vec<Value>, TypeError> {
        match input.to_json()?.into_owned() {
            Value::Array(items) => Ok(items),
            _ => Err(self.invalid()),
        }
    }

    fn invalid(&self) -> TypeError {
        TypeError::Invalid {
            expected: format!("List[{}]", self.element),
        }
    }
}

impl TypeHandler for ListHandler<'_> {
    fn name(&self) -> &'static str {
        "list"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        match input.to_json() {
            Ok(value) => value.as_array().is_some_and(|items| {
                items
                    .iter()
                    .all(|item| self.registry.validate(self.element, Input::Json(item)))
            }),
            Err(_) => false,
        }
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        if !self.validate(input) {
            return Err(self.invalid());
        }
        let items = self
            .elements(input)?
            .into_iter()
            .map(|item| match item {
                Value::String(_) => self
                    .registry
                    .parse(self.element, Input::Json(&item))
                    .map(Value::String),
                other => Ok(other),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serde_json::to_string(&items)?)
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        self.elements(input)?
            .iter()
            .map(|item| self.registry.cast_to(self.element, Input::Json(item)))
            .collect::<Result<Vec<_>, _>>()
            .map(ParamValue::List)
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        let ParamValue::List(items) = value else {
            return Err(TypeError::mismatch(self.name(), value.type_name()));
        };
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            // Element type check; the element keeps its native JSON form
            self.registry.cast_from(self.element, item)?;
            out.push(item.to_json());
        }
        Ok(serde_json::to_string(&out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::AtomicType;
    use serde_json::json;

    #[test]
    fn dict_accepts_objects_only() {
        let h = DictHandler;
        assert!(h.validate(Input::Text("{\"a\": 1}")));
        assert!(h.validate(Input::Text("{}")));
        assert!(!h.validate(Input::Text("[1, 2]")));
        assert!(!h.validate(Input::Text("5")));
        assert!(!h.validate(Input::Text("{\"a\":")));
        assert!(!h.validate(Input::Absent));
    }

    #[test]
    fn dict_parse_is_identity() {
        let text = "{\n  \"a\": 1\n}";
        assert_eq!(DictHandler.parse(Input::Text(text)).unwrap(), text);
    }

    #[test]
    fn dict_cast_preserves_key_order() {
        let value = DictHandler.cast_to(Input::Text("{\"z\":1,\"a\":2}")).unwrap();
        assert_eq!(DictHandler.cast_from(&value).unwrap(), "{\"z\":1,\"a\":2}");
    }

    #[test]
    fn pretty_string_uses_indent() {
        let value = json!({"a": 1});
        assert_eq!(to_pretty_string(&value, 2).unwrap(), "{\n  \"a\": 1\n}");
        assert_eq!(to_pretty_string(&value, 4).unwrap(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn list_validates_every_element() {
        let registry = HandlerRegistry::with_defaults();
        let element = TypeSignature::Atomic(AtomicType::Int);
        let h = ListHandler::new(&registry, &element);
        assert!(h.validate(Input::Text("[1,2,3]")));
        assert!(h.validate(Input::Text("[]")));
        assert!(!h.validate(Input::Text("[1,\"a\"]")));
        assert!(!h.validate(Input::Text("{\"a\":1}")));
        assert!(!h.validate(Input::Text("[1,")));
    }

    #[test]
    fn list_parse_normalizes_text_elements() {
        let registry = HandlerRegistry::with_defaults();
        let element = TypeSignature::Atomic(AtomicType::Bool);
        let h = ListHandler::new(&registry, &element);
        assert_eq!(
            h.parse(Input::Text("[\"TRUE\", false]")).unwrap(),
            "[\"True\",false]"
        );
    }

    #[test]
    fn list_cast_round_trip() {
        let registry = HandlerRegistry::with_defaults();
        let element: TypeSignature = "int|NoneType".parse().unwrap();
        let h = ListHandler::new(&registry, &element);
        let value = h.cast_to(Input::Text("[1, null, \"2,000\"]")).unwrap();
        assert_eq!(
            value,
            ParamValue::List(vec![ParamValue::Int(1), ParamValue::None, ParamValue::Int(2000)])
        );
        assert_eq!(h.cast_from(&value).unwrap(), "[1,null,2000]");
    }

    #[test]
    fn list_cast_from_rejects_wrong_elements() {
        let registry = HandlerRegistry::with_defaults();
        let element = TypeSignature::Atomic(AtomicType::Int);
        let h = ListHandler::new(&registry, &element);
        let value = ParamValue::List(vec![ParamValue::Str("a".into())]);
        assert!(h.cast_from(&value).is_err());
        assert!(h.cast_from(&ParamValue::Int(1)).is_err());
    }
}
