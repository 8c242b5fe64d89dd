//! Handler registry
//!
//! Provides [`HandlerRegistry`], the immutable table from atomic type name to
//! [`TypeHandler`], plus the signature-level operations that implement union
//! first-match and container recursion on top of it.
//!
//! The registry is built once with [`HandlerRegistry::with_defaults`] and
//! shared by reference (typically an `Arc`). It has no mutating methods.

use crate::annotation::render;
use crate::error::TypeError;
use crate::handler::{
    to_pretty_string, BoolHandler, DictHandler, FloatHandler, IntHandler, ListHandler,
    NoneHandler, StrHandler, TypeHandler,
};
use crate::signature::{AtomicType, Candidate, TypeSignature};
use crate::value::{Input, ParamValue};
use serde::Serialize;
use std::collections::HashMap;

/// Result of accepting text against a signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accepted {
    /// Name of the member that validated (`int`, `list`, ...)
    pub member: &'static str,
    /// Normalized display text
    pub display: String,
    /// Internal value cast by the same member
    pub value: ParamValue,
}

/// Immutable table of type handlers
#[derive(Debug)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Box<dyn TypeHandler>>,
}

impl HandlerRegistry {
    /// Create registry with the six built-in handlers
    #[must_use]
    pub fn with_defaults() -> Self {
        let builtins: [Box<dyn TypeHandler>; 6] = [
            Box::new(NoneHandler),
            Box::new(BoolHandler),
            Box::new(FloatHandler),
            Box::new(IntHandler),
            Box::new(StrHandler),
            Box::new(DictHandler),
        ];
        let handlers = builtins.into_iter().map(|h| (h.name(), h)).collect();
        Self { handlers }
    }

    /// Look up a handler by declared name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn TypeHandler> {
        self.handlers.get(name).map(Box::as_ref)
    }

    /// Handler for an atomic type
    ///
    /// # Errors
    /// Returns [`TypeError::Unregistered`] if no handler exists for `t`.
    pub fn handler(&self, t: AtomicType) -> Result<&dyn TypeHandler, TypeError> {
        self.get(t.as_str()).ok_or(TypeError::Unregistered(t.as_str()))
    }

    /// List registered type names
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Get number of registered handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Check input against a signature
    #[must_use]
    pub fn validate(&self, signature: &TypeSignature, input: Input<'_>) -> bool {
        self.resolve(signature, input).is_some()
    }

    /// First candidate, in declaration order, that validates the input
    #[must_use]
    pub fn resolve<'s>(&self, signature: &'s TypeSignature, input: Input<'_>) -> Option<Candidate<'s>> {
        signature.candidates().into_iter().find(|candidate| {
            self.with_candidate(*candidate, |h| Ok(h.validate(input)))
                .unwrap_or(false)
        })
    }

    /// Normalize input with the first member that accepts it
    ///
    /// # Errors
    /// Returns [`TypeError::Invalid`] naming the full signature if no member accepts.
    pub fn parse(&self, signature: &TypeSignature, input: Input<'_>) -> Result<String, TypeError> {
        let candidate = self.resolve(signature, input).ok_or_else(|| invalid(signature))?;
        self.with_candidate(candidate, |h| h.parse(input))
    }

    /// Cast input with the first member that accepts it
    ///
    /// # Errors
    /// Returns [`TypeError::Invalid`] naming the full signature if no member accepts.
    pub fn cast_to(&self, signature: &TypeSignature, input: Input<'_>) -> Result<ParamValue, TypeError> {
        let candidate = self.resolve(signature, input).ok_or_else(|| invalid(signature))?;
        self.with_candidate(candidate, |h| h.cast_to(input))
    }

    /// Format an internal value with the first member that handles it
    ///
    /// # Errors
    /// Returns the last member's error if no member handles the value.
    pub fn cast_from(&self, signature: &TypeSignature, value: &ParamValue) -> Result<String, TypeError> {
        let mut last = None;
        for candidate in signature.candidates() {
            match self.with_candidate(candidate, |h| h.cast_from(value)) {
                Ok(text) => return Ok(text),
                Err(e) => last = Some(e),
            }
        }
        Err(last.unwrap_or_else(|| invalid(signature)))
    }

    /// Resolve, parse and cast in one step
    ///
    /// The display text and the value come from the same member, so
    /// `"12"` against `int|str` yields `Int(12)`, never `Str`.
    ///
    /// # Errors
    /// Returns [`TypeError::Invalid`] naming the full signature if no member accepts.
    pub fn accept(&self, signature: &TypeSignature, input: Input<'_>) -> Result<Accepted, TypeError> {
        let candidate = self.resolve(signature, input).ok_or_else(|| invalid(signature))?;
        self.with_candidate(candidate, |h| {
            tracing::trace!(member = h.name(), signature = %signature, "member accepted input");
            let display = h.parse(input)?;
            let value = h.cast_to(Input::Text(&display))?;
            Ok(Accepted {
                member: h.name(),
                display,
                value,
            })
        })
    }

    /// Reformat valid `dict` text for editing
    ///
    /// Returns `None` if the input is not a JSON object.
    #[must_use]
    pub fn pretty_dict(&self, input: Input<'_>, indent: usize) -> Option<String> {
        let dict = self.get(AtomicType::Dict.as_str())?;
        if !dict.validate(input) {
            return None;
        }
        let value = input.to_json().ok()?;
        to_pretty_string(&value, indent)
    }

    fn with_candidate<R>(
        &self,
        candidate: Candidate<'_>,
        f: impl FnOnce(&dyn TypeHandler) -> Result<R, TypeError>,
    ) -> Result<R, TypeError> {
        match candidate {
            Candidate::Atomic(t) => f(self.handler(t)?),
            Candidate::List(element) => f(&ListHandler::new(self, element)),
        }
    }
}

fn invalid(signature: &TypeSignature) -> TypeError {
    TypeError::Invalid {
        expected: render(signature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(s: &str) -> TypeSignature {
        s.parse().unwrap()
    }

    #[test]
    fn registry_with_defaults() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(registry.len(), 6);
        assert!(!registry.is_empty());
        assert_eq!(
            registry.names(),
            vec!["NoneType", "bool", "dict", "float", "int", "str"]
        );
        assert!(registry.get("list").is_none());
    }

    #[test]
    fn every_atomic_type_has_handler() {
        let registry = HandlerRegistry::with_defaults();
        for t in AtomicType::ALL {
            assert_eq!(registry.handler(t).unwrap().name(), t.as_str());
        }
    }

    #[test]
    fn union_first_match_wins() {
        let registry = HandlerRegistry::with_defaults();
        let accepted = registry.accept(&sig("int|str"), Input::Text("12")).unwrap();
        assert_eq!(accepted.member, "int");
        assert_eq!(accepted.value, ParamValue::Int(12));

        let accepted = registry.accept(&sig("str|int"), Input::Text("5")).unwrap();
        assert_eq!(accepted.member, "str");
        assert_eq!(accepted.value, ParamValue::Str("5".into()));
    }

    #[test]
    fn exhausted_union_names_full_signature() {
        let registry = HandlerRegistry::with_defaults();
        let err = registry.parse(&sig("int|bool"), Input::Text("x")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value. Expected type Union[int, bool]");
    }

    #[test]
    fn accept_int_groups_display_but_not_value() {
        let registry = HandlerRegistry::with_defaults();
        let accepted = registry.accept(&sig("int"), Input::Text("1234567")).unwrap();
        assert_eq!(accepted.display, "1,234,567");
        assert_eq!(accepted.value, ParamValue::Int(1_234_567));
    }

    #[test]
    fn container_recursion() {
        let registry = HandlerRegistry::with_defaults();
        let list = TypeSignature::list(sig("int")).unwrap();
        assert!(registry.validate(&list, Input::Text("[1,2,3]")));
        assert!(!registry.validate(&list, Input::Text("[1,\"a\"]")));
        let err = registry.parse(&list, Input::Text("[1,\"a\"]")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value. Expected type List[int]");
    }

    #[test]
    fn int_list_accepts_whole_floats() {
        let registry = HandlerRegistry::with_defaults();
        let list = TypeSignature::list(sig("int")).unwrap();
        let accepted = registry.accept(&list, Input::Text("[1.0, 1e3]")).unwrap();
        assert_eq!(
            accepted.value,
            ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(1000)])
        );
        assert!(!registry.validate(&list, Input::Text("[1.5]")));
    }

    #[test]
    fn cast_from_picks_handling_member() {
        let registry = HandlerRegistry::with_defaults();
        let union = sig("int|bool");
        assert_eq!(registry.cast_from(&union, &ParamValue::Bool(true)).unwrap(), "True");
        assert_eq!(registry.cast_from(&union, &ParamValue::Int(7)).unwrap(), "7");
        assert!(registry.cast_from(&union, &ParamValue::Str("x".into())).is_err());
    }

    #[test]
    fn pretty_dict_only_for_objects() {
        let registry = HandlerRegistry::with_defaults();
        assert_eq!(
            registry.pretty_dict(Input::Text("{\"a\":1}"), 2).as_deref(),
            Some("{\n  \"a\": 1\n}")
        );
        assert!(registry.pretty_dict(Input::Text("[1]"), 2).is_none());
        assert!(registry.pretty_dict(Input::Absent, 2).is_none());
    }
}
