//! `NoneType`, `bool` and `str` handlers

use super::{ensure_valid, TypeHandler};
use crate::error::TypeError;
use crate::value::{Input, ParamValue};

const NONE_TEXT: &str = "None";

/// Handler for `NoneType`
///
/// Accepts the empty string, `"None"`, an absent value and JSON `null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneHandler;

impl TypeHandler for NoneHandler {
    fn name(&self) -> &'static str {
        "NoneType"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        if input.is_null() {
            return true;
        }
        matches!(input.as_text().as_ref(), "" | NONE_TEXT)
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        ensure_valid(self, input)?;
        Ok(NONE_TEXT.to_string())
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        ensure_valid(self, input)?;
        Ok(ParamValue::None)
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            ParamValue::None => Ok(NONE_TEXT.to_string()),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}

/// Handler for `bool`
///
/// Case-insensitive on input, `True`/`False` on output.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolHandler;

impl BoolHandler {
    fn literal(input: Input<'_>) -> Option<bool> {
        match input.as_text().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn display(value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }
}

impl TypeHandler for BoolHandler {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        Self::literal(input).is_some()
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        ensure_valid(self, input)?;
        let lower = input.as_text().to_lowercase();
        let mut chars = lower.chars();
        Ok(match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        })
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        Self::literal(input)
            .map(ParamValue::Bool)
            .ok_or_else(|| TypeError::Invalid {
                expected: self.name().to_string(),
            })
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            ParamValue::Bool(b) => Ok(Self::display(*b).to_string()),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}

/// Handler for `str`
///
/// Accepts everything and never reformats.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrHandler;

impl TypeHandler for StrHandler {
    fn name(&self) -> &'static str {
        "str"
    }

    fn validate(&self, _input: Input<'_>) -> bool {
        true
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        Ok(input.as_text().into_owned())
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        Ok(ParamValue::Str(input.as_text().into_owned()))
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            ParamValue::Str(s) => Ok(s.clone()),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}
