//! Per-type handlers
//!
//! Each handler implements the four operations of one declared type:
//!
//! | operation | direction |
//! |---|---|
//! | [`validate`](TypeHandler::validate) | input → accepted? |
//! | [`parse`](TypeHandler::parse) | input → normalized display text |
//! | [`cast_to`](TypeHandler::cast_to) | input → internal value |
//! | [`cast_from`](TypeHandler::cast_from) | internal value → text |
//!
//! Handlers are pure. Malformed input makes `validate` return `false`;
//! the other operations return an error instead of panicking.

mod json;
mod numeric;
mod scalar;

pub use json::{DictHandler, ListHandler};
pub use numeric::{group_thousands, FloatHandler, IntHandler, GROUP_SEPARATOR};
pub use scalar::{BoolHandler, NoneHandler, StrHandler};

pub(crate) use json::to_pretty_string;

use crate::error::TypeError;
use crate::value::{Input, ParamValue};
use std::fmt;

/// Parse/validate/cast contract of one type
pub trait TypeHandler: Send + Sync + fmt::Debug {
    /// Declared type name
    fn name(&self) -> &'static str;

    /// Check whether the input is acceptable for this type
    fn validate(&self, input: Input<'_>) -> bool;

    /// Normalize accepted input into its display form
    ///
    /// # Errors
    /// Returns [`TypeError::Invalid`] if the input does not validate.
    fn parse(&self, input: Input<'_>) -> Result<String, TypeError>;

    /// Convert accepted input into the internal value
    ///
    /// # Errors
    /// Returns an error if the input cannot be converted.
    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError>;

    /// Convert an internal value back into text
    ///
    /// # Errors
    /// Returns [`TypeError::Mismatch`] if the value belongs to another type.
    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError>;
}

/// Reject input that does not validate
fn ensure_valid<H: TypeHandler + ?Sized>(handler: &H, input: Input<'_>) -> Result<(), TypeError> {
    if handler.validate(input) {
        Ok(())
    } else {
        Err(TypeError::Invalid {
            expected: handler.name().to_string(),
        })
    }
}
