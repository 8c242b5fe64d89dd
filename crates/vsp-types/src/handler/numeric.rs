//! `int` and `float` handlers
//!
//! Thousands grouping is display-only: `parse` inserts `,` every three
//! digits, `cast_to`/`cast_from` never carry separators. Both handlers
//! accept already-numeric JSON input by stringifying it first.

use super::{ensure_valid, TypeHandler};
use crate::error::TypeError;
use crate::value::{Input, ParamValue};
use once_cell::sync::Lazy;
use regex::Regex;

/// Group separator inserted by `parse`
pub const GROUP_SEPARATOR: char = ',';

macro_rules! define_regex {
    ($name:ident, $pattern:expr) => {
        static $name: Lazy<Regex> = Lazy::new(|| {
            // Pattern is a literal; the fallback matches nothing
            Regex::new($pattern).unwrap_or_else(|_| Regex::new(r"$^").unwrap())
        });
    };
}

define_regex!(DIGITS_REGEX, r"^[0-9]+$");
define_regex!(SEPARATORS_REGEX, r"[,\s]");

/// Remove group separators and whitespace
fn strip_separators(text: &str) -> String {
    SEPARATORS_REGEX.replace_all(text, "").into_owned()
}

/// Insert a group separator every three digits from the right
///
/// `digits` is expected to be ASCII digits only.
#[must_use]
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Handler for `int`
///
/// Values are non-negative: validation accepts digits only, so negative
/// values have no text form.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntHandler;

impl IntHandler {
    fn digits(input: Input<'_>) -> Option<String> {
        let stripped = strip_separators(&input.as_text());
        // Must also fit the internal representation
        if DIGITS_REGEX.is_match(&stripped) && stripped.parse::<i64>().is_ok() {
            Some(stripped)
        } else {
            None
        }
    }
}

impl TypeHandler for IntHandler {
    fn name(&self) -> &'static str {
        "int"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        Self::digits(input).is_some()
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        let digits = Self::digits(input).ok_or_else(|| TypeError::Invalid {
            expected: self.name().to_string(),
        })?;
        Ok(group_thousands(&digits))
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        let digits = Self::digits(input)
            .ok_or_else(|| TypeError::Number(strip_separators(&input.as_text())))?;
        digits
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| TypeError::Number(digits))
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            // Display text carries no sign
            ParamValue::Int(i) if *i < 0 => Err(TypeError::Number(i.to_string())),
            ParamValue::Int(i) => Ok(i.to_string()),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}

/// Handler for `float`
///
/// Validation strips whitespace and group separators, then requires a
/// finite number. `NaN`, infinities and multiple decimal points are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatHandler;

impl FloatHandler {
    fn number(text: &str) -> Option<f64> {
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|f| f.is_finite())
    }

    /// Group the leading digit run of the integer part, keep the rest
    fn group_integer_part(integer: &str) -> String {
        let (sign, rest) = match integer.strip_prefix(['-', '+']) {
            Some(unsigned) => integer.split_at(integer.len() - unsigned.len()),
            None => ("", integer),
        };
        let run = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (digits, tail) = rest.split_at(run);
        format!("{sign}{}{tail}", group_thousands(digits))
    }
}

impl TypeHandler for FloatHandler {
    fn name(&self) -> &'static str {
        "float"
    }

    fn validate(&self, input: Input<'_>) -> bool {
        Self::number(&strip_separators(&input.as_text())).is_some()
    }

    fn parse(&self, input: Input<'_>) -> Result<String, TypeError> {
        ensure_valid(self, input)?;
        let stripped = strip_separators(&input.as_text());
        let (integer, fractional) = match stripped.split_once('.') {
            Some((integer, fractional)) => (integer, fractional),
            None => (stripped.as_str(), ""),
        };
        let mut out = Self::group_integer_part(integer);
        if !fractional.is_empty() {
            out.push('.');
            out.push_str(fractional);
        }
        Ok(out)
    }

    fn cast_to(&self, input: Input<'_>) -> Result<ParamValue, TypeError> {
        let stripped = strip_separators(&input.as_text());
        Self::number(&stripped)
            .map(ParamValue::Float)
            .ok_or(TypeError::Number(stripped))
    }

    fn cast_from(&self, value: &ParamValue) -> Result<String, TypeError> {
        match value {
            ParamValue::Float(f) => Ok(f.to_string()),
            ParamValue::Int(i) => Ok(i.to_string()),
            other => Err(TypeError::mismatch(self.name(), other.type_name())),
        }
    }
}
