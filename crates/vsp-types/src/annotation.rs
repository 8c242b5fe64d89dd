//! Human-readable type annotations
//!
//! Only used to compose validation error messages.

use crate::signature::TypeSignature;
use std::fmt;

/// Render a signature as `int`, `List[int]` or `Union[int, str]`
#[must_use]
pub fn render(signature: &TypeSignature) -> String {
    match signature {
        TypeSignature::Atomic(t) => t.as_str().to_string(),
        TypeSignature::List(element) => format!("List[{}]", render(element)),
        TypeSignature::Union(members) => {
            let names: Vec<_> = members.iter().map(|t| t.as_str()).collect();
            format!("Union[{}]", names.join(", "))
        }
    }
}

/// Message shown when committed text fails validation
#[must_use]
pub fn invalid_value_message(signature: &TypeSignature) -> String {
    format!("Invalid value. Expected type {}", render(signature))
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
