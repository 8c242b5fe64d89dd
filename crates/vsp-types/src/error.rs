//! Error types for stage parameter typing
//!
//! Two families:
//! - [`SignatureError`]: a declared type could not be resolved into a [`TypeSignature`](crate::TypeSignature)
//! - [`TypeError`]: a value failed a handler operation (validate, parse, cast)
//!
//! Neither is fatal. A rejected value surfaces to the user as the
//! `Invalid value. Expected type ...` message and editing continues.

/// Errors while resolving a declared type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Type name is not one of the registered atomic types
    #[error("unknown type name: '{0}'")]
    UnknownType(String),

    /// Union contains an empty member (`"int|"`)
    #[error("empty member in union: '{0}'")]
    EmptyMember(String),

    /// `list` appears where only atomic types are allowed
    #[error("container type not allowed here: '{0}'")]
    NestedContainer(String),

    /// Container form is not `["list", element]`
    #[error("malformed container signature: {0}")]
    MalformedContainer(String),
}

/// Errors from handler operations
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// Text does not satisfy any member of the declared type
    #[error("Invalid value. Expected type {expected}")]
    Invalid {
        /// Rendered type annotation
        expected: String,
    },

    /// Internal value has the wrong shape for the handler
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch {
        /// Handler type name
        expected: String,
        /// Type name of the value that was supplied
        found: &'static str,
    },

    /// Container text is not JSON-compatible
    #[error("malformed container text: {0}")]
    Json(#[from] serde_json::Error),

    /// Numeric text could not be converted
    #[error("malformed number: '{0}'")]
    Number(String),

    /// No handler registered for the type
    #[error("no handler registered for type: {0}")]
    Unregistered(&'static str),
}

impl TypeError {
    /// Create a mismatch error
    pub fn mismatch(expected: impl Into<String>, found: &'static str) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            found,
        }
    }

    /// Check if this is a plain validation failure
    #[inline]
    #[must_use]
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::Json(_) | Self::Number(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_message_matches_user_text() {
        let err = TypeError::Invalid {
            expected: "float".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value. Expected type float");
        assert!(err.is_validation_failure());
    }

    #[test]
    fn mismatch_is_not_validation_failure() {
        let err = TypeError::mismatch("int", "str");
        assert_eq!(err.to_string(), "type mismatch: expected int, found str");
        assert!(!err.is_validation_failure());
    }
}
