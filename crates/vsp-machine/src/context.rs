//! Per-field editing context

use crate::types::ParameterId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vsp_types::TypeSignature;

/// Mutable record owned by one parameter machine
///
/// Constructed with [`ParameterContext::new`] and the `with_*` builder
/// methods; after spawn only the machine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterContext {
    /// Field identifier
    pub id: ParameterId,
    /// Parameter name within the stage
    pub name: String,
    /// Owning stage name
    pub stage: String,
    /// Declared type, resolved once
    #[serde(rename = "type")]
    pub type_: TypeSignature,
    /// Current text, absent when never set
    pub value: Option<String>,
    /// Snapshot of `value` on entering edit mode
    pub prev_value: Option<String>,
    /// True once any commit has been accepted
    pub submitted: bool,
    /// Current validation error
    pub error: Option<String>,
    /// Token replaced on every failed commit
    pub clear_error_id: Option<Uuid>,
    /// Whether the field should enter edit mode on spawn
    pub focus_on_init: bool,
    /// Layout hint for the last field of a stage
    pub tail: bool,
}

impl ParameterContext {
    /// Create a context for a field of the given type
    #[must_use]
    pub fn new(name: impl Into<String>, type_: TypeSignature) -> Self {
        Self {
            id: ParameterId::new(),
            name: name.into(),
            stage: String::new(),
            type_,
            value: None,
            prev_value: None,
            submitted: false,
            error: None,
            clear_error_id: None,
            focus_on_init: false,
            tail: false,
        }
    }

    /// Set the initial text
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the owning stage
    #[inline]
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Set the field identifier
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: ParameterId) -> Self {
        self.id = id;
        self
    }

    /// Mark the initial value as already committed
    #[inline]
    #[must_use]
    pub fn with_submitted(mut self, submitted: bool) -> Self {
        self.submitted = submitted;
        self
    }

    /// Enter edit mode on spawn
    #[inline]
    #[must_use]
    pub fn with_focus_on_init(mut self, focus_on_init: bool) -> Self {
        self.focus_on_init = focus_on_init;
        self
    }

    /// Mark as the last field of its stage
    #[inline]
    #[must_use]
    pub fn with_tail(mut self, tail: bool) -> Self {
        self.tail = tail;
        self
    }

    /// Text as handed to handlers; absent reads as empty
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Check if a validation error is displayed
    #[inline]
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}
