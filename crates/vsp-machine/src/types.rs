//! Identifiers, states, events and notifications

use crate::context::ParameterContext;
use crate::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use vsp_types::ParamValue;

/// Identifier of one editable field, stable for the field's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParameterId(pub Uuid);

impl ParameterId {
    /// Create a fresh identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParameterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable states of a parameter field
///
/// The `decide` dispatcher is transient and never observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterState {
    /// Display only, never committed
    #[serde(rename = "reading.pending")]
    ReadingPending,
    /// Display only, committed at least once
    #[serde(rename = "reading.submitted")]
    ReadingSubmitted,
    /// Active editor holding input focus
    #[serde(rename = "editing")]
    Editing,
}

impl ParameterState {
    /// All observable states
    pub const ALL: [ParameterState; 3] = [
        ParameterState::ReadingPending,
        ParameterState::ReadingSubmitted,
        ParameterState::Editing,
    ];

    /// Check if this is one of the reading states
    #[inline]
    #[must_use]
    pub fn is_reading(self) -> bool {
        matches!(self, Self::ReadingPending | Self::ReadingSubmitted)
    }

    /// Dotted state path
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadingPending => "reading.pending",
            Self::ReadingSubmitted => "reading.submitted",
            Self::Editing => "editing",
        }
    }
}

impl fmt::Display for ParameterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound events raised by the surrounding UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterEvent {
    /// Begin editing
    Edit,
    /// Replace the working value
    Change(String),
    /// Attempt to finalize the working value
    Commit,
    /// Abandon edits and restore the prior value
    Cancel,
    /// Dismiss the current error
    ClearError,
    /// Input focus lost
    Blur,
}

impl FromStr for ParameterEvent {
    type Err = MachineError;

    /// Parses `edit`, `change=<text>`, `commit`, `cancel`, `clear-error`, `blur`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix("change=") {
            return Ok(Self::Change(text.to_string()));
        }
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "edit" => Ok(Self::Edit),
            "commit" => Ok(Self::Commit),
            "cancel" => Ok(Self::Cancel),
            "clear-error" => Ok(Self::ClearError),
            "blur" => Ok(Self::Blur),
            _ => Err(MachineError::UnknownEvent(s.to_string())),
        }
    }
}

/// Outbound notifications to the owning stage builder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// This field became the active editor
    #[serde(rename = "PARAMETER.EDIT")]
    Edit {
        /// Context snapshot after entering edit mode
        context: ParameterContext,
    },
    /// Final accepted state of the field
    #[serde(rename = "PARAMETER.COMMIT")]
    Commit {
        /// Context snapshot with the normalized display value
        parameter: ParameterContext,
        /// Internal value cast by the member that accepted the text
        value: ParamValue,
    },
}
