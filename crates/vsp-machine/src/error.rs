//! Error types for the editing machine and stage builder
//!
//! Validation failures of user text are NOT errors here: they are reported
//! in place through the parameter context. These types cover misuse of
//! the machine and builder APIs.

use crate::types::{ParameterId, ParameterState};
use vsp_types::TypeError;

/// State machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MachineError {
    /// Transition not present in the transition table
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        /// Source state
        from: ParameterState,
        /// Target state
        to: ParameterState,
    },

    /// Event text could not be parsed
    #[error("unknown event: '{0}'")]
    UnknownEvent(String),
}

/// Stage builder errors
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// No parameter with this id belongs to the stage
    #[error("unknown parameter: {0}")]
    UnknownParameter(ParameterId),

    /// Some parameters have never been committed
    #[error("stage has {} uncommitted parameter(s)", .0.len())]
    Incomplete(Vec<ParameterId>),

    /// Initial value could not be cast
    #[error("type error: {0}")]
    Type(#[from] TypeError),
}
