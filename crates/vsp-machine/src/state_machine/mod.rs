//! Transition table of the editing state machine

use crate::error::MachineError;
use crate::types::ParameterState;

/// Validates a state transition.
///
/// Illegal transitions return an error so callers can test the table.
/// The `strict-debug` feature turns them into a panic instead.
pub fn validate_transition(from: ParameterState, to: ParameterState) -> Result<(), MachineError> {
    if allowed(from, to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("Illegal state transition attempted: {from:?} -> {to:?}");

        Err(MachineError::IllegalTransition { from, to })
    }
}

/// States reachable from `from` in one event.
///
/// Reading states may re-enter themselves on BLUR.
#[must_use]
pub fn allowed_transitions(from: ParameterState) -> Vec<ParameterState> {
    use ParameterState::*;
    match from {
        ReadingPending => vec![ReadingPending, ReadingSubmitted, Editing],
        ReadingSubmitted => vec![ReadingSubmitted, Editing],
        Editing => vec![ReadingPending, ReadingSubmitted],
    }
}

/// Initial state chosen by the transient `decide` dispatcher
#[must_use]
pub fn decide(focus_on_init: bool, submitted: bool) -> ParameterState {
    if focus_on_init {
        ParameterState::Editing
    } else if submitted {
        ParameterState::ReadingSubmitted
    } else {
        ParameterState::ReadingPending
    }
}

fn allowed(from: ParameterState, to: ParameterState) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decide_routes() {
        assert_eq!(decide(true, true), ParameterState::Editing);
        assert_eq!(decide(false, true), ParameterState::ReadingSubmitted);
        assert_eq!(decide(false, false), ParameterState::ReadingPending);
    }

    #[test]
    fn editing_never_loops() {
        assert!(!allowed_transitions(ParameterState::Editing).contains(&ParameterState::Editing));
    }

    #[cfg(not(feature = "strict-debug"))]
    #[test]
    fn submitted_never_returns_to_pending() {
        assert_eq!(
            validate_transition(ParameterState::ReadingSubmitted, ParameterState::ReadingPending),
            Err(MachineError::IllegalTransition {
                from: ParameterState::ReadingSubmitted,
                to: ParameterState::ReadingPending,
            })
        );
    }
}
