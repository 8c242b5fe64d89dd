//! Per-field transition driver
//!
//! [`ParameterMachine`] owns one [`ParameterContext`], consults the shared
//! [`HandlerRegistry`] on commit, runs entry actions and focus hooks, and
//! returns at most one [`Notification`] per event.

use crate::config::MachineConfig;
use crate::context::ParameterContext;
use crate::focus::FocusHooks;
use crate::state_machine::{decide, validate_transition};
use crate::types::{Notification, ParameterEvent, ParameterId, ParameterState};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;
use vsp_types::{invalid_value_message, HandlerRegistry, Input};

/// Editing state machine of one parameter field
pub struct ParameterMachine {
    context: ParameterContext,
    state: ParameterState,
    registry: Arc<HandlerRegistry>,
    config: MachineConfig,
    focus: Arc<dyn FocusHooks>,
}

impl ParameterMachine {
    /// Create the machine and run `decide`
    ///
    /// Returns the `PARAMETER.EDIT` notification when the field starts in
    /// edit mode (`focus_on_init`).
    pub fn spawn(
        context: ParameterContext,
        registry: Arc<HandlerRegistry>,
        config: MachineConfig,
        focus: Arc<dyn FocusHooks>,
    ) -> (Self, Option<Notification>) {
        let initial = decide(context.focus_on_init, context.submitted);
        let mut machine = Self {
            context,
            state: initial,
            registry,
            config,
            focus,
        };
        debug!(parameter = %machine.context.id, state = %initial, "parameter spawned");
        let notification = machine.enter(initial);
        (machine, notification)
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> ParameterState {
        self.state
    }

    /// Current context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &ParameterContext {
        &self.context
    }

    /// Field identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ParameterId {
        self.context.id
    }

    /// Consume the machine, keeping its context
    #[must_use]
    pub fn into_context(self) -> ParameterContext {
        self.context
    }

    /// Process one event to completion
    pub fn send(&mut self, event: ParameterEvent) -> Option<Notification> {
        use ParameterEvent as E;
        use ParameterState as S;

        match (self.state, event) {
            (S::ReadingPending | S::ReadingSubmitted, E::Edit) => self.transition(S::Editing),
            (S::Editing, E::Change(text)) => {
                self.context.value = Some(text);
                None
            }
            (S::Editing, E::Commit) => self.commit(),
            (S::Editing, E::Cancel) => {
                self.context.value = self.context.prev_value.clone();
                self.transition(S::ReadingPending)
            }
            (S::Editing, E::ClearError) => {
                self.context.error = None;
                self.context.clear_error_id = None;
                None
            }
            (_, E::Blur) => self.blur(),
            (state, event) => {
                trace!(parameter = %self.context.id, %state, ?event, "event ignored");
                None
            }
        }
    }

    fn commit(&mut self) -> Option<Notification> {
        let input = Input::from(self.context.value.as_deref());
        let outcome = self.registry.accept(&self.context.type_, input);
        match outcome {
            Ok(accepted) => {
                self.context.submitted = true;
                self.context.value = Some(accepted.display);
                self.context.error = None;
                self.context.clear_error_id = None;
                info!(
                    parameter = %self.context.id,
                    name = %self.context.name,
                    member = accepted.member,
                    "parameter committed"
                );
                let next = decide(self.context.focus_on_init, self.context.submitted);
                self.transition(next);
                Some(Notification::Commit {
                    parameter: self.context.clone(),
                    value: accepted.value,
                })
            }
            Err(e) => {
                let token = Uuid::new_v4();
                warn!(parameter = %self.context.id, error = %e, "commit rejected");
                self.context.error = Some(invalid_value_message(&self.context.type_));
                self.context.clear_error_id = Some(token);
                None
            }
        }
    }

    fn blur(&mut self) -> Option<Notification> {
        if self.context.submitted {
            return self.transition(ParameterState::ReadingSubmitted);
        }
        // An untouched empty field has nothing to revert to. Outside edit
        // mode value already equals the snapshot, or no snapshot was taken.
        if self.state == ParameterState::Editing && self.context.prev_value.as_deref() != Some("") {
            self.context.value = self.context.prev_value.clone();
        }
        self.transition(ParameterState::ReadingPending)
    }

    fn transition(&mut self, to: ParameterState) -> Option<Notification> {
        if let Err(e) = validate_transition(self.state, to) {
            error!(parameter = %self.context.id, error = %e, "transition refused");
            return None;
        }
        debug!(parameter = %self.context.id, from = %self.state, %to, "parameter transition");
        self.enter(to)
    }

    fn enter(&mut self, state: ParameterState) -> Option<Notification> {
        self.state = state;
        if state.is_reading() {
            self.context.error = None;
            self.context.clear_error_id = None;
            self.focus.release(self.context.id);
            return None;
        }

        self.context.prev_value = self.context.value.clone();
        self.context.focus_on_init = false;
        let pretty = self
            .context
            .value
            .as_deref()
            .and_then(|v| self.registry.pretty_dict(Input::Text(v), self.config.dict_indent));
        if pretty.is_some() {
            self.context.value = pretty;
        }
        self.focus.acquire(self.context.id);
        Some(Notification::Edit {
            context: self.context.clone(),
        })
    }
}

impl fmt::Debug for ParameterMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterMachine")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
