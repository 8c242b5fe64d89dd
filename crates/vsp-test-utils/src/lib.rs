//! Testing utilities for VSP workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use parking_lot::Mutex;
use std::sync::Arc;
use vsp_machine::{
    FocusHooks, MachineConfig, Notification, ParameterContext, ParameterEvent, ParameterId,
    ParameterMachine,
};
use vsp_types::{HandlerRegistry, TypeSignature};

pub fn registry() -> Arc<HandlerRegistry> {
    Arc::new(HandlerRegistry::with_defaults())
}

pub fn signature(text: &str) -> TypeSignature {
    text.parse().unwrap()
}

pub fn field(type_: &str) -> ParameterContext {
    ParameterContext::new("field", signature(type_))
}

/// Focus call observed by [`RecordingFocus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCall {
    Acquire(ParameterId),
    Release(ParameterId),
}

/// Focus hooks that record every call
#[derive(Debug, Clone, Default)]
pub struct RecordingFocus {
    calls: Arc<Mutex<Vec<FocusCall>>>,
}

impl RecordingFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FocusCall> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<FocusCall> {
        self.calls.lock().last().copied()
    }
}

impl FocusHooks for RecordingFocus {
    fn acquire(&self, id: ParameterId) {
        self.calls.lock().push(FocusCall::Acquire(id));
    }

    fn release(&self, id: ParameterId) {
        self.calls.lock().push(FocusCall::Release(id));
    }
}

pub fn spawn(context: ParameterContext) -> (ParameterMachine, Option<Notification>) {
    spawn_with_focus(context, RecordingFocus::new())
}

pub fn spawn_with_focus(
    context: ParameterContext,
    focus: RecordingFocus,
) -> (ParameterMachine, Option<Notification>) {
    ParameterMachine::spawn(context, registry(), MachineConfig::default(), Arc::new(focus))
}

/// Spawn a field in edit mode and type `text` into it
pub fn editing_with(type_: &str, text: &str) -> ParameterMachine {
    let (mut machine, _) = spawn(field(type_).with_focus_on_init(true));
    machine.send(ParameterEvent::Change(text.to_string()));
    machine
}

/// Send events in order, keeping every notification
pub fn drive(
    machine: &mut ParameterMachine,
    events: impl IntoIterator<Item = ParameterEvent>,
) -> Vec<Notification> {
    events
        .into_iter()
        .filter_map(|event| machine.send(event))
        .collect()
}
