//! Pipeline stage builder
//!
//! Owns the parameter machines of one stage, keeps at most one of them in
//! edit mode, and collects committed values into stage arguments.

use crate::config::MachineConfig;
use crate::context::ParameterContext;
use crate::error::BuilderError;
use crate::focus::{FocusHooks, FocusSlot};
use crate::machine::ParameterMachine;
use crate::types::{Notification, ParameterEvent, ParameterId, ParameterState};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use vsp_types::{HandlerRegistry, Input, ParamValue};

/// Builder of one pipeline stage
#[derive(Debug)]
pub struct StageBuilder {
    stage: String,
    registry: Arc<HandlerRegistry>,
    config: MachineConfig,
    focus: FocusSlot,
    parameters: IndexMap<ParameterId, ParameterMachine>,
    committed: HashMap<ParameterId, ParamValue>,
}

impl StageBuilder {
    /// Create an empty builder for the named stage
    #[must_use]
    pub fn new(stage: impl Into<String>, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            stage: stage.into(),
            registry,
            config: MachineConfig::default(),
            focus: FocusSlot::new(),
            parameters: IndexMap::new(),
            committed: HashMap::new(),
        }
    }

    /// Set machine configuration for parameters added afterwards
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Stage name
    #[inline]
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Shared focus slot
    #[inline]
    #[must_use]
    pub fn focus(&self) -> &FocusSlot {
        &self.focus
    }

    /// Add a field and spawn its machine
    ///
    /// A context marked submitted counts as committed with the cast of its
    /// initial value.
    ///
    /// # Errors
    /// Returns [`BuilderError::Type`] if a submitted initial value does not
    /// match the declared type.
    pub fn add_parameter(
        &mut self,
        context: ParameterContext,
    ) -> Result<(ParameterId, Option<Notification>), BuilderError> {
        let context = context.with_stage(self.stage.clone());
        let id = context.id;
        let initial = if context.submitted {
            let input = Input::from(context.value.as_deref());
            Some(self.registry.cast_to(&context.type_, input)?)
        } else {
            None
        };

        let (machine, notification) = ParameterMachine::spawn(
            context,
            Arc::clone(&self.registry),
            self.config,
            Arc::new(self.focus.clone()),
        );
        debug!(stage = %self.stage, parameter = %id, "parameter added");
        self.parameters.insert(id, machine);
        if let Some(value) = initial {
            self.committed.insert(id, value);
        }
        if let Some(n) = &notification {
            self.observe(id, n);
        }
        Ok((id, notification))
    }

    /// Remove a field, releasing focus if it holds it
    ///
    /// # Errors
    /// Returns [`BuilderError::UnknownParameter`] if the id is not in this stage.
    pub fn remove_parameter(&mut self, id: ParameterId) -> Result<ParameterContext, BuilderError> {
        let machine = self
            .parameters
            .shift_remove(&id)
            .ok_or(BuilderError::UnknownParameter(id))?;
        self.committed.remove(&id);
        self.focus.release(id);
        debug!(stage = %self.stage, parameter = %id, "parameter removed");
        Ok(machine.into_context())
    }

    /// Forward an event to one field
    ///
    /// # Errors
    /// Returns [`BuilderError::UnknownParameter`] if the id is not in this stage.
    pub fn dispatch(
        &mut self,
        id: ParameterId,
        event: ParameterEvent,
    ) -> Result<Option<Notification>, BuilderError> {
        let machine = self
            .parameters
            .get_mut(&id)
            .ok_or(BuilderError::UnknownParameter(id))?;
        let notification = machine.send(event);
        if let Some(n) = &notification {
            self.observe(id, n);
        }
        Ok(notification)
    }

    fn observe(&mut self, source: ParameterId, notification: &Notification) {
        match notification {
            Notification::Edit { .. } => {
                let others: Vec<ParameterId> = self
                    .parameters
                    .iter()
                    .filter(|(id, m)| **id != source && m.state() == ParameterState::Editing)
                    .map(|(id, _)| *id)
                    .collect();
                for other in others {
                    if let Some(machine) = self.parameters.get_mut(&other) {
                        debug!(stage = %self.stage, parameter = %other, "blurring sibling editor");
                        machine.send(ParameterEvent::Blur);
                    }
                }
            }
            Notification::Commit { parameter, value } => {
                info!(stage = %self.stage, name = %parameter.name, "argument recorded");
                self.committed.insert(source, value.clone());
            }
        }
    }

    /// Machine of one field
    #[must_use]
    pub fn get(&self, id: ParameterId) -> Option<&ParameterMachine> {
        self.parameters.get(&id)
    }

    /// Field currently in edit mode
    #[must_use]
    pub fn active_editor(&self) -> Option<ParameterId> {
        self.parameters
            .values()
            .find(|m| m.state() == ParameterState::Editing)
            .map(ParameterMachine::id)
    }

    /// Field ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = ParameterId> + '_ {
        self.parameters.keys().copied()
    }

    /// Committed value of one field
    #[must_use]
    pub fn committed(&self, id: ParameterId) -> Option<&ParamValue> {
        self.committed.get(&id)
    }

    /// Ordered `(name, value)` arguments of the stage
    ///
    /// # Errors
    /// Returns [`BuilderError::Incomplete`] listing every field without a
    /// committed value.
    pub fn arguments(&self) -> Result<Vec<(String, ParamValue)>, BuilderError> {
        let mut arguments = Vec::with_capacity(self.parameters.len());
        let mut missing = Vec::new();
        for (id, machine) in &self.parameters {
            match self.committed.get(id) {
                Some(value) => arguments.push((machine.context().name.clone(), value.clone())),
                None => missing.push(*id),
            }
        }
        if missing.is_empty() {
            Ok(arguments)
        } else {
            Err(BuilderError::Incomplete(missing))
        }
    }

    /// Stage in its wire shape: `{"_cls": stage, "kwargs": [[name, value], ...]}`
    ///
    /// # Errors
    /// Returns [`BuilderError::Incomplete`] if any field is uncommitted.
    pub fn to_stage_json(&self) -> Result<Value, BuilderError> {
        let kwargs: Vec<Value> = self
            .arguments()?
            .into_iter()
            .map(|(name, value)| json!([name, value.to_json()]))
            .collect();
        Ok(json!({ "_cls": self.stage, "kwargs": kwargs }))
    }

    /// Get number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the stage has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}
