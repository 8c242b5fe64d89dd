//! VSP Machine
//!
//! Per-field editing state machine for typed pipeline stage parameters,
//! and the stage builder that owns those machines.
//!
//! Each field runs `decide` once, then moves between `reading.pending`,
//! `reading.submitted` and `editing` on UI events:
//!
//! | event | effect |
//! |---|---|
//! | `EDIT` | enter `editing`, emit `PARAMETER.EDIT` |
//! | `CHANGE(text)` | replace the working value |
//! | `COMMIT` | validate; accept and emit `PARAMETER.COMMIT`, or set `error` |
//! | `CANCEL` | restore the prior value, back to `reading.pending` |
//! | `CLEAR_ERROR` | drop the current error |
//! | `BLUR` | revert or keep, then leave `editing` |
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use vsp_machine::prelude::*;
//!
//! let registry = Arc::new(HandlerRegistry::with_defaults());
//! let mut stage = StageBuilder::new("Limit", registry);
//!
//! let field = ParameterContext::new("size", "int".parse().unwrap());
//! let (id, _) = stage.add_parameter(field).unwrap();
//!
//! stage.dispatch(id, ParameterEvent::Edit).unwrap();
//! stage.dispatch(id, ParameterEvent::Change("1234567".into())).unwrap();
//! stage.dispatch(id, ParameterEvent::Commit).unwrap();
//!
//! assert_eq!(stage.get(id).unwrap().context().value.as_deref(), Some("1,234,567"));
//! assert_eq!(stage.arguments().unwrap(), vec![("size".to_string(), ParamValue::Int(1_234_567))]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod focus;
pub mod machine;
pub mod state_machine;
pub mod types;

// Re-exports
pub use builder::StageBuilder;
pub use config::{MachineConfig, DEFAULT_DICT_INDENT};
pub use context::ParameterContext;
pub use error::{BuilderError, MachineError};
pub use focus::{FocusHooks, FocusSlot, NoopFocus};
pub use machine::ParameterMachine;
pub use types::{Notification, ParameterEvent, ParameterId, ParameterState};

/// Common imports
pub mod prelude {
    pub use crate::builder::StageBuilder;
    pub use crate::config::MachineConfig;
    pub use crate::context::ParameterContext;
    pub use crate::error::{BuilderError, MachineError};
    pub use crate::focus::{FocusHooks, FocusSlot, NoopFocus};
    pub use crate::machine::ParameterMachine;
    pub use crate::types::{Notification, ParameterEvent, ParameterId, ParameterState};
    pub use vsp_types::{HandlerRegistry, Input, ParamValue, TypeSignature};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
