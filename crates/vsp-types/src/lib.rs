//! VSP Types
//!
//! Declared types of pipeline stage parameters and the handlers that
//! interpret user text against them.
//!
//! # Core Concepts
//!
//! - [`TypeSignature`]: atomic, union or `list` container type, resolved once per field
//! - [`render`]: human-readable annotation used in error messages
//! - [`TypeHandler`]: validate / parse / cast-to / cast-from contract of one type
//! - [`HandlerRegistry`]: immutable table of handlers with union first-match dispatch
//! - [`ParamValue`]: internal value a pipeline stage stores
//!
//! # Example
//!
//! ```rust
//! use vsp_types::{HandlerRegistry, Input, ParamValue, TypeSignature};
//!
//! let registry = HandlerRegistry::with_defaults();
//! let signature: TypeSignature = "int|str".parse().unwrap();
//!
//! let accepted = registry.accept(&signature, Input::Text("1234567")).unwrap();
//! assert_eq!(accepted.display, "1,234,567");
//! assert_eq!(accepted.value, ParamValue::Int(1_234_567));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod annotation;
mod error;
mod registry;
mod signature;
mod value;

pub mod handler;

// Re-exports
pub use annotation::{invalid_value_message, render};
pub use error::{SignatureError, TypeError};
pub use handler::TypeHandler;
pub use registry::{Accepted, HandlerRegistry};
pub use signature::{AtomicType, Candidate, TypeSignature, LIST_TYPE, UNION_SEPARATOR};
pub use value::{Input, ParamValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
