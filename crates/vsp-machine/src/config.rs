//! Machine configuration

use serde::{Deserialize, Serialize};

/// Default indentation of pretty-printed `dict` values
pub const DEFAULT_DICT_INDENT: usize = 2;

/// Configuration shared by the machines of one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Spaces per level when a `dict` value is reformatted for editing
    pub dict_indent: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            dict_indent: DEFAULT_DICT_INDENT,
        }
    }
}

impl MachineConfig {
    /// Create config with defaults
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dict indentation
    #[inline]
    #[must_use]
    pub fn with_dict_indent(mut self, indent: usize) -> Self {
        self.dict_indent = indent;
        self
    }
}
