//! Input focus side effects
//!
//! A machine acquires focus on entering `editing` and releases it on
//! entering either reading state. The host supplies the actual effect.

use crate::types::ParameterId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Focus effects requested by a parameter machine
pub trait FocusHooks: Send + Sync {
    /// Give input focus to the field
    fn acquire(&self, id: ParameterId);

    /// Take input focus away from the field
    fn release(&self, id: ParameterId);
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFocus;

impl FocusHooks for NoopFocus {
    fn acquire(&self, _id: ParameterId) {}

    fn release(&self, _id: ParameterId) {}
}

/// Single focus owner shared by all fields of a stage
#[derive(Debug, Clone, Default)]
pub struct FocusSlot {
    holder: Arc<Mutex<Option<ParameterId>>>,
}

impl FocusSlot {
    /// Create an empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Field currently holding focus
    #[must_use]
    pub fn holder(&self) -> Option<ParameterId> {
        *self.holder.lock()
    }
}

impl FocusHooks for FocusSlot {
    fn acquire(&self, id: ParameterId) {
        let previous = self.holder.lock().replace(id);
        if let Some(previous) = previous.filter(|p| *p != id) {
            tracing::debug!(from = %previous, to = %id, "focus moved");
        }
    }

    fn release(&self, id: ParameterId) {
        let mut holder = self.holder.lock();
        if *holder == Some(id) {
            *holder = None;
        }
    }
}
