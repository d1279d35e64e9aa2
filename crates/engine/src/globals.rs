//! Process-wide mode state storage
//!
//! The injected library owns exactly one [`ModeState`]. It is created once
//! during install and handed to the interceptor as an injected
//! [`ModeSource`](crate::ModeSource); the C ABI setters write through it.

use std::sync::{Arc, OnceLock};

use crate::mode::ModeState;

/// Global mode state storage
static MODE_STATE: OnceLock<Arc<ModeState>> = OnceLock::new();

/// Initialize the process-wide mode state
///
/// Returns the stored state. Calling it again hands back the existing one.
pub fn init_mode_state() -> Arc<ModeState> {
    MODE_STATE
        .get_or_init(|| {
            tracing::debug!("Mode state initialized");
            Arc::new(ModeState::new())
        })
        .clone()
}

/// Get the process-wide mode state, creating it on first use
pub fn mode_state() -> Arc<ModeState> {
    init_mode_state()
}

/// Get the mode state only if something already created it
pub fn try_mode_state() -> Option<&'static Arc<ModeState>> {
    MODE_STATE.get()
}

/// Check if the mode state exists
pub fn is_mode_state_initialized() -> bool {
    MODE_STATE.get().is_some()
}
