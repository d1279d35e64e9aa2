//! C-compatible exports called by the injected camera system

use std::ffi::c_char;

use tracing::instrument;

use inputgate_engine::{mode_state, CameraControlDevice};
use inputgate_sdk::XInputState;

use crate::classifier::MessageHandler;

/// Install and enable the input hooks
///
/// Returns false only if the hooks could not be installed at all (including
/// a second call). Individual entry points that failed are listed in
/// [`inputgate_hook_report`].
#[no_mangle]
#[instrument(skip_all)]
pub extern "C" fn inputgate_install() -> bool {
    match std::panic::catch_unwind(crate::install) {
        Ok(Ok(report)) => report.enabled,
        Ok(Err(e)) => {
            tracing::error!("Failed to install input hooks: {}", e);
            false
        }
        Err(_) => {
            tracing::error!("Panic during install");
            false
        }
    }
}

/// Disable the input hooks, restoring the original entry points
#[no_mangle]
#[instrument(skip_all)]
pub extern "C" fn inputgate_uninstall() -> bool {
    match std::panic::catch_unwind(crate::uninstall) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!("Failed to uninstall input hooks: {}", e);
            false
        }
        Err(_) => {
            tracing::error!("Panic during uninstall");
            false
        }
    }
}

// === Mode flags ===

#[no_mangle]
pub extern "C" fn inputgate_set_camera_enabled(enabled: bool) {
    mode_state().set_camera_enabled(enabled);
}

#[no_mangle]
pub extern "C" fn inputgate_set_input_blocked(blocked: bool) {
    mode_state().set_input_blocked(blocked);
}

/// 0 = keyboard and mouse, 1 = gamepad, 2 = both
///
/// Unknown values are ignored.
#[no_mangle]
pub extern "C" fn inputgate_set_control_device(device: u8) {
    match CameraControlDevice::from_raw(device) {
        Some(device) => mode_state().set_control_device(device),
        None => tracing::warn!("Ignoring unknown camera control device {}", device),
    }
}

#[no_mangle]
pub extern "C" fn inputgate_set_overlay_visible(visible: bool) {
    mode_state().set_overlay_visible(visible);
}

// === Camera system registration ===

/// Register the message handler; null unregisters it
#[no_mangle]
pub extern "C" fn inputgate_set_message_handler(handler: Option<MessageHandler>) {
    crate::classifier().set_handler(handler);
    tracing::debug!(
        "Message handler {}",
        if handler.is_some() { "registered" } else { "cleared" }
    );
}

/// Register the buffer the camera system polls its own controller into
///
/// Calls into `XInputGetState` with this buffer are never suppressed.
/// Null clears the registration.
#[no_mangle]
pub extern "C" fn inputgate_set_own_gamepad_state(state: *const XInputState) {
    crate::set_own_gamepad_state(state);
}

// === Diagnostics ===

/// Pop the oldest buffered log line into `buf`
///
/// Returns false if nothing is queued. Lines longer than the buffer are
/// truncated.
///
/// # Safety
/// - `buf` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
pub unsafe extern "C" fn inputgate_next_console_line(buf: *mut c_char, maxlen: usize) -> bool {
    if buf.is_null() || maxlen == 0 {
        return false;
    }
    match crate::console().and_then(|console| console.pop()) {
        Some(line) => {
            write_str(buf, maxlen, &line);
            true
        }
        None => false,
    }
}

/// Write the JSON install report into `buf`
///
/// Returns the full length of the report in bytes (excluding the null
/// terminator), so a return value >= `maxlen` means it was truncated.
/// Returns 0 if the hooks were never installed.
///
/// # Safety
/// - `buf` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
pub unsafe extern "C" fn inputgate_hook_report(buf: *mut c_char, maxlen: usize) -> usize {
    let Some(hooks) = inputgate_core::installed_hooks() else {
        write_str(buf, maxlen, "");
        return 0;
    };
    let json = hooks.report().to_json();
    write_str(buf, maxlen, &json);
    json.len()
}

/// Helper to write a string to a C buffer, truncating and null-terminating
///
/// # Safety
/// - `buf` must be a valid pointer or null
/// - `maxlen` must accurately reflect the buffer size
unsafe fn write_str(buf: *mut c_char, maxlen: usize, s: &str) {
    if !buf.is_null() && maxlen > 0 {
        let bytes = s.as_bytes();
        let len = bytes.len().min(maxlen - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, len);
        *buf.add(len) = 0;
    }
}
