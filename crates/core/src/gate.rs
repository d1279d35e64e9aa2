//! Mode gate
//!
//! Combines the live mode flags into the suppression decisions the
//! interceptors act on. Nothing is cached: each call reads the source.

use inputgate_engine::ModeSource;

/// Input is blocked and keyboard/mouse drives the camera
pub fn keyboard_mouse_suppressed<M: ModeSource + ?Sized>(mode: &M) -> bool {
    mode.input_blocked() && mode.control_device().controls_with_keyboard_mouse()
}

/// Overlay or menu is on screen
pub fn overlay_override<M: ModeSource + ?Sized>(mode: &M) -> bool {
    mode.overlay_visible()
}

/// Host pointer and keyboard traffic must be withheld
pub fn pointer_suppressed<M: ModeSource + ?Sized>(mode: &M) -> bool {
    keyboard_mouse_suppressed(mode) || overlay_override(mode)
}

/// Host gamepad polling must read as idle
///
/// Deliberately ignores the overlay, which is driven by keyboard and mouse.
pub fn controller_suppressed<M: ModeSource + ?Sized>(mode: &M) -> bool {
    mode.camera_enabled() && mode.input_blocked() && mode.control_device().controls_with_gamepad()
}
