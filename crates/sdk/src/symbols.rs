//! Module and export names of the intercepted entry points
//!
//! These strings must match exactly what the OS modules export.

/// Window manager module
pub const USER32: &str = "user32";

/// XInput module most titles of the era link against
pub const XINPUT1_3: &str = "xinput1_3";

pub const XINPUT_GET_STATE: &str = "XInputGetState";
pub const GET_MESSAGE_A: &str = "GetMessageA";
pub const GET_MESSAGE_W: &str = "GetMessageW";
pub const PEEK_MESSAGE_A: &str = "PeekMessageA";
pub const PEEK_MESSAGE_W: &str = "PeekMessageW";
pub const POST_MESSAGE_A: &str = "PostMessageA";
pub const POST_MESSAGE_W: &str = "PostMessageW";
pub const SET_CURSOR_POS: &str = "SetCursorPos";
pub const GET_CURSOR_POS: &str = "GetCursorPos";

/// Collected (module, symbol) pairs for iteration
pub const ENTRY_POINT_SYMBOLS: &[(&str, &str)] = &[
    (XINPUT1_3, XINPUT_GET_STATE),
    (USER32, GET_MESSAGE_A),
    (USER32, GET_MESSAGE_W),
    (USER32, PEEK_MESSAGE_A),
    (USER32, PEEK_MESSAGE_W),
    (USER32, POST_MESSAGE_A),
    (USER32, POST_MESSAGE_W),
    (USER32, SET_CURSOR_POS),
    (USER32, GET_CURSOR_POS),
];
