//! Native input record definitions
//!
//! Layouts mirror the Windows SDK headers (winuser.h, xinput.h) exactly.
//! The host owns these records; interceptors only ever see them through
//! pointers handed in by the caller.

use std::ffi::c_void;

/// Win32 `BOOL` (nonzero is true; `GetMessage` also uses -1 for errors)
pub type Bool = i32;

/// Win32 `TRUE`
pub const TRUE: Bool = 1;

/// Win32 `FALSE`
pub const FALSE: Bool = 0;

/// Window handle (`HWND`)
pub type Hwnd = *mut c_void;

/// Message word parameter (`WPARAM`)
pub type WParam = usize;

/// Message long parameter (`LPARAM`)
pub type LParam = isize;

/// Screen coordinate pair (`POINT`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Queued window message (`MSG`)
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Msg {
    pub hwnd: Hwnd,
    pub message: u32,
    pub wparam: WParam,
    pub lparam: LParam,
    pub time: u32,
    pub pt: Point,
}

impl Default for Msg {
    fn default() -> Self {
        Self {
            hwnd: std::ptr::null_mut(),
            message: 0,
            wparam: 0,
            lparam: 0,
            time: 0,
            pt: Point::ORIGIN,
        }
    }
}

impl Msg {
    /// Build a message addressed to `hwnd`
    pub fn new(hwnd: Hwnd, message: u32, wparam: WParam, lparam: LParam) -> Self {
        Self {
            hwnd,
            message,
            wparam,
            lparam,
            ..Self::default()
        }
    }

    /// Whether the message was posted to a window (thread messages have a null handle)
    pub fn has_window(&self) -> bool {
        !self.hwnd.is_null()
    }
}

/// Gamepad portion of an XInput state (`XINPUT_GAMEPAD`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XInputGamepad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

/// Polled controller state (`XINPUT_STATE`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XInputState {
    pub packet_number: u32,
    pub gamepad: XInputGamepad,
}

impl XInputState {
    /// True when every field is zero, which the host reads as "no input"
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
