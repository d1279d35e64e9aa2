//! Signatures of the intercepted entry points
//!
//! Every detour is declared with exactly one of these types so the host
//! cannot tell it apart from the real export.

use crate::types::{Bool, Hwnd, LParam, Msg, Point, WParam, XInputState};

/// `XInputGetState(dwUserIndex, pState)`
pub type XInputGetStateFn = unsafe extern "system" fn(user_index: u32, state: *mut XInputState) -> u32;

/// `GetMessageA` / `GetMessageW`
pub type GetMessageFn =
    unsafe extern "system" fn(msg: *mut Msg, hwnd: Hwnd, filter_min: u32, filter_max: u32) -> Bool;

/// `PeekMessageA` / `PeekMessageW`
pub type PeekMessageFn = unsafe extern "system" fn(
    msg: *mut Msg,
    hwnd: Hwnd,
    filter_min: u32,
    filter_max: u32,
    remove: u32,
) -> Bool;

/// `PostMessageA` / `PostMessageW`
pub type PostMessageFn =
    unsafe extern "system" fn(hwnd: Hwnd, msg: u32, wparam: WParam, lparam: LParam) -> Bool;

/// `SetCursorPos(X, Y)`
pub type SetCursorPosFn = unsafe extern "system" fn(x: i32, y: i32) -> Bool;

/// `GetCursorPos(lpPoint)`
pub type GetCursorPosFn = unsafe extern "system" fn(point: *mut Point) -> Bool;
