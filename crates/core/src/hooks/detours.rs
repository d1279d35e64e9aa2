//! Installed replacements for the OS entry points
//!
//! Thin `extern "system"` shims with the exact signatures of the exports
//! they replace. Each one looks up the published [`InputHooks`] and hands
//! the call to the interceptor with the registry as the way back to the
//! original. Without published state a call is answered as a failure of the
//! real export would be.

use inputgate_sdk::{
    Bool, Hwnd, LParam, Msg, Point, WParam, XInputState, ERROR_DEVICE_NOT_CONNECTED, FALSE,
};

use super::entry::Charset;
use super::manager::{installed_hooks, InputHooks};

#[inline]
fn hooks() -> Option<&'static InputHooks> {
    installed_hooks()
}

pub unsafe extern "system" fn xinput_get_state(user_index: u32, state: *mut XInputState) -> u32 {
    match hooks() {
        Some(h) => h.interceptor().xinput_get_state(h.registry(), user_index, state),
        None => ERROR_DEVICE_NOT_CONNECTED,
    }
}

unsafe fn get_message(charset: Charset, msg: *mut Msg, hwnd: Hwnd, min: u32, max: u32) -> Bool {
    match hooks() {
        Some(h) => h
            .interceptor()
            .get_message(h.registry(), charset, msg, hwnd, min, max),
        None => FALSE,
    }
}

pub unsafe extern "system" fn get_message_a(msg: *mut Msg, hwnd: Hwnd, min: u32, max: u32) -> Bool {
    get_message(Charset::Ansi, msg, hwnd, min, max)
}

pub unsafe extern "system" fn get_message_w(msg: *mut Msg, hwnd: Hwnd, min: u32, max: u32) -> Bool {
    get_message(Charset::Wide, msg, hwnd, min, max)
}

unsafe fn peek_message(
    charset: Charset,
    msg: *mut Msg,
    hwnd: Hwnd,
    min: u32,
    max: u32,
    remove: u32,
) -> Bool {
    match hooks() {
        Some(h) => h
            .interceptor()
            .peek_message(h.registry(), charset, msg, hwnd, min, max, remove),
        None => FALSE,
    }
}

pub unsafe extern "system" fn peek_message_a(
    msg: *mut Msg,
    hwnd: Hwnd,
    min: u32,
    max: u32,
    remove: u32,
) -> Bool {
    peek_message(Charset::Ansi, msg, hwnd, min, max, remove)
}

pub unsafe extern "system" fn peek_message_w(
    msg: *mut Msg,
    hwnd: Hwnd,
    min: u32,
    max: u32,
    remove: u32,
) -> Bool {
    peek_message(Charset::Wide, msg, hwnd, min, max, remove)
}

unsafe fn post_message(charset: Charset, hwnd: Hwnd, msg: u32, wparam: WParam, lparam: LParam) -> Bool {
    match hooks() {
        Some(h) => h
            .interceptor()
            .post_message(h.registry(), charset, hwnd, msg, wparam, lparam),
        None => FALSE,
    }
}

pub unsafe extern "system" fn post_message_a(hwnd: Hwnd, msg: u32, wparam: WParam, lparam: LParam) -> Bool {
    post_message(Charset::Ansi, hwnd, msg, wparam, lparam)
}

pub unsafe extern "system" fn post_message_w(hwnd: Hwnd, msg: u32, wparam: WParam, lparam: LParam) -> Bool {
    post_message(Charset::Wide, hwnd, msg, wparam, lparam)
}

pub unsafe extern "system" fn set_cursor_pos(x: i32, y: i32) -> Bool {
    match hooks() {
        Some(h) => h.interceptor().set_cursor_pos(h.registry(), x, y),
        None => FALSE,
    }
}

pub unsafe extern "system" fn get_cursor_pos(point: *mut Point) -> Bool {
    match hooks() {
        Some(h) => h.interceptor().get_cursor_pos(h.registry(), point),
        None => FALSE,
    }
}
