//! Intercepted entry points
//!
//! The complete, fixed set of OS exports this crate replaces. The installer
//! walks [`EntryPoint::ALL`] in order; everything per-entry-point (module,
//! export name, detour) is looked up from this table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use inputgate_sdk::symbols;
use inputgate_sdk::{
    GetCursorPosFn, GetMessageFn, PeekMessageFn, PostMessageFn, SetCursorPosFn, XInputGetStateFn,
};

use super::detours;

/// Text encoding variant of a user32 export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Ansi,
    Wide,
}

/// Stable identifier of one intercepted OS entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryPoint {
    XInputGetState,
    GetMessageA,
    GetMessageW,
    PeekMessageA,
    PeekMessageW,
    PostMessageA,
    PostMessageW,
    SetCursorPos,
    GetCursorPos,
}

impl EntryPoint {
    /// Number of entry points
    pub const COUNT: usize = 9;

    /// All entry points, in installation order
    pub const ALL: [EntryPoint; Self::COUNT] = [
        EntryPoint::XInputGetState,
        EntryPoint::GetMessageA,
        EntryPoint::GetMessageW,
        EntryPoint::PeekMessageA,
        EntryPoint::PeekMessageW,
        EntryPoint::PostMessageA,
        EntryPoint::PostMessageW,
        EntryPoint::SetCursorPos,
        EntryPoint::GetCursorPos,
    ];

    /// Slot of this entry point in per-entry-point tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Exported symbol name
    pub const fn symbol(self) -> &'static str {
        match self {
            EntryPoint::XInputGetState => symbols::XINPUT_GET_STATE,
            EntryPoint::GetMessageA => symbols::GET_MESSAGE_A,
            EntryPoint::GetMessageW => symbols::GET_MESSAGE_W,
            EntryPoint::PeekMessageA => symbols::PEEK_MESSAGE_A,
            EntryPoint::PeekMessageW => symbols::PEEK_MESSAGE_W,
            EntryPoint::PostMessageA => symbols::POST_MESSAGE_A,
            EntryPoint::PostMessageW => symbols::POST_MESSAGE_W,
            EntryPoint::SetCursorPos => symbols::SET_CURSOR_POS,
            EntryPoint::GetCursorPos => symbols::GET_CURSOR_POS,
        }
    }

    /// Whether the export lives in the XInput module (whose name is configurable)
    pub const fn is_xinput(self) -> bool {
        matches!(self, EntryPoint::XInputGetState)
    }

    /// Module exporting this entry point, given the configured XInput module
    pub fn module<'a>(self, xinput_module: &'a str) -> &'a str {
        if self.is_xinput() {
            xinput_module
        } else {
            symbols::USER32
        }
    }

    /// The replacement installed for this entry point
    pub fn detour(self) -> *const () {
        match self {
            EntryPoint::XInputGetState => detours::xinput_get_state as XInputGetStateFn as *const (),
            EntryPoint::GetMessageA => detours::get_message_a as GetMessageFn as *const (),
            EntryPoint::GetMessageW => detours::get_message_w as GetMessageFn as *const (),
            EntryPoint::PeekMessageA => detours::peek_message_a as PeekMessageFn as *const (),
            EntryPoint::PeekMessageW => detours::peek_message_w as PeekMessageFn as *const (),
            EntryPoint::PostMessageA => detours::post_message_a as PostMessageFn as *const (),
            EntryPoint::PostMessageW => detours::post_message_w as PostMessageFn as *const (),
            EntryPoint::SetCursorPos => detours::set_cursor_pos as SetCursorPosFn as *const (),
            EntryPoint::GetCursorPos => detours::get_cursor_pos as GetCursorPosFn as *const (),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error for an unrecognized entry point name
#[derive(Debug, thiserror::Error)]
#[error("Unknown entry point: {0}")]
pub struct UnknownEntryPoint(pub String);

impl FromStr for EntryPoint {
    type Err = UnknownEntryPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryPoint::ALL
            .into_iter()
            .find(|entry| entry.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntryPoint(s.to_string()))
    }
}

/// What the backend is asked to hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookTarget {
    pub entry_point: EntryPoint,
    pub module: String,
    pub symbol: &'static str,
}

impl HookTarget {
    pub fn new(entry_point: EntryPoint, xinput_module: &str) -> Self {
        Self {
            entry_point,
            module: entry_point.module(xinput_module).to_string(),
            symbol: entry_point.symbol(),
        }
    }
}

impl fmt::Display for HookTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.module, self.symbol)
    }
}
