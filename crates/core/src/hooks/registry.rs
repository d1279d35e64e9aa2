//! Hook bindings and original entry points
//!
//! One [`HookBinding`] per [`EntryPoint`], holding the trampoline to the
//! original export. Detours load the original on every call from arbitrary
//! host threads, so everything here is atomic and lock-free.

use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

use inputgate_sdk::{
    Bool, GetCursorPosFn, GetMessageFn, Hwnd, LParam, Msg, PeekMessageFn, Point, PostMessageFn,
    SetCursorPosFn, WParam, XInputGetStateFn, XInputState, ERROR_DEVICE_NOT_CONNECTED, FALSE,
};

use super::entry::{Charset, EntryPoint};
use crate::interceptor::OriginalInput;

/// Installation state of one intercepted entry point
#[derive(Debug)]
pub struct HookBinding {
    entry_point: EntryPoint,
    original: AtomicPtr<()>,
    installed: AtomicBool,
    enabled: AtomicBool,
}

impl HookBinding {
    fn new(entry_point: EntryPoint) -> Self {
        Self {
            entry_point,
            original: AtomicPtr::new(std::ptr::null_mut()),
            installed: AtomicBool::new(false),
            enabled: AtomicBool::new(false),
        }
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.entry_point
    }

    /// Pointer to the original entry point, if the hook was installed
    pub fn original(&self) -> Option<*const ()> {
        let ptr = self.original.load(Ordering::Acquire);
        (!ptr.is_null()).then_some(ptr as *const ())
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

/// Owned table of every hook binding
#[derive(Debug)]
pub struct HookRegistry {
    bindings: [HookBinding; EntryPoint::COUNT],
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    pub fn new() -> Self {
        Self {
            bindings: EntryPoint::ALL.map(HookBinding::new),
        }
    }

    pub fn binding(&self, entry_point: EntryPoint) -> &HookBinding {
        &self.bindings[entry_point.index()]
    }

    pub fn bindings(&self) -> impl Iterator<Item = &HookBinding> {
        self.bindings.iter()
    }

    /// Record a successful installation
    ///
    /// Ignores a null original; the entry point stays uninstalled.
    pub(crate) fn set_installed(&self, entry_point: EntryPoint, original: *const ()) {
        if original.is_null() {
            tracing::warn!("Backend returned a null original for {}", entry_point);
            return;
        }
        let binding = self.binding(entry_point);
        binding.original.store(original as *mut (), Ordering::Release);
        binding.installed.store(true, Ordering::Release);
    }

    /// Flip the enabled flag of every installed binding
    pub(crate) fn set_enabled(&self, enabled: bool) {
        for binding in self.bindings.iter().filter(|b| b.is_installed()) {
            binding.enabled.store(enabled, Ordering::Release);
        }
    }

    pub fn installed_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_installed()).count()
    }

    pub fn enabled_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_enabled()).count()
    }

    fn original(&self, entry_point: EntryPoint) -> Option<*const ()> {
        let original = self.binding(entry_point).original();
        if original.is_none() {
            tracing::trace!("No original for {}, answering with failure", entry_point);
        }
        original
    }
}

impl OriginalInput for HookRegistry {
    unsafe fn xinput_get_state(&self, user_index: u32, state: *mut XInputState) -> u32 {
        match self.original(EntryPoint::XInputGetState) {
            Some(ptr) => {
                let original: XInputGetStateFn = std::mem::transmute(ptr);
                original(user_index, state)
            }
            None => ERROR_DEVICE_NOT_CONNECTED,
        }
    }

    unsafe fn get_message(
        &self,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
    ) -> Bool {
        let entry_point = match charset {
            Charset::Ansi => EntryPoint::GetMessageA,
            Charset::Wide => EntryPoint::GetMessageW,
        };
        match self.original(entry_point) {
            Some(ptr) => {
                let original: GetMessageFn = std::mem::transmute(ptr);
                original(msg, hwnd, filter_min, filter_max)
            }
            None => FALSE,
        }
    }

    unsafe fn peek_message(
        &self,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
        remove: u32,
    ) -> Bool {
        let entry_point = match charset {
            Charset::Ansi => EntryPoint::PeekMessageA,
            Charset::Wide => EntryPoint::PeekMessageW,
        };
        match self.original(entry_point) {
            Some(ptr) => {
                let original: PeekMessageFn = std::mem::transmute(ptr);
                original(msg, hwnd, filter_min, filter_max, remove)
            }
            None => FALSE,
        }
    }

    unsafe fn post_message(
        &self,
        charset: Charset,
        hwnd: Hwnd,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> Bool {
        let entry_point = match charset {
            Charset::Ansi => EntryPoint::PostMessageA,
            Charset::Wide => EntryPoint::PostMessageW,
        };
        match self.original(entry_point) {
            Some(ptr) => {
                let original: PostMessageFn = std::mem::transmute(ptr);
                original(hwnd, msg, wparam, lparam)
            }
            None => FALSE,
        }
    }

    unsafe fn set_cursor_pos(&self, x: i32, y: i32) -> Bool {
        match self.original(EntryPoint::SetCursorPos) {
            Some(ptr) => {
                let original: SetCursorPosFn = std::mem::transmute(ptr);
                original(x, y)
            }
            None => FALSE,
        }
    }

    unsafe fn get_cursor_pos(&self, point: *mut Point) -> Bool {
        match self.original(EntryPoint::GetCursorPos) {
            Some(ptr) => {
                let original: GetCursorPosFn = std::mem::transmute(ptr);
                original(point)
            }
            None => FALSE,
        }
    }
}
