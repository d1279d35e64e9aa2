//! Input interceptor
//!
//! Policy for every intercepted entry point. Each method takes the raw
//! arguments of the export it stands in for plus an [`OriginalInput`] to
//! forward to, and returns exactly what the export would return on every
//! path it doesn't deliberately change.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;

use inputgate_engine::{InputClassifier, ModeSource, PassThroughClassifier};
use inputgate_sdk::{
    removes_message, Bool, Hwnd, LParam, Msg, Point, WParam, XInputState, FALSE, TRUE,
    WM_MOUSEMOVE,
};

use crate::cursor::VirtualCursor;
use crate::filter::{FilterOutcome, MessageFilter};
use crate::gate;
use crate::hooks::Charset;

/// Capability to invoke the original (unhooked) entry points
///
/// Implemented by [`HookRegistry`](crate::hooks::HookRegistry) over the saved
/// trampolines; tests implement it with fakes.
///
/// # Safety
/// Pointer arguments carry the contracts of the corresponding Win32 export.
pub trait OriginalInput {
    unsafe fn xinput_get_state(&self, user_index: u32, state: *mut XInputState) -> u32;

    unsafe fn get_message(
        &self,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
    ) -> Bool;

    unsafe fn peek_message(
        &self,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
        remove: u32,
    ) -> Bool;

    unsafe fn post_message(
        &self,
        charset: Charset,
        hwnd: Hwnd,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> Bool;

    unsafe fn set_cursor_pos(&self, x: i32, y: i32) -> Bool;

    unsafe fn get_cursor_pos(&self, point: *mut Point) -> Bool;
}

/// Decides, per call, whether host input passes, is suppressed, or is substituted
pub struct InputInterceptor {
    mode: Arc<dyn ModeSource>,
    classifier: Arc<dyn InputClassifier>,
    filter: MessageFilter,
    cursor: VirtualCursor,
    /// The camera system's own XInput buffer; never zeroed
    own_gamepad_state: AtomicPtr<XInputState>,
}

impl InputInterceptor {
    pub fn new(mode: Arc<dyn ModeSource>, classifier: Arc<dyn InputClassifier>) -> Self {
        Self {
            mode,
            classifier,
            filter: MessageFilter::default(),
            cursor: VirtualCursor::new(),
            own_gamepad_state: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Interceptor that never claims messages, for when no classifier exists yet
    pub fn without_classifier(mode: Arc<dyn ModeSource>) -> Self {
        Self::new(mode, Arc::new(PassThroughClassifier))
    }

    /// Replace the message filter (e.g. with one built from config)
    pub fn with_filter(mut self, filter: MessageFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn mode(&self) -> &dyn ModeSource {
        &*self.mode
    }

    pub fn cursor(&self) -> &VirtualCursor {
        &self.cursor
    }

    /// Register the buffer the camera system polls its own controller into
    ///
    /// Queries into this buffer are exempt from suppression so the camera
    /// keeps seeing the real pad. Pass null to clear.
    pub fn set_own_gamepad_state(&self, state: *const XInputState) {
        self.own_gamepad_state
            .store(state as *mut XInputState, Ordering::Release);
        tracing::debug!("Own gamepad state buffer: {:p}", state);
    }

    fn is_own_gamepad_state(&self, state: *const XInputState) -> bool {
        let own = self.own_gamepad_state.load(Ordering::Acquire);
        !own.is_null() && ptr::eq(own, state)
    }

    /// Run the message filter over a retrieved message
    pub fn filter_message(&self, msg: &mut Msg, removed: bool) -> FilterOutcome {
        self.filter
            .process(msg, removed, &*self.classifier, &*self.mode)
    }

    /// `XInputGetState`
    ///
    /// Always polls the real device first, then zeroes the caller's buffer
    /// if the controller drives the camera and input is blocked.
    ///
    /// # Safety
    /// `state` must be null or valid for writes of one `XInputState`.
    pub unsafe fn xinput_get_state<O: OriginalInput + ?Sized>(
        &self,
        os: &O,
        user_index: u32,
        state: *mut XInputState,
    ) -> u32 {
        let result = os.xinput_get_state(user_index, state);

        if state.is_null() || self.is_own_gamepad_state(state) {
            return result;
        }

        if gate::controller_suppressed(self.mode()) {
            ptr::write(state, XInputState::default());
        }
        result
    }

    /// `GetMessageA` / `GetMessageW`
    ///
    /// `0` (no message or `WM_QUIT`) and `-1` (error) are returned untouched.
    ///
    /// # Safety
    /// Same contract as `GetMessage`.
    pub unsafe fn get_message<O: OriginalInput + ?Sized>(
        &self,
        os: &O,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
    ) -> Bool {
        let result = os.get_message(charset, msg, hwnd, filter_min, filter_max);
        if result == FALSE || result == -1 {
            return result;
        }

        if let Some(msg) = msg.as_mut() {
            self.filter_message(msg, true);
        }
        result
    }

    /// `PeekMessageA` / `PeekMessageW`
    ///
    /// # Safety
    /// Same contract as `PeekMessage`.
    pub unsafe fn peek_message<O: OriginalInput + ?Sized>(
        &self,
        os: &O,
        charset: Charset,
        msg: *mut Msg,
        hwnd: Hwnd,
        filter_min: u32,
        filter_max: u32,
        remove: u32,
    ) -> Bool {
        let result = os.peek_message(charset, msg, hwnd, filter_min, filter_max, remove);
        if result == FALSE {
            return result;
        }

        if let Some(msg) = msg.as_mut() {
            self.filter_message(msg, removes_message(remove));
        }
        result
    }

    /// `PostMessageA` / `PostMessageW`
    ///
    /// Drops the host's own synthesized pointer moves while the camera owns
    /// the pointer, reporting success.
    ///
    /// # Safety
    /// Same contract as `PostMessage`.
    pub unsafe fn post_message<O: OriginalInput + ?Sized>(
        &self,
        os: &O,
        charset: Charset,
        hwnd: Hwnd,
        msg: u32,
        wparam: WParam,
        lparam: LParam,
    ) -> Bool {
        if msg == WM_MOUSEMOVE && gate::pointer_suppressed(self.mode()) {
            return TRUE;
        }
        os.post_message(charset, hwnd, msg, wparam, lparam)
    }

    /// `SetCursorPos`
    ///
    /// # Safety
    /// Same contract as `SetCursorPos`.
    pub unsafe fn set_cursor_pos<O: OriginalInput + ?Sized>(&self, os: &O, x: i32, y: i32) -> Bool {
        if gate::pointer_suppressed(self.mode()) {
            self.cursor.store(Point::new(x, y));
            return TRUE;
        }
        os.set_cursor_pos(x, y)
    }

    /// `GetCursorPos`
    ///
    /// # Safety
    /// `point` must be null or valid for writes of one `Point`.
    pub unsafe fn get_cursor_pos<O: OriginalInput + ?Sized>(&self, os: &O, point: *mut Point) -> Bool {
        if gate::pointer_suppressed(self.mode()) {
            if !point.is_null() {
                ptr::write(point, self.cursor.load());
            }
            return TRUE;
        }
        os.get_cursor_pos(point)
    }
}

impl std::fmt::Debug for InputInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputInterceptor")
            .field("filter", &self.filter)
            .field("cursor", &self.cursor.load())
            .field("own_gamepad_state", &self.own_gamepad_state.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputgate_engine::{CameraControlDevice, ModeState};
    use inputgate_sdk::{
        ERROR_DEVICE_NOT_CONNECTED, ERROR_SUCCESS, PM_NOREMOVE, PM_REMOVE, WM_KEYDOWN,
        WM_LBUTTONDOWN, WM_NULL,
    };
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        XInputGetState(u32),
        GetMessage(Charset),
        PeekMessage(Charset, u32),
        PostMessage(Charset, u32),
        SetCursorPos(i32, i32),
        GetCursorPos,
    }

    /// Stand-in for the real OS exports
    struct FakeOs {
        calls: Mutex<Vec<Call>>,
        pad: XInputState,
        next_message: Option<Msg>,
        get_message_result: Bool,
        /// Returned by `XInputGetState`
        xinput_result: u32,
        /// Returned by the post and cursor exports
        forward_result: Bool,
        real_cursor: Point,
    }

    impl FakeOs {
        fn new() -> Self {
            let mut pad = XInputState::default();
            pad.packet_number = 7;
            pad.gamepad.buttons = 0x1000;
            pad.gamepad.thumb_lx = -3000;
            Self {
                calls: Mutex::new(Vec::new()),
                pad,
                next_message: None,
                get_message_result: TRUE,
                xinput_result: ERROR_SUCCESS,
                forward_result: TRUE,
                real_cursor: Point::new(800, 450),
            }
        }

        fn with_message(mut self, msg: Msg) -> Self {
            self.next_message = Some(msg);
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().push(call);
        }

        unsafe fn deliver(&self, msg: *mut Msg) -> Bool {
            match self.next_message {
                Some(next) => {
                    *msg = next;
                    TRUE
                }
                None => FALSE,
            }
        }
    }

    // SAFETY: the queued message's window handle is an opaque tag, never dereferenced
    unsafe impl Sync for FakeOs {}

    impl OriginalInput for FakeOs {
        unsafe fn xinput_get_state(&self, user_index: u32, state: *mut XInputState) -> u32 {
            self.record(Call::XInputGetState(user_index));
            *state = self.pad;
            self.xinput_result
        }

        unsafe fn get_message(&self, charset: Charset, msg: *mut Msg, _: Hwnd, _: u32, _: u32) -> Bool {
            self.record(Call::GetMessage(charset));
            if self.get_message_result != TRUE {
                return self.get_message_result;
            }
            self.deliver(msg)
        }

        unsafe fn peek_message(
            &self,
            charset: Charset,
            msg: *mut Msg,
            _: Hwnd,
            _: u32,
            _: u32,
            remove: u32,
        ) -> Bool {
            self.record(Call::PeekMessage(charset, remove));
            self.deliver(msg)
        }

        unsafe fn post_message(&self, charset: Charset, _: Hwnd, msg: u32, _: WParam, _: LParam) -> Bool {
            self.record(Call::PostMessage(charset, msg));
            self.forward_result
        }

        unsafe fn set_cursor_pos(&self, x: i32, y: i32) -> Bool {
            self.record(Call::SetCursorPos(x, y));
            self.forward_result
        }

        unsafe fn get_cursor_pos(&self, point: *mut Point) -> Bool {
            self.record(Call::GetCursorPos);
            *point = self.real_cursor;
            self.forward_result
        }
    }

    fn window() -> Hwnd {
        0xBEEFusize as Hwnd
    }

    fn interceptor(mode: &Arc<ModeState>) -> InputInterceptor {
        let claim_keys = |msg: &mut Msg| msg.message == WM_KEYDOWN;
        InputInterceptor::new(mode.clone(), Arc::new(claim_keys))
    }

    fn mode(blocked: bool, device: CameraControlDevice, overlay: bool) -> Arc<ModeState> {
        let mode = Arc::new(ModeState::new());
        mode.set_camera_enabled(true);
        mode.set_input_blocked(blocked);
        mode.set_control_device(device);
        mode.set_overlay_visible(overlay);
        mode
    }

    // === XInputGetState ===

    #[test]
    fn test_xinput_zeroed_when_controller_blocked() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::Gamepad, false);
        let hooks = interceptor(&mode);
        let mut state = XInputState::default();

        let result = unsafe { hooks.xinput_get_state(&os, 0, &mut state) };

        assert_eq!(result, 0);
        assert!(state.is_neutral());
        // Real device was still polled
        assert_eq!(os.calls(), vec![Call::XInputGetState(0)]);
    }

    #[test]
    fn test_xinput_failure_code_kept_while_zeroing() {
        let mut os = FakeOs::new();
        os.xinput_result = ERROR_DEVICE_NOT_CONNECTED;
        let mode = mode(true, CameraControlDevice::Gamepad, false);
        let hooks = interceptor(&mode);
        let mut state = XInputState::default();

        let result = unsafe { hooks.xinput_get_state(&os, 2, &mut state) };

        assert_eq!(result, ERROR_DEVICE_NOT_CONNECTED);
        assert!(state.is_neutral());
    }

    #[test]
    fn test_xinput_failure_code_forwarded_unchanged() {
        let mut os = FakeOs::new();
        os.xinput_result = ERROR_DEVICE_NOT_CONNECTED;
        let mode = mode(false, CameraControlDevice::Gamepad, false);
        let hooks = interceptor(&mode);
        let mut state = XInputState::default();

        let result = unsafe { hooks.xinput_get_state(&os, 3, &mut state) };

        assert_eq!(result, ERROR_DEVICE_NOT_CONNECTED);
        assert_eq!(state, os.pad);
    }

    #[test]
    fn test_xinput_matches_suppression_predicate() {
        for camera in [false, true] {
            for blocked in [false, true] {
                for device in [
                    CameraControlDevice::KeyboardMouse,
                    CameraControlDevice::Gamepad,
                    CameraControlDevice::Both,
                ] {
                    let os = FakeOs::new();
                    let mode = mode(blocked, device, true);
                    mode.set_camera_enabled(camera);
                    let hooks = interceptor(&mode);
                    let mut state = XInputState::default();

                    unsafe { hooks.xinput_get_state(&os, 1, &mut state) };

                    let zeroed = camera && blocked && device.controls_with_gamepad();
                    if zeroed {
                        assert!(state.is_neutral());
                    } else {
                        assert_eq!(state, os.pad);
                    }
                }
            }
        }
    }

    #[test]
    fn test_xinput_own_buffer_never_zeroed() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::Both, true);
        let hooks = interceptor(&mode);
        let mut own = XInputState::default();
        hooks.set_own_gamepad_state(&own);

        unsafe { hooks.xinput_get_state(&os, 0, &mut own) };
        assert_eq!(own, os.pad);

        let mut other = XInputState::default();
        unsafe { hooks.xinput_get_state(&os, 0, &mut other) };
        assert!(other.is_neutral());

        hooks.set_own_gamepad_state(ptr::null());
        unsafe { hooks.xinput_get_state(&os, 0, &mut own) };
        assert!(own.is_neutral());
    }

    // === GetMessage / PeekMessage ===

    #[test]
    fn test_get_message_no_message_skips_filter() {
        let os = FakeOs::new();
        let mode = Arc::new(ModeState::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let hooks = InputInterceptor::new(
            mode,
            Arc::new(move |_msg: &mut Msg| {
                counter.fetch_add(1, Ordering::SeqCst);
                true
            }),
        );
        let mut msg = Msg::default();

        let result =
            unsafe { hooks.get_message(&os, Charset::Ansi, &mut msg, ptr::null_mut(), 0, 0) };
        assert_eq!(result, FALSE);

        let result = unsafe {
            hooks.peek_message(&os, Charset::Wide, &mut msg, ptr::null_mut(), 0, 0, PM_REMOVE)
        };
        assert_eq!(result, FALSE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_get_message_error_propagated_unchanged() {
        let mut os = FakeOs::new().with_message(Msg::new(window(), WM_KEYDOWN, 0, 0));
        os.get_message_result = -1;
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut msg = Msg::default();

        let result = unsafe { hooks.get_message(&os, Charset::Wide, &mut msg, window(), 0, 0) };
        assert_eq!(result, -1);
        assert_eq!(msg.message, WM_NULL);
        assert!(!msg.has_window());
    }

    #[test]
    fn test_get_message_neutralizes_claimed_message() {
        let os = FakeOs::new().with_message(Msg::new(window(), WM_KEYDOWN, 0x41, 0));
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut msg = Msg::default();

        let result = unsafe { hooks.get_message(&os, Charset::Wide, &mut msg, ptr::null_mut(), 0, 0) };

        assert_eq!(result, TRUE);
        assert_eq!(msg.message, WM_NULL);
        assert_eq!(msg.wparam, 0x41);
        assert_eq!(os.calls(), vec![Call::GetMessage(Charset::Wide)]);
    }

    #[test]
    fn test_get_message_passes_unclaimed_message() {
        let os = FakeOs::new().with_message(Msg::new(window(), WM_LBUTTONDOWN, 0, 0));
        let mode = mode(true, CameraControlDevice::KeyboardMouse, true);
        let hooks = interceptor(&mode);
        let mut msg = Msg::default();

        unsafe { hooks.get_message(&os, Charset::Ansi, &mut msg, ptr::null_mut(), 0, 0) };
        assert_eq!(msg.message, WM_LBUTTONDOWN);
    }

    #[test]
    fn test_get_message_observed_when_unblocked() {
        let os = FakeOs::new().with_message(Msg::new(window(), WM_KEYDOWN, 0, 0));
        let mode = mode(false, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut msg = Msg::default();

        unsafe { hooks.get_message(&os, Charset::Ansi, &mut msg, ptr::null_mut(), 0, 0) };
        assert_eq!(msg.message, WM_KEYDOWN);
    }

    #[test]
    fn test_peek_message_passes_remove_flag() {
        let os = FakeOs::new().with_message(Msg::new(window(), WM_KEYDOWN, 0, 0));
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode).with_filter(MessageFilter::new(false));
        let mut msg = Msg::default();

        let result = unsafe {
            hooks.peek_message(&os, Charset::Ansi, &mut msg, ptr::null_mut(), 0, 0, PM_NOREMOVE)
        };
        assert_eq!(result, TRUE);
        assert_eq!(msg.message, WM_KEYDOWN, "peeked message must not be classified");

        let result = unsafe {
            hooks.peek_message(&os, Charset::Ansi, &mut msg, ptr::null_mut(), 0, 0, PM_REMOVE)
        };
        assert_eq!(result, TRUE);
        assert_eq!(msg.message, WM_NULL);
        assert_eq!(
            os.calls(),
            vec![
                Call::PeekMessage(Charset::Ansi, PM_NOREMOVE),
                Call::PeekMessage(Charset::Ansi, PM_REMOVE)
            ]
        );
    }

    // === PostMessage ===

    #[test]
    fn test_post_mouse_move_dropped_when_blocked() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);

        let result =
            unsafe { hooks.post_message(&os, Charset::Ansi, window(), WM_MOUSEMOVE, 0, 0x0010_0020) };

        assert_eq!(result, TRUE);
        assert!(os.calls().is_empty());
    }

    #[test]
    fn test_post_mouse_move_dropped_when_overlay_visible() {
        let os = FakeOs::new();
        let mode = mode(false, CameraControlDevice::Gamepad, true);
        let hooks = interceptor(&mode);

        let result = unsafe { hooks.post_message(&os, Charset::Wide, window(), WM_MOUSEMOVE, 0, 0) };
        assert_eq!(result, TRUE);
        assert!(os.calls().is_empty());
    }

    #[test]
    fn test_post_mouse_move_forwarded_when_unblocked() {
        let os = FakeOs::new();
        let mode = mode(false, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);

        let result = unsafe { hooks.post_message(&os, Charset::Wide, window(), WM_MOUSEMOVE, 0, 0) };
        assert_eq!(result, TRUE);
        assert_eq!(os.calls(), vec![Call::PostMessage(Charset::Wide, WM_MOUSEMOVE)]);
    }

    #[test]
    fn test_post_failure_forwarded_unchanged() {
        let mut os = FakeOs::new();
        os.forward_result = FALSE;
        let mode = mode(false, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);

        let result = unsafe { hooks.post_message(&os, Charset::Ansi, window(), WM_MOUSEMOVE, 0, 0) };

        assert_eq!(result, FALSE);
        assert_eq!(os.calls(), vec![Call::PostMessage(Charset::Ansi, WM_MOUSEMOVE)]);

        // Suppression answers success without asking the OS
        mode.set_input_blocked(true);
        let result = unsafe { hooks.post_message(&os, Charset::Ansi, window(), WM_MOUSEMOVE, 0, 0) };
        assert_eq!(result, TRUE);
        assert_eq!(os.calls().len(), 1);
    }

    #[test]
    fn test_post_other_messages_always_forwarded() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::KeyboardMouse, true);
        let hooks = interceptor(&mode);

        unsafe { hooks.post_message(&os, Charset::Ansi, window(), WM_KEYDOWN, 0, 0) };
        assert_eq!(os.calls(), vec![Call::PostMessage(Charset::Ansi, WM_KEYDOWN)]);
    }

    // === Cursor ===

    #[test]
    fn test_cursor_set_then_get_under_suppression() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut point = Point::default();

        unsafe {
            assert_eq!(hooks.set_cursor_pos(&os, 960, 540), TRUE);
            assert_eq!(hooks.get_cursor_pos(&os, &mut point), TRUE);
        }

        assert_eq!(point, Point::new(960, 540));
        assert!(os.calls().is_empty());
    }

    #[test]
    fn test_cursor_failure_forwarded_unchanged() {
        let mut os = FakeOs::new();
        os.forward_result = FALSE;
        let mode = mode(false, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut point = Point::default();

        unsafe {
            assert_eq!(hooks.set_cursor_pos(&os, 5, 6), FALSE);
            assert_eq!(hooks.get_cursor_pos(&os, &mut point), FALSE);
        }

        assert_eq!(os.calls(), vec![Call::SetCursorPos(5, 6), Call::GetCursorPos]);
        // Virtual cursor untouched by forwarded sets
        assert_eq!(hooks.cursor().load(), Point::ORIGIN);
    }

    #[test]
    fn test_cursor_get_forwards_after_suppression_ends() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);
        let mut point = Point::default();

        unsafe { hooks.set_cursor_pos(&os, 1, 2) };
        mode.set_input_blocked(false);
        unsafe { hooks.get_cursor_pos(&os, &mut point) };

        assert_eq!(point, os.real_cursor);
        assert_eq!(os.calls(), vec![Call::GetCursorPos]);
    }

    #[test]
    fn test_cursor_get_before_any_set_returns_origin() {
        let os = FakeOs::new();
        let mode = mode(false, CameraControlDevice::KeyboardMouse, true);
        let hooks = interceptor(&mode);
        let mut point = Point::new(5, 5);

        unsafe { hooks.get_cursor_pos(&os, &mut point) };
        assert_eq!(point, Point::ORIGIN);
    }

    #[test]
    fn test_cursor_get_null_point_under_suppression() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::Both, false);
        let hooks = interceptor(&mode);

        let result = unsafe { hooks.get_cursor_pos(&os, ptr::null_mut()) };
        assert_eq!(result, TRUE);
        assert!(os.calls().is_empty());
    }

    #[test]
    fn test_cursor_set_forwarded_when_gamepad_blocked() {
        let os = FakeOs::new();
        let mode = mode(true, CameraControlDevice::Gamepad, false);
        let hooks = interceptor(&mode);

        unsafe { hooks.set_cursor_pos(&os, 10, 20) };
        assert_eq!(os.calls(), vec![Call::SetCursorPos(10, 20)]);
        assert_eq!(hooks.cursor().load(), Point::ORIGIN);
    }

    // === Concurrency ===

    #[test]
    fn test_concurrent_retrieval_neutralizes_every_message() {
        let os = FakeOs::new().with_message(Msg::new(window(), WM_KEYDOWN, 0x20, 0));
        let mode = mode(true, CameraControlDevice::KeyboardMouse, false);
        let hooks = interceptor(&mode);

        std::thread::scope(|s| {
            for i in 0..8 {
                let hooks = &hooks;
                let os = &os;
                s.spawn(move || {
                    let charset = if i % 2 == 0 { Charset::Ansi } else { Charset::Wide };
                    for _ in 0..200 {
                        let mut msg = Msg::default();
                        unsafe {
                            if i % 3 == 0 {
                                hooks.get_message(os, charset, &mut msg, ptr::null_mut(), 0, 0);
                            } else {
                                hooks.peek_message(os, charset, &mut msg, ptr::null_mut(), 0, 0, PM_REMOVE);
                            }
                        }
                        assert_eq!(msg.message, WM_NULL);
                        assert_eq!(msg.wparam, 0x20);
                    }
                });
            }
        });
    }
}
