//! Message filter
//!
//! Runs on every message the host pulls out of its queue. The camera
//! system's classifier sees the message first; if it claims the message and
//! the host is currently locked out, the message type is rewritten to
//! `WM_NULL` so the host's own dispatch ignores it. Every other field,
//! including anything the classifier changed, is left as is.

use std::panic::{self, AssertUnwindSafe};

use parking_lot::ReentrantMutex;

use inputgate_engine::{InputClassifier, ModeSource};
use inputgate_sdk::{Msg, WM_NULL};

use crate::gate;

/// What the filter did with one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Not eligible for classification (thread message, or a peek that
    /// classification is configured to skip)
    Skipped,
    /// Classifier did not claim the message
    Unhandled,
    /// Classifier claimed it, but the host is not locked out
    Observed,
    /// Classifier claimed it and its type was rewritten to `WM_NULL`
    Neutralized,
}

/// Serializes classify-and-rewrite across every message retrieval entry point
#[derive(Debug)]
pub struct MessageFilter {
    /// Re-entrant so a classifier that pumps messages itself can't deadlock
    /// its own thread; parking_lot spins briefly before parking.
    lock: ReentrantMutex<()>,
    classify_peeked: bool,
}

impl Default for MessageFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MessageFilter {
    /// Create a filter
    ///
    /// # Arguments
    /// * `classify_peeked` - Also classify messages peeked without removal
    pub fn new(classify_peeked: bool) -> Self {
        Self {
            lock: ReentrantMutex::new(()),
            classify_peeked,
        }
    }

    pub fn classifies_peeked(&self) -> bool {
        self.classify_peeked
    }

    /// Classify `msg` and neutralize it if the host is locked out
    ///
    /// # Arguments
    /// * `msg` - Message just retrieved by the host
    /// * `removed` - Whether the retrieval removed it from the queue
    pub fn process(
        &self,
        msg: &mut Msg,
        removed: bool,
        classifier: &dyn InputClassifier,
        mode: &dyn ModeSource,
    ) -> FilterOutcome {
        if !msg.has_window() || (!removed && !self.classify_peeked) {
            return FilterOutcome::Skipped;
        }

        let _guard = self.lock.lock();

        let handled = match panic::catch_unwind(AssertUnwindSafe(|| classifier.handle_message(msg))) {
            Ok(handled) => handled,
            Err(_) => {
                tracing::error!(
                    "Message handler panicked on message {:#06x}, passing it through",
                    msg.message
                );
                false
            }
        };

        if !handled {
            return FilterOutcome::Unhandled;
        }

        // Read the mode after classifying: the handler may have just toggled it
        if gate::pointer_suppressed(mode) {
            tracing::trace!("Neutralizing message {:#06x}", msg.message);
            msg.message = WM_NULL;
            FilterOutcome::Neutralized
        } else {
            FilterOutcome::Observed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputgate_engine::{CameraControlDevice, ModeState, PassThroughClassifier};
    use inputgate_sdk::{Point, WM_KEYDOWN, WM_MOUSEMOVE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn window() -> inputgate_sdk::Hwnd {
        0x1234usize as inputgate_sdk::Hwnd
    }

    fn key_message() -> Msg {
        let mut msg = Msg::new(window(), WM_KEYDOWN, 0x57, 0x0011_0001);
        msg.time = 99;
        msg.pt = Point::new(10, 20);
        msg
    }

    fn blocked_keyboard_mouse() -> ModeState {
        let mode = ModeState::new();
        mode.set_input_blocked(true);
        mode.set_control_device(CameraControlDevice::KeyboardMouse);
        mode
    }

    fn claim_all(_msg: &mut Msg) -> bool {
        true
    }

    #[test]
    fn test_handled_message_neutralized_when_blocked() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        let mut msg = key_message();

        let outcome = filter.process(&mut msg, true, &claim_all, &mode);

        assert_eq!(outcome, FilterOutcome::Neutralized);
        assert_eq!(msg.message, WM_NULL);
        // Everything but the type is untouched
        assert_eq!(msg.wparam, 0x57);
        assert_eq!(msg.lparam, 0x0011_0001);
        assert_eq!(msg.time, 99);
        assert_eq!(msg.pt, Point::new(10, 20));
        assert_eq!(msg.hwnd, window());
    }

    #[test]
    fn test_handled_message_neutralized_by_overlay_alone() {
        let filter = MessageFilter::default();
        let mode = ModeState::new();
        mode.set_overlay_visible(true);
        mode.set_control_device(CameraControlDevice::Gamepad);
        let mut msg = key_message();

        assert_eq!(
            filter.process(&mut msg, true, &claim_all, &mode),
            FilterOutcome::Neutralized
        );
        assert_eq!(msg.message, WM_NULL);
    }

    #[test]
    fn test_handled_message_observed_when_not_blocked() {
        let filter = MessageFilter::default();
        let mode = ModeState::new();
        mode.set_input_blocked(true);
        mode.set_control_device(CameraControlDevice::Gamepad);
        let mut msg = key_message();

        assert_eq!(
            filter.process(&mut msg, true, &claim_all, &mode),
            FilterOutcome::Observed
        );
        assert_eq!(msg.message, WM_KEYDOWN);
    }

    #[test]
    fn test_unhandled_message_untouched() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        mode.set_overlay_visible(true);
        let mut msg = key_message();

        assert_eq!(
            filter.process(&mut msg, true, &PassThroughClassifier, &mode),
            FilterOutcome::Unhandled
        );
        assert_eq!(msg.message, WM_KEYDOWN);
    }

    #[test]
    fn test_classifier_mutations_are_kept() {
        let filter = MessageFilter::default();
        let mode = ModeState::new();
        let rewrite = |msg: &mut Msg| {
            msg.wparam = 0;
            true
        };
        let mut msg = key_message();

        assert_eq!(filter.process(&mut msg, true, &rewrite, &mode), FilterOutcome::Observed);
        assert_eq!(msg.wparam, 0);
        assert_eq!(msg.message, WM_KEYDOWN);
    }

    #[test]
    fn test_thread_messages_are_not_classified() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        let calls = AtomicUsize::new(0);
        let counting = |_msg: &mut Msg| {
            calls.fetch_add(1, Ordering::SeqCst);
            true
        };
        let mut msg = Msg::new(std::ptr::null_mut(), WM_KEYDOWN, 0, 0);

        assert_eq!(filter.process(&mut msg, true, &counting, &mode), FilterOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(msg.message, WM_KEYDOWN);
    }

    #[test]
    fn test_peeked_messages_follow_config() {
        let mode = blocked_keyboard_mouse();

        let mut msg = key_message();
        let filter = MessageFilter::new(true);
        assert_eq!(filter.process(&mut msg, false, &claim_all, &mode), FilterOutcome::Neutralized);

        let mut msg = key_message();
        let filter = MessageFilter::new(false);
        assert_eq!(filter.process(&mut msg, false, &claim_all, &mode), FilterOutcome::Skipped);
        assert_eq!(msg.message, WM_KEYDOWN);
        assert_eq!(filter.process(&mut msg, true, &claim_all, &mode), FilterOutcome::Neutralized);
    }

    #[test]
    fn test_mode_read_after_classification() {
        let filter = MessageFilter::default();
        let mode = ModeState::new();
        let toggles_block = |_msg: &mut Msg| {
            mode.set_input_blocked(true);
            true
        };
        let mut msg = key_message();

        assert_eq!(
            filter.process(&mut msg, true, &toggles_block, &mode),
            FilterOutcome::Neutralized
        );
    }

    #[test]
    fn test_panicking_classifier_passes_message_through() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        let panics = |_msg: &mut Msg| -> bool { panic!("handler bug") };
        let mut msg = key_message();

        assert_eq!(filter.process(&mut msg, true, &panics, &mode), FilterOutcome::Unhandled);
        assert_eq!(msg.message, WM_KEYDOWN);

        // Lock was released on the unwind path
        assert_eq!(
            filter.process(&mut msg, true, &claim_all, &mode),
            FilterOutcome::Neutralized
        );
    }

    #[test]
    fn test_reentrant_classifier_does_not_deadlock() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        let nested = |msg: &mut Msg| {
            let mut inner = key_message();
            filter.process(&mut inner, true, &claim_all, &mode);
            msg.message == WM_MOUSEMOVE
        };
        let mut msg = Msg::new(window(), WM_MOUSEMOVE, 0, 0);

        assert_eq!(filter.process(&mut msg, true, &nested, &mode), FilterOutcome::Neutralized);
    }

    #[test]
    fn test_classification_is_mutually_exclusive() {
        let filter = MessageFilter::default();
        let mode = blocked_keyboard_mouse();
        let inside = AtomicUsize::new(0);
        let max_inside = AtomicUsize::new(0);
        let exclusive = |msg: &mut Msg| {
            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
            max_inside.fetch_max(now, Ordering::SeqCst);
            std::thread::yield_now();
            inside.fetch_sub(1, Ordering::SeqCst);
            msg.message == WM_KEYDOWN
        };

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..500 {
                        let mut msg = key_message();
                        filter.process(&mut msg, true, &exclusive, &mode);
                        assert_eq!(msg.message, WM_NULL);
                    }
                });
            }
        });

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
    }
}
