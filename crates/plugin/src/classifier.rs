//! Message handler registered by the camera system

use parking_lot::RwLock;

use inputgate_engine::InputClassifier;
use inputgate_sdk::Msg;

/// C callback that classifies one message; returns true if it consumed it
pub type MessageHandler = extern "C" fn(msg: *mut Msg) -> bool;

/// Classifier forwarding to whatever handler is currently registered
///
/// With no handler registered nothing is claimed.
#[derive(Debug, Default)]
pub struct CallbackClassifier {
    handler: RwLock<Option<MessageHandler>>,
}

impl CallbackClassifier {
    pub fn new() -> Self {
        Self {
            handler: RwLock::new(None),
        }
    }

    /// Replace the registered handler, returning the previous one
    pub fn set_handler(&self, handler: Option<MessageHandler>) -> Option<MessageHandler> {
        std::mem::replace(&mut *self.handler.write(), handler)
    }

    pub fn has_handler(&self) -> bool {
        self.handler.read().is_some()
    }
}

impl InputClassifier for CallbackClassifier {
    fn handle_message(&self, msg: &mut Msg) -> bool {
        // Copy out so the handler runs without the lock held
        let handler = *self.handler.read();
        match handler {
            Some(handler) => handler(msg),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputgate_sdk::{WM_KEYDOWN, WM_MOUSEMOVE};

    extern "C" fn keys_only(msg: *mut Msg) -> bool {
        unsafe { (*msg).message == WM_KEYDOWN }
    }

    extern "C" fn clears_wparam(msg: *mut Msg) -> bool {
        unsafe { (*msg).wparam = 0 };
        true
    }

    #[test]
    fn test_no_handler_claims_nothing() {
        let classifier = CallbackClassifier::new();
        let mut msg = Msg::new(std::ptr::null_mut(), WM_KEYDOWN, 0, 0);
        assert!(!classifier.has_handler());
        assert!(!classifier.handle_message(&mut msg));
    }

    #[test]
    fn test_handler_decides_and_can_be_swapped() {
        let classifier = CallbackClassifier::new();
        let mut key = Msg::new(std::ptr::null_mut(), WM_KEYDOWN, 0x41, 0);
        let mut mouse = Msg::new(std::ptr::null_mut(), WM_MOUSEMOVE, 0, 0);

        assert!(classifier.set_handler(Some(keys_only)).is_none());
        assert!(classifier.handle_message(&mut key));
        assert!(!classifier.handle_message(&mut mouse));

        let previous = classifier.set_handler(Some(clears_wparam));
        assert!(previous.is_some());
        assert!(classifier.handle_message(&mut key));
        assert_eq!(key.wparam, 0);

        classifier.set_handler(None);
        assert!(!classifier.handle_message(&mut mouse));
    }
}
