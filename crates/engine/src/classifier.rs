//! Message classifier seam
//!
//! The camera system's input handler decides whether a retrieved message is
//! one of "its" messages (a camera hotkey, mouse-look movement, ...). It may
//! rewrite payload fields while doing so; the interceptor only ever touches
//! the message type afterwards.

use inputgate_sdk::Msg;

/// Classifies a retrieved window message
pub trait InputClassifier: Send + Sync {
    /// Returns `true` if the camera system handled the message
    fn handle_message(&self, msg: &mut Msg) -> bool;
}

impl<F> InputClassifier for F
where
    F: Fn(&mut Msg) -> bool + Send + Sync,
{
    fn handle_message(&self, msg: &mut Msg) -> bool {
        self(msg)
    }
}

/// Classifier used before the camera system registers its own
///
/// Reports every message as unhandled, so nothing is ever neutralized.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughClassifier;

impl InputClassifier for PassThroughClassifier {
    fn handle_message(&self, _msg: &mut Msg) -> bool {
        false
    }
}
