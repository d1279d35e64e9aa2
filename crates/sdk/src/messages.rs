//! Window message identifiers and flags used by the interceptors
//!
//! Values from winuser.h and winerror.h.

/// Null message; the host dispatches it as a no-op
pub const WM_NULL: u32 = 0x0000;

pub const WM_KEYDOWN: u32 = 0x0100;

/// Pointer-move notification
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;

/// `PeekMessage` flag: leave the message in the queue
pub const PM_NOREMOVE: u32 = 0x0000;

/// `PeekMessage` flag: remove the message from the queue
pub const PM_REMOVE: u32 = 0x0001;

/// `PeekMessage` flag: don't release waiting threads
pub const PM_NOYIELD: u32 = 0x0002;

/// XInput success code
pub const ERROR_SUCCESS: u32 = 0;

/// XInput code for a controller slot with nothing attached
pub const ERROR_DEVICE_NOT_CONNECTED: u32 = 1167;

/// Whether a `PeekMessage` remove flag set actually removes the message
pub const fn removes_message(remove_flags: u32) -> bool {
    remove_flags & PM_REMOVE != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_message() {
        assert!(removes_message(PM_REMOVE));
        assert!(removes_message(PM_REMOVE | PM_NOYIELD));
        assert!(!removes_message(PM_NOREMOVE));
        assert!(!removes_message(PM_NOYIELD));
    }
}
