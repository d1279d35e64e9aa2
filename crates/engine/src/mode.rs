//! Camera mode flags
//!
//! The camera system flips these from its own threads (hotkeys, overlay
//! toggles); interceptors read them from whatever host thread happens to be
//! calling into the OS. Reads always hit the atomics directly.

use std::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Boolean mode flags packed into one byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ModeFlags: u8 {
        /// Camera system is active
        const CAMERA_ENABLED = 1 << 0;
        /// Input to the host is being blocked
        const INPUT_BLOCKED = 1 << 1;
        /// Overlay / main menu is shown
        const OVERLAY_VISIBLE = 1 << 2;
    }
}

/// Which input device currently drives the camera
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraControlDevice {
    #[default]
    KeyboardMouse = 0,
    Gamepad = 1,
    Both = 2,
}

impl CameraControlDevice {
    /// Decode the wire value used by the C ABI
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::KeyboardMouse),
            1 => Some(Self::Gamepad),
            2 => Some(Self::Both),
            _ => None,
        }
    }

    pub fn controls_with_keyboard_mouse(self) -> bool {
        matches!(self, Self::KeyboardMouse | Self::Both)
    }

    pub fn controls_with_gamepad(self) -> bool {
        matches!(self, Self::Gamepad | Self::Both)
    }
}

/// Read side of the camera mode, as consumed by the interceptors
///
/// Implementations must return the current value on every call.
pub trait ModeSource: Send + Sync {
    fn camera_enabled(&self) -> bool;
    fn input_blocked(&self) -> bool;
    fn control_device(&self) -> CameraControlDevice;
    fn overlay_visible(&self) -> bool;
}

/// Point-in-time copy of all flags, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSnapshot {
    pub camera_enabled: bool,
    pub input_blocked: bool,
    pub control_device: CameraControlDevice,
    pub overlay_visible: bool,
}

impl ModeSource for ModeSnapshot {
    fn camera_enabled(&self) -> bool {
        self.camera_enabled
    }

    fn input_blocked(&self) -> bool {
        self.input_blocked
    }

    fn control_device(&self) -> CameraControlDevice {
        self.control_device
    }

    fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }
}

/// Lock-free, shareable mode state written by the camera system
#[derive(Debug, Default)]
pub struct ModeState {
    flags: AtomicU8,
    device: AtomicU8,
}

impl ModeState {
    pub const fn new() -> Self {
        Self {
            flags: AtomicU8::new(0),
            device: AtomicU8::new(CameraControlDevice::KeyboardMouse as u8),
        }
    }

    /// Current flag set
    pub fn flags(&self) -> ModeFlags {
        ModeFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    fn set_flag(&self, flag: ModeFlags, value: bool) {
        if value {
            self.flags.fetch_or(flag.bits(), Ordering::AcqRel);
        } else {
            self.flags.fetch_and(!flag.bits(), Ordering::AcqRel);
        }
    }

    pub fn set_camera_enabled(&self, value: bool) {
        self.set_flag(ModeFlags::CAMERA_ENABLED, value);
        tracing::debug!("Camera enabled: {}", value);
    }

    pub fn set_input_blocked(&self, value: bool) {
        self.set_flag(ModeFlags::INPUT_BLOCKED, value);
        tracing::debug!("Input blocked: {}", value);
    }

    pub fn set_overlay_visible(&self, value: bool) {
        self.set_flag(ModeFlags::OVERLAY_VISIBLE, value);
    }

    pub fn set_control_device(&self, device: CameraControlDevice) {
        self.device.store(device as u8, Ordering::Release);
        tracing::debug!("Camera control device: {:?}", device);
    }

    /// Copy every flag at once
    pub fn snapshot(&self) -> ModeSnapshot {
        let flags = self.flags();
        ModeSnapshot {
            camera_enabled: flags.contains(ModeFlags::CAMERA_ENABLED),
            input_blocked: flags.contains(ModeFlags::INPUT_BLOCKED),
            control_device: self.control_device(),
            overlay_visible: flags.contains(ModeFlags::OVERLAY_VISIBLE),
        }
    }
}

impl ModeSource for ModeState {
    fn camera_enabled(&self) -> bool {
        self.flags().contains(ModeFlags::CAMERA_ENABLED)
    }

    fn input_blocked(&self) -> bool {
        self.flags().contains(ModeFlags::INPUT_BLOCKED)
    }

    fn control_device(&self) -> CameraControlDevice {
        CameraControlDevice::from_raw(self.device.load(Ordering::Acquire)).unwrap_or_default()
    }

    fn overlay_visible(&self) -> bool {
        self.flags().contains(ModeFlags::OVERLAY_VISIBLE)
    }
}

impl<T: ModeSource + ?Sized> ModeSource for std::sync::Arc<T> {
    fn camera_enabled(&self) -> bool {
        (**self).camera_enabled()
    }

    fn input_blocked(&self) -> bool {
        (**self).input_blocked()
    }

    fn control_device(&self) -> CameraControlDevice {
        (**self).control_device()
    }

    fn overlay_visible(&self) -> bool {
        (**self).overlay_visible()
    }
}
