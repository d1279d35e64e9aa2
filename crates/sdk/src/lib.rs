//! inputgate SDK - Win32 Input Type Definitions
//!
//! This crate contains the native record shapes of the Windows input
//! subsystem that the interceptors read and write. It has no dependencies
//! and does not link against the OS, so everything built on top of it can
//! be unit-tested on any platform.
//!
//! # Modules
//!
//! - [`types`] - `MSG`, `POINT`, `XINPUT_STATE` and handle aliases
//! - [`messages`] - Window message and flag constants
//! - [`functions`] - Signatures of the intercepted entry points
//! - [`symbols`] - Module and export names of the intercepted entry points

pub mod functions;
pub mod messages;
pub mod symbols;
pub mod types;

pub use functions::*;
pub use messages::*;
pub use symbols::ENTRY_POINT_SYMBOLS;
pub use types::*;
