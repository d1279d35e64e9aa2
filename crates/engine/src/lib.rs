//! inputgate Engine - Host Collaborator Seams
//!
//! This crate handles:
//! - The camera mode flags the interceptors read on every call
//! - The message classifier the camera system plugs in
//! - Resolving `module!symbol` exports to addresses (Windows)
//!
//! # Architecture
//!
//! The camera system owns the decision of *when* input gets blocked; it
//! writes that decision into a [`ModeState`]. Interceptors only see the
//! read side, the [`ModeSource`] trait, so tests can substitute any
//! implementation.
//!
//! # Thread Safety
//!
//! [`ModeState`] is lock-free. Every read observes the live value; nothing is
//! cached between calls.

pub mod classifier;
pub mod error;
pub mod globals;
#[cfg(windows)]
pub mod loader;
pub mod mode;

pub use classifier::{InputClassifier, PassThroughClassifier};
pub use error::ResolveError;
pub use globals::{init_mode_state, is_mode_state_initialized, mode_state, try_mode_state};
#[cfg(windows)]
pub use loader::resolve_symbol;
pub use mode::{CameraControlDevice, ModeFlags, ModeSnapshot, ModeSource, ModeState};
