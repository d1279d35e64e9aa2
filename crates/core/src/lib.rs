//! InputGate - Core Logic
//!
//! Input interception for a free camera running inside a host game. The
//! host's keyboard, mouse, cursor and controller input is intercepted at the
//! OS entry points and selectively neutralized while the camera owns it.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Win32 record layouts, message constants and export names
//! - [`engine`] - Mode state, the classifier contract and symbol resolution

pub use inputgate_engine as engine;
pub use inputgate_sdk as sdk;

pub mod config;
pub mod cursor;
pub mod filter;
pub mod gate;
pub mod hooks;
pub mod interceptor;
pub mod report;

pub use config::{ConfigError, ConfigResult, ConsoleConfig, FilterConfig, HooksConfig, InputGateConfig};
pub use cursor::VirtualCursor;
pub use filter::{FilterOutcome, MessageFilter};
pub use gate::{controller_suppressed, pointer_suppressed};
#[cfg(windows)]
pub use hooks::DetourBackend;
pub use hooks::{
    install, installed_hooks, uninstall, Charset, EntryPoint, HookBackend, HookError, HookRegistry,
    HookTarget, InputHooks, InstallError,
};
pub use interceptor::{InputInterceptor, OriginalInput};
pub use report::{HookOutcome, HookStatus, InstallReport};
