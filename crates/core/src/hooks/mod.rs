//! Hook system
//!
//! Replaces the OS input entry points at runtime:
//! - [`entry`] - The fixed table of intercepted exports
//! - [`backend`] - The installation service contract ([`HookBackend`])
//! - [`inline`] - Inline detours via retour (Windows)
//! - [`registry`] - Saved originals and per-entry-point state
//! - [`manager`] - One-shot install / enable, and uninstall
//! - [`detours`] - The `extern "system"` replacements themselves

pub mod backend;
pub mod detours;
pub mod entry;
#[cfg(windows)]
pub mod inline;
pub mod manager;
pub mod registry;

pub use backend::{HookBackend, HookError};
pub use entry::{Charset, EntryPoint, HookTarget, UnknownEntryPoint};
#[cfg(windows)]
pub use inline::DetourBackend;
pub use manager::{
    disable_in, install, install_into, installed_hooks, uninstall, InputHooks, InstallError,
};
pub use registry::{HookBinding, HookRegistry};
