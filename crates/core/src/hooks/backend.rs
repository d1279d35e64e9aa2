//! Hook installation service
//!
//! The installer only needs two things from whatever actually patches code:
//! create a hook and hand back the original, then switch every created hook
//! on at once. [`DetourBackend`](super::inline::DetourBackend) does this with
//! inline detours on Windows; tests plug in a fake.

use inputgate_engine::ResolveError;

use super::entry::HookTarget;

/// Error type for hook operations
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Failed to create detour: {0}")]
    DetourCreation(String),

    #[error("Failed to enable hooks: {0}")]
    EnableFailed(String),

    #[error("Failed to disable hooks: {0}")]
    DisableFailed(String),

    #[error("Hook already created for {0}")]
    AlreadyCreated(String),
}

impl From<ResolveError> for HookError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::ModuleNotFound(module) => HookError::ModuleNotFound(module),
            ResolveError::SymbolNotFound { module, symbol } => {
                HookError::SymbolNotFound(format!("{}!{}", module, symbol))
            }
            ResolveError::InvalidName(name) => HookError::SymbolNotFound(name),
        }
    }
}

/// Installs and toggles function hooks
pub trait HookBackend {
    /// Create (but don't enable) a hook redirecting `target` to `detour`
    ///
    /// Returns the pointer through which the original entry point is called.
    ///
    /// # Safety
    /// `detour` must have exactly the signature of the hooked export.
    unsafe fn create(&mut self, target: &HookTarget, detour: *const ()) -> Result<*const (), HookError>;

    /// Enable every hook created so far, all or none
    fn enable_all(&mut self) -> Result<(), HookError>;

    /// Disable every enabled hook, restoring the original entry points
    fn disable_all(&mut self) -> Result<(), HookError>;
}

impl<B: HookBackend + ?Sized> HookBackend for &mut B {
    unsafe fn create(&mut self, target: &HookTarget, detour: *const ()) -> Result<*const (), HookError> {
        (**self).create(target, detour)
    }

    fn enable_all(&mut self) -> Result<(), HookError> {
        (**self).enable_all()
    }

    fn disable_all(&mut self) -> Result<(), HookError> {
        (**self).disable_all()
    }
}
