//! Hook installation
//!
//! Walks the entry point table once, installs what it can, and enables the
//! whole set with a single call. Individual failures are logged and leave
//! that entry point unintercepted; nothing is retried.

use std::sync::OnceLock;

use parking_lot::RwLock;

use super::backend::{HookBackend, HookError};
use super::entry::{EntryPoint, HookTarget};
use super::registry::HookRegistry;
use crate::config::HooksConfig;
use crate::interceptor::InputInterceptor;
use crate::report::{HookOutcome, HookStatus, InstallReport};

/// Error type for install/uninstall of the hook set
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("Input hooks already installed")]
    AlreadyInstalled,

    #[error("Input hooks not installed")]
    NotInstalled,

    #[error(transparent)]
    Hook(#[from] HookError),
}

/// Everything the detours need at call time
#[derive(Debug)]
pub struct InputHooks {
    registry: HookRegistry,
    interceptor: InputInterceptor,
    report: RwLock<InstallReport>,
}

impl InputHooks {
    pub fn new(interceptor: InputInterceptor) -> Self {
        Self {
            registry: HookRegistry::new(),
            interceptor,
            report: RwLock::new(InstallReport::default()),
        }
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    pub fn interceptor(&self) -> &InputInterceptor {
        &self.interceptor
    }

    /// Report of the install pass
    pub fn report(&self) -> InstallReport {
        self.report.read().clone()
    }
}

/// Process-wide hook state, published before any hook is enabled
static HOOKS: OnceLock<InputHooks> = OnceLock::new();

/// The installed hook state, if [`install`] has run
pub fn installed_hooks() -> Option<&'static InputHooks> {
    HOOKS.get()
}

/// Install and enable every configured input hook
///
/// Publishes `interceptor` process-wide, then installs into it. Individual
/// hook failures and a failed enable are recorded in the returned report;
/// only a second installation is an error.
#[tracing::instrument(skip_all)]
pub fn install<B: HookBackend + ?Sized>(
    config: &HooksConfig,
    backend: &mut B,
    interceptor: InputInterceptor,
) -> Result<InstallReport, InstallError> {
    let mut published = false;
    let hooks = HOOKS.get_or_init(|| {
        published = true;
        InputHooks::new(interceptor)
    });

    if !published {
        tracing::warn!("Input hooks already installed, ignoring second install");
        return Err(InstallError::AlreadyInstalled);
    }

    let report = install_into(&hooks.registry, config, backend);
    *hooks.report.write() = report.clone();
    Ok(report)
}

/// Disable every hook, restoring the original entry points
#[tracing::instrument(skip_all)]
pub fn uninstall<B: HookBackend + ?Sized>(backend: &mut B) -> Result<(), InstallError> {
    let hooks = installed_hooks().ok_or(InstallError::NotInstalled)?;
    disable_in(&hooks.registry, backend)?;
    Ok(())
}

/// Install every configured entry point into `registry`, then enable them
pub fn install_into<B: HookBackend + ?Sized>(
    registry: &HookRegistry,
    config: &HooksConfig,
    backend: &mut B,
) -> InstallReport {
    let mut report = InstallReport::default();

    for entry_point in EntryPoint::ALL {
        let target = HookTarget::new(entry_point, &config.xinput_module);

        if config.is_disabled(entry_point) {
            tracing::info!("Hook for {} disabled in config", target);
            report.hooks.push(HookOutcome::new(&target, HookStatus::Skipped));
            continue;
        }

        let status = match unsafe { backend.create(&target, entry_point.detour()) } {
            Ok(original) if !original.is_null() => {
                registry.set_installed(entry_point, original);
                tracing::debug!("Hook set to {}", target);
                HookStatus::Installed
            }
            Ok(_) => {
                tracing::error!("Hooking {} failed: backend returned no original", target);
                HookStatus::Failed("backend returned no original".to_string())
            }
            Err(e) => {
                tracing::error!("Hooking {} failed: {}", target, e);
                HookStatus::Failed(e.to_string())
            }
        };
        report.hooks.push(HookOutcome::new(&target, status));
    }

    match backend.enable_all() {
        Ok(()) => {
            registry.set_enabled(true);
            report.enabled = true;
            tracing::info!(
                "All hooks enabled. ({} of {} installed)",
                registry.installed_count(),
                EntryPoint::COUNT
            );
        }
        Err(e) => {
            report.enable_error = Some(e.to_string());
            tracing::error!("Enabling hooks failed: {}", e);
        }
    }

    report
}

/// Disable every hook in `registry`
pub fn disable_in<B: HookBackend + ?Sized>(
    registry: &HookRegistry,
    backend: &mut B,
) -> Result<(), HookError> {
    backend.disable_all().inspect_err(|e| {
        tracing::error!("Disabling hooks failed: {}", e);
    })?;
    registry.set_enabled(false);
    tracing::info!("All hooks disabled.");
    Ok(())
}
