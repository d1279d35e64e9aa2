//! InputGate - FFI Layer
//!
//! This crate provides the C ABI boundary between the injected camera
//! system and the Rust core logic. It compiles to a cdylib (.dll).

pub mod classifier;
pub mod console;
pub mod ffi;

use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use inputgate_core::{InputGateConfig, InputInterceptor, InstallError, InstallReport};
use inputgate_engine::{mode_state, ModeSource};
use inputgate_sdk::XInputState;

use crate::classifier::CallbackClassifier;
use crate::console::ConsoleQueue;

/// Classifier shared with the interceptor; handlers may be set before install
static CLASSIFIER: LazyLock<Arc<CallbackClassifier>> =
    LazyLock::new(|| Arc::new(CallbackClassifier::new()));

/// Overlay console queue, created with the subscriber
static CONSOLE: OnceLock<ConsoleQueue> = OnceLock::new();

/// Whether our subscriber (and so the console layer) is the global one
static CONSOLE_ATTACHED: AtomicBool = AtomicBool::new(false);

/// Own gamepad buffer registered before the interceptor existed
static OWN_GAMEPAD_STATE: AtomicPtr<XInputState> = AtomicPtr::new(ptr::null_mut());

pub fn classifier() -> &'static Arc<CallbackClassifier> {
    &CLASSIFIER
}

pub fn console() -> Option<&'static ConsoleQueue> {
    CONSOLE.get()
}

/// Whether log events reach the overlay console
pub fn console_attached() -> bool {
    CONSOLE_ATTACHED.load(Ordering::Acquire)
}

/// Install the global subscriber once
///
/// Logs at `debug` when the config asks for it, `info` otherwise;
/// `RUST_LOG` overrides both.
pub fn init_logging(config: &InputGateConfig) -> &'static ConsoleQueue {
    let mut created = false;
    let queue = CONSOLE.get_or_init(|| {
        created = true;
        ConsoleQueue::new(config.console.capacity)
    });

    if created {
        let level = if config.debug { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let result = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(queue.layer())
            .try_init();

        match result {
            Ok(()) => CONSOLE_ATTACHED.store(true, Ordering::Release),
            Err(e) => {
                // Events go to whoever owns the global subscriber; tell both sides
                tracing::warn!("Console logging unavailable: {}", e);
                queue.push(format!("[WARN] Console logging unavailable: {}", e));
            }
        }
    }

    queue
}

/// Remember the camera system's own XInput buffer
pub fn set_own_gamepad_state(state: *const XInputState) {
    OWN_GAMEPAD_STATE.store(state as *mut XInputState, Ordering::Release);
    if let Some(hooks) = inputgate_core::installed_hooks() {
        hooks.interceptor().set_own_gamepad_state(state);
    }
}

/// Load config, start logging, then install and enable every input hook
pub fn install() -> Result<InstallReport, InstallError> {
    let (config, load_error) = match InputGateConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (InputGateConfig::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = load_error {
        tracing::warn!("Failed to load config, using defaults: {}", e);
    }

    tracing::info!("InputGate installing...");

    let mode: Arc<dyn ModeSource> = mode_state();
    let interceptor = InputInterceptor::new(mode, CLASSIFIER.clone())
        .with_filter(config.filter.build());
    interceptor.set_own_gamepad_state(OWN_GAMEPAD_STATE.load(Ordering::Acquire));

    let report = platform::install(&config, interceptor)?;
    if !report.is_complete() {
        tracing::warn!(
            "InputGate installed with {} failed hook(s)",
            report.failed().count()
        );
    }
    Ok(report)
}

/// Disable every hook
pub fn uninstall() -> Result<(), InstallError> {
    tracing::info!("InputGate uninstalling...");
    platform::uninstall()
}

#[cfg(windows)]
mod platform {
    use inputgate_core::{DetourBackend, InputGateConfig, InputInterceptor, InstallError, InstallReport};

    pub fn install(
        config: &InputGateConfig,
        interceptor: InputInterceptor,
    ) -> Result<InstallReport, InstallError> {
        inputgate_core::install(&config.hooks, &mut DetourBackend::new(), interceptor)
    }

    pub fn uninstall() -> Result<(), InstallError> {
        inputgate_core::uninstall(&mut DetourBackend::new())
    }
}

#[cfg(not(windows))]
mod platform {
    use inputgate_core::{
        HookBackend, HookError, HookTarget, InputGateConfig, InputInterceptor, InstallError,
        InstallReport,
    };

    /// No inline hooking outside Windows; every entry point reports failure
    struct UnsupportedBackend;

    impl HookBackend for UnsupportedBackend {
        unsafe fn create(&mut self, target: &HookTarget, _detour: *const ()) -> Result<*const (), HookError> {
            Err(HookError::DetourCreation(format!(
                "{}: inline hooks are only supported on Windows",
                target
            )))
        }

        fn enable_all(&mut self) -> Result<(), HookError> {
            Ok(())
        }

        fn disable_all(&mut self) -> Result<(), HookError> {
            Ok(())
        }
    }

    pub fn install(
        config: &InputGateConfig,
        interceptor: InputInterceptor,
    ) -> Result<InstallReport, InstallError> {
        inputgate_core::install(&config.hooks, &mut UnsupportedBackend, interceptor)
    }

    pub fn uninstall() -> Result<(), InstallError> {
        inputgate_core::uninstall(&mut UnsupportedBackend)
    }
}
