//! Inline function hooks using retour
//!
//! Each hook patches the first bytes of the export with a jump to the
//! detour; `RawDetour` keeps a trampoline that runs the displaced
//! instructions and continues into the original.

use parking_lot::RwLock;
use retour::RawDetour;
use slotmap::{new_key_type, SlotMap};
use std::sync::LazyLock;

use inputgate_engine::resolve_symbol;

use super::backend::{HookBackend, HookError};
use super::entry::HookTarget;

new_key_type! {
    /// Handle for an inline hook
    struct InlineHookKey;
}

/// Internal storage for an inline hook
struct InlineHookEntry {
    /// retour detour (owns the trampoline)
    detour: RawDetour,

    /// Target function address (for logging/debugging)
    target: usize,

    /// `module!symbol`
    name: String,
}

// SAFETY: Hook entries are protected by RwLock; the patched code and
// trampoline are process-global and never move.
unsafe impl Send for InlineHookEntry {}
unsafe impl Sync for InlineHookEntry {}

/// Global inline hook registry
///
/// Detours stay here for the life of the process; dropping one would unpatch
/// the export underneath a host thread that may be inside it.
static INLINE_HOOKS: LazyLock<RwLock<SlotMap<InlineHookKey, InlineHookEntry>>> =
    LazyLock::new(|| RwLock::new(SlotMap::with_key()));

/// Hook backend patching OS exports in place
///
/// Stateless: all hooks live in the process-wide registry, so enabling and
/// disabling always applies to every hook created so far.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetourBackend;

impl DetourBackend {
    pub fn new() -> Self {
        Self
    }
}

impl HookBackend for DetourBackend {
    unsafe fn create(&mut self, target: &HookTarget, detour: *const ()) -> Result<*const (), HookError> {
        let name = target.to_string();

        if INLINE_HOOKS.read().values().any(|e| e.name == name) {
            return Err(HookError::AlreadyCreated(name));
        }

        let address = resolve_symbol(&target.module, target.symbol)?;

        tracing::debug!(
            "Creating inline hook '{}' at {:x} -> {:x}",
            name,
            address.as_ptr() as usize,
            detour as usize
        );

        let raw = RawDetour::new(address.as_ptr() as *const (), detour)
            .map_err(|e| HookError::DetourCreation(format!("{}: {}", name, e)))?;
        let trampoline = raw.trampoline() as *const ();

        INLINE_HOOKS.write().insert(InlineHookEntry {
            detour: raw,
            target: address.as_ptr() as usize,
            name,
        });

        Ok(trampoline)
    }

    fn enable_all(&mut self) -> Result<(), HookError> {
        let hooks = INLINE_HOOKS.read();
        let mut enabled_now = Vec::new();

        for (key, entry) in hooks.iter() {
            if entry.detour.is_enabled() {
                continue;
            }

            if let Err(e) = unsafe { entry.detour.enable() } {
                // All or none: put back what this pass already patched
                let mut stuck = Vec::new();
                for key in enabled_now {
                    let Some(done) = hooks.get(key) else { continue };
                    if let Err(undo) = unsafe { done.detour.disable() } {
                        tracing::error!("Rolling back inline hook '{}' failed: {}", done.name, undo);
                        stuck.push(format!("{}: {}", done.name, undo));
                    }
                }
                return Err(enable_failure(&entry.name, &e, &stuck));
            }

            tracing::trace!("Enabled inline hook '{}' at {:x}", entry.name, entry.target);
            enabled_now.push(key);
        }

        Ok(())
    }

    fn disable_all(&mut self) -> Result<(), HookError> {
        let hooks = INLINE_HOOKS.read();
        let mut failures = Vec::new();

        for entry in hooks.values() {
            if !entry.detour.is_enabled() {
                continue;
            }
            match unsafe { entry.detour.disable() } {
                Ok(()) => {
                    tracing::trace!("Disabled inline hook '{}' at {:x}", entry.name, entry.target);
                }
                Err(e) => failures.push(format!("{}: {}", entry.name, e)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(HookError::DisableFailed(failures.join(", ")))
        }
    }
}

/// Error for a failed enable, naming any hook the rollback left patched
fn enable_failure(name: &str, cause: &dyn std::fmt::Display, stuck: &[String]) -> HookError {
    if stuck.is_empty() {
        HookError::EnableFailed(format!("{}: {}", name, cause))
    } else {
        HookError::EnableFailed(format!(
            "{}: {} (still enabled after rollback: {})",
            name,
            cause,
            stuck.join(", ")
        ))
    }
}
