//! Export resolution via the Windows loader

use std::ffi::{c_void, CString};
use std::ptr::NonNull;

use windows::core::{PCSTR, PCWSTR};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{GetModuleHandleW, GetProcAddress};

use crate::error::ResolveError;

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Find a module the host has already loaded
///
/// Never loads anything: hooking a module the host doesn't use would report
/// an installed hook that never runs.
unsafe fn module_handle(module: &str) -> Result<HMODULE, ResolveError> {
    let name = wide(module);

    GetModuleHandleW(PCWSTR(name.as_ptr())).map_err(|e| {
        tracing::debug!("GetModuleHandleW({}) failed: {}", module, e);
        ResolveError::ModuleNotFound(module.to_string())
    })
}

/// Resolve `module!symbol` to the address of the export
///
/// `module` must already be loaded in the process.
///
/// # Safety
/// The returned address is only valid while `module` stays loaded.
#[tracing::instrument(level = "debug")]
pub unsafe fn resolve_symbol(module: &str, symbol: &str) -> Result<NonNull<c_void>, ResolveError> {
    let handle = module_handle(module)?;
    let symbol_c =
        CString::new(symbol).map_err(|_| ResolveError::InvalidName(symbol.to_string()))?;

    let address = GetProcAddress(handle, PCSTR(symbol_c.as_ptr() as *const u8)).ok_or_else(|| {
        ResolveError::SymbolNotFound {
            module: module.to_string(),
            symbol: symbol.to_string(),
        }
    })?;

    NonNull::new(address as *mut c_void).ok_or_else(|| ResolveError::SymbolNotFound {
        module: module.to_string(),
        symbol: symbol.to_string(),
    })
}
