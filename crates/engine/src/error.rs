//! Error types for export resolution

/// Error type for `module!symbol` resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Module is neither loaded nor loadable
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// Module is loaded but does not export the symbol
    #[error("Symbol not found: {module}!{symbol}")]
    SymbolNotFound { module: String, symbol: String },

    /// Name contains an interior NUL and cannot be passed to the loader
    #[error("Invalid name: {0}")]
    InvalidName(String),
}
