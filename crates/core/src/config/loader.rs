//! Config path resolution
//!
//! The library is injected into an arbitrary game, so configuration lives
//! next to the host executable rather than next to the DLL.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// Directory name created beside the host executable
pub const CONFIG_DIR_NAME: &str = "inputgate";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "inputgate.toml";

/// Returns the inputgate base directory beside the host executable.
///
/// For a host at `C:/Games/Titanfall2/Titanfall2.exe` this is
/// `C:/Games/Titanfall2/inputgate/`.
pub fn inputgate_base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;

    exe.parent()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the config file path.
///
/// Path: `<host dir>/inputgate/inputgate.toml`
pub fn config_path() -> ConfigResult<PathBuf> {
    Ok(inputgate_base_dir()?.join(CONFIG_FILE_NAME))
}
