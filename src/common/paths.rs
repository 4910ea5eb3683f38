use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory holding sai's own configuration (`~/.config/sai` on Linux).
///
/// Not created here: sai only ever reads its configuration.
pub fn sai_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("sai");
    Ok(config_dir)
}

/// Default location of the configuration file.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(sai_config_dir()?.join("config.toml"))
}
