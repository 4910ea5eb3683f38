use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home and config directory for one test.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("config"))?;
        Ok(Self { temp_dir })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Used as XDG_CONFIG_HOME so a real user config is never picked up.
    pub fn config_home(&self) -> PathBuf {
        self.path().join("config")
    }

    /// Write a config file into the temp directory and return its path.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.path().join("sai.toml");
        fs::write(&path, content)?;
        Ok(path)
    }
}
