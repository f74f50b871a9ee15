//! Path management for costwatch
//!
//! Provides platform-appropriate path resolution for configuration and the
//! report outbox.
//!
//! ## Path Resolution Order
//!
//! 1. `COSTWATCH_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/costwatch` on Linux,
//!    `~/Library/Application Support/costwatch` on macOS, `%APPDATA%\costwatch`
//!    on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CostwatchError;

/// Manages all paths used by costwatch
#[derive(Debug, Clone)]
pub struct CostwatchPaths {
    /// Base directory for all costwatch data
    base_dir: PathBuf,
}

impl CostwatchPaths {
    /// Create a new CostwatchPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CostwatchError> {
        let base_dir = if let Ok(custom) = std::env::var("COSTWATCH_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "costwatch").ok_or_else(|| {
                CostwatchError::Config("Could not determine a config directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create CostwatchPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default outbox directory for rendered reports
    pub fn outbox_dir(&self) -> PathBuf {
        self.base_dir.join("outbox")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CostwatchError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CostwatchError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.outbox_dir())
            .map_err(|e| CostwatchError::Io(format!("Failed to create outbox directory: {}", e)))?;

        Ok(())
    }

    /// Check if costwatch has been configured (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
