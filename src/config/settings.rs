//! Report settings for costwatch
//!
//! One settings value describes one report: the trailing window, the entity
//! catalog, which entities get their own column, the tag predicate for the
//! filtered breakdown view, and the mail envelope. The value is threaded as
//! an argument into every builder/renderer call; nothing reads configuration
//! through globals.

use serde::{Deserialize, Serialize};

use super::paths::CostwatchPaths;
use crate::error::CostwatchError;
use crate::models::{Entity, EntityKey, Granularity, TagFilter};

/// Mail envelope settings for report delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailSettings {
    /// Sender address
    pub sender: String,
    /// Recipient addresses
    pub recipients: Vec<String>,
    /// Subject line
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String {
    "Periodic Cost Report".to_string()
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            sender: String::new(),
            recipients: Vec::new(),
            subject: default_subject(),
        }
    }
}

/// Report settings for costwatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Reporting bucket granularity
    #[serde(default)]
    pub granularity: Granularity,

    /// Number of trailing buckets to report
    #[serde(default = "default_window_periods")]
    pub window_periods: usize,

    /// Tracked entities with their display names, in report column order
    #[serde(default)]
    pub entities: Vec<Entity>,

    /// Keys that get their own summary column; everything else folds into
    /// "Others". Must include the grand-total key.
    #[serde(default)]
    pub featured: Vec<EntityKey>,

    /// Tag predicate for the filtered breakdown view. When absent the
    /// category breakdown section is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_filter: Option<TagFilter>,

    /// Mail envelope for delivery
    #[serde(default)]
    pub mail: MailSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_window_periods() -> usize {
    9
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            granularity: Granularity::default(),
            window_periods: default_window_periods(),
            entities: Vec::new(),
            featured: vec![EntityKey::Total],
            tag_filter: None,
            mail: MailSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CostwatchPaths) -> Result<Self, CostwatchError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| CostwatchError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CostwatchError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CostwatchPaths) -> Result<(), CostwatchError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CostwatchError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| CostwatchError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Validate cross-field constraints before a run
    ///
    /// The featured list must carry the grand-total key, and every featured
    /// real entity must exist in the catalog.
    pub fn validate(&self) -> Result<(), CostwatchError> {
        if self.entities.is_empty() {
            return Err(CostwatchError::Config(
                "no entities configured; nothing to report on".into(),
            ));
        }

        if !self.featured.contains(&EntityKey::Total) {
            return Err(CostwatchError::Config(
                "featured list must include the \"total\" key".into(),
            ));
        }

        for key in &self.featured {
            if let EntityKey::Real(id) = key {
                if !self.entities.iter().any(|e| &e.id == id) {
                    return Err(CostwatchError::Config(format!(
                        "featured entity {} is not in the entity catalog",
                        id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Display name for an entity, falling back to its raw id
    pub fn display_name(&self, key: &EntityKey) -> String {
        match key {
            EntityKey::Real(id) => self
                .entities
                .iter()
                .find(|e| &e.id == id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| id.to_string()),
            EntityKey::Total => "Total".to_string(),
            EntityKey::Others => "Others".to_string(),
        }
    }
}
