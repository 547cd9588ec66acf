use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_IMPORT_TAG: &str = "Imported";
const DEFAULT_EXPORT_PREFIX: &str = "aura_leads_export";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tag attached to every lead created by a CSV import.
    #[serde(default)]
    pub import_tag: Option<String>,
    /// File name prefix for lead exports; the ISO date is appended.
    #[serde(default)]
    pub export_prefix: Option<String>,
    /// Start each session with the demo leads and tasks.
    #[serde(default)]
    pub seed_demo_data: Option<bool>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/aura/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("aura/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("aura\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(config_path) => Self::load_from(&config_path),
            None => Self::default(),
        }
    }

    /// Read a config file, falling back to defaults when it is missing or
    /// cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("Ignoring invalid config {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("Could not read config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn effective_import_tag(&self) -> &str {
        self.import_tag
            .as_deref()
            .filter(|tag| !tag.trim().is_empty())
            .unwrap_or(DEFAULT_IMPORT_TAG)
    }

    pub fn effective_export_prefix(&self) -> &str {
        self.export_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or(DEFAULT_EXPORT_PREFIX)
    }

    pub fn should_seed_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_import_tag(), "Imported");
        assert_eq!(config.effective_export_prefix(), "aura_leads_export");
        assert!(config.should_seed_demo_data());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "import_tag = \"From CSV\"\nexport_prefix = \"q3\"\nseed_demo_data = false\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.effective_import_tag(), "From CSV");
        assert_eq!(config.effective_export_prefix(), "q3");
        assert!(!config.should_seed_demo_data());
    }

    #[test]
    fn test_missing_or_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let missing = AppConfig::load_from(&dir.path().join("nope.toml"));
        assert_eq!(missing.effective_import_tag(), "Imported");

        let path = dir.path().join("broken.toml");
        fs::write(&path, "import_tag = [").unwrap();
        let broken = AppConfig::load_from(&path);
        assert_eq!(broken.effective_export_prefix(), "aura_leads_export");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = AppConfig {
            import_tag: Some("  ".to_string()),
            export_prefix: Some(String::new()),
            seed_demo_data: None,
        };
        assert_eq!(config.effective_import_tag(), "Imported");
        assert_eq!(config.effective_export_prefix(), "aura_leads_export");
    }
}
