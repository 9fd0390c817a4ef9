use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use knockback_util::math::round;
use serde::{Deserialize, Serialize};

/// Number of decimal places force and height are rounded to when written out.
pub const SAVED_PRECISION: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct KnockbackSettings {
    /// Horizontal knockback applied on a successful attack. 0.4 by default.
    pub force: f64,
    /// Vertical knockback applied on a successful attack. 0.4 by default.
    pub height: f64,
    /// Attack immunity after being hit, in milliseconds. 500 by default.
    pub hit_delay: i64,
}

impl Default for KnockbackSettings {
    fn default() -> Self {
        Self {
            force: 0.4,
            height: 0.4,
            hit_delay: 500,
        }
    }
}

impl KnockbackSettings {
    /// The values as they end up on disk.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            force: round(self.force, SAVED_PRECISION),
            height: round(self.height, SAVED_PRECISION),
            hit_delay: self.hit_delay,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not find file extension in path {0}")]
    MissingExtension(PathBuf),
    #[error("unsupported settings format '{0}'")]
    UnsupportedFormat(String),
    #[error("settings file io: {0}")]
    Io(#[from] io::Error),
    #[error("invalid json settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid toml settings: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
    #[error("failed to encode toml settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Whether the settings file simply does not exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == io::ErrorKind::NotFound)
    }
}

/// The encoding of a settings file, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    Toml,
}

impl SettingsFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ConfigError::MissingExtension(path.to_path_buf()))?;

        match extension.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            unknown => Err(ConfigError::UnsupportedFormat(unknown.to_string())),
        }
    }

    fn decode(self, content: &str) -> Result<KnockbackSettings, ConfigError> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }

    fn encode(self, settings: &KnockbackSettings) -> Result<String, ConfigError> {
        Ok(match self {
            Self::Json => serde_json::to_string_pretty(settings)?,
            Self::Toml => toml::to_string_pretty(settings)?,
        })
    }
}

/// Reads the settings stored at `path`. Keys missing from the file keep their defaults.
pub fn read_settings(path: &Path) -> Result<KnockbackSettings, ConfigError> {
    let format = SettingsFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    format.decode(&content)
}

/// Writes `settings` to `path`, rounding force and height and creating parent directories.
pub fn write_settings(path: &Path, settings: &KnockbackSettings) -> Result<(), ConfigError> {
    let format = SettingsFormat::from_path(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format.encode(&settings.rounded())?;
    fs::write(path, content)?;
    log::debug!("Wrote knockback settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("assets/knockback.json")).unwrap(),
            SettingsFormat::Json
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("kb.TOML")).unwrap(),
            SettingsFormat::Toml
        );
        assert!(matches!(
            SettingsFormat::from_path(Path::new("assets/knockback")),
            Err(ConfigError::MissingExtension(_))
        ));
        assert!(matches!(
            SettingsFormat::from_path(Path::new("knockback.yaml")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn reads_pascal_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knockback.json");
        fs::write(&path, r#"{"Force":0.6,"Height":0.5,"HitDelay":300}"#).unwrap();

        let settings = read_settings(&path).unwrap();
        assert_eq!(
            settings,
            KnockbackSettings {
                force: 0.6,
                height: 0.5,
                hit_delay: 300,
            }
        );
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knockback.json");
        fs::write(&path, r#"{"Force":0.3}"#).unwrap();

        let settings = read_settings(&path).unwrap();
        assert_eq!(settings.force, 0.3);
        assert_eq!(settings.height, 0.4);
        assert_eq!(settings.hit_delay, 500);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_settings(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn malformed_file_is_not_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knockback.json");
        fs::write(&path, "{ Force: ").unwrap();

        let err = read_settings(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn write_rounds_and_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("assets").join("knockback.json");
        let settings = KnockbackSettings {
            force: 0.430_000_000_000_000_05,
            height: 0.123_56,
            hit_delay: 475,
        };

        write_settings(&path, &settings).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["Force"], serde_json::json!(0.43));
        assert_eq!(raw["Height"], serde_json::json!(0.124));
        assert_eq!(raw["HitDelay"], serde_json::json!(475));
    }

    #[test]
    fn toml_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knockback.toml");
        let settings = KnockbackSettings {
            force: 0.45,
            height: 0.35,
            hit_delay: 250,
        };

        write_settings(&path, &settings).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("HitDelay = 250"));
        assert_eq!(read_settings(&path).unwrap(), settings);
    }
}
