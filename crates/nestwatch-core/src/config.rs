//! Service configuration loading, saving, and validation.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{NestwatchError, Result};
use crate::models::DEFAULT_ZONE_RADIUS_METERS;

/// How many location samples are kept per child by default.
pub const DEFAULT_LOCATION_HISTORY_LIMIT: usize = 50;
/// Default HTTP listen port.
pub const DEFAULT_LISTEN_PORT: u16 = 3000;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));
static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid id regex"));

/// Main service configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NestwatchConfig {
    /// Port the HTTP server binds to.
    pub listen_port: u16,

    /// Data directory override. Platform default when unset.
    pub data_dir: Option<PathBuf>,

    /// IANA timezone used when rendering timestamps for the parent.
    pub timezone: String,

    /// Location history entries retained per child.
    pub location_history_limit: usize,

    /// Radius applied to zones created without an explicit one (meters).
    pub default_zone_radius_meters: u32,

    /// Master switch for safety alert generation.
    pub notifications_enabled: bool,
}

impl Default for NestwatchConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            data_dir: None,
            timezone: "UTC".to_string(),
            location_history_limit: DEFAULT_LOCATION_HISTORY_LIMIT,
            default_zone_radius_meters: DEFAULT_ZONE_RADIUS_METERS,
            notifications_enabled: true,
        }
    }
}

impl NestwatchConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read, parsed,
    /// or validated.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The default configuration file path.
    ///
    /// On Linux deployments: `/etc/nestwatch/config.toml`.
    /// Elsewhere: the per-user config directory.
    pub fn default_path() -> Result<PathBuf> {
        #[cfg(target_os = "linux")]
        {
            Ok(PathBuf::from("/etc/nestwatch/config.toml"))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let dirs = directories::ProjectDirs::from("", "", "nestwatch").ok_or_else(|| {
                NestwatchError::ConfigValidationError("Cannot determine config directory".into())
            })?;
            Ok(dirs.config_dir().join("config.toml"))
        }
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_timezone(&self.timezone) {
            return Err(NestwatchError::ConfigValidationError(format!(
                "timezone: '{}' is not a valid IANA timezone",
                self.timezone
            )));
        }
        if self.location_history_limit == 0 {
            return Err(NestwatchError::ConfigValidationError(
                "location_history_limit: must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Whether `tz` names a valid IANA timezone.
#[must_use]
pub fn is_valid_timezone(tz: &str) -> bool {
    tz.parse::<chrono_tz::Tz>().is_ok()
}

/// Whether `color` is a #RRGGBB hex color.
#[must_use]
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR_RE.is_match(color)
}

/// Whether `id` is a well-formed resource identifier (path-safe, 1-64
/// chars of `[A-Za-z0-9_-]`).
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    ID_RE.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = NestwatchConfig::default();
        assert_eq!(config.listen_port, DEFAULT_LISTEN_PORT);
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.location_history_limit, 50);
        assert!(config.notifications_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = NestwatchConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.listen_port, DEFAULT_LISTEN_PORT);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = NestwatchConfig::default();
        config.listen_port = 8080;
        config.timezone = "America/Los_Angeles".to_string();
        config.save(&path).unwrap();

        let loaded = NestwatchConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded.listen_port, 8080);
        assert_eq!(loaded.timezone, "America/Los_Angeles");
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "listen_port = 9090\n").unwrap();

        let config = NestwatchConfig::load_or_default(&path).unwrap();
        assert_eq!(config.listen_port, 9090);
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timezone = \"Mars/Olympus_Mons\"\n").unwrap();

        let result = NestwatchConfig::load_or_default(&path);
        assert!(matches!(
            result,
            Err(NestwatchError::ConfigValidationError(_))
        ));
    }

    #[test]
    fn test_unparseable_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "listen_port = \"not a number\"\n").unwrap();

        let result = NestwatchConfig::load_or_default(&path);
        assert!(matches!(result, Err(NestwatchError::ConfigParseError(_))));
    }

    #[test]
    fn test_timezone_validator() {
        assert!(is_valid_timezone("UTC"));
        assert!(is_valid_timezone("America/Los_Angeles"));
        assert!(!is_valid_timezone("Not/AZone"));
        assert!(!is_valid_timezone(""));
    }

    #[test]
    fn test_hex_color_validator() {
        assert!(is_valid_hex_color("#4CAF50"));
        assert!(is_valid_hex_color("#ffffff"));
        assert!(!is_valid_hex_color("4CAF50"));
        assert!(!is_valid_hex_color("#4CAF5"));
        assert!(!is_valid_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_id_validator() {
        assert!(is_valid_id("avani_001"));
        assert!(is_valid_id("a-b-c"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("has space"));
        assert!(!is_valid_id("../escape"));
    }
}
