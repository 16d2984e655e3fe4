//! Unified error types for the nestwatch core library.
//!
//! A single [`NestwatchError`] covers every failure mode in the core so the
//! HTTP layer can map errors to responses without matching on per-module
//! types. Variants carry enough context to be actionable and each one maps
//! to a stable machine-readable code and an HTTP status.

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all nestwatch operations.
#[derive(Debug, Error)]
pub enum NestwatchError {
    // =========================================================================
    // VALIDATION ERRORS
    // =========================================================================
    /// Latitude or longitude is outside the valid geographic range.
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}. Latitude must be in [-90, 90] and longitude in [-180, 180].")]
    InvalidCoordinates {
        /// Latitude that failed validation (degrees).
        latitude: f64,
        /// Longitude that failed validation (degrees).
        longitude: f64,
    },

    /// Safe-zone radius is outside the allowed bounds.
    #[error("Invalid safe zone radius: {radius} m. Radius must be between {min} and {max} meters.")]
    InvalidZoneRadius {
        /// Radius that failed validation (meters).
        radius: u32,
        /// Minimum allowed radius (meters).
        min: u32,
        /// Maximum allowed radius (meters).
        max: u32,
    },

    /// Safe-zone name is too short or too long.
    #[error("Invalid safe zone name: '{0}'. Names must be 3 to 30 characters.")]
    InvalidZoneName(String),

    /// Child profile fields failed validation.
    #[error("Invalid child profile: {0}")]
    InvalidChildProfile(String),

    /// A location sample carried no usable fix (zero or out-of-range coordinates).
    #[error("Location sample has no usable fix. Coordinates were missing, zeroed, or out of range.")]
    NoLocationFix,

    // =========================================================================
    // LOOKUP ERRORS
    // =========================================================================
    /// No profile exists for the requested child.
    #[error("Child not found: '{0}'")]
    ChildNotFound(String),

    /// No safe zone exists with the requested id.
    #[error("Safe zone not found: '{0}'")]
    ZoneNotFound(String),

    /// No notification exists with the requested id.
    #[error("Notification not found: '{0}'")]
    NotificationNotFound(String),

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The configuration file was not found at the expected path.
    #[error("Configuration file not found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// The configuration was parsed but contains invalid values.
    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // =========================================================================
    // PERSISTENCE & I/O ERRORS
    // =========================================================================
    /// An error occurred while persisting or reading cached data.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for nestwatch operations.
pub type Result<T> = std::result::Result<T, NestwatchError>;

impl NestwatchError {
    /// Returns `true` if this error came from validating caller input.
    #[inline]
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinates { .. }
                | Self::InvalidZoneRadius { .. }
                | Self::InvalidZoneName(_)
                | Self::InvalidChildProfile(_)
                | Self::NoLocationFix
        )
    }

    /// Returns `true` if this error means a requested resource does not exist.
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ChildNotFound(_) | Self::ZoneNotFound(_) | Self::NotificationNotFound(_)
        )
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParseError(_) | Self::ConfigValidationError(_)
        )
    }

    /// Returns `true` if this error is related to I/O or persistence.
    #[inline]
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::PersistenceError(_) | Self::IoError(_))
    }

    /// Returns an HTTP-appropriate status code for this error.
    #[inline]
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed input
            Self::InvalidCoordinates { .. }
            | Self::InvalidZoneRadius { .. }
            | Self::InvalidZoneName(_)
            | Self::InvalidChildProfile(_) => 400,

            // 404 Not Found
            Self::ChildNotFound(_)
            | Self::ZoneNotFound(_)
            | Self::NotificationNotFound(_)
            | Self::ConfigNotFound(_) => 404,

            // 422 Unprocessable Entity - well-formed but semantically unusable
            Self::NoLocationFix | Self::ConfigParseError(_) | Self::ConfigValidationError(_) => 422,

            // 500 Internal Server Error
            Self::PersistenceError(_) | Self::IoError(_) => 500,
        }
    }

    /// Returns a machine-readable error code for API responses.
    #[inline]
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinates { .. } => "INVALID_COORDINATES",
            Self::InvalidZoneRadius { .. } => "INVALID_ZONE_RADIUS",
            Self::InvalidZoneName(_) => "INVALID_ZONE_NAME",
            Self::InvalidChildProfile(_) => "INVALID_CHILD_PROFILE",
            Self::NoLocationFix => "NO_LOCATION_FIX",
            Self::ChildNotFound(_) => "CHILD_NOT_FOUND",
            Self::ZoneNotFound(_) => "ZONE_NOT_FOUND",
            Self::NotificationNotFound(_) => "NOTIFICATION_NOT_FOUND",
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::ConfigParseError(_) => "CONFIG_PARSE_ERROR",
            Self::ConfigValidationError(_) => "CONFIG_VALIDATION_ERROR",
            Self::PersistenceError(_) => "PERSISTENCE_ERROR",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

impl From<serde_json::Error> for NestwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl From<toml::de::Error> for NestwatchError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for NestwatchError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigParseError(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoErr, ErrorKind};

    #[test]
    fn test_validation_error_classification() {
        assert!(NestwatchError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 0.0
        }
        .is_validation_error());
        assert!(NestwatchError::InvalidZoneRadius {
            radius: 5,
            min: 25,
            max: 1000
        }
        .is_validation_error());
        assert!(NestwatchError::NoLocationFix.is_validation_error());

        assert!(!NestwatchError::ChildNotFound("c1".into()).is_validation_error());
    }

    #[test]
    fn test_not_found_classification() {
        assert!(NestwatchError::ChildNotFound("c1".into()).is_not_found());
        assert!(NestwatchError::ZoneNotFound("z1".into()).is_not_found());
        assert!(NestwatchError::NotificationNotFound("n1".into()).is_not_found());

        assert!(!NestwatchError::NoLocationFix.is_not_found());
    }

    #[test]
    fn test_config_error_classification() {
        assert!(NestwatchError::ConfigNotFound(PathBuf::from("/test")).is_config_error());
        assert!(NestwatchError::ConfigParseError("syntax error".into()).is_config_error());
        assert!(NestwatchError::ConfigValidationError("bad timezone".into()).is_config_error());

        assert!(!NestwatchError::NoLocationFix.is_config_error());
    }

    #[test]
    fn test_io_error_classification() {
        assert!(NestwatchError::PersistenceError("disk full".into()).is_io_error());
        assert!(NestwatchError::IoError(IoErr::new(ErrorKind::NotFound, "test")).is_io_error());

        assert!(!NestwatchError::ZoneNotFound("z1".into()).is_io_error());
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            NestwatchError::InvalidZoneRadius {
                radius: 5,
                min: 25,
                max: 1000
            }
            .http_status_code(),
            400
        );
        assert_eq!(
            NestwatchError::ChildNotFound("c1".into()).http_status_code(),
            404
        );
        assert_eq!(NestwatchError::NoLocationFix.http_status_code(), 422);
        assert_eq!(
            NestwatchError::PersistenceError("error".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(NestwatchError::NoLocationFix.error_code(), "NO_LOCATION_FIX");
        assert_eq!(
            NestwatchError::ZoneNotFound("z1".into()).error_code(),
            "ZONE_NOT_FOUND"
        );
        assert_eq!(
            NestwatchError::ConfigNotFound(PathBuf::new()).error_code(),
            "CONFIG_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_display_messages() {
        let err = NestwatchError::InvalidZoneRadius {
            radius: 5000,
            min: 25,
            max: 1000,
        };
        assert!(format!("{err}").contains("5000"));

        let err = NestwatchError::ChildNotFound("avani_001".into());
        assert!(format!("{err}").contains("avani_001"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoErr::new(ErrorKind::NotFound, "file not found");
        let err: NestwatchError = io_err.into();
        assert!(matches!(err, NestwatchError::IoError(_)));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<NestwatchError>();
        assert_sync::<NestwatchError>();
    }
}
