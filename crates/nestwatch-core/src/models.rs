//! Domain models shared between the store, the safety monitor, and the API.
//!
//! Field names follow the backend's snake_case JSON wire format so cached
//! documents round-trip unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{NestwatchError, Result};
use crate::geo::GeoPoint;

/// Minimum allowed safe-zone radius in meters.
pub const MIN_ZONE_RADIUS_METERS: u32 = 25;
/// Maximum allowed safe-zone radius in meters.
pub const MAX_ZONE_RADIUS_METERS: u32 = 1000;
/// Radius applied when a zone is created without one.
pub const DEFAULT_ZONE_RADIUS_METERS: u32 = 100;
/// Default map color for new zones.
pub const DEFAULT_ZONE_COLOR: &str = "#4CAF50";
/// Default map icon for new zones.
pub const DEFAULT_ZONE_ICON: &str = "home";

/// Allowed child name length range.
pub const CHILD_NAME_LENGTH: std::ops::RangeInclusive<usize> = 2..=50;
/// Allowed child age range.
pub const CHILD_AGE_RANGE: std::ops::RangeInclusive<u8> = 3..=18;
/// Allowed safe-zone name length range.
pub const ZONE_NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=30;

/// Sentiment above this is considered positive.
pub const POSITIVE_SENTIMENT_THRESHOLD: f64 = 0.1;
/// Sentiment below this is considered negative.
pub const NEGATIVE_SENTIMENT_THRESHOLD: f64 = -0.1;
/// Confidence at or above this is considered high.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// A monitored child's profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Child {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    #[schema(example = "Avani")]
    pub name: String,
    /// Age in years.
    #[schema(example = 8)]
    pub age: u8,
    /// Avatar image URL, if set.
    pub avatar_url: Option<String>,
    /// Owning parent account id.
    pub parent_id: String,
    /// Paired device id, if a device is enrolled.
    pub device_id: Option<String>,
    /// Whether monitoring is active for this child.
    pub is_active: bool,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
    /// Last profile update timestamp (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Child {
    /// Validate name and age bounds.
    pub fn validate(&self) -> Result<()> {
        if !CHILD_NAME_LENGTH.contains(&self.name.chars().count()) {
            return Err(NestwatchError::InvalidChildProfile(format!(
                "name must be {} to {} characters",
                CHILD_NAME_LENGTH.start(),
                CHILD_NAME_LENGTH.end()
            )));
        }
        if !CHILD_AGE_RANGE.contains(&self.age) {
            return Err(NestwatchError::InvalidChildProfile(format!(
                "age must be {} to {}",
                CHILD_AGE_RANGE.start(),
                CHILD_AGE_RANGE.end()
            )));
        }
        Ok(())
    }
}

/// A user-defined circular geofence around a place the child is expected.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SafeZone {
    /// Stable identifier.
    pub id: String,
    /// Child this zone belongs to.
    pub child_id: String,
    /// Display name ("Home", "School").
    #[schema(example = "Home")]
    pub name: String,
    /// Human-readable address of the center, if known.
    pub address: Option<String>,
    /// Center latitude in degrees.
    pub latitude: f64,
    /// Center longitude in degrees.
    pub longitude: f64,
    /// Radius in meters. Containment is inclusive of the boundary.
    #[schema(example = 100, minimum = 25, maximum = 1000)]
    pub radius: u32,
    /// Map display color (#RRGGBB).
    pub color: String,
    /// Map display icon name.
    pub icon: String,
    /// Inactive zones never match containment checks.
    pub is_active: bool,
    /// Free-form schedule description.
    pub schedule: String,
    /// Whether entry/exit alerts are generated for this zone.
    pub alerts_enabled: bool,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

impl SafeZone {
    /// Create a zone with defaults matching a fresh user-created zone.
    #[must_use]
    pub fn new(child_id: &str, name: &str, latitude: f64, longitude: f64, radius: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            name: name.to_string(),
            address: None,
            latitude,
            longitude,
            radius,
            color: DEFAULT_ZONE_COLOR.to_string(),
            icon: DEFAULT_ZONE_ICON.to_string(),
            is_active: true,
            schedule: "All days, All hours".to_string(),
            alerts_enabled: true,
            created_at: Utc::now(),
        }
    }

    /// The zone's center point.
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Validate name length, radius bounds, and center coordinates.
    pub fn validate(&self) -> Result<()> {
        if !ZONE_NAME_LENGTH.contains(&self.name.chars().count()) {
            return Err(NestwatchError::InvalidZoneName(self.name.clone()));
        }
        if !(MIN_ZONE_RADIUS_METERS..=MAX_ZONE_RADIUS_METERS).contains(&self.radius) {
            return Err(NestwatchError::InvalidZoneRadius {
                radius: self.radius,
                min: MIN_ZONE_RADIUS_METERS,
                max: MAX_ZONE_RADIUS_METERS,
            });
        }
        if self.latitude.abs() > 90.0 || self.longitude.abs() > 180.0 {
            return Err(NestwatchError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

/// A single location report from a child's device.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocationSample {
    /// Stable identifier.
    pub id: String,
    /// Child this sample belongs to.
    pub child_id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Reported horizontal accuracy in meters.
    pub accuracy: f64,
    /// Reported speed in m/s, when the provider supplies one.
    #[serde(default)]
    pub speed: f64,
    /// Reverse-geocoded address, if available.
    pub address: Option<String>,
    /// When the fix was taken (UTC).
    pub timestamp: DateTime<Utc>,
    /// Stamped by the safety monitor: whether the sample fell in a zone.
    #[serde(default)]
    pub is_in_safe_zone: bool,
    /// Stamped by the safety monitor: name of the containing zone.
    pub safe_zone_name: Option<String>,
    /// Device battery percentage at report time, if known.
    pub battery_level: Option<u8>,
}

impl LocationSample {
    /// The sample's coordinates as a point.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Whether this sample carries a usable fix.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.point().has_fix()
    }
}

/// Direction a tracked quantity is moving over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Growing over the observation window.
    Increasing,
    /// Shrinking over the observation window.
    Decreasing,
    /// No meaningful change.
    Stable,
}

/// A detected topic the child keeps returning to.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Interest {
    /// Stable identifier.
    pub id: String,
    /// Child this interest belongs to.
    pub child_id: String,
    /// Topic name.
    #[schema(example = "dinosaurs")]
    pub topic: String,
    /// Broad category the topic falls under.
    #[schema(example = "science")]
    pub category: String,
    /// Strength of the interest on a 0-10 scale.
    #[schema(minimum = 0.0, maximum = 10.0)]
    pub interest_level: f64,
    /// How many times the topic came up.
    pub frequency: u32,
    /// Keywords associated with the topic.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Direction the interest is trending.
    pub trend_direction: Trend,
    /// Last time the child engaged with the topic (UTC).
    pub last_explored: DateTime<Utc>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

/// A sentiment-scored preference derived from conversation analysis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Preference {
    /// Stable identifier.
    pub id: String,
    /// Child this preference belongs to.
    pub child_id: String,
    /// Topic the sentiment applies to.
    pub topic: String,
    /// Sentiment score from -1.0 (negative) to 1.0 (positive).
    #[schema(minimum = -1.0, maximum = 1.0)]
    pub sentiment: f64,
    /// Analysis confidence from 0.0 to 1.0.
    #[schema(minimum = 0.0, maximum = 1.0)]
    pub confidence: f64,
    /// How many times the topic came up.
    pub frequency: u32,
    /// Broad category the topic falls under.
    pub category: String,
    /// Keywords associated with the topic.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Direction the sentiment is trending.
    pub trend: Trend,
    /// Last time the score changed (UTC).
    pub last_updated: DateTime<Utc>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

impl Preference {
    /// Label the sentiment score as positive, negative, or neutral.
    #[must_use]
    pub fn sentiment_label(&self) -> &'static str {
        if self.sentiment > POSITIVE_SENTIMENT_THRESHOLD {
            "positive"
        } else if self.sentiment < NEGATIVE_SENTIMENT_THRESHOLD {
            "negative"
        } else {
            "neutral"
        }
    }

    /// Whether the analysis confidence clears the high-confidence bar.
    #[must_use]
    pub fn is_high_confidence(&self) -> bool {
        self.confidence >= HIGH_CONFIDENCE_THRESHOLD
    }
}

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A new or strengthened interest was detected.
    Interest,
    /// A developmental or learning milestone.
    Milestone,
    /// A safety alert requiring attention.
    Alert,
    /// A periodic summary is ready.
    Summary,
    /// General activity update.
    Activity,
    /// Service-generated message.
    System,
}

/// Which surface a notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    /// Learning and interests.
    Learning,
    /// Location and safe zones.
    Safety,
    /// Summaries and reports.
    Report,
    /// Service messages.
    System,
}

/// Urgency of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Informational.
    Low,
    /// Worth seeing soon.
    Medium,
    /// Needs attention.
    High,
    /// Needs immediate attention.
    Urgent,
}

/// A notification delivered to the parent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    /// Stable identifier.
    pub id: String,
    /// Child this notification concerns.
    pub child_id: String,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// What the notification is about.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Which surface it belongs to.
    pub category: NotificationCategory,
    /// Urgency.
    pub priority: Priority,
    /// When it was generated (UTC).
    pub timestamp: DateTime<Utc>,
    /// Whether the parent has read it.
    #[serde(default)]
    pub is_read: bool,
    /// Deep link for the notification action, if any.
    pub action_url: Option<String>,
}

impl Notification {
    /// Create an unread notification stamped with the current time.
    #[must_use]
    pub fn new(
        child_id: &str,
        title: String,
        description: String,
        kind: NotificationKind,
        category: NotificationCategory,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            title,
            description,
            kind,
            category,
            priority,
            timestamp: Utc::now(),
            is_read: false,
            action_url: None,
        }
    }
}

/// A weekly digest of the child's activity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklySummary {
    /// Stable identifier.
    pub id: String,
    /// Child this summary covers.
    pub child_id: String,
    /// Start of the covered week (UTC).
    pub week_start: DateTime<Utc>,
    /// End of the covered week (UTC).
    pub week_end: DateTime<Utc>,
    /// Narrative summary text.
    pub summary_text: String,
    /// Topics the child explored this week.
    #[serde(default)]
    pub topics_explored: Vec<String>,
    /// Interests that first appeared this week.
    #[serde(default)]
    pub new_interests: Vec<String>,
    /// Suggested conversation starters for the parent.
    #[serde(default)]
    pub conversation_starters: Vec<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_zone_defaults() {
        let z = SafeZone::new("c1", "Home", 37.7749, -122.4194, 100);
        assert!(z.is_active);
        assert!(z.alerts_enabled);
        assert_eq!(z.color, DEFAULT_ZONE_COLOR);
        assert_eq!(z.icon, DEFAULT_ZONE_ICON);
        assert!(!z.id.is_empty());
        assert!(z.validate().is_ok());
    }

    #[test]
    fn test_safe_zone_radius_bounds() {
        let mut z = SafeZone::new("c1", "Home", 37.7749, -122.4194, 24);
        assert!(matches!(
            z.validate(),
            Err(NestwatchError::InvalidZoneRadius { .. })
        ));

        z.radius = 1001;
        assert!(matches!(
            z.validate(),
            Err(NestwatchError::InvalidZoneRadius { .. })
        ));

        z.radius = 25;
        assert!(z.validate().is_ok());
        z.radius = 1000;
        assert!(z.validate().is_ok());
    }

    #[test]
    fn test_safe_zone_name_and_coordinates() {
        let z = SafeZone::new("c1", "Hi", 37.7749, -122.4194, 100);
        assert!(matches!(
            z.validate(),
            Err(NestwatchError::InvalidZoneName(_))
        ));

        let z = SafeZone::new("c1", "Home", 95.0, -122.4194, 100);
        assert!(matches!(
            z.validate(),
            Err(NestwatchError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_child_validation() {
        let mut child = Child {
            id: "c1".into(),
            name: "Avani".into(),
            age: 8,
            avatar_url: None,
            parent_id: "p1".into(),
            device_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(child.validate().is_ok());

        child.age = 2;
        assert!(child.validate().is_err());
        child.age = 8;

        child.name = "A".into();
        assert!(child.validate().is_err());
    }

    #[test]
    fn test_location_sample_fix() {
        let mut sample = LocationSample {
            id: "l1".into(),
            child_id: "c1".into(),
            latitude: 37.7749,
            longitude: -122.4194,
            accuracy: 10.0,
            speed: 0.0,
            address: None,
            timestamp: Utc::now(),
            is_in_safe_zone: false,
            safe_zone_name: None,
            battery_level: Some(80),
        };
        assert!(sample.has_fix());

        sample.latitude = 0.0;
        sample.longitude = 0.0;
        assert!(!sample.has_fix());
    }

    #[test]
    fn test_sentiment_labels() {
        let mut pref = Preference {
            id: "p1".into(),
            child_id: "c1".into(),
            topic: "broccoli".into(),
            sentiment: -0.6,
            confidence: 0.8,
            frequency: 4,
            category: "food".into(),
            keywords: vec![],
            trend: Trend::Stable,
            last_updated: Utc::now(),
            created_at: Utc::now(),
        };
        assert_eq!(pref.sentiment_label(), "negative");
        assert!(pref.is_high_confidence());

        pref.sentiment = 0.5;
        assert_eq!(pref.sentiment_label(), "positive");

        pref.sentiment = 0.05;
        assert_eq!(pref.sentiment_label(), "neutral");

        pref.confidence = 0.4;
        assert!(!pref.is_high_confidence());
    }

    #[test]
    fn test_notification_wire_format_uses_type_field() {
        let note = Notification::new(
            "c1",
            "Left Home".into(),
            "Avani left the Home safe zone".into(),
            NotificationKind::Alert,
            NotificationCategory::Safety,
            Priority::High,
        );
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"type\":\"alert\""));
        assert!(json.contains("\"category\":\"safety\""));
        assert!(json.contains("\"priority\":\"high\""));
        assert!(!note.is_read);
    }

    #[test]
    fn test_safe_zone_json_round_trip() {
        let z = SafeZone::new("c1", "School", 37.76, -122.45, 250);
        let json = serde_json::to_string(&z).unwrap();
        assert!(json.contains("\"is_active\":true"));
        let back: SafeZone = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "School");
        assert_eq!(back.radius, 250);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }
}
