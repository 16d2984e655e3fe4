//! # nestwatch-core
//!
//! Core library for the nestwatch child location-monitoring service.
//!
//! This crate provides:
//! - Great-circle geometry and safe-zone containment checks
//! - Safety monitoring (zone entry/exit detection and alerting)
//! - Domain models for children, zones, locations, and insights
//! - A JSON-file cache of monitored data
//! - Configuration management
//!
//! ## Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`geo`] - Haversine distance, bearing, bounding boxes, containment
//! - [`monitor`] - Zone transition detection over incoming samples
//! - [`models`] - Shared domain types and validation
//! - [`store`] - Per-child JSON document store
//! - [`config`] - Service configuration loading, saving, and validation
//! - [`timefmt`] - Timestamp display formatting
//! - [`error`] - Unified error types for the crate

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod monitor;
pub mod store;
pub mod timefmt;

// Re-export primary types for convenience
pub use config::{is_valid_hex_color, is_valid_id, is_valid_timezone, NestwatchConfig};
pub use error::{NestwatchError, Result};
pub use geo::{
    bearing_degrees, bounding_box, cardinal_direction, distance_meters, find_containing_zone,
    is_within_zone, AccuracyRating, BoundingBox, GeoPoint, MovementStatus, EARTH_RADIUS_METERS,
};
pub use models::{
    Child, Interest, LocationSample, Notification, NotificationCategory, NotificationKind,
    Preference, Priority, SafeZone, Trend, WeeklySummary,
};
pub use monitor::{NearestZone, SafetyMonitor, ZoneEvaluation};
pub use store::Storage;
