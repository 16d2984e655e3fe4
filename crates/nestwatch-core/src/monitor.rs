//! Safe-zone evaluation for incoming location samples.
//!
//! The monitor is the glue between the pure geometry in [`crate::geo`] and
//! the notification stream: it stamps each sample with its containment
//! state, compares against the previous sample, and emits entry/exit
//! alerts for zones that have alerts enabled. It holds no state of its
//! own; the caller supplies the zone snapshot and the previous sample.

use tracing::debug;

use crate::error::{NestwatchError, Result};
use crate::geo::{self, GeoPoint};
use crate::models::{
    LocationSample, Notification, NotificationCategory, NotificationKind, Priority, SafeZone,
};

/// Distance and direction to a zone the child is not currently inside.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestZone {
    /// Name of the nearest active zone.
    pub name: String,
    /// Distance from the sample to the zone center, in meters.
    pub distance_meters: f64,
    /// Initial bearing from the sample to the zone center, in degrees.
    pub bearing_degrees: f64,
}

impl NearestZone {
    /// Compass direction toward the zone.
    #[must_use]
    pub fn cardinal_direction(&self) -> &'static str {
        geo::cardinal_direction(self.bearing_degrees)
    }
}

/// Result of evaluating one location sample against a child's zones.
#[derive(Debug, Clone)]
pub struct ZoneEvaluation {
    /// The input sample, stamped with `is_in_safe_zone` / `safe_zone_name`.
    pub sample: LocationSample,
    /// The containing zone, when the sample fell inside one.
    pub zone: Option<SafeZone>,
    /// Entry/exit alerts produced by this sample.
    pub alerts: Vec<Notification>,
    /// Nearest active zone, populated when the sample is outside all zones.
    pub nearest: Option<NearestZone>,
}

/// Evaluates location samples against safe zones and raises alerts.
pub struct SafetyMonitor;

impl SafetyMonitor {
    /// Evaluate `sample` against `zones`, using `previous` to detect
    /// entry and exit transitions.
    ///
    /// Zones are checked in input order; the first containing zone wins,
    /// so overlaps resolve deterministically. Inactive zones are never
    /// matched and never produce alerts.
    ///
    /// # Errors
    ///
    /// Returns [`NestwatchError::NoLocationFix`] when the sample has no
    /// usable coordinates. This is a normal validation outcome for a
    /// device without GPS signal, not a system failure.
    pub fn evaluate(
        mut sample: LocationSample,
        zones: &[SafeZone],
        previous: Option<&LocationSample>,
    ) -> Result<ZoneEvaluation> {
        if !sample.has_fix() {
            return Err(NestwatchError::NoLocationFix);
        }

        let point = sample.point();
        let containing = geo::find_containing_zone(point, zones).cloned();

        sample.is_in_safe_zone = containing.is_some();
        sample.safe_zone_name = containing.as_ref().map(|z| z.name.clone());

        let previous_zone_name = previous.and_then(|p| p.safe_zone_name.as_deref());
        let alerts = Self::transition_alerts(
            &sample,
            zones,
            containing.as_ref(),
            previous_zone_name,
        );

        let nearest = if containing.is_none() {
            Self::nearest_active_zone(point, zones)
        } else {
            None
        };

        debug!(
            child_id = %sample.child_id,
            in_zone = sample.is_in_safe_zone,
            zone = sample.safe_zone_name.as_deref().unwrap_or("-"),
            alerts = alerts.len(),
            "evaluated location sample"
        );

        Ok(ZoneEvaluation {
            sample,
            zone: containing,
            alerts,
            nearest,
        })
    }

    /// Build entry/exit notifications for a containment change.
    fn transition_alerts(
        sample: &LocationSample,
        zones: &[SafeZone],
        containing: Option<&SafeZone>,
        previous_zone_name: Option<&str>,
    ) -> Vec<Notification> {
        let current_name = containing.map(|z| z.name.as_str());
        if current_name == previous_zone_name {
            return Vec::new();
        }

        let mut alerts = Vec::new();

        // Exit alert for the zone left behind, if it still exists and
        // wants alerts. A renamed or deleted zone produces nothing.
        if let Some(prev_name) = previous_zone_name {
            let exited = zones.iter().find(|z| z.name == prev_name);
            if exited.map_or(true, |z| z.alerts_enabled) {
                alerts.push(Notification::new(
                    &sample.child_id,
                    format!("Left {prev_name}"),
                    format!("Your child left the {prev_name} safe zone"),
                    NotificationKind::Alert,
                    NotificationCategory::Safety,
                    Priority::High,
                ));
            }
        }

        if let Some(zone) = containing {
            if zone.alerts_enabled {
                alerts.push(Notification::new(
                    &sample.child_id,
                    format!("Arrived at {}", zone.name),
                    format!("Your child entered the {} safe zone", zone.name),
                    NotificationKind::Activity,
                    NotificationCategory::Safety,
                    Priority::Low,
                ));
            }
        }

        alerts
    }

    /// Closest active zone by center distance, for display when outside.
    fn nearest_active_zone(point: GeoPoint, zones: &[SafeZone]) -> Option<NearestZone> {
        zones
            .iter()
            .filter(|z| z.is_active)
            .map(|z| {
                let center = z.center();
                NearestZone {
                    name: z.name.clone(),
                    distance_meters: geo::distance_meters(point, center),
                    bearing_degrees: geo::bearing_degrees(point, center),
                }
            })
            .min_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
    }
}
