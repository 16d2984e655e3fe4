//! Local cache of monitored data, mirrored as JSON documents.
//!
//! One directory per child, one file per document kind. Missing files
//! read as empty collections or `None`; this keeps a fresh child id
//! usable without any setup step.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{NestwatchError, Result};
use crate::models::{Child, Interest, LocationSample, Notification, Preference, SafeZone, WeeklySummary};

/// File-backed store for cached monitoring data.
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    /// Create a store rooted at `data_dir`.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Store rooted at the platform default data location.
    ///
    /// On Linux deployments: `/var/lib/nestwatch/`.
    /// Elsewhere: the per-user data directory.
    pub fn default_location() -> Result<Self> {
        #[cfg(target_os = "linux")]
        {
            Ok(Self::new(PathBuf::from("/var/lib/nestwatch")))
        }
        #[cfg(not(target_os = "linux"))]
        {
            let dirs = directories::ProjectDirs::from("", "", "nestwatch").ok_or_else(|| {
                NestwatchError::PersistenceError("Cannot determine data directory".into())
            })?;
            Ok(Self::new(dirs.data_dir().to_path_buf()))
        }
    }

    /// Ids of every child with cached data, in directory order.
    pub fn list_children(&self) -> Result<Vec<String>> {
        let root = self.data_dir.join("children");
        if !root.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    // =========================================================================
    // PROFILE
    // =========================================================================

    /// Load a child's profile, `None` when the child is unknown.
    pub fn load_profile(&self, child_id: &str) -> Result<Option<Child>> {
        self.read_doc(&self.doc_path(child_id, "profile"))
    }

    /// Save a child's profile.
    pub fn save_profile(&self, child: &Child) -> Result<()> {
        self.write_doc(&self.doc_path(&child.id, "profile"), child)
    }

    // =========================================================================
    // SAFE ZONES
    // =========================================================================

    /// Load a child's safe zones in stored (insertion) order.
    ///
    /// Order matters: overlapping zones resolve by position in this list.
    pub fn load_zones(&self, child_id: &str) -> Result<Vec<SafeZone>> {
        Ok(self
            .read_doc(&self.doc_path(child_id, "zones"))?
            .unwrap_or_default())
    }

    /// Replace a child's safe-zone list.
    pub fn save_zones(&self, child_id: &str, zones: &[SafeZone]) -> Result<()> {
        self.write_doc(&self.doc_path(child_id, "zones"), &zones)
    }

    // =========================================================================
    // LOCATION HISTORY
    // =========================================================================

    /// Load location history, most recent first.
    pub fn load_locations(&self, child_id: &str) -> Result<Vec<LocationSample>> {
        Ok(self
            .read_doc(&self.doc_path(child_id, "locations"))?
            .unwrap_or_default())
    }

    /// The most recent location sample, if any.
    pub fn latest_location(&self, child_id: &str) -> Result<Option<LocationSample>> {
        Ok(self.load_locations(child_id)?.into_iter().next())
    }

    /// Prepend a sample to the history, trimming to `limit` entries.
    pub fn push_location(
        &self,
        child_id: &str,
        sample: LocationSample,
        limit: usize,
    ) -> Result<()> {
        let mut history = self.load_locations(child_id)?;
        history.insert(0, sample);
        history.truncate(limit);
        self.write_doc(&self.doc_path(child_id, "locations"), &history)
    }

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    /// Load notifications, most recent first.
    pub fn load_notifications(&self, child_id: &str) -> Result<Vec<Notification>> {
        Ok(self
            .read_doc(&self.doc_path(child_id, "notifications"))?
            .unwrap_or_default())
    }

    /// Prepend a notification.
    pub fn push_notification(&self, child_id: &str, notification: Notification) -> Result<()> {
        let mut notes = self.load_notifications(child_id)?;
        notes.insert(0, notification);
        self.write_doc(&self.doc_path(child_id, "notifications"), &notes)
    }

    /// Mark a notification read and return the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`NestwatchError::NotificationNotFound`] when no
    /// notification with that id exists for the child.
    pub fn mark_notification_read(
        &self,
        child_id: &str,
        notification_id: &str,
    ) -> Result<Notification> {
        let mut notes = self.load_notifications(child_id)?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| NestwatchError::NotificationNotFound(notification_id.to_string()))?;
        note.is_read = true;
        let updated = note.clone();
        self.write_doc(&self.doc_path(child_id, "notifications"), &notes)?;
        Ok(updated)
    }

    // =========================================================================
    // INSIGHTS
    // =========================================================================

    /// Load detected interests.
    pub fn load_interests(&self, child_id: &str) -> Result<Vec<Interest>> {
        Ok(self
            .read_doc(&self.doc_path(child_id, "interests"))?
            .unwrap_or_default())
    }

    /// Replace the interests document.
    pub fn save_interests(&self, child_id: &str, interests: &[Interest]) -> Result<()> {
        self.write_doc(&self.doc_path(child_id, "interests"), &interests)
    }

    /// Load sentiment preferences.
    pub fn load_preferences(&self, child_id: &str) -> Result<Vec<Preference>> {
        Ok(self
            .read_doc(&self.doc_path(child_id, "preferences"))?
            .unwrap_or_default())
    }

    /// Replace the preferences document.
    pub fn save_preferences(&self, child_id: &str, preferences: &[Preference]) -> Result<()> {
        self.write_doc(&self.doc_path(child_id, "preferences"), &preferences)
    }

    /// Load the latest weekly summary, `None` when none was generated yet.
    pub fn load_summary(&self, child_id: &str) -> Result<Option<WeeklySummary>> {
        self.read_doc(&self.doc_path(child_id, "summary"))
    }

    /// Save the weekly summary.
    pub fn save_summary(&self, summary: &WeeklySummary) -> Result<()> {
        self.write_doc(&self.doc_path(&summary.child_id, "summary"), summary)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn doc_path(&self, child_id: &str, doc: &str) -> PathBuf {
        self.data_dir
            .join("children")
            .join(child_id)
            .join(format!("{doc}.json"))
    }

    fn read_doc<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let value = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    fn write_doc<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationCategory, NotificationKind, Priority};
    use chrono::Utc;
    use tempfile::TempDir;

    fn store() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    fn sample(id: &str) -> LocationSample {
        LocationSample {
            id: id.into(),
            child_id: "c1".into(),
            latitude: 37.7749,
            longitude: -122.4194,
            accuracy: 10.0,
            speed: 0.0,
            address: None,
            timestamp: Utc::now(),
            is_in_safe_zone: false,
            safe_zone_name: None,
            battery_level: None,
        }
    }

    #[test]
    fn test_missing_documents_read_as_empty() {
        let (_dir, storage) = store();
        assert!(storage.load_profile("nobody").unwrap().is_none());
        assert!(storage.load_zones("nobody").unwrap().is_empty());
        assert!(storage.load_locations("nobody").unwrap().is_empty());
        assert!(storage.load_notifications("nobody").unwrap().is_empty());
        assert!(storage.load_summary("nobody").unwrap().is_none());
        assert!(storage.list_children().unwrap().is_empty());
    }

    #[test]
    fn test_profile_round_trip() {
        let (_dir, storage) = store();
        let child = Child {
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
        storage.save_profile(&child).unwrap();

        let loaded = storage.load_profile("c1").unwrap().unwrap();
        assert_eq!(loaded.name, "Avani");
        assert_eq!(storage.list_children().unwrap(), vec!["c1".to_string()]);
    }

    #[test]
    fn test_zones_preserve_insertion_order() {
        let (_dir, storage) = store();
        let zones = vec![
            SafeZone::new("c1", "Inner", 0.5, 0.5, 100),
            SafeZone::new("c1", "Outer", 0.5, 0.5, 1000),
        ];
        storage.save_zones("c1", &zones).unwrap();

        let loaded = storage.load_zones("c1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Inner");
        assert_eq!(loaded[1].name, "Outer");
    }

    #[test]
    fn test_location_history_is_capped_and_newest_first() {
        let (_dir, storage) = store();
        for i in 0..5 {
            storage
                .push_location("c1", sample(&format!("l{i}")), 3)
                .unwrap();
        }

        let history = storage.load_locations("c1").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].id, "l4");
        assert_eq!(history[2].id, "l2");

        let latest = storage.latest_location("c1").unwrap().unwrap();
        assert_eq!(latest.id, "l4");
    }

    #[test]
    fn test_mark_notification_read() {
        let (_dir, storage) = store();
        let note = Notification::new(
            "c1",
            "Left Home".into(),
            "Your child left the Home safe zone".into(),
            NotificationKind::Alert,
            NotificationCategory::Safety,
            Priority::High,
        );
        let id = note.id.clone();
        storage.push_notification("c1", note).unwrap();

        let updated = storage.mark_notification_read("c1", &id).unwrap();
        assert!(updated.is_read);

        let reloaded = storage.load_notifications("c1").unwrap();
        assert!(reloaded[0].is_read);

        let missing = storage.mark_notification_read("c1", "nope");
        assert!(matches!(
            missing,
            Err(NestwatchError::NotificationNotFound(_))
        ));
    }
}
