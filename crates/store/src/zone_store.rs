use indexmap::IndexMap;
use nofly_core::drone_zone::{
    normalize_optional_text, DroneZone, InsertZone, ZoneFilter, ZonePatch, ZoneStats, ZoneStatus,
};
use nofly_core::types::ZoneId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::seed::seed_zones;

/// Authoritative collection of zone reports.
///
/// Each operation takes the lock once and completes without awaiting
/// anything else, so every call is atomic. Designed to be wrapped in `Arc`
/// and shared through application state.
pub struct ZoneStore {
    zones: RwLock<IndexMap<ZoneId, DroneZone>>,
}

impl ZoneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(IndexMap::new()),
        }
    }

    /// Create a store holding the reference seed zones.
    pub fn seeded() -> Self {
        let zones = seed_zones()
            .into_iter()
            .map(|zone| (zone.id.clone(), zone))
            .collect();
        Self {
            zones: RwLock::new(zones),
        }
    }

    /// Store a validated report as a new `Pending` zone.
    ///
    /// Empty `details`/`emergency_contact` are stored as null.
    pub async fn create(&self, input: InsertZone) -> DroneZone {
        let mut zones = self.zones.write().await;

        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !zones.contains_key(&candidate) {
                break candidate;
            }
        };
        let now = chrono::Utc::now();

        let zone = DroneZone {
            id: id.clone(),
            title: input.title,
            latitude: input.latitude,
            longitude: input.longitude,
            reason: input.reason,
            details: normalize_optional_text(input.details),
            emergency_contact: normalize_optional_text(input.emergency_contact),
            status: ZoneStatus::Pending,
            zone_type: input.zone_type,
            created_at: now,
            updated_at: now,
        };
        zones.insert(id, zone.clone());

        tracing::debug!(zone_id = %zone.id, total = zones.len(), "Zone inserted");
        zone
    }

    /// Look up a zone by id.
    pub async fn get(&self, id: &str) -> Option<DroneZone> {
        self.zones.read().await.get(id).cloned()
    }

    /// All zones in insertion order.
    pub async fn list(&self) -> Vec<DroneZone> {
        self.zones.read().await.values().cloned().collect()
    }

    /// Zones matching the filter, in insertion order.
    pub async fn list_filtered(&self, filter: &ZoneFilter) -> Vec<DroneZone> {
        self.zones
            .read()
            .await
            .values()
            .filter(|zone| filter.matches(zone))
            .cloned()
            .collect()
    }

    /// Merge a patch into an existing zone.
    ///
    /// Returns `None` if no zone has that id. The patch is expected to have
    /// been validated by the caller.
    pub async fn update(&self, id: &str, patch: ZonePatch) -> Option<DroneZone> {
        let mut zones = self.zones.write().await;
        let zone = zones.get_mut(id)?;
        zone.apply_patch(patch, chrono::Utc::now());
        Some(zone.clone())
    }

    /// Remove a zone. Returns whether a zone was actually removed.
    pub async fn delete(&self, id: &str) -> bool {
        self.zones.write().await.shift_remove(id).is_some()
    }

    /// Counts by zone type and status.
    pub async fn stats(&self) -> ZoneStats {
        ZoneStats::from_zones(self.zones.read().await.values())
    }

    /// Number of stored zones.
    pub async fn len(&self) -> usize {
        self.zones.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ZoneStore {
    fn default() -> Self {
        Self::new()
    }
}
