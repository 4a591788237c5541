//! Drone zone record model, validation, and partial-update merge.
//!
//! A zone is a point on the map with a restriction category. User reports
//! enter as [`ZoneInput`] (untrusted wire form), become an [`InsertZone`]
//! once validated, and are stored as [`DroneZone`]. Updates arrive as a
//! [`ZonePatch`] and are merged by [`DroneZone::apply_patch`].

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;
use crate::types::{Timestamp, ZoneId};

// ---------------------------------------------------------------------------
// Coordinate bounds
// ---------------------------------------------------------------------------

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

// ---------------------------------------------------------------------------
// Reason categories
// ---------------------------------------------------------------------------

pub const REASON_AIRPORT: &str = "airport";
pub const REASON_MILITARY: &str = "military";
pub const REASON_HOSPITAL: &str = "hospital";
pub const REASON_PRISON: &str = "prison";
pub const REASON_POWER: &str = "power";
pub const REASON_NATURE: &str = "nature";
pub const REASON_EVENT: &str = "event";
pub const REASON_PRIVATE: &str = "private";
pub const REASON_OTHER: &str = "other";

/// Restriction categories offered by the reporting form.
///
/// `reason` is stored as free text; this list is informational and is not
/// enforced by validation.
pub const REASON_CATEGORIES: &[&str] = &[
    REASON_AIRPORT,
    REASON_MILITARY,
    REASON_HOSPITAL,
    REASON_PRISON,
    REASON_POWER,
    REASON_NATURE,
    REASON_EVENT,
    REASON_PRIVATE,
    REASON_OTHER,
];

// ---------------------------------------------------------------------------
// Zone type
// ---------------------------------------------------------------------------

pub const ZONE_TYPE_RESTRICTED: &str = "restricted";
pub const ZONE_TYPE_CONTROLLED: &str = "controlled";
pub const ZONE_TYPE_PROTECTED: &str = "protected";

pub const VALID_ZONE_TYPES: &[&str] = &[
    ZONE_TYPE_RESTRICTED,
    ZONE_TYPE_CONTROLLED,
    ZONE_TYPE_PROTECTED,
];

/// Severity of a flight restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Restricted,
    Controlled,
    Protected,
}

impl ZoneType {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ZONE_TYPE_RESTRICTED => Ok(Self::Restricted),
            ZONE_TYPE_CONTROLLED => Ok(Self::Controlled),
            ZONE_TYPE_PROTECTED => Ok(Self::Protected),
            _ => Err(format!(
                "Invalid zone type '{s}'. Must be one of: {}",
                VALID_ZONE_TYPES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restricted => ZONE_TYPE_RESTRICTED,
            Self::Controlled => ZONE_TYPE_CONTROLLED,
            Self::Protected => ZONE_TYPE_PROTECTED,
        }
    }
}

// ---------------------------------------------------------------------------
// Review status
// ---------------------------------------------------------------------------

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_REJECTED: &str = "rejected";

pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_ACTIVE, STATUS_REJECTED];

/// Review state of a report. New reports always start as `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    #[default]
    Pending,
    Active,
    Rejected,
}

impl ZoneStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Active => STATUS_ACTIVE,
            Self::Rejected => STATUS_REJECTED,
        }
    }
}

// ---------------------------------------------------------------------------
// Records and DTOs
// ---------------------------------------------------------------------------

/// A stored zone report, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneZone {
    pub id: ZoneId,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reason: String,
    pub details: Option<String>,
    pub emergency_contact: Option<String>,
    pub status: ZoneStatus,
    pub zone_type: ZoneType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Untrusted body of a new zone report.
///
/// Missing text fields deserialize as empty strings so that they surface as
/// validation messages rather than JSON shape errors.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ZoneInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(
        required(message = "Latitude is required"),
        range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "Longitude is required"),
        range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
    pub details: Option<String>,
    pub emergency_contact: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Zone type is required"))]
    pub zone_type: String,
}

/// A validated zone report, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertZone {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reason: String,
    pub details: Option<String>,
    pub emergency_contact: Option<String>,
    pub zone_type: ZoneType,
}

/// Partial update of a zone. Every field is optional.
///
/// `id`, `createdAt` and `updatedAt` are accepted on the wire so clients can
/// send back a full record, but [`DroneZone::apply_patch`] discards them.
/// `details` and `emergencyContact` distinguish "absent" (`None`) from an
/// explicit `null` (`Some(None)`), which clears the field.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ZonePatch {
    pub id: Option<serde_json::Value>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub longitude: Option<f64>,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub details: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub emergency_contact: Option<Option<String>>,
    pub status: Option<ZoneStatus>,
    pub zone_type: Option<ZoneType>,
    pub created_at: Option<serde_json::Value>,
    pub updated_at: Option<serde_json::Value>,
}

/// Optional list filters for zone queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneFilter {
    pub status: Option<ZoneStatus>,
    pub zone_type: Option<ZoneType>,
}

impl ZoneFilter {
    pub fn matches(&self, zone: &DroneZone) -> bool {
        self.status.map_or(true, |s| s == zone.status)
            && self.zone_type.map_or(true, |t| t == zone.zone_type)
    }
}

/// Counts for the map overview panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStats {
    pub total: usize,
    pub by_zone_type: ZoneTypeCounts,
    pub by_status: StatusCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneTypeCounts {
    pub restricted: usize,
    pub controlled: usize,
    pub protected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub active: usize,
    pub rejected: usize,
}

impl ZoneStats {
    /// Tally a set of zones.
    pub fn from_zones<'a>(zones: impl IntoIterator<Item = &'a DroneZone>) -> Self {
        let mut stats = Self::default();
        for zone in zones {
            stats.total += 1;
            match zone.zone_type {
                ZoneType::Restricted => stats.by_zone_type.restricted += 1,
                ZoneType::Controlled => stats.by_zone_type.controlled += 1,
                ZoneType::Protected => stats.by_zone_type.protected += 1,
            }
            match zone.status {
                ZoneStatus::Pending => stats.by_status.pending += 1,
                ZoneStatus::Active => stats.by_status.active += 1,
                ZoneStatus::Rejected => stats.by_status.rejected += 1,
            }
        }
        stats
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Rust field name to wire name, in the order messages are reported.
const FIELD_NAMES: &[(&str, &str)] = &[
    ("title", "title"),
    ("latitude", "latitude"),
    ("longitude", "longitude"),
    ("reason", "reason"),
    ("zone_type", "zoneType"),
];

/// Validate a new zone report and convert it into an [`InsertZone`].
///
/// All failing rules are reported together in one message, e.g.
/// `Validation error: Title is required at "title"; Latitude must be
/// between -90 and 90 at "latitude"`.
pub fn validate_zone_input(input: ZoneInput) -> Result<InsertZone, CoreError> {
    let mut messages = match input.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => describe_errors(&errors),
    };

    check_finite("latitude", input.latitude, &mut messages);
    check_finite("longitude", input.longitude, &mut messages);

    let zone_type = if input.zone_type.is_empty() {
        None
    } else {
        match ZoneType::from_str_value(&input.zone_type) {
            Ok(zone_type) => Some(zone_type),
            Err(msg) => {
                messages.push(format!("{msg} at \"zoneType\""));
                None
            }
        }
    };

    match (input.latitude, input.longitude, zone_type) {
        (Some(latitude), Some(longitude), Some(zone_type)) if messages.is_empty() => {
            Ok(InsertZone {
                title: input.title,
                latitude,
                longitude,
                reason: input.reason,
                details: input.details,
                emergency_contact: input.emergency_contact,
                zone_type,
            })
        }
        _ => Err(validation_error(messages)),
    }
}

/// Validate the fields present in a patch against the same rules as creation.
///
/// `status` and `zoneType` are closed enums, so unknown values are already
/// rejected when the patch is deserialized.
pub fn validate_zone_patch(patch: &ZonePatch) -> Result<(), CoreError> {
    let mut messages = match patch.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => describe_errors(&errors),
    };

    check_finite("latitude", patch.latitude, &mut messages);
    check_finite("longitude", patch.longitude, &mut messages);

    if messages.is_empty() {
        Ok(())
    } else {
        Err(validation_error(messages))
    }
}

fn describe_errors(errors: &ValidationErrors) -> Vec<String> {
    let field_errors = errors.field_errors();
    FIELD_NAMES
        .iter()
        .filter_map(|(field, wire)| field_errors.get(*field).map(|errs| (wire, errs)))
        .flat_map(|(wire, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_deref()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                format!("{message} at \"{wire}\"")
            })
        })
        .collect()
}

/// Range checks pass NaN through, so reject non-finite values separately.
fn check_finite(field: &str, value: Option<f64>, messages: &mut Vec<String>) {
    if let Some(v) = value {
        if !v.is_finite() {
            messages.push(format!("{field} must be a finite number at \"{field}\""));
        }
    }
}

fn validation_error(messages: Vec<String>) -> CoreError {
    CoreError::Validation(format!("Validation error: {}", messages.join("; ")))
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Treat an empty optional text field as absent.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl DroneZone {
    /// Merge a patch into this record and refresh `updated_at`.
    ///
    /// `id` and `created_at` never change, whatever the patch carries.
    pub fn apply_patch(&mut self, patch: ZonePatch, now: Timestamp) {
        let ZonePatch {
            id: _,
            created_at: _,
            updated_at: _,
            title,
            latitude,
            longitude,
            reason,
            details,
            emergency_contact,
            status,
            zone_type,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(latitude) = latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = longitude {
            self.longitude = longitude;
        }
        if let Some(reason) = reason {
            self.reason = reason;
        }
        if let Some(details) = details {
            self.details = normalize_optional_text(details);
        }
        if let Some(contact) = emergency_contact {
            self.emergency_contact = normalize_optional_text(contact);
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(zone_type) = zone_type {
            self.zone_type = zone_type;
        }

        self.updated_at = now.max(self.created_at);
    }
}

/// Deserialize a present field as `Some(value)`, keeping an explicit `null`
/// as `Some(None)`. Combined with `#[serde(default)]`, absence stays `None`.
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
