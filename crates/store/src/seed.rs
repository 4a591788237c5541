//! Reference zones loaded at startup.
//!
//! These are pre-vetted restrictions, so they start out `Active` rather
//! than `Pending` like user reports.

use chrono::{TimeZone, Utc};
use nofly_core::drone_zone::{
    DroneZone, ZoneStatus, ZoneType, REASON_AIRPORT, REASON_HOSPITAL, REASON_NATURE,
};
use nofly_core::types::Timestamp;

/// Build the fixed set of seed zones, in insertion order.
pub fn seed_zones() -> Vec<DroneZone> {
    vec![
        seed_zone(
            "1",
            "Auckland International Airport",
            (-36.8485, 174.7633),
            REASON_AIRPORT,
            Some("Flight operations active 24/7. Minimum 5km clearance required for all unmanned aircraft."),
            None,
            ZoneType::Restricted,
            seed_date(2024, 1, 15),
        ),
        seed_zone(
            "2",
            "Wellington Hospital Helipad",
            (-41.3054, 174.7794),
            REASON_HOSPITAL,
            Some("Emergency helicopter operations. Contact hospital security before flights."),
            Some("+64-4-385-5999"),
            ZoneType::Controlled,
            seed_date(2024, 1, 12),
        ),
        seed_zone(
            "3",
            "Christchurch Airport",
            (-43.4894, 172.5320),
            REASON_AIRPORT,
            Some("Major commercial airport. No drone flights within 4km radius."),
            None,
            ZoneType::Restricted,
            seed_date(2024, 1, 10),
        ),
        seed_zone(
            "4",
            "Fiordland National Park",
            (-45.4000, 167.7000),
            REASON_NATURE,
            Some("Protected wildlife area. Special permits required for aerial photography."),
            None,
            ZoneType::Protected,
            seed_date(2024, 1, 8),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_zone(
    id: &str,
    title: &str,
    (latitude, longitude): (f64, f64),
    reason: &str,
    details: Option<&str>,
    emergency_contact: Option<&str>,
    zone_type: ZoneType,
    at: Timestamp,
) -> DroneZone {
    DroneZone {
        id: id.to_string(),
        title: title.to_string(),
        latitude,
        longitude,
        reason: reason.to_string(),
        details: details.map(str::to_string),
        emergency_contact: emergency_contact.map(str::to_string),
        status: ZoneStatus::Active,
        zone_type,
        created_at: at,
        updated_at: at,
    }
}

/// Midnight UTC on the given date.
fn seed_date(year: i32, month: u32, day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
