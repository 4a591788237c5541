/// Zone identifiers are opaque strings (UUID v4 for user reports).
pub type ZoneId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
