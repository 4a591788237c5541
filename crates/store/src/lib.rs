//! In-memory storage for drone zone reports.
//!
//! State lives for the lifetime of the process only and is reseeded with the
//! reference zones from [`seed`] on every start.

pub mod seed;
pub mod zone_store;

pub use zone_store::ZoneStore;
