//! Domain model for drone no-fly zone reports.
//!
//! This crate has no I/O: it defines the zone record, its wire and patch
//! forms, validation, and the patch merge. Storage lives in `nofly-store`
//! and the HTTP surface in `nofly-api`.

pub mod drone_zone;
pub mod error;
pub mod types;
