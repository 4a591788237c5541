//! Handlers for drone zone reports.
//!
//! Bodies are returned unwrapped (a record or an array of records) and
//! errors as `{ "message", "code" }`, which is what the map client expects.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use nofly_core::drone_zone::{
    validate_zone_input, validate_zone_patch, DroneZone, ZoneFilter, ZoneInput, ZonePatch,
};
use nofly_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::extractors::{extract_json, extract_query};
use crate::response::MessageResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn zone_not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Zone", id })
}

/* --------------------------------------------------------------------------
Zone CRUD
-------------------------------------------------------------------------- */

/// GET /api/drone-zones
///
/// List zones in insertion order, optionally filtered by `status` and
/// `zoneType`.
pub async fn list_zones(
    State(state): State<AppState>,
    params: Result<Query<ZoneFilter>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let filter = extract_query(params)?;
    let zones = state.store.list_filtered(&filter).await;
    Ok(Json(zones))
}

/// GET /api/drone-zones/stats
///
/// Totals by zone type and review status.
pub async fn zone_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(state.store.stats().await))
}

/// GET /api/drone-zones/{id}
pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DroneZone>> {
    let zone = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| zone_not_found(id))?;
    Ok(Json(zone))
}

/// POST /api/drone-zones
///
/// Validate and store a new report. The stored zone is always `pending`.
pub async fn create_zone(
    State(state): State<AppState>,
    body: Result<Json<ZoneInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let input = extract_json(body)?;
    let insert = validate_zone_input(input)?;

    let zone = state.store.create(insert).await;

    tracing::info!(
        zone_id = %zone.id,
        zone_type = zone.zone_type.as_str(),
        reason = %zone.reason,
        "Drone zone reported"
    );

    Ok((StatusCode::CREATED, Json(zone)))
}

/// PATCH /api/drone-zones/{id}
///
/// Apply a partial update. Provided fields are validated with the same rules
/// as creation; `id` and `createdAt` in the body are ignored.
pub async fn update_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ZonePatch>, JsonRejection>,
) -> AppResult<Json<DroneZone>> {
    let patch = extract_json(body)?;
    validate_zone_patch(&patch)?;

    let zone = state
        .store
        .update(&id, patch)
        .await
        .ok_or_else(|| zone_not_found(id))?;

    tracing::info!(
        zone_id = %zone.id,
        status = zone.status.as_str(),
        "Drone zone updated"
    );

    Ok(Json(zone))
}

/// DELETE /api/drone-zones/{id}
pub async fn delete_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete(&id).await {
        return Err(zone_not_found(id));
    }

    tracing::info!(zone_id = %id, "Drone zone deleted");

    Ok(Json(MessageResponse::new("Zone deleted successfully")))
}
