pub mod drone_zone;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /drone-zones                  list, create
/// /drone-zones/stats            counts by type and status
/// /drone-zones/{id}             get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/drone-zones", drone_zone::router())
}
