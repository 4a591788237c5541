use axum::routing::get;
use axum::Router;

use crate::handlers::drone_zone;
use crate::state::AppState;

/// Zone routes, registered as `/api/drone-zones`.
///
/// ```text
/// GET    /          list_zones
/// POST   /          create_zone
/// GET    /stats     zone_stats
/// GET    /{id}      get_zone
/// PATCH  /{id}      update_zone
/// DELETE /{id}      delete_zone
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(drone_zone::list_zones).post(drone_zone::create_zone),
        )
        .route("/stats", get(drone_zone::zone_stats))
        .route(
            "/{id}",
            get(drone_zone::get_zone)
                .patch(drone_zone::update_zone)
                .delete(drone_zone::delete_zone),
        )
}
