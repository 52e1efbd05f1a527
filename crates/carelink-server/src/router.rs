use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, clients, enrollments, programs};
use crate::state::AppState;

/// Build the axum router with every Carelink endpoint.
///
/// The dashboard is served from another origin, so CORS stays permissive,
/// as the original deployment's middleware was.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/clients", get(clients::list).post(clients::register))
        .route("/api/clients/search", get(clients::search))
        .route(
            "/api/clients/:id",
            get(clients::get).put(clients::update).delete(clients::remove),
        )
        .route("/api/programs", get(programs::list).post(programs::create))
        .route(
            "/api/programs/:id",
            get(programs::get)
                .put(programs::update)
                .delete(programs::remove),
        )
        .route(
            "/api/enrollments",
            get(enrollments::list).post(enrollments::enroll),
        )
        .route(
            "/api/enrollments/client/:client_id",
            get(enrollments::list_by_client),
        )
        .route(
            "/api/enrollments/:id",
            get(enrollments::get)
                .put(enrollments::update)
                .delete(enrollments::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
