pub mod health;
pub mod measurements;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Assembles the full request surface. The CORS layer sits outside the
/// static fallback as well as the API routes, so dashboard assets and API
/// responses carry the same open-origin headers.
pub fn router(state: AppState, static_fallback: Router) -> Router {
    Router::new()
        .merge(health::router())
        .nest(
            "/api",
            Router::new()
                .merge(measurements::router())
                .merge(crate::openapi::router()),
        )
        .fallback_service(static_fallback)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
