//! # REST Routes
//!
//! Router construction.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Builds the REST router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/api/user-profile/{user_id}", get(handlers::get_user_profile))
        .route("/api/user-profile", get(handlers::missing_user_id))
        .route("/api/user-profile/", get(handlers::missing_user_id))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found);
    with_middleware(routes).with_state(state)
}

/// Panics become a JSON `500`; every request is traced.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
}
