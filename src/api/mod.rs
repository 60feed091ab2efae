//! HTTP host for the widget.
//!
//! The router wraps a single [`SessionHandle`], so every page served by one
//! process shares the same controller: a search, a clear or the busy guard
//! in one tab is seen by every other tab. Run one process per user when
//! pages must be independent.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::session::SessionHandle;

pub mod handlers;
pub mod models;
pub mod page;

pub fn create_router(session: SessionHandle) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index_handler))
        // API routes
        .route("/api/view", get(handlers::view_handler))
        .route("/api/events", post(handlers::event_handler))
        .with_state(session)
        // Browser adapter script
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
}
