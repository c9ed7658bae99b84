//! HTTP API surface.
//!
//! Public routes serve the registry and accept claims; admin routes sit
//! behind the bearer middleware in [`auth`].

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::AppContext;

/// Assemble the full router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let admin = Router::new()
        .route("/admin/gifts", get(handlers::list_gifts_admin))
        .route("/admin/gifts/{id}/unclaim", post(handlers::unclaim_gift))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_admin,
        ));

    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/gifts", get(handlers::list_gifts))
        .route("/gifts/{id}", get(handlers::get_gift))
        .route("/gifts/{id}/claim", post(handlers::claim_gift))
        .merge(admin);

    Router::new()
        .nest("/api/v1", api)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
