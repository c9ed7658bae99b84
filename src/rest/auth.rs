//! Administrator bearer-token middleware.
//!
//! Gates the unclaim operation and the claimed-by view. The token lives in
//! `giftd.toml` under `[admin]` and is compared against the
//! `Authorization: Bearer <token>` header. Config validation guarantees the
//! secret is non-empty, so there is no auth-disabled mode: a missing or
//! wrong token is rejected before any state mutation.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::AppContext;

pub async fn require_admin(
    State(ctx): State<Arc<AppContext>>,
    req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(t) if t == ctx.config.admin.token => next.run(req).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid or missing admin token" })),
        )
            .into_response(),
    }
}
