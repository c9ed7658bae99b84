//! Route handlers — thin mapping from registry outcomes to HTTP responses.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

use crate::registry::{ClaimOutcome, GiftAdminView, GiftView, RegistryError, UnclaimOutcome};
use crate::AppContext;

/// GET /api/v1/health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /api/v1/gifts — public registry view.
pub async fn list_gifts(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.registry.list().await {
        Ok(items) => {
            let views: Vec<GiftView> = items.into_iter().map(GiftView::from).collect();
            Json(views).into_response()
        }
        Err(e) => store_error(e),
    }
}

/// GET /api/v1/gifts/{id} — single item, public view.
pub async fn get_gift(State(ctx): State<Arc<AppContext>>, Path(id): Path<i64>) -> Response {
    match ctx.registry.get(id).await {
        Ok(Some(item)) => Json(GiftView::from(item)).into_response(),
        Ok(None) => not_found(id),
        Err(e) => store_error(e),
    }
}

/// GET /api/v1/admin/gifts — registry view with claim markers (admin-gated).
pub async fn list_gifts_admin(State(ctx): State<Arc<AppContext>>) -> Response {
    match ctx.registry.list().await {
        Ok(items) => {
            let views: Vec<GiftAdminView> = items.into_iter().map(GiftAdminView::from).collect();
            Json(views).into_response()
        }
        Err(e) => store_error(e),
    }
}

/// POST /api/v1/gifts/{id}/claim
///
/// The claim is durable before notification is attempted; a notifier failure
/// is reported as `notified: false` and never unwinds the claim. An
/// already-claimed item is a plain 200 — the visitor just sees the current
/// list again, no error.
pub async fn claim_gift(State(ctx): State<Arc<AppContext>>, Path(id): Path<i64>) -> Response {
    match ctx.registry.claim(id).await {
        Ok(ClaimOutcome::Claimed { name }) => {
            let notified = match ctx.notifier.notify(&name).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(gift = %name, err = %e, "claim notification failed");
                    false
                }
            };
            Json(json!({
                "status": "claimed",
                "presente": name,
                "notified": notified,
            }))
            .into_response()
        }
        Ok(ClaimOutcome::AlreadyClaimed) => {
            Json(json!({ "status": "already_claimed" })).into_response()
        }
        Ok(ClaimOutcome::NotFound) => not_found(id),
        Err(e) => store_error(e),
    }
}

/// POST /api/v1/admin/gifts/{id}/unclaim (admin-gated)
pub async fn unclaim_gift(State(ctx): State<Arc<AppContext>>, Path(id): Path<i64>) -> Response {
    match ctx.registry.unclaim(id).await {
        Ok(UnclaimOutcome::Cleared) => Json(json!({ "status": "unclaimed" })).into_response(),
        Ok(UnclaimOutcome::NotFound) => not_found(id),
        Err(e) => store_error(e),
    }
}

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("no gift with id {id}") })),
    )
        .into_response()
}

fn store_error(e: RegistryError) -> Response {
    error!(err = %e, "registry store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "store unavailable" })),
    )
        .into_response()
}
