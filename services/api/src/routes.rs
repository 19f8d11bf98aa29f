use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use stayfinder::marketplace::{
    marketplace_router, BookingService, BookingStore, ConfirmationCodes, ListingStore,
    ReviewService, ReviewStore,
};

pub(crate) fn with_marketplace_routes<L, B, C, R>(
    bookings: Arc<BookingService<L, B, C>>,
    reviews: Arc<ReviewService<B, R, L>>,
) -> axum::Router
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
    R: ReviewStore + 'static,
{
    marketplace_router(bookings, reviews)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
