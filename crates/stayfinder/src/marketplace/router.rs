use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::booking::{BookingError, BookingService};
use super::confirmation::ConfirmationCodes;
use super::domain::{
    BookingId, BookingRequest, GuestCount, ListingId, ReviewId, ReviewRatings, ReviewSubmission,
    UserId,
};
use super::repository::{BookingStore, ListingStore, ReviewStore};
use super::review::{ReviewError, ReviewService};

/// Router builder exposing the booking and review endpoints.
///
/// Acting identities arrive in the request payloads; authentication is the
/// responsibility of the layer in front of this router.
pub fn marketplace_router<L, B, C, R>(
    bookings: Arc<BookingService<L, B, C>>,
    reviews: Arc<ReviewService<B, R, L>>,
) -> Router
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
    R: ReviewStore + 'static,
{
    Router::new()
        .merge(booking_router(bookings))
        .merge(review_router(reviews))
}

fn booking_router<L, B, C>(service: Arc<BookingService<L, B, C>>) -> Router
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
{
    Router::new()
        .route("/api/v1/bookings", post(create_booking_handler::<L, B, C>))
        .route(
            "/api/v1/bookings/:booking_id",
            get(get_booking_handler::<L, B, C>),
        )
        .with_state(service)
}

fn review_router<B, R, L>(service: Arc<ReviewService<B, R, L>>) -> Router
where
    B: BookingStore + 'static,
    R: ReviewStore + 'static,
    L: ListingStore + 'static,
{
    Router::new()
        .route("/api/v1/reviews", post(create_review_handler::<B, R, L>))
        .route(
            "/api/v1/reviews/:review_id/response",
            post(host_response_handler::<B, R, L>),
        )
        .route(
            "/api/v1/listings/:listing_id/rating",
            get(listing_rating_handler::<B, R, L>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBookingPayload {
    listing_id: Uuid,
    guest_id: Uuid,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    #[serde(default = "default_adults")]
    adults: u32,
    #[serde(default)]
    children: u32,
    #[serde(default)]
    infants: u32,
    #[serde(default)]
    special_requests: Option<String>,
}

fn default_adults() -> u32 {
    1
}

pub(crate) async fn create_booking_handler<L, B, C>(
    State(service): State<Arc<BookingService<L, B, C>>>,
    axum::Json(payload): axum::Json<CreateBookingPayload>,
) -> Response
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
{
    let request = BookingRequest {
        listing_id: ListingId(payload.listing_id),
        check_in_date: payload.check_in_date,
        check_out_date: payload.check_out_date,
        guests: GuestCount {
            adults: payload.adults,
            children: payload.children,
            infants: payload.infants,
        },
        special_requests: payload.special_requests,
    };

    match service.create(request, UserId(payload.guest_id)) {
        Ok(booking) => (StatusCode::CREATED, axum::Json(booking)).into_response(),
        Err(error) => booking_error_response(error),
    }
}

pub(crate) async fn get_booking_handler<L, B, C>(
    State(service): State<Arc<BookingService<L, B, C>>>,
    Path(booking_id): Path<Uuid>,
) -> Response
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
{
    match service.get(&BookingId(booking_id)) {
        Ok(booking) => (StatusCode::OK, axum::Json(booking)).into_response(),
        Err(error) => booking_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateReviewPayload {
    booking_id: Uuid,
    reviewer_id: Uuid,
    ratings: ReviewRatings,
    comment: String,
}

pub(crate) async fn create_review_handler<B, R, L>(
    State(service): State<Arc<ReviewService<B, R, L>>>,
    axum::Json(payload): axum::Json<CreateReviewPayload>,
) -> Response
where
    B: BookingStore + 'static,
    R: ReviewStore + 'static,
    L: ListingStore + 'static,
{
    let submission = ReviewSubmission {
        booking_id: BookingId(payload.booking_id),
        ratings: payload.ratings,
        comment: payload.comment,
    };

    match service.create(submission, UserId(payload.reviewer_id)) {
        Ok(review) => (StatusCode::CREATED, axum::Json(review)).into_response(),
        Err(error) => review_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HostResponsePayload {
    responder_id: Uuid,
    response: String,
}

pub(crate) async fn host_response_handler<B, R, L>(
    State(service): State<Arc<ReviewService<B, R, L>>>,
    Path(review_id): Path<Uuid>,
    axum::Json(payload): axum::Json<HostResponsePayload>,
) -> Response
where
    B: BookingStore + 'static,
    R: ReviewStore + 'static,
    L: ListingStore + 'static,
{
    match service.respond(
        &ReviewId(review_id),
        UserId(payload.responder_id),
        payload.response,
    ) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(error) => review_error_response(error),
    }
}

pub(crate) async fn listing_rating_handler<B, R, L>(
    State(service): State<Arc<ReviewService<B, R, L>>>,
    Path(listing_id): Path<Uuid>,
) -> Response
where
    B: BookingStore + 'static,
    R: ReviewStore + 'static,
    L: ListingStore + 'static,
{
    match service.listing_rating(&ListingId(listing_id)) {
        Ok((average_rating, review_count)) => {
            let payload = json!({
                "listing_id": listing_id,
                "average_rating": average_rating,
                "review_count": review_count,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => review_error_response(error),
    }
}

fn booking_error_response(error: BookingError) -> Response {
    let status = match &error {
        BookingError::ListingNotFound | BookingError::BookingNotFound => StatusCode::NOT_FOUND,
        BookingError::Availability(_) | BookingError::Pricing(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BookingError::NotBookingGuest => StatusCode::FORBIDDEN,
        BookingError::AlreadyClosed { .. } => StatusCode::CONFLICT,
        BookingError::CodeExhausted | BookingError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn review_error_response(error: ReviewError) -> Response {
    let status = match &error {
        ReviewError::BookingNotFound
        | ReviewError::ListingNotFound
        | ReviewError::ReviewNotFound => StatusCode::NOT_FOUND,
        ReviewError::NotBookingOwner | ReviewError::NotListingHost => StatusCode::FORBIDDEN,
        ReviewError::BookingNotCompleted | ReviewError::InvalidRating { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ReviewError::DuplicateReview => StatusCode::CONFLICT,
        ReviewError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
