use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::marketplace::domain::Listing;
use crate::marketplace::repository::ListingStore;
use crate::marketplace::router::marketplace_router;

fn router(fixture: &Fixture) -> axum::Router {
    marketplace_router(
        fixture.booking_service.clone(),
        fixture.review_service.clone(),
    )
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn booking_payload(listing: &Listing, guest: uuid::Uuid, adults: u32, children: u32) -> Value {
    json!({
        "listing_id": listing.id.0,
        "guest_id": guest,
        "check_in_date": "2026-04-10",
        "check_out_date": "2026-04-13",
        "adults": adults,
        "children": children,
    })
}

#[tokio::test]
async fn booking_endpoint_returns_created_booking() {
    let fixture = fixture();
    let listing = listing(user());
    fixture.listings.insert(listing.clone()).expect("listing stored");
    let guest = uuid::Uuid::new_v4();

    let response = router(&fixture)
        .oneshot(post_json(
            "/api/v1/bookings",
            booking_payload(&listing, guest, 2, 1),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["nights"], json!(3));
    assert_eq!(body["status"], json!("pending"));
    assert_eq!(
        body["confirmation_code"]
            .as_str()
            .expect("code present")
            .len(),
        8
    );
}

#[tokio::test]
async fn oversized_party_maps_to_unprocessable_entity() {
    let fixture = fixture();
    let listing = listing(user());
    fixture.listings.insert(listing.clone()).expect("listing stored");

    let response = router(&fixture)
        .oneshot(post_json(
            "/api/v1/bookings",
            booking_payload(&listing, uuid::Uuid::new_v4(), 3, 2),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error present")
        .contains("capacity of 4"));
}

#[tokio::test]
async fn unknown_listing_maps_to_not_found() {
    let fixture = fixture();
    let phantom = listing(user());

    let response = router(&fixture)
        .oneshot(post_json(
            "/api/v1/bookings",
            booking_payload(&phantom, uuid::Uuid::new_v4(), 2, 0),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_review_maps_to_conflict() {
    let fixture = fixture();
    let listing = listing(user());
    fixture.listings.insert(listing.clone()).expect("listing stored");
    let guest = user();
    let booking = completed_booking(&fixture, &listing, guest);

    let payload = json!({
        "booking_id": booking.id.0,
        "reviewer_id": guest.0,
        "ratings": {
            "overall": 5,
            "cleanliness": 5,
            "accuracy": 5,
            "communication": 5,
            "location": 5,
            "value": 5,
            "checkin": 5,
        },
        "comment": "Wonderful stay",
    });

    let first = router(&fixture)
        .oneshot(post_json("/api/v1/reviews", payload.clone()))
        .await
        .expect("router responds");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router(&fixture)
        .oneshot(post_json("/api/v1/reviews", payload))
        .await
        .expect("router responds");
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn listing_rating_endpoint_reports_average_and_count() {
    let fixture = fixture();
    let listing = listing(user());
    fixture.listings.insert(listing.clone()).expect("listing stored");
    let guest = user();
    let booking = completed_booking(&fixture, &listing, guest);
    fixture
        .review_service
        .create(
            crate::marketplace::domain::ReviewSubmission {
                booking_id: booking.id,
                ratings: ratings(5),
                comment: "Top marks".to_string(),
            },
            guest,
        )
        .expect("review admitted");

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/v1/listings/{}/rating", listing.id.0))
        .body(Body::empty())
        .expect("request builds");
    let response = router(&fixture)
        .oneshot(request)
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["review_count"], json!(1));
    assert_eq!(body["average_rating"], json!("5"));
}
