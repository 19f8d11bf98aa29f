use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::common::*;
use crate::marketplace::domain::{BookingId, ListingId, Review, ReviewId, UserId};
use crate::marketplace::rating::listing_average;

fn review_with(overall: u8) -> Review {
    let mut scores = ratings(4);
    scores.overall = overall;
    Review {
        id: ReviewId(Uuid::new_v4()),
        listing: ListingId(Uuid::new_v4()),
        booking: BookingId(Uuid::new_v4()),
        reviewer: UserId(Uuid::new_v4()),
        ratings: scores,
        comment: "Great stay".to_string(),
        host_response: None,
        host_response_at: None,
        is_verified: true,
        helpful_count: 0,
        created_at: Utc::now(),
    }
}

#[test]
fn listing_with_no_reviews_averages_zero() {
    assert_eq!(listing_average(&[]), Decimal::ZERO);
}

#[test]
fn listing_average_is_the_mean_of_overall_scores() {
    let reviews = [review_with(5), review_with(3)];

    assert_eq!(listing_average(&reviews), Decimal::from(4));
}

#[test]
fn category_average_ignores_the_overall_score() {
    let mut review = review_with(1);
    review.ratings = ratings(5);
    review.ratings.overall = 1;

    assert_eq!(review.category_average(), Decimal::from(5));
}

#[test]
fn category_average_handles_mixed_scores() {
    let mut review = review_with(5);
    review.ratings.cleanliness = 5;
    review.ratings.accuracy = 4;
    review.ratings.communication = 4;
    review.ratings.location = 4;
    review.ratings.value = 4;
    review.ratings.checkin = 4;

    assert_eq!(
        review.category_average(),
        Decimal::from(25) / Decimal::from(6)
    );
}
