use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::domain::{
    BookingStatus, ListingId, Review, ReviewId, ReviewRatings, ReviewSubmission, UserId,
};
use super::rating;
use super::repository::{BookingStore, ListingStore, RepositoryError, ReviewStore};

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("booking not found")]
    BookingNotFound,
    #[error("listing not found")]
    ListingNotFound,
    #[error("review not found")]
    ReviewNotFound,
    #[error("reviewer is not the booking guest")]
    NotBookingOwner,
    #[error("only completed stays can be reviewed")]
    BookingNotCompleted,
    #[error("a review already exists for this booking")]
    DuplicateReview,
    #[error("{category} rating must be between 1 and 5, got {value}")]
    InvalidRating { category: &'static str, value: u8 },
    #[error("only the listing host may respond to a review")]
    NotListingHost,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service gating review creation on the booking lifecycle and routing the
/// host-response and engagement mutations.
pub struct ReviewService<B, R, L> {
    bookings: Arc<B>,
    reviews: Arc<R>,
    listings: Arc<L>,
}

impl<B, R, L> ReviewService<B, R, L>
where
    B: BookingStore + 'static,
    R: ReviewStore + 'static,
    L: ListingStore + 'static,
{
    pub fn new(bookings: Arc<B>, reviews: Arc<R>, listings: Arc<L>) -> Self {
        Self {
            bookings,
            reviews,
            listings,
        }
    }

    /// Admit and persist a review for a completed stay.
    ///
    /// Preconditions are checked in a fixed order: booking exists, reviewer
    /// is the booking's guest, the stay completed, no review exists yet,
    /// every rating sits in [1,5]. A storage conflict on the booking link is
    /// surfaced as [`ReviewError::DuplicateReview`] so racing submissions
    /// resolve to exactly one success.
    pub fn create(
        &self,
        submission: ReviewSubmission,
        reviewer: UserId,
    ) -> Result<Review, ReviewError> {
        let booking = self
            .bookings
            .fetch(&submission.booking_id)?
            .ok_or(ReviewError::BookingNotFound)?;

        if booking.guest != reviewer {
            return Err(ReviewError::NotBookingOwner);
        }
        if booking.status != BookingStatus::Completed {
            return Err(ReviewError::BookingNotCompleted);
        }
        if self.reviews.for_booking(&booking.id)?.is_some() {
            return Err(ReviewError::DuplicateReview);
        }
        validate_ratings(&submission.ratings)?;

        let review = Review {
            id: ReviewId(Uuid::new_v4()),
            listing: booking.listing,
            booking: booking.id,
            reviewer,
            ratings: submission.ratings,
            comment: submission.comment,
            host_response: None,
            host_response_at: None,
            is_verified: true,
            helpful_count: 0,
            created_at: Utc::now(),
        };

        match self.reviews.insert(review) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Conflict) => Err(ReviewError::DuplicateReview),
            Err(other) => Err(other.into()),
        }
    }

    pub fn get(&self, id: &ReviewId) -> Result<Review, ReviewError> {
        self.reviews.fetch(id)?.ok_or(ReviewError::ReviewNotFound)
    }

    /// Record the host's public response. Only the listing's host may write
    /// it; the response date is stamped on first write.
    pub fn respond(
        &self,
        id: &ReviewId,
        actor: UserId,
        response: String,
    ) -> Result<Review, ReviewError> {
        let mut review = self.get(id)?;
        let listing = self
            .listings
            .fetch(&review.listing)?
            .ok_or(ReviewError::ListingNotFound)?;

        if listing.host != actor {
            return Err(ReviewError::NotListingHost);
        }

        review.host_response = Some(response);
        review.host_response_at = Some(Utc::now());
        self.reviews.update(review.clone())?;
        Ok(review)
    }

    /// Bump the helpful counter for a review.
    pub fn mark_helpful(&self, id: &ReviewId) -> Result<Review, ReviewError> {
        let mut review = self.get(id)?;
        review.helpful_count += 1;
        self.reviews.update(review.clone())?;
        Ok(review)
    }

    /// Average overall rating and review count for a listing, recomputed
    /// from its stored reviews on every call.
    pub fn listing_rating(&self, listing: &ListingId) -> Result<(Decimal, usize), ReviewError> {
        self.listings
            .fetch(listing)?
            .ok_or(ReviewError::ListingNotFound)?;

        let reviews = self.reviews.for_listing(listing)?;
        Ok((rating::listing_average(&reviews), reviews.len()))
    }
}

fn validate_ratings(ratings: &ReviewRatings) -> Result<(), ReviewError> {
    for (category, value) in ratings.entries() {
        if !(1..=5).contains(&value) {
            return Err(ReviewError::InvalidRating { category, value });
        }
    }
    Ok(())
}
