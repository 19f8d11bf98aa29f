use super::domain::{Booking, BookingId, Listing, ListingId, Review, ReviewId};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for listings.
pub trait ListingStore: Send + Sync {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError>;
    fn update(&self, listing: Listing) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError>;
}

/// Storage abstraction for bookings.
///
/// `insert` must reject a duplicate confirmation code with
/// [`RepositoryError::Conflict`]; the booking service treats that as a
/// signal to regenerate the code and retry.
pub trait BookingStore: Send + Sync {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError>;
    fn update(&self, booking: Booking) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError>;
    fn for_listing(&self, listing: &ListingId) -> Result<Vec<Booking>, RepositoryError>;
}

/// Storage abstraction for reviews.
///
/// `insert` must enforce the one-review-per-booking link with
/// [`RepositoryError::Conflict`], which acts as the arbiter when two review
/// submissions race. `for_listing` returns reviews newest first.
pub trait ReviewStore: Send + Sync {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError>;
    fn update(&self, review: Review) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError>;
    fn for_booking(&self, booking: &BookingId) -> Result<Option<Review>, RepositoryError>;
    fn for_listing(&self, listing: &ListingId) -> Result<Vec<Review>, RepositoryError>;
}
