//! Booking lifecycle, pricing, and review admission for the marketplace.
//!
//! The booking service composes availability checks and the pricing quote
//! before persisting, and the review service gates review creation on the
//! booking having actually completed. Storage is abstracted behind the
//! repository traits so the services can be exercised against in-memory
//! stores in tests and against a real database in production.

pub mod availability;
pub mod booking;
pub mod confirmation;
pub mod domain;
pub mod pricing;
pub mod rating;
pub mod repository;
pub mod review;
pub mod router;

#[cfg(test)]
mod tests;

pub use availability::AvailabilityError;
pub use booking::{BookingError, BookingService};
pub use confirmation::{ConfirmationCodes, RandomCodes, CODE_LENGTH};
pub use domain::{
    Booking, BookingId, BookingRequest, BookingStatus, GuestCount, Listing, ListingId,
    ListingStatus, PaymentStatus, PropertyType, Review, ReviewId, ReviewRatings,
    ReviewSubmission, UserId,
};
pub use pricing::PricingError;
pub use rating::listing_average;
pub use repository::{BookingStore, ListingStore, RepositoryError, ReviewStore};
pub use review::{ReviewError, ReviewService};
pub use router::marketplace_router;
