use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use stayfinder::marketplace::{
    Booking, BookingId, BookingStore, Listing, ListingId, ListingStore, RepositoryError, Review,
    ReviewId, ReviewStore,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryListingStore {
    records: Arc<Mutex<HashMap<ListingId, Listing>>>,
}

impl ListingStore for InMemoryListingStore {
    fn insert(&self, listing: Listing) -> Result<Listing, RepositoryError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if guard.contains_key(&listing.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(listing.id, listing.clone());
        Ok(listing)
    }

    fn update(&self, listing: Listing) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("listing store mutex poisoned");
        if !guard.contains_key(&listing.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(listing.id, listing);
        Ok(())
    }

    fn fetch(&self, id: &ListingId) -> Result<Option<Listing>, RepositoryError> {
        let guard = self.records.lock().expect("listing store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// Booking storage with the confirmation-code uniqueness the booking
/// service relies on for its regenerate-on-collision loop.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBookingStore {
    records: Arc<Mutex<HashMap<BookingId, Booking>>>,
}

impl BookingStore for InMemoryBookingStore {
    fn insert(&self, booking: Booking) -> Result<Booking, RepositoryError> {
        let mut guard = self.records.lock().expect("booking store mutex poisoned");
        let code_taken = guard
            .values()
            .any(|existing| existing.confirmation_code == booking.confirmation_code);
        if code_taken || guard.contains_key(&booking.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(booking.id, booking.clone());
        Ok(booking)
    }

    fn update(&self, booking: Booking) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("booking store mutex poisoned");
        if !guard.contains_key(&booking.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(booking.id, booking);
        Ok(())
    }

    fn fetch(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let guard = self.records.lock().expect("booking store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_listing(&self, listing: &ListingId) -> Result<Vec<Booking>, RepositoryError> {
        let guard = self.records.lock().expect("booking store mutex poisoned");
        let mut bookings: Vec<Booking> = guard
            .values()
            .filter(|booking| booking.listing == *listing)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

/// Review storage enforcing the one-review-per-booking link.
#[derive(Default, Clone)]
pub(crate) struct InMemoryReviewStore {
    records: Arc<Mutex<HashMap<ReviewId, Review>>>,
}

impl ReviewStore for InMemoryReviewStore {
    fn insert(&self, review: Review) -> Result<Review, RepositoryError> {
        let mut guard = self.records.lock().expect("review store mutex poisoned");
        let booking_reviewed = guard
            .values()
            .any(|existing| existing.booking == review.booking);
        if booking_reviewed || guard.contains_key(&review.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(review.id, review.clone());
        Ok(review)
    }

    fn update(&self, review: Review) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("review store mutex poisoned");
        if !guard.contains_key(&review.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(review.id, review);
        Ok(())
    }

    fn fetch(&self, id: &ReviewId) -> Result<Option<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_booking(&self, booking: &BookingId) -> Result<Option<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review store mutex poisoned");
        Ok(guard
            .values()
            .find(|review| review.booking == *booking)
            .cloned())
    }

    fn for_listing(&self, listing: &ListingId) -> Result<Vec<Review>, RepositoryError> {
        let guard = self.records.lock().expect("review store mutex poisoned");
        let mut reviews: Vec<Review> = guard
            .values()
            .filter(|review| review.listing == *listing)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }
}
