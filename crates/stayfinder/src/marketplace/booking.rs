use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use super::availability::{self, AvailabilityError};
use super::confirmation::ConfirmationCodes;
use super::domain::{
    Booking, BookingId, BookingRequest, BookingStatus, ListingId, PaymentStatus, UserId,
};
use super::pricing::{self, PricingError};
use super::repository::{BookingStore, ListingStore, RepositoryError};

/// Attempts at finding an unused confirmation code before giving up.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Error raised by the booking service.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("listing not found")]
    ListingNotFound,
    #[error("booking not found")]
    BookingNotFound,
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("only the booking guest may cancel")]
    NotBookingGuest,
    #[error("booking is already {status}")]
    AlreadyClosed { status: &'static str },
    #[error("could not allocate a unique confirmation code")]
    CodeExhausted,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing availability checks, the pricing quote, and storage
/// into the only path that constructs bookings.
pub struct BookingService<L, B, C> {
    listings: Arc<L>,
    bookings: Arc<B>,
    codes: Arc<C>,
    listing_locks: Mutex<HashMap<ListingId, Arc<Mutex<()>>>>,
}

impl<L, B, C> BookingService<L, B, C>
where
    L: ListingStore + 'static,
    B: BookingStore + 'static,
    C: ConfirmationCodes + 'static,
{
    pub fn new(listings: Arc<L>, bookings: Arc<B>, codes: Arc<C>) -> Self {
        Self {
            listings,
            bookings,
            codes,
            listing_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Admit and persist a candidate stay for `guest`.
    ///
    /// The availability check and the insert run under a per-listing lock so
    /// two concurrently submitted overlapping stays cannot both pass the
    /// conflict check. A confirmation-code collision reported by storage
    /// triggers regeneration, bounded by [`MAX_CODE_ATTEMPTS`].
    pub fn create(&self, request: BookingRequest, guest: UserId) -> Result<Booking, BookingError> {
        let listing = self
            .listings
            .fetch(&request.listing_id)?
            .ok_or(BookingError::ListingNotFound)?;

        let lock = self.listing_lock(listing.id);
        let _serialized = lock.lock().expect("listing lock poisoned");

        let existing = self.bookings.for_listing(&listing.id)?;
        availability::check(&listing, &request, &existing)?;

        let nights = (request.check_out_date - request.check_in_date).num_days() as u32;
        let total_price = pricing::quote(&listing, nights)?;

        let mut booking = Booking {
            id: BookingId(Uuid::new_v4()),
            listing: listing.id,
            guest,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            guests: request.guests,
            nights,
            total_price,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            confirmation_code: self.codes.generate(),
            special_requests: request.special_requests,
            cancelled_at: None,
            cancellation_reason: None,
            created_at: Utc::now(),
        };

        for _ in 0..MAX_CODE_ATTEMPTS {
            match self.bookings.insert(booking.clone()) {
                Ok(stored) => return Ok(stored),
                Err(RepositoryError::Conflict) => {
                    booking.confirmation_code = self.codes.generate();
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(BookingError::CodeExhausted)
    }

    pub fn get(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.bookings
            .fetch(id)?
            .ok_or(BookingError::BookingNotFound)
    }

    /// Cancel a stay on behalf of its guest. Terminal bookings are rejected.
    pub fn cancel(
        &self,
        id: &BookingId,
        actor: UserId,
        reason: Option<String>,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get(id)?;

        if booking.guest != actor {
            return Err(BookingError::NotBookingGuest);
        }
        if booking.status.is_terminal() {
            return Err(BookingError::AlreadyClosed {
                status: booking.status.label(),
            });
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(Utc::now());
        booking.cancellation_reason = reason;
        self.bookings.update(booking.clone())?;
        Ok(booking)
    }

    /// Move a stay to its terminal completed state. The trigger (checkout
    /// day passing, host confirmation) lives outside this service.
    pub fn mark_completed(&self, id: &BookingId) -> Result<Booking, BookingError> {
        let mut booking = self.get(id)?;

        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::AlreadyClosed {
                status: booking.status.label(),
            });
        }

        booking.status = BookingStatus::Completed;
        self.bookings.update(booking.clone())?;
        Ok(booking)
    }

    /// Entries held only by the table (no create in flight) are evicted on
    /// the way in, so the table tracks live contention rather than every
    /// listing ever booked.
    fn listing_lock(&self, id: ListingId) -> Arc<Mutex<()>> {
        let mut locks = self.listing_locks.lock().expect("listing lock table poisoned");
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(id).or_default().clone()
    }

    #[cfg(test)]
    pub(super) fn lock_table_len(&self) -> usize {
        self.listing_locks
            .lock()
            .expect("listing lock table poisoned")
            .len()
    }
}
