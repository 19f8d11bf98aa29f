use super::domain::{Booking, BookingRequest, Listing, ListingStatus};

/// Validation failures raised while admitting a candidate booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("check-out date must be after check-in date")]
    InvalidDateRange,
    #[error("listing is not open for new bookings")]
    ListingUnavailable,
    #[error("party of {requested} exceeds the listing capacity of {max_guests}")]
    CapacityExceeded { max_guests: u32, requested: u32 },
    #[error("requested dates overlap an existing booking")]
    DatesConflict,
}

/// Check a candidate stay against the listing and its existing bookings.
///
/// Checks run in a fixed order: date range, listing availability, party
/// size, then date conflicts against bookings that still occupy their
/// range. Cancelled and completed stays never block new dates.
pub fn check(
    listing: &Listing,
    request: &BookingRequest,
    existing: &[Booking],
) -> Result<(), AvailabilityError> {
    if request.check_out_date <= request.check_in_date {
        return Err(AvailabilityError::InvalidDateRange);
    }

    if !listing.is_available || listing.status != ListingStatus::Active {
        return Err(AvailabilityError::ListingUnavailable);
    }

    let requested = request.guests.total();
    if requested > listing.max_guests {
        return Err(AvailabilityError::CapacityExceeded {
            max_guests: listing.max_guests,
            requested,
        });
    }

    let conflict = existing.iter().any(|booking| {
        booking.status.blocks_dates()
            && booking.check_in_date < request.check_out_date
            && request.check_in_date < booking.check_out_date
    });
    if conflict {
        return Err(AvailabilityError::DatesConflict);
    }

    Ok(())
}
