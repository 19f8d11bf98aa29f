use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::marketplace::booking::BookingService;
use crate::marketplace::confirmation::{ConfirmationCodes, RandomCodes};
use crate::marketplace::domain::{
    Booking, BookingId, BookingRequest, GuestCount, Listing, ListingId, ListingStatus,
    PropertyType, Review, ReviewId, ReviewRatings, UserId,
};
use crate::marketplace::repository::{
    BookingStore, ListingStore, RepositoryError, ReviewStore,
};
use crate::marketplace::review::ReviewService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn user() -> UserId {
    UserId(Uuid::new_v4())
}

pub(super) fn listing(host: UserId) -> Listing {
    Listing {
        id: ListingId(Uuid::new_v4()),
        host,
        title: "Harbor View Loft".to_string(),
        description: "Two-bedroom loft above the old harbor market.".to_string(),
        property_type: PropertyType::Apartment,
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        base_price: Decimal::new(12050, 2),
        cleaning_fee: Decimal::ZERO,
        service_fee: Decimal::ZERO,
        max_guests: 4,
        bedrooms: 2,
        is_available: true,
        status: ListingStatus::Active,
        created_at: Utc::now(),
    }
}

pub(super) fn request(
    listing: &Listing,
    check_in: NaiveDate,
    check_out: NaiveDate,
    adults: u32,
    children: u32,
    infants: u32,
) -> BookingRequest {
    BookingRequest {
        listing_id: listing.id,
        check_in_date: check_in,
        check_out_date: check_out,
        guests: GuestCount {
            adults,
            children,
            infants,
        },
        special_requests: None,
    }
}

pub(super) fn ratings(score: u8) -> ReviewRatings {
    ReviewRatings {
        overall: score,
        cleanliness: score,
        accuracy: score,
        communication: score,
        location: score,
        value: score,
        checkin: score,
    }
}

pub(super) type TestBookingService =
    BookingService<MemoryListings, MemoryBookings, ScriptedCodes>;
pub(super) type TestReviewService = ReviewService<MemoryBookings, MemoryReviews, MemoryListings>;

pub(super) struct Fixture {
    pub(super) listings: Arc<MemoryListings>,
    pub(super) bookings: Arc<MemoryBookings>,
    pub(super) reviews: Arc<MemoryReviews>,
    pub(super) booking_service: Arc<TestBookingService>,
    pub(super) review_service: Arc<TestReviewService>,
}

pub(super) fn fixture() -> Fixture {
    fixture_with_codes(ScriptedCodes::random())
}

pub(super) fn fixture_with_codes(codes: ScriptedCodes) -> Fixture {
    let listings = Arc::new(MemoryListings::default());
    let bookings = Arc::new(MemoryBookings::default());
    let reviews = Arc::new(MemoryReviews::default());
    let booking_service = Arc::new(BookingService::new(
        listings.clone(),
        bookings.clone(),
        Arc::new(codes),
    ));
    let review_service = Arc::new(ReviewService::new(
        bookings.clone(),
        reviews.clone(),
        listings.clone(),
    ));

    Fixture {
        listings,
        bookings,
        reviews,
        booking_service,
        review_service,
    }
}

/// Drives a stay through creation and completion so review tests have a
/// reviewable booking.
pub(super) fn completed_booking(fixture: &Fixture, listing: &Listing, guest: UserId) -> Booking {
    let booking = fixture
        .booking_service
        .create(
            request(listing, date(2026, 3, 2), date(2026, 3, 5), 2, 0, 0),
            guest,
        )
        .expect("booking admitted");
    fixture
        .booking_service
        .mark_completed(&booking.id)
        .expect("booking completed")
}

#[derive(Default)]
pub(super) struct MemoryListings {
    records: Mutex<HashMap<ListingId, Listing>>,
}

impl ListingStore for MemoryListings {
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

#[derive(Default)]
pub(super) struct MemoryBookings {
    records: Mutex<HashMap<BookingId, Booking>>,
}

impl BookingStore for MemoryBookings {
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

#[derive(Default)]
pub(super) struct MemoryReviews {
    records: Mutex<HashMap<ReviewId, Review>>,
}

impl ReviewStore for MemoryReviews {
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

/// Code source that replays a scripted sequence, then repeats the last entry
/// forever. An empty script falls back to random codes.
pub(super) struct ScriptedCodes {
    script: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    fallback: RandomCodes,
}

impl ScriptedCodes {
    pub(super) fn new<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            script: Mutex::new(codes.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            fallback: RandomCodes,
        }
    }

    pub(super) fn random() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl ConfirmationCodes for ScriptedCodes {
    fn generate(&self) -> String {
        let mut script = self.script.lock().expect("code script mutex poisoned");
        if let Some(code) = script.pop_front() {
            *self.last.lock().expect("code mutex poisoned") = Some(code.clone());
            return code;
        }
        drop(script);

        match self.last.lock().expect("code mutex poisoned").clone() {
            Some(code) => code,
            None => self.fallback.generate(),
        }
    }
}
