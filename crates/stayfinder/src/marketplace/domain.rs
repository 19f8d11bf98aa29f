use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for marketplace users (hosts and guests alike).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Identifier wrapper for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub Uuid);

/// Identifier wrapper for bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

/// Identifier wrapper for reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Hotel,
    Villa,
    Cabin,
    Other,
}

/// Lifecycle status of a listing. Listings are never hard-deleted; a host
/// retires one by moving it to `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Inactive,
    Pending,
}

impl ListingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
            ListingStatus::Pending => "pending",
        }
    }
}

/// A rentable property published by a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub host: UserId,
    pub title: String,
    pub description: String,
    pub property_type: PropertyType,
    pub city: String,
    pub country: String,
    pub base_price: Decimal,
    pub cleaning_fee: Decimal,
    pub service_fee: Decimal,
    pub max_guests: u32,
    pub bedrooms: u32,
    pub is_available: bool,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Cancelled and completed stays are terminal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Whether a booking in this status occupies its date range.
    pub const fn blocks_dates(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Party composition for a stay. Infants count toward listing capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCount {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl GuestCount {
    /// Saturating sum; a wrapped total could slip under the capacity check.
    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

/// Candidate stay submitted to the booking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub listing_id: ListingId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: GuestCount,
    pub special_requests: Option<String>,
}

/// A reservation of a listing by a guest for a date range. Constructed only
/// by the booking service so the date, capacity, and pricing invariants hold
/// for every persisted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub listing: ListingId,
    pub guest: UserId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub guests: GuestCount,
    pub nights: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub confirmation_code: String,
    pub special_requests: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn total_guests(&self) -> u32 {
        self.guests.total()
    }
}

/// The seven 1-5 scores a guest submits with a review. `overall` is the
/// reviewer's holistic score and stays separate from the six category
/// ratings averaged by [`Review::category_average`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRatings {
    pub overall: u8,
    pub cleanliness: u8,
    pub accuracy: u8,
    pub communication: u8,
    pub location: u8,
    pub value: u8,
    pub checkin: u8,
}

impl ReviewRatings {
    /// Every rating with its field name, for validation messages.
    pub fn entries(&self) -> [(&'static str, u8); 7] {
        [
            ("overall", self.overall),
            ("cleanliness", self.cleanliness),
            ("accuracy", self.accuracy),
            ("communication", self.communication),
            ("location", self.location),
            ("value", self.value),
            ("checkin", self.checkin),
        ]
    }

    /// The six category scores, excluding `overall`.
    pub fn categories(&self) -> [u8; 6] {
        [
            self.cleanliness,
            self.accuracy,
            self.communication,
            self.location,
            self.value,
            self.checkin,
        ]
    }
}

/// Rating and comment payload for a candidate review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub booking_id: BookingId,
    pub ratings: ReviewRatings,
    pub comment: String,
}

/// Guest feedback tied one-to-one to a completed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub listing: ListingId,
    pub booking: BookingId,
    pub reviewer: UserId,
    pub ratings: ReviewRatings,
    pub comment: String,
    pub host_response: Option<String>,
    pub host_response_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
}
