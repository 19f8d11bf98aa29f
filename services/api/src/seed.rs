use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, Utc};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infra::{InMemoryBookingStore, InMemoryListingStore, InMemoryReviewStore};
use stayfinder::error::AppError;
use stayfinder::marketplace::{
    listing_average, BookingError, BookingService, BookingStore, Listing, ListingId,
    ListingStatus, ListingStore, PropertyType, RandomCodes, ReviewRatings, ReviewService,
    ReviewStore, ReviewSubmission, UserId,
};

const CITIES: &[(&str, &str)] = &[
    ("Lisbon", "Portugal"),
    ("Porto", "Portugal"),
    ("Seville", "Spain"),
    ("Marrakesh", "Morocco"),
    ("Palermo", "Italy"),
    ("Split", "Croatia"),
    ("Kotor", "Montenegro"),
    ("Chania", "Greece"),
];

const TITLE_LEADS: &[&str] = &[
    "Sunlit", "Harborside", "Whitewashed", "Restored", "Quiet", "Rooftop", "Garden", "Cliffside",
];

const TITLE_NOUNS: &[&str] = &[
    "Loft", "Cottage", "Townhouse", "Studio", "Villa", "Cabin", "Apartment", "Retreat",
];

const PROPERTY_TYPES: &[PropertyType] = &[
    PropertyType::Apartment,
    PropertyType::House,
    PropertyType::Hotel,
    PropertyType::Villa,
    PropertyType::Cabin,
];

const COMMENTS: &[&str] = &[
    "Exactly as described, would book again.",
    "Great location and a spotless kitchen.",
    "Host was quick to answer every question.",
    "Comfortable beds, slightly noisy street.",
    "Check-in was effortless and the view is real.",
];

#[derive(Args, Debug)]
pub(crate) struct SeedArgs {
    /// Number of listings to generate
    #[arg(long, default_value_t = 10)]
    pub(crate) listings: u32,
    /// RNG seed for reproducible sample data
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// First check-in date for generated stays (defaults to a week from today)
    #[arg(long)]
    pub(crate) first_check_in: Option<NaiveDate>,
}

/// Stores and counts produced by one seeding run.
pub(crate) struct SeedReport {
    listings: Vec<Listing>,
    bookings: Arc<InMemoryBookingStore>,
    reviews: Arc<InMemoryReviewStore>,
    booking_count: u32,
    review_count: u32,
}

pub(crate) fn run_seed(args: SeedArgs) -> Result<(), AppError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Seeding {} listings (seed {seed})", args.listings);

    let report = populate(&args, seed)?;

    for listing in &report.listings {
        let stays = report
            .bookings
            .for_listing(&listing.id)
            .map_err(BookingError::from)?;
        let reviews = report
            .reviews
            .for_listing(&listing.id)
            .map_err(BookingError::from)?;
        println!(
            "- {} ({}, {}): {} stays, {} reviews, average {}",
            listing.title,
            listing.city,
            listing.country,
            stays.len(),
            reviews.len(),
            listing_average(&reviews)
        );
    }

    println!(
        "Seeded {} listings, {} bookings, {} reviews",
        report.listings.len(),
        report.booking_count,
        report.review_count
    );

    Ok(())
}

/// Populate in-memory stores with sample data, routing every booking and
/// review through the real services so the generated records satisfy the
/// same invariants production data does.
fn populate(args: &SeedArgs, seed: u64) -> Result<SeedReport, AppError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let first_check_in = args
        .first_check_in
        .unwrap_or_else(|| Local::now().date_naive() + Duration::days(7));

    let listings = Arc::new(InMemoryListingStore::default());
    let bookings = Arc::new(InMemoryBookingStore::default());
    let reviews = Arc::new(InMemoryReviewStore::default());
    let booking_service =
        BookingService::new(listings.clone(), bookings.clone(), Arc::new(RandomCodes));
    let review_service = ReviewService::new(bookings.clone(), reviews.clone(), listings.clone());

    let hosts: Vec<UserId> = (0..args.listings.max(1).div_ceil(2))
        .map(|_| UserId(Uuid::new_v4()))
        .collect();
    let guests: Vec<UserId> = (0..args.listings.max(1) * 2)
        .map(|_| UserId(Uuid::new_v4()))
        .collect();

    let mut seeded_listings = Vec::with_capacity(args.listings as usize);
    let mut booking_count = 0u32;
    let mut review_count = 0u32;

    for index in 0..args.listings {
        let host = hosts[rng.gen_range(0..hosts.len())];
        let listing = sample_listing(&mut rng, host);
        let listing = listings
            .insert(listing)
            .map_err(BookingError::from)?;

        // Sequential windows per listing so generated stays never clash
        // with the overlap check.
        let stay_count = rng.gen_range(1..=3u32);
        let mut window_start =
            first_check_in + Duration::days(i64::from(index % 4) + i64::from(index) * 2);
        for _ in 0..stay_count {
            let nights = rng.gen_range(2..=7i64);
            let guest = guests[rng.gen_range(0..guests.len())];
            let request = stay_request(&mut rng, &listing, window_start, nights);

            let booking = booking_service.create(request, guest)?;
            booking_count += 1;
            window_start = booking.check_out_date + Duration::days(rng.gen_range(1..=5i64));

            // Roughly half the stays have already concluded and earn a review.
            if rng.gen_bool(0.5) {
                let completed = booking_service.mark_completed(&booking.id)?;
                let submission = ReviewSubmission {
                    booking_id: completed.id,
                    ratings: sample_ratings(&mut rng),
                    comment: COMMENTS[rng.gen_range(0..COMMENTS.len())].to_string(),
                };
                review_service.create(submission, guest)?;
                review_count += 1;
            }
        }

        seeded_listings.push(listing);
    }

    Ok(SeedReport {
        listings: seeded_listings,
        bookings,
        reviews,
        booking_count,
        review_count,
    })
}

fn sample_listing(rng: &mut StdRng, host: UserId) -> Listing {
    let (city, country) = CITIES[rng.gen_range(0..CITIES.len())];
    let title = format!(
        "{} {}",
        TITLE_LEADS[rng.gen_range(0..TITLE_LEADS.len())],
        TITLE_NOUNS[rng.gen_range(0..TITLE_NOUNS.len())]
    );

    Listing {
        id: ListingId(Uuid::new_v4()),
        host,
        description: format!("{title} in central {city}."),
        title,
        property_type: PROPERTY_TYPES[rng.gen_range(0..PROPERTY_TYPES.len())],
        city: city.to_string(),
        country: country.to_string(),
        base_price: Decimal::from(rng.gen_range(50..=500u32)),
        cleaning_fee: if rng.gen_bool(0.5) {
            Decimal::from(rng.gen_range(10..=60u32))
        } else {
            Decimal::ZERO
        },
        service_fee: if rng.gen_bool(0.3) {
            Decimal::from(rng.gen_range(5..=25u32))
        } else {
            Decimal::ZERO
        },
        max_guests: rng.gen_range(1..=8),
        bedrooms: rng.gen_range(1..=4),
        is_available: true,
        status: ListingStatus::Active,
        created_at: Utc::now(),
    }
}

fn stay_request(
    rng: &mut StdRng,
    listing: &Listing,
    check_in: NaiveDate,
    nights: i64,
) -> stayfinder::marketplace::BookingRequest {
    let adults = rng.gen_range(1..=listing.max_guests);
    let children = rng.gen_range(0..=listing.max_guests - adults);
    let infants = rng.gen_range(0..=listing.max_guests - adults - children);

    stayfinder::marketplace::BookingRequest {
        listing_id: listing.id,
        check_in_date: check_in,
        check_out_date: check_in + Duration::days(nights),
        guests: stayfinder::marketplace::GuestCount {
            adults,
            children,
            infants,
        },
        special_requests: None,
    }
}

fn sample_ratings(rng: &mut StdRng) -> ReviewRatings {
    ReviewRatings {
        overall: rng.gen_range(3..=5),
        cleanliness: rng.gen_range(3..=5),
        accuracy: rng.gen_range(3..=5),
        communication: rng.gen_range(3..=5),
        location: rng.gen_range(3..=5),
        value: rng.gen_range(3..=5),
        checkin: rng.gen_range(3..=5),
    }
}
