use rust_decimal::Decimal;

use super::domain::Listing;

/// Failure raised when a stay length cannot be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("stay must cover at least one night")]
    InvalidDuration,
}

/// Quote the total price for a stay: nightly rate times nights, plus the
/// listing's flat cleaning and service fees.
pub fn quote(listing: &Listing, nights: u32) -> Result<Decimal, PricingError> {
    if nights == 0 {
        return Err(PricingError::InvalidDuration);
    }

    Ok(listing.base_price * Decimal::from(nights) + listing.cleaning_fee + listing.service_fee)
}
