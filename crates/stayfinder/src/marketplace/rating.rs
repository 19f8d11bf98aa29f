use rust_decimal::Decimal;

use super::domain::Review;

/// Mean of the reviewer-supplied `overall` scores across a listing's
/// reviews. Zero, not null, when the listing has no reviews yet so
/// downstream arithmetic stays total.
pub fn listing_average(reviews: &[Review]) -> Decimal {
    if reviews.is_empty() {
        return Decimal::ZERO;
    }

    let sum: u32 = reviews
        .iter()
        .map(|review| u32::from(review.ratings.overall))
        .sum();
    Decimal::from(sum) / Decimal::from(reviews.len() as u32)
}

impl Review {
    /// Mean of the six category scores. The reviewer's `overall` score is
    /// deliberately excluded.
    pub fn category_average(&self) -> Decimal {
        let categories = self.ratings.categories();
        let sum: u32 = categories.iter().map(|&score| u32::from(score)).sum();
        Decimal::from(sum) / Decimal::from(categories.len() as u32)
    }
}
