//! Ratings given to restaurants.

use rust_decimal::Decimal;

use crate::domain::shared::{
    Assignments, AssignmentsBuilder, DomainError, FieldValue, RatingId, RestaurantId,
};

/// Fractional digits kept for a rating score.
pub const RATING_SCALE: u32 = 1;

/// Exclusive upper bound on a rating score.
const RATING_LIMIT: Decimal = Decimal::TEN;

/// A persisted rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rating {
    /// Row id.
    pub id: RatingId,
    /// Rated restaurant.
    pub restaurant_id: RestaurantId,
    /// Score with one fractional digit.
    pub rating: Decimal,
}

/// Validated input for adding a rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    restaurant_id: RestaurantId,
    rating: Decimal,
}

impl NewRating {
    /// Validate raw input.
    pub fn new(
        restaurant_id: Option<RestaurantId>,
        rating: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        let restaurant_id = restaurant_id.ok_or_else(|| DomainError::missing("restaurantId"))?;
        let rating = normalize_rating(rating.ok_or_else(|| DomainError::missing("rating"))?)?;
        Ok(Self {
            restaurant_id,
            rating,
        })
    }

    /// Rated restaurant.
    #[must_use]
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Normalized score.
    #[must_use]
    pub const fn rating(&self) -> Decimal {
        self.rating
    }
}

/// Fields a client may change on a rating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingPatch {
    /// New score.
    pub rating: Option<Decimal>,
}

impl RatingPatch {
    /// Lower the patch into column assignments.
    pub fn into_assignments(self) -> Result<Assignments, DomainError> {
        let rating = self.rating.map(normalize_rating).transpose()?;
        AssignmentsBuilder::new()
            .set("rating", rating.map(FieldValue::Decimal))
            .build()
    }
}

/// Round a score to one digit and check `0.0 <= score < 10.0`.
pub fn normalize_rating(rating: Decimal) -> Result<Decimal, DomainError> {
    let mut rating = rating.round_dp(RATING_SCALE);
    if rating.is_sign_negative() && !rating.is_zero() {
        return Err(DomainError::invalid("rating", "must not be negative"));
    }
    if rating >= RATING_LIMIT {
        return Err(DomainError::invalid("rating", "must be below 10"));
    }
    rating.set_sign_positive(true);
    rating.rescale(RATING_SCALE);
    Ok(rating)
}
