//! Dish entity, creation input and partial update.

use rust_decimal::Decimal;

use crate::domain::shared::validation::{non_blank, required_text};
use crate::domain::shared::{
    Assignments, AssignmentsBuilder, DishId, DomainError, FieldValue, RestaurantId,
};

/// Fractional digits kept for prices.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound on prices (ten integer digits minus the fraction).
const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// A persisted dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    /// Row id.
    pub id: DishId,
    /// Owning restaurant.
    pub restaurant_id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Menu description.
    pub description: String,
    /// Price with two fractional digits.
    pub price: Decimal,
}

/// Validated input for creating a dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    restaurant_id: RestaurantId,
    name: String,
    description: String,
    price: Decimal,
}

impl NewDish {
    /// Validate raw input. Name, description and price are all required.
    pub fn new(
        restaurant_id: RestaurantId,
        name: Option<String>,
        description: Option<String>,
        price: Option<Decimal>,
    ) -> Result<Self, DomainError> {
        let name = required_text("name", name)?;
        let description = required_text("description", description)?;
        let price = normalize_price(price.ok_or_else(|| DomainError::missing("price"))?)?;

        Ok(Self {
            restaurant_id,
            name,
            description,
            price,
        })
    }

    /// Owning restaurant.
    #[must_use]
    pub const fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Menu description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }
}

/// Fields a client may change on a dish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DishPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price.
    pub price: Option<Decimal>,
}

impl DishPatch {
    /// Lower the patch into column assignments.
    ///
    /// The owning restaurant is not patchable: a dish never moves between
    /// restaurants.
    pub fn into_assignments(self) -> Result<Assignments, DomainError> {
        let name = self.name.map(|n| non_blank("name", n)).transpose()?;
        let description = self
            .description
            .map(|d| non_blank("description", d))
            .transpose()?;
        let price = self.price.map(normalize_price).transpose()?;

        AssignmentsBuilder::new()
            .set("name", name.map(FieldValue::Text))
            .set("description", description.map(FieldValue::Text))
            .set("price", price.map(FieldValue::Decimal))
            .build()
    }
}

/// Check a price is in range and round it to [`PRICE_SCALE`] digits.
pub fn normalize_price(price: Decimal) -> Result<Decimal, DomainError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::invalid("price", "must not be negative"));
    }

    let mut price = price.round_dp(PRICE_SCALE);
    if price >= PRICE_LIMIT {
        return Err(DomainError::invalid("price", "must be below 100000000"));
    }
    price.rescale(PRICE_SCALE);
    Ok(price)
}
