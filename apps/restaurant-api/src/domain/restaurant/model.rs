//! Restaurant entity, creation input and partial update.

use crate::domain::dish::Dish;
use crate::domain::shared::validation::{non_blank, required_text};
use crate::domain::shared::{Assignments, AssignmentsBuilder, DomainError, FieldValue, RestaurantId};

/// A persisted restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    /// Row id.
    pub id: RestaurantId,
    /// Display name.
    pub name: String,
    /// Whether the kitchen is kosher.
    pub is_kosher: bool,
    /// Cuisines served, in the order the client supplied them.
    pub cuisines: Vec<String>,
}

/// A restaurant together with its menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantDetail {
    /// The restaurant row.
    pub restaurant: Restaurant,
    /// Dishes belonging to the restaurant.
    pub dishes: Vec<Dish>,
}

/// Validated input for creating a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    name: String,
    is_kosher: bool,
    cuisines: Vec<String>,
}

impl NewRestaurant {
    /// Validate raw input.
    ///
    /// `name` must be present and non-blank, `cuisines` must be present (it may
    /// be empty), and `is_kosher` defaults to `false`.
    pub fn new(
        name: Option<String>,
        is_kosher: Option<bool>,
        cuisines: Option<Vec<String>>,
    ) -> Result<Self, DomainError> {
        let name = required_text("name", name)?;
        let cuisines = cuisines.ok_or_else(|| DomainError::missing("cuisines"))?;

        Ok(Self {
            name,
            is_kosher: is_kosher.unwrap_or(false),
            cuisines,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kosher flag.
    #[must_use]
    pub const fn is_kosher(&self) -> bool {
        self.is_kosher
    }

    /// Cuisines served.
    #[must_use]
    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }
}

/// Fields a client may change on a restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantPatch {
    /// New name.
    pub name: Option<String>,
    /// New kosher flag.
    pub is_kosher: Option<bool>,
    /// Replacement cuisine list.
    pub cuisines: Option<Vec<String>>,
}

impl RestaurantPatch {
    /// Lower the patch into column assignments.
    ///
    /// Fails with [`DomainError::EmptyPatch`] when no field is present.
    pub fn into_assignments(self) -> Result<Assignments, DomainError> {
        let name = self.name.map(|n| non_blank("name", n)).transpose()?;

        AssignmentsBuilder::new()
            .set("name", name.map(FieldValue::Text))
            .set("is_kosher", self.is_kosher.map(FieldValue::Bool))
            .set("cuisines", self.cuisines.map(FieldValue::TextList))
            .build()
    }
}
