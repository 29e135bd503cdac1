//! Restaurant ratings.

pub mod model;
pub mod repository;

pub use model::{NewRating, RATING_SCALE, Rating, RatingPatch, normalize_rating};
pub use repository::RatingRepository;
