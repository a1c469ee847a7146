//! Itinerary domain model.
//!
//! # Responsibility
//! - Define the canonical Itinerary -> Day -> Activity aggregate.
//! - Keep the JSON wire shape (`[{id, date, activities:[...]}]`) in one place.
//!
//! # Invariants
//! - Every Day and Activity carries an opaque `ItemId` assigned at creation.
//! - Growth operations never push a Day past `MAX_ACTIVITIES_PER_DAY`.

pub mod activity;
pub mod day;
pub mod id;
pub mod itinerary;

use serde::{Deserialize, Deserializer};

/// Decodes an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
