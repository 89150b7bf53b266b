use serde::{Deserialize, Deserializer};

pub mod auth;
pub mod categories;
pub mod commandes;
pub mod content;
pub mod dashboard;
pub mod products;
pub mod storefront;
pub mod suppliers;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
