//! Serde helpers for backend responses.

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` like a missing key. Pair with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
