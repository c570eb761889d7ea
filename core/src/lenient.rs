//! Field decoding that tolerates the service leaving values out.

use serde::{Deserialize, Deserializer};

/// Reads `null` as `T::default()`. Paired with `#[serde(default)]` so an
/// absent field decodes the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
