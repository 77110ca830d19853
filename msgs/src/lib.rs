use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod authority_msg;
pub mod observer_msg;
pub mod role;

pub type Floor = i32;
pub type OccupantId = String;

/// Floor assumed whenever a payload leaves it out.
pub const DEFAULT_FLOOR: Floor = 1;

pub fn default_floor() -> Floor {
    DEFAULT_FLOOR
}

/// Reads a floor given as a number or a numeric string. Anything else,
/// `null` included, becomes [`DEFAULT_FLOOR`].
pub fn floor_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Floor, D::Error> {
    let floor = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|n| Floor::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(floor.unwrap_or(DEFAULT_FLOOR))
}

/// Like [`floor_or_default`] for any field with a `Default`: a value that
/// is `null`, unknown or of the wrong type falls back to the default.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::de::DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default())
}
