//! Float serialization that refuses NaN and infinity.
//!
//! JSON has no representation for non-finite numbers. `serde_json` writes
//! them as `null`, which no float field accepts back, so a record carrying
//! one would save cleanly and then never load again. Float fields serialize
//! through these helpers, which turn a non-finite value into a serialization
//! error instead.

use serde::ser::{Error, Serialize, Serializer};

/// Serialize a finite `f64`, failing on NaN or infinity.
///
/// Use with `#[serde(serialize_with = "playervault_types::finite::serialize")]`.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "non-finite float {value} cannot be written as JSON"
        )));
    }
    serializer.serialize_f64(*value)
}

/// Serialize a fixed-size float array, failing if any element is not finite.
pub fn serialize_array<S: Serializer, const N: usize>(
    values: &[f64; N],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(S::Error::custom(format!(
            "non-finite float {bad} cannot be written as JSON"
        )));
    }
    values.serialize(serializer)
}
