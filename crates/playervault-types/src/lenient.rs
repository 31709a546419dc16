//! Lenient integer decoding.
//!
//! Player files are sometimes produced by tools that write every number as a
//! floating literal (`64.0`, `1.2e9`). Integer fields decode through
//! [`deserialize`], which accepts either form. Fractional values are
//! truncated toward zero; values outside the target type's range are errors.

use core::fmt;

use serde::Deserializer;
use serde::de::{self, Visitor};

/// Smallest `f64` that converts to an `i64` without overflow.
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;

/// First `f64` past `i64::MAX`.
const I64_END_F: f64 = 9_223_372_036_854_775_808.0;

/// Deserialize an integer of type `T` from a JSON integer or float literal.
///
/// Use with `#[serde(deserialize_with = "playervault_types::lenient::deserialize")]`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
    T::Error: fmt::Display,
{
    let value = deserializer.deserialize_any(IntOrFloat)?;
    T::try_from(value).map_err(|e| de::Error::custom(format!("integer {value} out of range: {e}")))
}

struct IntOrFloat;

impl Visitor<'_> for IntOrFloat {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or floating point number")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|e| E::custom(format!("integer {v} out of range: {e}")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        float_to_i64(v).ok_or_else(|| E::custom(format!("number {v} is not a representable integer")))
    }
}

/// Truncate a finite float toward zero, rejecting values outside `i64`.
#[allow(clippy::cast_possible_truncation)]
fn float_to_i64(v: f64) -> Option<i64> {
    let t = v.trunc();
    if t.is_finite() && (I64_MIN_F..I64_END_F).contains(&t) {
        Some(t as i64)
    } else {
        None
    }
}
