//! Wire helpers shared by the integer-backed types.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Writes a decimal string for human-readable formats and a plain `u64`
/// for binary ones.
pub(crate) fn serialize_u64<S, T>(value: &T, raw: u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: fmt::Display + ?Sized,
{
    if serializer.is_human_readable() {
        serializer.collect_str(value)
    } else {
        serializer.serialize_u64(raw)
    }
}

/// Counterpart of [`serialize_u64`]. Human-readable input may be a number or
/// a decimal string; binary input must be a `u64`.
pub(crate) fn deserialize_u64<'de, D>(
    deserializer: D,
    expecting: &'static str,
) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let visitor = U64Visitor::new(expecting);
    if deserializer.is_human_readable() {
        deserializer.deserialize_any(visitor)
    } else {
        deserializer.deserialize_u64(visitor)
    }
}

/// Accepts a `u64` written either as a JSON number or as a decimal string.
struct U64Visitor {
    expecting: &'static str,
}

impl U64Visitor {
    const fn new(expecting: &'static str) -> Self {
        Self { expecting }
    }
}

impl Visitor<'_> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as an unsigned integer or decimal string", self.expecting)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        u64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
