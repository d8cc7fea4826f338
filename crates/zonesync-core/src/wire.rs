//! Wire helpers for the provider's JSON encoding
//!
//! The provider encodes integers such as `ttl` and `priority` as JSON
//! strings (`"300"`, `"10"`). These helpers decode them explicitly and fail
//! with a descriptive error on anything non-numeric, instead of trusting
//! every deployment to format them the same way.

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Parse a string-encoded integer
///
/// Surrounding whitespace is tolerated. An empty string decodes to zero,
/// since the provider sends `""` for fields that do not apply to a record
/// type.
pub fn parse_int<T>(raw: &str) -> Result<T, crate::Error>
where
    T: FromStr + Default,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse()
        .map_err(|_| crate::Error::decode(format!("expected an integer, got {:?}", raw)))
}

/// `#[serde(with = "...")]` module for integers carried as JSON strings
///
/// Serializes as a string. Deserializes from either a string or a JSON
/// number so that a deployment that switches to native numbers keeps working.
pub mod string_int {
    use super::*;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: fmt::Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + Default + TryFrom<u64> + TryFrom<i64>,
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StringIntVisitor(PhantomData))
    }

    struct StringIntVisitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for StringIntVisitor<T>
    where
        T: FromStr + Default + TryFrom<u64> + TryFrom<i64>,
    {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a string-encoded integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
            parse_int(v).map_err(|e| match e {
                crate::Error::Decode(msg) => E::custom(msg),
                other => E::custom(other),
            })
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
            T::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
            T::try_from(v).map_err(|_| E::custom(format!("integer out of range: {}", v)))
        }

        fn visit_unit<E: de::Error>(self) -> Result<T, E> {
            Ok(T::default())
        }
    }
}
