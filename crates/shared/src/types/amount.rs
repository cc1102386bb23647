//! Amount and weight parsing for ingestion boundaries.
//!
//! Every numeric value entering the system (form input, persisted records)
//! goes through parse-with-default(0): unparsable input becomes zero instead
//! of an error. Amounts stay `Decimal`, never floating-point.
//!
//! Values outside [`MAX_AMOUNT`] / [`MAX_WEIGHT`] are treated as unparsable,
//! which keeps every downstream sum and product inside the `Decimal` range.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Largest accepted amount magnitude (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Largest accepted tantièmes weight.
pub const MAX_WEIGHT: u32 = 1_000_000;

/// Parses a user-entered amount, returning zero on anything unparsable.
///
/// Accepts a comma decimal separator and ignores grouping spaces and a
/// trailing euro sign ("1 234,50 €" parses as 1234.50).
#[must_use]
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}' && *c != '€')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_or(Decimal::ZERO, bounded_amount)
}

fn bounded_amount(value: Decimal) -> Decimal {
    if value.abs() > MAX_AMOUNT {
        Decimal::ZERO
    } else {
        value
    }
}

/// Parses a tantièmes weight, returning zero for negative or junk input.
///
/// Fractional input is truncated.
#[must_use]
pub fn parse_weight(input: &str) -> u32 {
    decimal_to_weight(parse_amount(input))
}

fn decimal_to_weight(value: Decimal) -> u32 {
    value.trunc().to_u32().map_or(0, bounded_weight)
}

const fn bounded_weight(value: u32) -> u32 {
    if value > MAX_WEIGHT { 0 } else { value }
}

/// Serde helpers applying the parse-with-default convention.
///
/// Use with `#[serde(default, deserialize_with = "lenient::decimal")]` so
/// that numbers, numeric strings, `null` and missing fields all deserialize.
pub mod lenient {
    use std::fmt;

    use rust_decimal::Decimal;
    use serde::Deserializer;
    use serde::de::{self, Visitor};

    use super::{bounded_amount, bounded_weight, decimal_to_weight, parse_amount, parse_weight};

    /// Deserializes a `Decimal`, coercing anything unparsable to zero.
    pub fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    /// Deserializes a `u32` weight, coercing anything unparsable to zero.
    pub fn weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WeightVisitor)
    }

    /// Deserializes an optional `Decimal` for partial patches: `null` or a
    /// missing field stays `None`, anything else is coerced like [`decimal`].
    pub fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalVisitor(DecimalVisitor))
    }

    /// Deserializes an optional weight for partial patches.
    pub fn optional_weight<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalVisitor(WeightVisitor))
    }

    struct OptionalVisitor<V>(V);

    impl<'de, V> Visitor<'de> for OptionalVisitor<V>
    where
        V: Visitor<'de> + Copy,
    {
        type Value = Option<V::Value>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.expecting(f)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self.0).map(Some)
        }
    }

    #[derive(Clone, Copy)]
    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
            Ok(bounded_amount(Decimal::from(v)))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
            Ok(bounded_amount(Decimal::from(v)))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
            Ok(Decimal::try_from(v).map_or(Decimal::ZERO, bounded_amount))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
            Ok(parse_amount(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
            Ok(Decimal::ZERO)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Decimal, D::Error> {
            deserializer.deserialize_any(Self)
        }
    }

    #[derive(Clone, Copy)]
    struct WeightVisitor;

    impl<'de> Visitor<'de> for WeightVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            Ok(u32::try_from(v).map_or(0, bounded_weight))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            Ok(u32::try_from(v).map_or(0, bounded_weight))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            Ok(Decimal::try_from(v).map_or(0, decimal_to_weight))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            Ok(parse_weight(v))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<u32, E> {
            Ok(0)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<u32, D::Error> {
            deserializer.deserialize_any(Self)
        }
    }
}
