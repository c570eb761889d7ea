//! Exact money amounts.
//!
//! The service sends prices, VAT rates and ledger amounts as bare numeric
//! literals, sometimes as JSON numbers and sometimes as strings. They are held
//! as [`Decimal`] so sums and comparisons never pick up binary rounding.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ParseError;

/// An exact decimal amount. `30`, `30.0` and `30.00` are the same value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

/// Parses `-?digits(.digits)?` into an exact amount.
pub fn parse_money(literal: &str) -> Result<Money, ParseError> {
    let unsigned = literal.strip_prefix('-').unwrap_or(literal);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    if !all_digits(whole) {
        return Err(ParseError::money(literal, "expected digits before any decimal point"));
    }
    if fraction.is_some_and(|f| !all_digits(f)) {
        return Err(ParseError::money(literal, "expected digits after the decimal point"));
    }
    Decimal::from_str_exact(literal)
        .map(Money)
        .map_err(|e| ParseError::money(literal, e.to_string()))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl FromStr for Money {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_money(s)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// serde_json runs with `arbitrary_precision`, so a JSON number arrives with
// its literal text intact and goes through the same validation as a string.
impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => {
                return Err(de::Error::custom(format!(
                    "expected a decimal number or a string holding one, got {other}"
                )))
            }
        };
        parse_money(&literal).map_err(de::Error::custom)
    }
}

/// Serialized as a string so no consumer reads it back through a float.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        parse_money(s).unwrap()
    }

    #[test]
    fn trailing_zeros_do_not_matter() {
        assert_eq!(money("30"), money("30.00"));
        assert_eq!(money("20"), money("20.0"));
        assert_eq!(money("30"), Money::from(30));
        assert_ne!(money("30.01"), money("30"));
    }

    #[test]
    fn negative_amounts() {
        assert!(money("-234").is_negative());
        assert!(money("-234") < Money::default());
        assert!(!money("-0").is_negative());
        assert!(!money("0.50").is_negative());
    }

    #[test]
    fn sums_are_exact() {
        let total = money("0.1").amount() + money("0.2").amount();
        assert_eq!(Money::from(total), money("0.3"));
    }

    #[test]
    fn rejects_malformed_literals() {
        for literal in [
            "", "-", ".", "abc", "1.2.3", "12a", "+5", "1_000", "1e3", " 5", "5 ", ".5", "5.",
            "--5", "1,50", "£5",
        ] {
            let err = parse_money(literal).unwrap_err();
            assert!(matches!(err, ParseError::Money { .. }), "{literal:?}");
        }
    }

    #[test]
    fn rejects_more_digits_than_decimal_holds() {
        assert!(parse_money("123456789012345678901234567890123").is_err());
    }

    #[test]
    fn deserializes_json_numbers_and_strings() {
        let cases = [
            ("30", "30"),
            ("-234", "-234"),
            ("20.5", "20.5"),
            ("19.99", "19.99"),
            ("\"20\"", "20.00"),
            ("\"-12.34\"", "-12.34"),
            ("18446744073709551615", "18446744073709551615"),
            ("123456789012345678901234567", "123456789012345678901234567"),
        ];
        for (json, want) in cases {
            let got: Money = serde_json::from_str(json).unwrap();
            assert_eq!(got, money(want), "{json}");
        }
    }

    #[test]
    fn json_numbers_keep_every_digit() {
        let got: Money = serde_json::from_str("1234567890.123456789").unwrap();
        assert_eq!(got, money("1234567890.123456789"));
        assert_eq!(got.to_string(), "1234567890.123456789");

        let got: Money = serde_json::from_str("0.30000000000000000001").unwrap();
        assert_ne!(got, money("0.3"));
    }

    #[test]
    fn json_numbers_in_records_keep_every_digit() {
        #[derive(Deserialize)]
        struct Line {
            amount: Money,
        }
        let line: Line = serde_json::from_str(r#"{"amount": -9876543210.987654321}"#).unwrap();
        assert_eq!(line.amount, money("-9876543210.987654321"));
    }

    #[test]
    fn deserialize_rejects_non_numbers() {
        for json in ["true", "null", "\"twenty\"", "[20]", "{\"amount\":20}", "1e3", "2.5E-1"] {
            assert!(serde_json::from_str::<Money>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn serializes_as_string() {
        assert_eq!(serde_json::to_string(&money("-234.50")).unwrap(), r#""-234.50""#);
    }
}
