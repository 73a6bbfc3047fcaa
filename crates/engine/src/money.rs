use std::{
    fmt,
    ops::{Neg, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (amounts,
/// totals, running balances) to avoid floating-point drift.
///
/// The value is signed:
/// - positive = income / increase
/// - negative = expense / decrease
///
/// On the wire the amount is a JSON number in currency units: `250` for
/// whole amounts, `12.5` when cents are present.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<MoneyCents>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<MoneyCents>().is_err());
/// assert!("abc".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Largest accepted magnitude: 9 999 999 999 999.99.
    ///
    /// Every amount up to this bound survives the f64 JSON round-trip
    /// unchanged.
    pub const MAX: MoneyCents = MoneyCents(999_999_999_999_999);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new amount from whole currency units.
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns `true` if the magnitude is within [`MoneyCents::MAX`].
    #[must_use]
    pub const fn is_within_limit(self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    /// Saturating addition, clamped at the `i64` bounds.
    #[must_use]
    pub const fn saturating_add(self, rhs: MoneyCents) -> MoneyCents {
        MoneyCents(self.0.saturating_add(rhs.0))
    }

    /// Shortest decimal form, without trailing zeros: `250`, `12.5`, `0.05`.
    ///
    /// This is the textual form matched by free-text search.
    #[must_use]
    pub fn compact(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        match cents {
            0 => format!("{sign}{units}"),
            c if c % 10 == 0 => format!("{sign}{units}.{}", c / 10),
            c => format!("{sign}{units}.{c:02}"),
        }
    }

    fn bounded<E: de::Error>(cents: Option<i64>) -> Result<Self, E> {
        cents
            .map(MoneyCents)
            .filter(|amount| amount.is_within_limit())
            .ok_or_else(|| E::custom("amount too large"))
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0 - rhs.0)
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(-self.0)
    }
}

impl FromStr for MoneyCents {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let amount = MoneyCents(if negative { -total } else { total });
        if !amount.is_within_limit() {
            return Err(overflow());
        }
        Ok(amount)
    }
}

impl Serialize for MoneyCents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for MoneyCents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl de::Visitor<'_> for MoneyVisitor {
    type Value = MoneyCents;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in currency units with at most two decimals")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        MoneyCents::bounded(v.checked_mul(100))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        MoneyCents::bounded(i64::try_from(v).ok().and_then(|v| v.checked_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        let scaled = (v * 100.0).round();
        if scaled.abs() > MoneyCents::MAX.0 as f64 {
            return Err(E::custom("amount too large"));
        }
        let cents = scaled as i64;
        // Serialization writes `cents / 100` as an f64, so a value read back
        // is only accepted when it is exactly that double.
        if cents as f64 / 100.0 != v {
            return Err(E::custom("too many decimals"));
        }
        Ok(MoneyCents(cents))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(10).to_string(), "0.10");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn compact_drops_trailing_zeros() {
        assert_eq!(MoneyCents::from_units(250).compact(), "250");
        assert_eq!(MoneyCents::new(1250).compact(), "12.5");
        assert_eq!(MoneyCents::new(5).compact(), "0.05");
        assert_eq!(MoneyCents::new(-1234).compact(), "-12.34");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<MoneyCents>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<MoneyCents>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<MoneyCents>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<MoneyCents>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<MoneyCents>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("12.345".parse::<MoneyCents>().is_err());
        assert!("".parse::<MoneyCents>().is_err());
        assert!("-".parse::<MoneyCents>().is_err());
        assert!("1e3".parse::<MoneyCents>().is_err());
        assert!("ten".parse::<MoneyCents>().is_err());
        assert!("1.2.3".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn json_uses_currency_units() {
        assert_eq!(serde_json::to_string(&MoneyCents::from_units(250)).unwrap(), "250");
        assert_eq!(serde_json::to_string(&MoneyCents::new(1250)).unwrap(), "12.5");

        let whole: MoneyCents = serde_json::from_str("250").unwrap();
        assert_eq!(whole.cents(), 25_000);
        let fractional: MoneyCents = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional.cents(), 1999);
        assert!(serde_json::from_str::<MoneyCents>("0.001").is_err());
        assert!(serde_json::from_str::<MoneyCents>("true").is_err());
    }

    #[test]
    fn parse_rejects_amounts_over_the_limit() {
        assert_eq!(
            "9999999999999.99".parse::<MoneyCents>().unwrap(),
            MoneyCents::MAX
        );
        assert_eq!(
            "10000000000000".parse::<MoneyCents>(),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
        assert!("50000000000000000".parse::<MoneyCents>().is_err());
        assert!("98765432109876.53".parse::<MoneyCents>().is_err());
        assert!("99999999999999999999".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn json_rejects_amounts_over_the_limit() {
        assert!(serde_json::from_str::<MoneyCents>("10000000000000").is_err());
        assert!(serde_json::from_str::<MoneyCents>("98765432109876.53").is_err());
        assert!(serde_json::from_str::<MoneyCents>("1e300").is_err());
        assert!(serde_json::from_str::<MoneyCents>("18446744073709551615").is_err());
    }

    #[test]
    fn largest_amounts_round_trip_through_json() {
        for cents in [
            MoneyCents::MAX.cents(),
            987_654_321_098_765,
            999_999_999_999_901,
            -MoneyCents::MAX.cents(),
        ] {
            let amount = MoneyCents::new(cents);
            let text = serde_json::to_string(&amount).unwrap();
            let back: MoneyCents = serde_json::from_str(&text).unwrap();
            assert_eq!(back, amount, "{text}");
        }
        assert_eq!(serde_json::to_string(&MoneyCents::MAX).unwrap(), "9999999999999.99");
    }

    #[test]
    fn saturating_add_clamps_instead_of_wrapping() {
        let big = MoneyCents::new(i64::MAX - 1);
        assert_eq!(big.saturating_add(MoneyCents::MAX).cents(), i64::MAX);
        assert_eq!(
            MoneyCents::new(150).saturating_add(MoneyCents::new(-50)),
            MoneyCents::new(100)
        );
    }
}
