// cartflow/src/models/money.rs

//! Decimal amounts as the cart service encodes them: JSON numbers most of the
//! time, strings when the backend serialises a `Decimal` column untouched.

use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
  Number(f64),
  Text(String),
}

/// Accepts `19.99` or `"19.99"` and yields the exact decimal as sent. Rounding
/// to cents happens only in [`format_price`].
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
  D: Deserializer<'de>,
{
  // f64's Display is the shortest round-trip form, so 19.99 stays "19.99".
  let text = match RawAmount::deserialize(deserializer)? {
    RawAmount::Number(n) if n.is_finite() => n.to_string(),
    RawAmount::Number(n) => return Err(de::Error::custom(format!("amount is not finite: {}", n))),
    RawAmount::Text(s) => s,
  };
  Decimal::from_str(text.trim()).map_err(|e| de::Error::custom(format!("invalid amount '{}': {}", text, e)))
}

pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  struct Wrapped(#[serde(deserialize_with = "crate::models::money::deserialize")] Decimal);

  Option::<Wrapped>::deserialize(deserializer).map(|opt| opt.map(|Wrapped(amount)| amount))
}

/// `$` followed by the amount with exactly two decimals.
pub fn format_price(amount: Decimal) -> String {
  format!("${:.2}", amount.round_dp(2))
}
