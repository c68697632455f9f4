// cartflow/src/models/order.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type OrderId = i64;

/// What `POST /cart/checkout` hands back. Immutable from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub order_id: OrderId,
  #[serde(deserialize_with = "super::money::deserialize")]
  pub total_price: Decimal,
  #[serde(default)]
  pub status: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_string_encoded_total() {
    let order: Order = serde_json::from_str(r#"{"order_id": 12, "total_price": "39.98", "status": "pending"}"#).unwrap();
    assert_eq!(order.order_id, 12);
    assert_eq!(order.total_price, Decimal::new(3998, 2));
  }

  #[test]
  fn missing_total_is_rejected() {
    assert!(serde_json::from_str::<Order>(r#"{"order_id": 12}"#).is_err());
  }
}
