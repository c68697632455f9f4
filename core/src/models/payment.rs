// cartflow/src/models/payment.rs

use super::order::{Order, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
  Pending,
  Completed,
  Failed,
}

/// Body of `POST /payments/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPayment {
  pub order_id: OrderId,
  #[serde(with = "rust_decimal::serde::float")]
  pub amount_paid: Decimal,
  pub payment_method: String,
  pub payment_status: PaymentStatus,
}

impl NewPayment {
  /// A pending payment for the full order total.
  pub fn for_order(order: &Order, payment_method: impl Into<String>) -> Self {
    Self {
      order_id: order.order_id,
      amount_paid: order.total_price,
      payment_method: payment_method.into(),
      payment_status: PaymentStatus::Pending,
    }
  }
}

/// The service's echo of a created payment. Every field is optional: the
/// client never acts on it beyond logging.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PaymentRecord {
  #[serde(default)]
  pub payment_id: Option<i64>,
  #[serde(default)]
  pub order_id: Option<OrderId>,
  #[serde(default, deserialize_with = "super::money::deserialize_opt")]
  pub amount_paid: Option<Decimal>,
  #[serde(default)]
  pub payment_method: Option<String>,
  #[serde(default)]
  pub payment_status: Option<String>,
}
