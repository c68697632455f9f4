// cartflow/src/checkout/state.rs

use crate::error::CartError;
use crate::models::{Order, PaymentRecord};

/// `Idle → OrderPending → PaymentPending → Completed`, with `Failed`
/// reachable from either pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
  Idle,
  OrderPending,
  PaymentPending,
  Completed,
  Failed,
}

impl CheckoutState {
  pub fn can_transition_to(self, next: CheckoutState) -> bool {
    use CheckoutState::*;
    matches!(
      (self, next),
      (Idle, OrderPending)
        | (OrderPending, PaymentPending)
        | (OrderPending, Failed)
        | (PaymentPending, Completed)
        | (PaymentPending, Failed)
    )
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
  OrderCreation,
  PaymentSubmission,
}

/// Why a checkout ended in [`CheckoutState::Failed`].
#[derive(Debug)]
pub struct CheckoutFailure {
  pub stage: CheckoutStage,
  pub error: CartError,
  /// Set when payment failed after the order was created. Nothing cancels or
  /// retries that order; it stays on the service as created.
  pub dangling_order: Option<Order>,
}

impl CheckoutFailure {
  /// Describes the unresolved order left behind by a failed payment, if any.
  pub fn limitation(&self) -> Option<String> {
    self.dangling_order.as_ref().map(|order| {
      format!(
        "Order #{} was created but payment was not recorded. It has not been cancelled or retried; \
         check your orders before trying again.",
        order.order_id
      )
    })
  }
}

#[derive(Debug)]
pub enum CheckoutOutcome {
  Completed { order: Order, payment: PaymentRecord },
  Failed(CheckoutFailure),
}

#[derive(Debug)]
pub struct CheckoutReport {
  pub outcome: CheckoutOutcome,
  /// Every state visited, starting with `Idle`.
  pub transitions: Vec<CheckoutState>,
}

impl CheckoutReport {
  pub fn final_state(&self) -> CheckoutState {
    self.transitions.last().copied().unwrap_or(CheckoutState::Idle)
  }

  pub fn is_completed(&self) -> bool {
    matches!(self.outcome, CheckoutOutcome::Completed { .. })
  }

  pub fn failure(&self) -> Option<&CheckoutFailure> {
    match &self.outcome {
      CheckoutOutcome::Failed(failure) => Some(failure),
      CheckoutOutcome::Completed { .. } => None,
    }
  }
}
