// cartflow/src/notice.rs

//! User-visible outcomes as values: transient notices and surface redirects.
//!
//! Operations never print or navigate themselves. They hand back [`Effect`]s
//! and the front end decides how to show them.

use crate::cart::Applied;
use crate::checkout::{CheckoutOutcome, CheckoutReport, CheckoutStage};
use crate::config::ClientConfig;
use crate::error::CartError;
use std::time::Duration;

/// The user-triggered operations, each with its own wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
  FetchCart,
  AddItem,
  UpdateQuantity,
  RemoveItem,
  Checkout,
  CreateOrder,
  SubmitPayment,
}

impl Operation {
  pub fn fallback_message(self) -> &'static str {
    match self {
      Operation::FetchCart => "Failed to fetch cart items",
      Operation::AddItem => "Failed to add game to cart",
      Operation::UpdateQuantity => "Failed to update quantity",
      Operation::RemoveItem => "Failed to remove item",
      Operation::Checkout => "Failed to complete checkout",
      Operation::CreateOrder => "Failed to create order",
      Operation::SubmitPayment => "Failed to process payment",
    }
  }

  pub fn login_prompt(self) -> &'static str {
    match self {
      Operation::FetchCart => "Please login to view your cart",
      Operation::AddItem => "Please login to add items to cart",
      Operation::UpdateQuantity => "Please login to update cart",
      Operation::RemoveItem => "Please login to remove items",
      Operation::Checkout | Operation::CreateOrder | Operation::SubmitPayment => {
        "Please login to proceed with checkout"
      }
    }
  }

  pub fn success_message(self) -> Option<&'static str> {
    match self {
      Operation::AddItem => Some("Game added to cart successfully!"),
      Operation::UpdateQuantity => Some("Quantity updated successfully"),
      Operation::RemoveItem => Some("Item removed successfully"),
      Operation::Checkout => Some("Order placed successfully!"),
      Operation::FetchCart | Operation::CreateOrder | Operation::SubmitPayment => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  Success,
  Error,
  Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub text: String,
  /// How long the notice stays up.
  pub ttl: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
  Login,
  OrderReview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
  Notify(Notice),
  Navigate {
    surface: Surface,
    path: String,
    after: Duration,
  },
}

impl Effect {
  pub fn as_notice(&self) -> Option<&Notice> {
    match self {
      Effect::Notify(notice) => Some(notice),
      Effect::Navigate { .. } => None,
    }
  }
}

/// Turns operation results into effects, using the configured timings and surfaces.
#[derive(Debug, Clone)]
pub struct Feedback {
  notice_ttl: Duration,
  redirect_delay: Duration,
  login_surface: String,
  order_review_surface: String,
}

impl Feedback {
  pub fn from_config(config: &ClientConfig) -> Self {
    Self {
      notice_ttl: config.notice_ttl,
      redirect_delay: config.redirect_delay,
      login_surface: config.login_surface.clone(),
      order_review_surface: config.order_review_surface.clone(),
    }
  }

  fn notify(&self, kind: NoticeKind, text: impl Into<String>) -> Effect {
    Effect::Notify(Notice {
      kind,
      text: text.into(),
      ttl: self.notice_ttl,
    })
  }

  pub fn applied(&self, applied: &Applied) -> Vec<Effect> {
    let mut effects = Vec::new();
    if let Some(text) = applied.operation.success_message() {
      effects.push(self.notify(NoticeKind::Success, text));
    }
    if let Some(e) = &applied.refresh_error {
      effects.extend(self.failure(Operation::FetchCart, e));
    }
    effects
  }

  /// The service detail when there is one, the operation's fallback otherwise.
  ///
  /// A quantity update below 1 is deliberately silent.
  pub fn failure(&self, operation: Operation, err: &CartError) -> Vec<Effect> {
    let fallback = operation.fallback_message();
    match err {
      CartError::Unauthenticated => vec![
        self.notify(NoticeKind::Error, operation.login_prompt()),
        Effect::Navigate {
          surface: Surface::Login,
          path: self.login_surface.clone(),
          after: Duration::ZERO,
        },
      ],
      CartError::Validation(_) if operation == Operation::UpdateQuantity => Vec::new(),
      CartError::Validation(message) => vec![self.notify(NoticeKind::Error, message.clone())],
      CartError::Service { detail, .. } => {
        vec![self.notify(NoticeKind::Error, detail.clone().unwrap_or_else(|| fallback.to_string()))]
      }
      CartError::Network(_) => vec![self.notify(NoticeKind::Error, format!("{}. Please try again.", fallback))],
      CartError::MalformedResponse(_) | CartError::Workflow { .. } | CartError::ControllerStopped => {
        vec![self.notify(NoticeKind::Error, fallback)]
      }
    }
  }

  pub fn checkout(&self, report: &CheckoutReport) -> Vec<Effect> {
    match &report.outcome {
      CheckoutOutcome::Completed { .. } => vec![
        self.notify(NoticeKind::Success, Operation::Checkout.success_message().unwrap_or_default()),
        Effect::Navigate {
          surface: Surface::OrderReview,
          path: self.order_review_surface.clone(),
          after: self.redirect_delay,
        },
      ],
      CheckoutOutcome::Failed(failure) => {
        let operation = match failure.stage {
          CheckoutStage::OrderCreation => Operation::CreateOrder,
          CheckoutStage::PaymentSubmission => Operation::SubmitPayment,
        };
        let mut effects = self.failure(operation, &failure.error);
        if let Some(limitation) = failure.limitation() {
          effects.push(self.notify(NoticeKind::Info, limitation));
        }
        effects
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn feedback() -> Feedback {
    Feedback::from_config(&ClientConfig::default())
  }

  fn texts(effects: &[Effect]) -> Vec<&str> {
    effects.iter().filter_map(Effect::as_notice).map(|n| n.text.as_str()).collect()
  }

  #[test]
  fn service_detail_wins_over_fallback() {
    let err = CartError::Service {
      status: 400,
      detail: Some("Game is out of stock".into()),
    };
    assert_eq!(texts(&feedback().failure(Operation::AddItem, &err)), vec!["Game is out of stock"]);

    let bare = CartError::Service { status: 500, detail: None };
    assert_eq!(texts(&feedback().failure(Operation::RemoveItem, &bare)), vec!["Failed to remove item"]);
  }

  #[test]
  fn unauthenticated_redirects_to_login() {
    let effects = feedback().failure(Operation::FetchCart, &CartError::Unauthenticated);
    assert_eq!(texts(&effects), vec!["Please login to view your cart"]);
    assert!(effects.contains(&Effect::Navigate {
      surface: Surface::Login,
      path: "login.html".into(),
      after: Duration::ZERO,
    }));
  }

  #[test]
  fn quantity_below_one_is_silent_but_add_is_not() {
    let err = CartError::Validation("Quantity must be at least 1".into());
    assert!(feedback().failure(Operation::UpdateQuantity, &err).is_empty());
    assert_eq!(texts(&feedback().failure(Operation::AddItem, &err)), vec!["Quantity must be at least 1"]);
  }

  #[test]
  fn network_failures_invite_a_retry() {
    let err = CartError::Network("connection refused".into());
    assert_eq!(
      texts(&feedback().failure(Operation::FetchCart, &err)),
      vec!["Failed to fetch cart items. Please try again."]
    );
  }
}
