// storefront_cli/src/report.rs

use cartflow::{CheckoutOutcome, Effect, NoticeKind, Update};
use std::time::Duration;

/// Whether the update carries an error notice.
pub fn has_error(update: &Update) -> bool {
  update
    .effects
    .iter()
    .filter_map(Effect::as_notice)
    .any(|notice| notice.kind == NoticeKind::Error)
}

/// Prints the view and notices, and returns the longest redirect delay asked for.
pub fn print_update(update: &Update) -> Option<Duration> {
  println!("{}", update.view);
  println!("Items in cart: {}", update.item_count);

  if let Some(report) = &update.checkout {
    match &report.outcome {
      CheckoutOutcome::Completed { order, payment } => {
        println!(
          "Order #{} for {} (payment {:?}).",
          order.order_id,
          cartflow::models::format_price(order.total_price),
          payment.payment_status.as_deref().unwrap_or("recorded")
        );
      }
      CheckoutOutcome::Failed(failure) => {
        println!("Checkout failed during {:?}: {}", failure.stage, failure.error);
      }
    }
  }

  let mut redirect = None;
  for effect in &update.effects {
    match effect {
      Effect::Notify(notice) => {
        let tag = match notice.kind {
          NoticeKind::Success => "ok",
          NoticeKind::Error => "error",
          NoticeKind::Info => "info",
        };
        println!("[{}] {}", tag, notice.text);
      }
      Effect::Navigate { surface, path, after } => {
        println!("-> {:?}: {}", surface, path);
        redirect = redirect.max(Some(*after));
      }
    }
  }
  redirect
}

#[cfg(test)]
mod tests {
  use super::*;
  use cartflow::{render_cart, Notice};

  fn update_with(effects: Vec<Effect>) -> Update {
    Update {
      view: render_cart(&[]),
      effects,
      checkout: None,
      item_count: 0,
    }
  }

  #[test]
  fn failed_refresh_is_detected() {
    let failed = update_with(vec![Effect::Notify(Notice {
      kind: NoticeKind::Error,
      text: "Failed to fetch cart items. Please try again.".to_string(),
      ttl: Duration::from_secs(3),
    })]);
    assert!(has_error(&failed));
    assert!(!has_error(&update_with(Vec::new())));
  }
}
