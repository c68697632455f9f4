// cartflow/src/cart/cache.rs

use crate::error::Result;
use crate::models::CartItem;
use crate::service::CartService;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

/// The most recently fetched cart lines.
///
/// Never the source of truth: every mutation marks it stale and only a full
/// [`refresh`](CartCache::refresh) makes it fresh again. The total is derived
/// on demand, never stored.
#[derive(Debug, Clone)]
pub struct CartCache {
  items: Vec<CartItem>,
  stale: bool,
}

impl Default for CartCache {
  fn default() -> Self {
    Self::new()
  }
}

impl CartCache {
  /// An empty cache that has not been loaded yet, hence stale.
  pub fn new() -> Self {
    Self {
      items: Vec::new(),
      stale: true,
    }
  }

  pub fn items(&self) -> &[CartItem] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn is_stale(&self) -> bool {
    self.stale
  }

  pub fn mark_stale(&mut self) {
    self.stale = true;
  }

  /// Σ price × quantity over the cached lines.
  pub fn total(&self) -> Decimal {
    self.items.iter().map(CartItem::line_total).sum()
  }

  /// Σ quantity, the number shown on the navigation cart badge.
  pub fn item_count(&self) -> u32 {
    self.items.iter().map(|item| item.quantity).sum()
  }

  /// Replaces the cache wholesale with what the service currently holds.
  /// On failure the previous contents are kept untouched.
  #[instrument(name = "CartCache::refresh", skip_all, err(Display))]
  pub async fn refresh(&mut self, service: &dyn CartService) -> Result<()> {
    let items = service.list_cart().await?;
    self.replace(items);
    debug!(lines = self.items.len(), total = %self.total(), "Cart cache refreshed.");
    Ok(())
  }

  /// Empties the cache after a completed checkout. The service has emptied
  /// the cart too, so the result counts as fresh without a re-fetch.
  pub fn clear_after_checkout(&mut self) {
    self.items.clear();
    self.stale = false;
  }

  fn replace(&mut self, items: Vec<CartItem>) {
    let before = items.len();
    self.items = items.into_iter().filter(|item| item.quantity >= 1).collect();
    if self.items.len() != before {
      warn!(dropped = before - self.items.len(), "Dropped cart lines with zero quantity.");
    }
    self.stale = false;
  }
}
