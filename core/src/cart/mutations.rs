// cartflow/src/cart/mutations.rs

//! add / update-quantity / remove.
//!
//! Every mutation validates locally, issues one request, and on success
//! reloads the whole cart instead of patching the cache. A failed request
//! leaves the cache exactly as it was.

use super::cache::CartCache;
use crate::error::{CartError, Result};
use crate::models::{CartItemId, GameId, NewCartItem};
use crate::notice::Operation;
use crate::service::CartService;
use tracing::{debug, info, warn};

/// A mutation the service accepted. The follow-up reload may still have failed.
#[derive(Debug)]
pub struct Applied {
  pub operation: Operation,
  pub refresh_error: Option<CartError>,
}

pub async fn add_item(
  service: &dyn CartService,
  cache: &mut CartCache,
  game_id: GameId,
  quantity: u32,
) -> Result<Applied> {
  if quantity < 1 {
    return Err(CartError::Validation("Quantity must be at least 1".to_string()));
  }
  service.add_item(&NewCartItem { game_id, quantity }).await?;
  info!(game_id, quantity, "Game added to cart.");
  Ok(settle(Operation::AddItem, service, cache).await)
}

/// Values below 1 are ignored: no request, no cache change. Removing a line
/// goes through [`remove_item`] only.
pub async fn update_quantity(
  service: &dyn CartService,
  cache: &mut CartCache,
  item_id: CartItemId,
  quantity: u32,
) -> Result<Applied> {
  if quantity < 1 {
    debug!(item_id, quantity, "Ignoring quantity update below 1.");
    return Err(CartError::Validation("Quantity must be at least 1".to_string()));
  }
  service.update_quantity(item_id, quantity).await?;
  info!(item_id, quantity, "Cart quantity updated.");
  Ok(settle(Operation::UpdateQuantity, service, cache).await)
}

pub async fn remove_item(service: &dyn CartService, cache: &mut CartCache, item_id: CartItemId) -> Result<Applied> {
  service.remove_item(item_id).await?;
  info!(item_id, "Cart line removed.");
  Ok(settle(Operation::RemoveItem, service, cache).await)
}

async fn settle(operation: Operation, service: &dyn CartService, cache: &mut CartCache) -> Applied {
  cache.mark_stale();
  let refresh_error = cache.refresh(service).await.err();
  if let Some(e) = &refresh_error {
    warn!(?operation, error = %e, "Mutation applied but the cart could not be reloaded.");
  }
  Applied {
    operation,
    refresh_error,
  }
}
