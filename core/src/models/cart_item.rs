// cartflow/src/models/cart_item.rs

use super::game::{Game, GameId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type CartItemId = i64;

/// One line of the remote cart. `quantity` is at least 1 for any line the
/// cache keeps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: CartItemId,
  pub game: Game,
  pub quantity: u32,
}

impl CartItem {
  pub fn line_total(&self) -> Decimal {
    self.game.price * Decimal::from(self.quantity)
  }
}

/// Body of `POST /cart/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCartItem {
  pub game_id: GameId,
  pub quantity: u32,
}

/// Body of `PUT /cart/{itemId}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityUpdate {
  pub quantity: u32,
}
