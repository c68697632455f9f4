// cartflow/src/models/game.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type GameId = i64;

/// The catalogue entry a cart line refers to. Only `game_id`, `title` and
/// `price` are required; the rest is whatever the catalogue chose to include.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
  #[serde(alias = "id")]
  pub game_id: GameId,
  pub title: String,
  #[serde(deserialize_with = "super::money::deserialize")]
  pub price: Decimal,
  #[serde(default)]
  pub image_url: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub genre: Option<String>,
  #[serde(default)]
  pub platform: Option<String>,
  #[serde(default)]
  pub stock_quantity: Option<i32>,
}

impl Game {
  pub fn new(game_id: GameId, title: impl Into<String>, price: Decimal) -> Self {
    Self {
      game_id,
      title: title.into(),
      price,
      image_url: None,
      description: None,
      genre: None,
      platform: None,
      stock_quantity: None,
    }
  }
}
