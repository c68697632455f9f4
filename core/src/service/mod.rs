// cartflow/src/service/mod.rs

//! The Remote Cart Service seam. The service owns every cart, order and
//! payment; implementations of [`CartService`] only relay requests to it.

pub mod http;

pub use http::HttpCartService;

use crate::error::Result;
use crate::models::{CartItem, CartItemId, NewCartItem, NewPayment, Order, PaymentRecord};
use async_trait::async_trait;

#[async_trait]
pub trait CartService: Send + Sync {
  /// `GET /cart/`: the authenticated user's cart lines, in display order.
  async fn list_cart(&self) -> Result<Vec<CartItem>>;

  /// `POST /cart/add`.
  async fn add_item(&self, item: &NewCartItem) -> Result<()>;

  /// `PUT /cart/{itemId}`.
  async fn update_quantity(&self, item_id: CartItemId, quantity: u32) -> Result<()>;

  /// `DELETE /cart/{itemId}`.
  async fn remove_item(&self, item_id: CartItemId) -> Result<()>;

  /// `POST /cart/checkout` with no body; the service resolves the lines from the session.
  async fn checkout(&self) -> Result<Order>;

  /// `POST /payments/`.
  async fn submit_payment(&self, payment: &NewPayment) -> Result<PaymentRecord>;
}
