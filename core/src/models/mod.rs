// cartflow/src/models/mod.rs

//! Transient client-side copies of entities owned by the Remote Cart Service.

pub mod cart_item;
pub mod game;
pub mod money;
pub mod order;
pub mod payment;

pub use cart_item::{CartItem, CartItemId, NewCartItem, QuantityUpdate};
pub use game::{Game, GameId};
pub use money::format_price;
pub use order::{Order, OrderId};
pub use payment::{NewPayment, PaymentRecord, PaymentStatus};
