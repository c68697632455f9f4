// cartflow/src/cart/mod.rs

//! Local reflection of the remote cart: the cache, its pure view, and the
//! mutations that keep both in step with the service.

pub mod cache;
pub mod mutations;
pub mod view;

pub use cache::CartCache;
pub use mutations::{add_item, remove_item, update_quantity, Applied};
pub use view::{render_cart, CartRow, CartView, Control, ViewNode, EMPTY_CART_MESSAGE};
