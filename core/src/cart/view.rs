// cartflow/src/cart/view.rs

//! Pure rendering of cart lines into display nodes. Nothing here performs I/O
//! or looks at anything but its arguments.

use crate::models::{format_price, CartItem, CartItemId};
use rust_decimal::Decimal;
use std::fmt;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// An action a rendered control performs when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
  /// Request a new quantity. Decrementing a single copy targets 0, which the
  /// update operation rejects without contacting the service.
  SetQuantity { item_id: CartItemId, quantity: u32 },
  Remove { item_id: CartItemId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
  pub item_id: CartItemId,
  pub title: String,
  pub image_url: Option<String>,
  pub unit_price: String,
  pub quantity: u32,
  pub line_total: String,
  pub decrement: Control,
  pub increment: Control,
  pub remove: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
  Empty { message: String },
  Row(CartRow),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
  pub nodes: Vec<ViewNode>,
  pub total_display: String,
  pub checkout_enabled: bool,
}

impl CartView {
  pub fn rows(&self) -> impl Iterator<Item = &CartRow> {
    self.nodes.iter().filter_map(|node| match node {
      ViewNode::Row(row) => Some(row),
      ViewNode::Empty { .. } => None,
    })
  }

  pub fn is_empty_state(&self) -> bool {
    matches!(self.nodes.as_slice(), [ViewNode::Empty { .. }])
  }
}

pub fn render_cart(items: &[CartItem]) -> CartView {
  if items.is_empty() {
    return CartView {
      nodes: vec![ViewNode::Empty {
        message: EMPTY_CART_MESSAGE.to_string(),
      }],
      total_display: format_price(Decimal::ZERO),
      checkout_enabled: false,
    };
  }

  let nodes = items.iter().map(|item| ViewNode::Row(render_row(item))).collect();
  let total: Decimal = items.iter().map(CartItem::line_total).sum();
  CartView {
    nodes,
    total_display: format_price(total),
    checkout_enabled: true,
  }
}

fn render_row(item: &CartItem) -> CartRow {
  CartRow {
    item_id: item.id,
    title: item.game.title.clone(),
    image_url: item.game.image_url.clone(),
    unit_price: format_price(item.game.price),
    quantity: item.quantity,
    line_total: format_price(item.line_total()),
    decrement: Control::SetQuantity {
      item_id: item.id,
      quantity: item.quantity.saturating_sub(1),
    },
    increment: Control::SetQuantity {
      item_id: item.id,
      quantity: item.quantity.saturating_add(1),
    },
    remove: Control::Remove { item_id: item.id },
  }
}

impl fmt::Display for CartView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for node in &self.nodes {
      match node {
        ViewNode::Empty { message } => writeln!(f, "{}", message)?,
        ViewNode::Row(row) => writeln!(
          f,
          "[{}] {:<32} {:>9} x {:<3} {:>10}",
          row.item_id, row.title, row.unit_price, row.quantity, row.line_total
        )?,
      }
    }
    writeln!(f, "Total: {}", self.total_display)?;
    write!(
      f,
      "Checkout: {}",
      if self.checkout_enabled { "available" } else { "disabled" }
    )
  }
}
