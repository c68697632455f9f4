// tests/common/mod.rs
#![allow(dead_code)] // Each test binary uses a different slice of these helpers

use async_trait::async_trait;
use cartflow::models::{CartItemId, GameId, OrderId};
use cartflow::{
  CartError, CartItem, CartService, ContextData, FlowError, Game, NewCartItem, NewPayment, Order, PaymentRecord,
  PipelineControl,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::time::Duration;
use tracing::Level;

// --- Pipeline test context and error ---
#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub message: String,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow error: {0}")]
  Flow(String), // Stored as Debug text so the enum stays Eq

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(err: FlowError) -> Self {
    TestError::Flow(format!("{:?}", err))
  }
}

pub fn create_simple_handler(
  step_name: &'static str,
  message_to_append: &'static str,
) -> cartflow::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.message.push_str(message_to_append);
      guard.steps_executed.push(step_name.to_string());
      tracing::debug!(target: "test_handlers", step = step_name, counter = guard.counter, "executed");
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  })
}

pub fn create_failing_handler(
  step_name: &'static str,
  error_message: &'static str,
) -> cartflow::pipeline::Handler<TestContext, TestError> {
  Box::new(move |ctx: ContextData<TestContext>| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      tracing::warn!(target: "test_handlers", step = step_name, "failing with: '{}'", error_message);
      Err(TestError::Handler(error_message.to_string()))
    })
  })
}

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Catalogue fixtures ---
pub fn game(game_id: GameId, title: &str, cents: i64) -> Game {
  Game::new(game_id, title, Decimal::new(cents, 2))
}

pub fn line(id: CartItemId, game: Game, quantity: u32) -> CartItem {
  CartItem { id, game, quantity }
}

/// The 2 × $19.99 cart used across the checkout tests.
pub fn two_copies_cart() -> Vec<CartItem> {
  vec![line(1, game(7, "Hollow Depths", 1999), 2)]
}

// --- Fake Remote Cart Service ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  ListCart,
  AddItem,
  UpdateQuantity,
  RemoveItem,
  Checkout,
  SubmitPayment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
  ListCart,
  AddItem { game_id: GameId, quantity: u32 },
  UpdateQuantity { item_id: CartItemId, quantity: u32 },
  RemoveItem { item_id: CartItemId },
  Checkout,
  SubmitPayment(NewPayment),
}

impl Call {
  pub fn endpoint(&self) -> Endpoint {
    match self {
      Call::ListCart => Endpoint::ListCart,
      Call::AddItem { .. } => Endpoint::AddItem,
      Call::UpdateQuantity { .. } => Endpoint::UpdateQuantity,
      Call::RemoveItem { .. } => Endpoint::RemoveItem,
      Call::Checkout => Endpoint::Checkout,
      Call::SubmitPayment(_) => Endpoint::SubmitPayment,
    }
  }
}

/// A scripted failure. `CartError` is not `Clone`, so each hit builds a fresh one.
#[derive(Debug, Clone)]
pub enum FailWith {
  Unauthenticated,
  Service { status: u16, detail: Option<String> },
  Network(String),
}

impl FailWith {
  pub fn service(status: u16, detail: &str) -> Self {
    FailWith::Service {
      status,
      detail: Some(detail.to_string()),
    }
  }

  fn to_error(&self) -> CartError {
    match self {
      FailWith::Unauthenticated => CartError::Unauthenticated,
      FailWith::Service { status, detail } => CartError::Service {
        status: *status,
        detail: detail.clone(),
      },
      FailWith::Network(message) => CartError::Network(message.clone()),
    }
  }
}

#[derive(Default)]
struct FakeState {
  items: Vec<CartItem>,
  catalogue: HashMap<GameId, Game>,
  calls: Vec<Call>,
  failures: HashMap<Endpoint, FailWith>,
  next_item_id: CartItemId,
  next_order_id: OrderId,
  latency: Option<Duration>,
}

/// In-memory stand-in for the service: owns a cart, records every call in
/// order, and fails whichever endpoints a test scripts to fail.
pub struct FakeCartService {
  state: Mutex<FakeState>,
}

impl Default for FakeCartService {
  fn default() -> Self {
    Self::new()
  }
}

impl FakeCartService {
  pub fn new() -> Self {
    Self {
      state: Mutex::new(FakeState {
        next_item_id: 100,
        next_order_id: 500,
        ..FakeState::default()
      }),
    }
  }

  pub fn with_cart(items: Vec<CartItem>) -> Self {
    let fake = Self::new();
    {
      let mut state = fake.state.lock();
      for item in &items {
        state.catalogue.insert(item.game.game_id, item.game.clone());
      }
      state.items = items;
    }
    fake
  }

  pub fn stock(&self, game: Game) {
    self.state.lock().catalogue.insert(game.game_id, game);
  }

  pub fn fail(&self, endpoint: Endpoint, with: FailWith) {
    self.state.lock().failures.insert(endpoint, with);
  }

  pub fn recover(&self, endpoint: Endpoint) {
    self.state.lock().failures.remove(&endpoint);
  }

  /// Delay applied to the mutation endpoints before they answer.
  pub fn set_latency(&self, latency: Duration) {
    self.state.lock().latency = Some(latency);
  }

  pub fn calls(&self) -> Vec<Call> {
    self.state.lock().calls.clone()
  }

  pub fn endpoints(&self) -> Vec<Endpoint> {
    self.state.lock().calls.iter().map(Call::endpoint).collect()
  }

  pub fn count(&self, endpoint: Endpoint) -> usize {
    self.endpoints().into_iter().filter(|e| *e == endpoint).count()
  }

  pub fn remote_items(&self) -> Vec<CartItem> {
    self.state.lock().items.clone()
  }

  /// Writes a line straight into the remote cart, bypassing the client.
  pub fn put_remote(&self, item: CartItem) {
    self.state.lock().items.push(item);
  }

  fn record(&self, call: Call) -> Result<(), CartError> {
    let mut state = self.state.lock();
    let endpoint = call.endpoint();
    state.calls.push(call);
    match state.failures.get(&endpoint) {
      Some(with) => Err(with.to_error()),
      None => Ok(()),
    }
  }

  async fn pause(&self) {
    let latency = self.state.lock().latency;
    if let Some(latency) = latency {
      tokio::time::sleep(latency).await;
    }
  }
}

fn not_found(detail: &str) -> CartError {
  CartError::Service {
    status: 404,
    detail: Some(detail.to_string()),
  }
}

#[async_trait]
impl CartService for FakeCartService {
  async fn list_cart(&self) -> cartflow::Result<Vec<CartItem>> {
    self.record(Call::ListCart)?;
    Ok(self.state.lock().items.clone())
  }

  async fn add_item(&self, item: &NewCartItem) -> cartflow::Result<()> {
    self.record(Call::AddItem {
      game_id: item.game_id,
      quantity: item.quantity,
    })?;
    self.pause().await;
    let mut state = self.state.lock();
    let game = state
      .catalogue
      .get(&item.game_id)
      .cloned()
      .ok_or_else(|| not_found("Game not found"))?;
    if let Some(pos) = state.items.iter().position(|l| l.game.game_id == item.game_id) {
      state.items[pos].quantity += item.quantity;
    } else {
      let id = state.next_item_id;
      state.next_item_id += 1;
      state.items.push(CartItem {
        id,
        game,
        quantity: item.quantity,
      });
    }
    Ok(())
  }

  async fn update_quantity(&self, item_id: CartItemId, quantity: u32) -> cartflow::Result<()> {
    self.record(Call::UpdateQuantity { item_id, quantity })?;
    self.pause().await;
    let mut state = self.state.lock();
    let existing = state
      .items
      .iter_mut()
      .find(|l| l.id == item_id)
      .ok_or_else(|| not_found("Cart item not found"))?;
    existing.quantity = quantity;
    Ok(())
  }

  async fn remove_item(&self, item_id: CartItemId) -> cartflow::Result<()> {
    self.record(Call::RemoveItem { item_id })?;
    self.pause().await;
    let mut state = self.state.lock();
    let before = state.items.len();
    state.items.retain(|l| l.id != item_id);
    if state.items.len() == before {
      return Err(not_found("Cart item not found"));
    }
    Ok(())
  }

  async fn checkout(&self) -> cartflow::Result<Order> {
    self.record(Call::Checkout)?;
    let mut state = self.state.lock();
    if state.items.is_empty() {
      return Err(CartError::Service {
        status: 400,
        detail: Some("Cart is empty".to_string()),
      });
    }
    let total_price = state.items.iter().map(CartItem::line_total).sum();
    let order_id = state.next_order_id;
    state.next_order_id += 1;
    state.items.clear();
    Ok(Order {
      order_id,
      total_price,
      status: Some("pending".to_string()),
    })
  }

  async fn submit_payment(&self, payment: &NewPayment) -> cartflow::Result<PaymentRecord> {
    self.record(Call::SubmitPayment(payment.clone()))?;
    Ok(PaymentRecord {
      payment_id: Some(900),
      order_id: Some(payment.order_id),
      amount_paid: Some(payment.amount_paid),
      payment_method: Some(payment.payment_method.clone()),
      payment_status: Some("pending".to_string()),
    })
  }
}
