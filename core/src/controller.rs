// cartflow/src/controller.rs

//! The single owner of the cart cache.
//!
//! User actions arrive as [`Intent`]s on a bounded queue and are handled one
//! at a time, each to completion (including its reload) before the next is
//! taken. Two quick clicks therefore become two sequential requests rather
//! than racing ones.

use crate::cart::{self, render_cart, CartCache, CartView, Control};
use crate::checkout::{CheckoutOrchestrator, CheckoutReport};
use crate::config::ClientConfig;
use crate::error::{CartError, Result};
use crate::models::{CartItemId, GameId};
use crate::notice::{Effect, Feedback, Operation};
use crate::service::CartService;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

pub const DEFAULT_QUEUE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
  Refresh,
  AddItem { game_id: GameId, quantity: u32 },
  UpdateQuantity { item_id: CartItemId, quantity: u32 },
  RemoveItem { item_id: CartItemId },
  Checkout,
}

impl From<Control> for Intent {
  fn from(control: Control) -> Self {
    match control {
      Control::SetQuantity { item_id, quantity } => Intent::UpdateQuantity { item_id, quantity },
      Control::Remove { item_id } => Intent::RemoveItem { item_id },
    }
  }
}

/// What the front end needs after one intent: the view to draw and the
/// effects to perform.
#[derive(Debug)]
pub struct Update {
  pub view: CartView,
  pub effects: Vec<Effect>,
  /// Present only for [`Intent::Checkout`] runs that reached the orchestrator.
  pub checkout: Option<CheckoutReport>,
  /// Σ quantity for the navigation badge.
  pub item_count: u32,
}

pub struct CartController {
  service: Arc<dyn CartService>,
  cache: CartCache,
  orchestrator: CheckoutOrchestrator,
  feedback: Feedback,
}

impl CartController {
  pub fn new(service: Arc<dyn CartService>, config: &ClientConfig) -> Result<Self> {
    let orchestrator = CheckoutOrchestrator::new(service.clone(), config.payment_method.clone())?;
    Ok(Self {
      service,
      cache: CartCache::new(),
      orchestrator,
      feedback: Feedback::from_config(config),
    })
  }

  pub fn cache(&self) -> &CartCache {
    &self.cache
  }

  pub fn view(&self) -> CartView {
    render_cart(self.cache.items())
  }

  /// Handles one intent. Every error ends up as an effect here; nothing is returned as `Err`.
  #[instrument(name = "CartController::handle", skip(self))]
  pub async fn handle(&mut self, intent: Intent) -> Update {
    let service = self.service.as_ref();
    let mut checkout = None;

    let effects = match intent {
      Intent::Refresh => match self.cache.refresh(service).await {
        Ok(()) => Vec::new(),
        Err(e) => self.feedback.failure(Operation::FetchCart, &e),
      },
      Intent::AddItem { game_id, quantity } => {
        let result = cart::add_item(service, &mut self.cache, game_id, quantity).await;
        self.mutation_effects(Operation::AddItem, result)
      }
      Intent::UpdateQuantity { item_id, quantity } => {
        let result = cart::update_quantity(service, &mut self.cache, item_id, quantity).await;
        self.mutation_effects(Operation::UpdateQuantity, result)
      }
      Intent::RemoveItem { item_id } => {
        let result = cart::remove_item(service, &mut self.cache, item_id).await;
        self.mutation_effects(Operation::RemoveItem, result)
      }
      Intent::Checkout => match self.orchestrator.run(&mut self.cache).await {
        Ok(report) => {
          let mut effects = self.feedback.checkout(&report);
          if let Some(failure) = report.failure() {
            // Without a session the reload would only repeat the login prompt.
            if !failure.error.is_unauthenticated() {
              if let Err(e) = self.cache.refresh(service).await {
                effects.extend(self.feedback.failure(Operation::FetchCart, &e));
              }
            }
          }
          checkout = Some(report);
          effects
        }
        Err(e) => self.feedback.failure(Operation::Checkout, &e),
      },
    };

    debug!(effects = effects.len(), "Intent handled.");
    Update {
      view: self.view(),
      effects,
      checkout,
      item_count: self.cache.item_count(),
    }
  }

  fn mutation_effects(&self, operation: Operation, result: Result<cart::Applied>) -> Vec<Effect> {
    match result {
      Ok(applied) => self.feedback.applied(&applied),
      Err(e) => self.feedback.failure(operation, &e),
    }
  }

  /// Moves the controller onto its own task and returns the handle used to
  /// enqueue intents. The task ends when every handle is dropped.
  pub fn spawn(mut self, queue_depth: usize) -> (ControllerHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Envelope>(queue_depth.max(1));
    let task = tokio::spawn(async move {
      info!("Cart controller started.");
      while let Some(envelope) = rx.recv().await {
        let update = self.handle(envelope.intent).await;
        // The sender may have stopped waiting; the intent still ran.
        let _ = envelope.reply.send(update);
      }
      info!("Cart controller stopped.");
    });
    (ControllerHandle { tx }, task)
  }
}

struct Envelope {
  intent: Intent,
  reply: oneshot::Sender<Update>,
}

#[derive(Clone)]
pub struct ControllerHandle {
  tx: mpsc::Sender<Envelope>,
}

impl ControllerHandle {
  /// Enqueues `intent` without waiting for it to be handled.
  pub async fn submit(&self, intent: Intent) -> Result<oneshot::Receiver<Update>> {
    let (reply, rx) = oneshot::channel();
    self
      .tx
      .send(Envelope { intent, reply })
      .await
      .map_err(|_| CartError::ControllerStopped)?;
    Ok(rx)
  }

  /// Enqueues `intent` and waits for its [`Update`].
  pub async fn dispatch(&self, intent: Intent) -> Result<Update> {
    let rx = self.submit(intent).await?;
    rx.await.map_err(|_| CartError::ControllerStopped)
  }
}
