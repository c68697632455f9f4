// cartflow/src/lib.rs

//! Cartflow: the client side of a storefront cart.
//!
//! It keeps a local cache of the remote cart consistent with the Remote Cart
//! Service and drives checkout:
//!  - A [`CartService`] seam, with [`HttpCartService`] speaking the REST/JSON contract.
//!  - A [`CartCache`] rebuilt wholesale after every successful mutation.
//!  - A pure [`render_cart`] from cart lines to display nodes.
//!  - A [`CheckoutOrchestrator`] that creates the order, then submits its payment.
//!  - A [`CartController`] that consumes user intents sequentially from a queue.
//!
//! Errors never escape as panics or to a global handler: the controller turns
//! every outcome into [`Effect`]s (notices and redirects) for the front end.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod controller;
pub mod core;
pub mod credential;
pub mod error;
pub mod models;
pub mod notice;
pub mod pipeline;
pub mod service;

// --- Re-exports for the Public API ---

pub use crate::cart::{render_cart, CartCache, CartRow, CartView, Control, ViewNode};
pub use crate::checkout::{
  CheckoutFailure, CheckoutOrchestrator, CheckoutOutcome, CheckoutReport, CheckoutStage, CheckoutState,
};
pub use crate::config::ClientConfig;
pub use crate::controller::{CartController, ControllerHandle, Intent, Update};
pub use crate::core::{ContextData, PipelineControl, PipelineResult};
pub use crate::credential::BearerToken;
pub use crate::error::{CartError, FlowError, Result};
pub use crate::models::{CartItem, Game, NewCartItem, NewPayment, Order, PaymentRecord, PaymentStatus};
pub use crate::notice::{Effect, Feedback, Notice, NoticeKind, Operation, Surface};
pub use crate::pipeline::Pipeline;
pub use crate::service::{CartService, HttpCartService};
