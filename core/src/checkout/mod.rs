// cartflow/src/checkout/mod.rs

//! Two-step checkout: create the order, then submit a pending payment for it.

pub mod orchestrator;
pub mod state;

pub use orchestrator::CheckoutOrchestrator;
pub use state::{CheckoutFailure, CheckoutOutcome, CheckoutReport, CheckoutStage, CheckoutState};
