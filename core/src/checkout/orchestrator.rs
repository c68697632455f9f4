// cartflow/src/checkout/orchestrator.rs

use super::state::{CheckoutFailure, CheckoutOutcome, CheckoutReport, CheckoutStage, CheckoutState};
use crate::cart::CartCache;
use crate::core::{ContextData, PipelineControl, PipelineResult};
use crate::error::{CartError, FlowError, Result};
use crate::models::{NewPayment, Order, PaymentRecord};
use crate::pipeline::Pipeline;
use crate::service::CartService;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const CREATE_ORDER: &str = "create_order";
const SUBMIT_PAYMENT: &str = "submit_payment";
const COMPLETE_CHECKOUT: &str = "complete_checkout";

/// State shared by the checkout steps for one run.
pub(crate) struct CheckoutCtxData {
  service: Arc<dyn CartService>,
  payment_method: String,
  state: CheckoutState,
  transitions: Vec<CheckoutState>,
  order: Option<Order>,
  payment: Option<PaymentRecord>,
}

impl CheckoutCtxData {
  fn new(service: Arc<dyn CartService>, payment_method: String) -> Self {
    Self {
      service,
      payment_method,
      state: CheckoutState::Idle,
      transitions: vec![CheckoutState::Idle],
      order: None,
      payment: None,
    }
  }

  fn advance(&mut self, next: CheckoutState) -> std::result::Result<(), FlowError> {
    if !self.state.can_transition_to(next) {
      return Err(FlowError::Internal(format!(
        "illegal checkout transition {:?} -> {:?}",
        self.state, next
      )));
    }
    self.state = next;
    self.transitions.push(next);
    Ok(())
  }
}

pub struct CheckoutOrchestrator {
  service: Arc<dyn CartService>,
  payment_method: String,
  pipeline: Pipeline<CheckoutCtxData, CartError>,
}

impl CheckoutOrchestrator {
  pub fn new(service: Arc<dyn CartService>, payment_method: impl Into<String>) -> Result<Self> {
    Ok(Self {
      service,
      payment_method: payment_method.into(),
      pipeline: build_checkout_pipeline()?,
    })
  }

  /// Creates the order, pays for it, and empties `cache` on success.
  ///
  /// A stale `cache` is reloaded first. After a failed run it is left stale.
  ///
  /// A failure at either step is reported in the returned
  /// [`CheckoutReport`], not as `Err`. `Err` is reserved for checkouts that
  /// never started (empty cart, failed reload) and for pipeline faults. When payment fails
  /// the order already created is left as is; see
  /// [`CheckoutFailure::dangling_order`].
  #[instrument(name = "CheckoutOrchestrator::run", skip_all, fields(lines = cache.items().len()))]
  pub async fn run(&self, cache: &mut CartCache) -> Result<CheckoutReport> {
    // The service resolves the lines itself; a stale cache says nothing about them.
    if cache.is_stale() {
      cache.refresh(self.service.as_ref()).await?;
    }
    if cache.is_empty() {
      return Err(CartError::Validation("Your cart is empty".to_string()));
    }

    let ctx_data = ContextData::new(CheckoutCtxData::new(self.service.clone(), self.payment_method.clone()));
    let run_result = self.pipeline.run(ctx_data.clone()).await;

    let report = {
      let mut guard = ctx_data.write();
      match run_result {
        Ok(PipelineResult::Completed) => {
          let order = guard
            .order
            .take()
            .ok_or_else(|| FlowError::Internal("checkout completed without an order".to_string()))?;
          let payment = guard.payment.take().unwrap_or_default();
          CheckoutReport {
            outcome: CheckoutOutcome::Completed { order, payment },
            transitions: std::mem::take(&mut guard.transitions),
          }
        }
        Ok(PipelineResult::Stopped) => {
          return Err(FlowError::Internal("checkout pipeline stopped before completion".to_string()).into());
        }
        Err(error) => {
          let stage = match guard.state {
            CheckoutState::OrderPending => CheckoutStage::OrderCreation,
            CheckoutState::PaymentPending => CheckoutStage::PaymentSubmission,
            _ => return Err(error),
          };
          guard.advance(CheckoutState::Failed)?;
          let dangling_order = match stage {
            CheckoutStage::PaymentSubmission => guard.order.clone(),
            CheckoutStage::OrderCreation => None,
          };
          CheckoutReport {
            outcome: CheckoutOutcome::Failed(CheckoutFailure {
              stage,
              error,
              dangling_order,
            }),
            transitions: std::mem::take(&mut guard.transitions),
          }
        }
      }
    };

    match &report.outcome {
      CheckoutOutcome::Completed { order, .. } => {
        cache.clear_after_checkout();
        info!(order_id = order.order_id, total = %order.total_price, "Checkout completed.");
      }
      CheckoutOutcome::Failed(failure) => {
        // The checkout request went out, so the remote cart may already be gone.
        cache.mark_stale();
        match &failure.dangling_order {
          Some(order) => warn!(
            order_id = order.order_id,
            error = %failure.error,
            "Payment failed after order creation; order left pending without cancellation."
          ),
          None => warn!(stage = ?failure.stage, error = %failure.error, "Checkout failed."),
        }
      }
    }
    Ok(report)
  }
}

fn build_checkout_pipeline() -> std::result::Result<Pipeline<CheckoutCtxData, CartError>, FlowError> {
  let mut p = Pipeline::<CheckoutCtxData, CartError>::new(&[
    (CREATE_ORDER, false),
    (SUBMIT_PAYMENT, false),
    (COMPLETE_CHECKOUT, false),
  ]);

  p.before_root(CREATE_ORDER, |ctx_data: ContextData<CheckoutCtxData>| async move {
    ctx_data.update(|data| data.advance(CheckoutState::OrderPending))?;
    Ok::<_, CartError>(PipelineControl::Continue)
  })?;

  // The service builds the order from the session's cart; no lines are sent.
  p.on_root(CREATE_ORDER, |ctx_data: ContextData<CheckoutCtxData>| async move {
    let service = ctx_data.read().service.clone();
    let order = service.checkout().await?;
    info!(order_id = order.order_id, total = %order.total_price, "Order created.");
    ctx_data.write().order = Some(order);
    Ok::<_, CartError>(PipelineControl::Continue)
  })?;

  p.before_root(SUBMIT_PAYMENT, |ctx_data: ContextData<CheckoutCtxData>| async move {
    ctx_data.update(|data| {
      if data.order.is_none() {
        return Err(FlowError::Internal("payment step reached without an order".to_string()));
      }
      data.advance(CheckoutState::PaymentPending)
    })?;
    Ok::<_, CartError>(PipelineControl::Continue)
  })?;

  p.on_root(SUBMIT_PAYMENT, |ctx_data: ContextData<CheckoutCtxData>| async move {
    let (service, payment) = {
      let guard = ctx_data.read();
      let order = guard
        .order
        .as_ref()
        .ok_or_else(|| FlowError::Internal("payment step reached without an order".to_string()))?;
      (guard.service.clone(), NewPayment::for_order(order, guard.payment_method.clone()))
    };
    let record = service.submit_payment(&payment).await?;
    info!(order_id = payment.order_id, amount_paid = %payment.amount_paid, "Payment submitted.");
    ctx_data.write().payment = Some(record);
    Ok::<_, CartError>(PipelineControl::Continue)
  })?;

  p.on_root(COMPLETE_CHECKOUT, |ctx_data: ContextData<CheckoutCtxData>| async move {
    ctx_data.update(|data| data.advance(CheckoutState::Completed))?;
    Ok::<_, CartError>(PipelineControl::Continue)
  })?;

  Ok(p)
}
