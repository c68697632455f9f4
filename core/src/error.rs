// cartflow/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failures raised by the step pipeline itself, independent of what its handlers do.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Error in step handler. Source: {source}")]
  Handler {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::Handler { source: err }
  }
}

/// Everything that can go wrong while talking to the Remote Cart Service or
/// driving the cart and checkout workflow.
#[derive(Debug, Error)]
pub enum CartError {
  /// No bearer token is held, or the service rejected the one we sent.
  #[error("Not authenticated")]
  Unauthenticated,

  /// The service answered with a non-success status.
  #[error("Cart service error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
  Service { status: u16, detail: Option<String> },

  /// The request never completed: connection failure, timeout, broken body stream.
  #[error("Network error: {0}")]
  Network(String),

  /// Input rejected locally before any request was issued.
  #[error("Validation error: {0}")]
  Validation(String),

  /// A success status whose body does not have the expected shape.
  #[error("Malformed response from cart service: {0}")]
  MalformedResponse(String),

  #[error("Checkout workflow error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Cart controller is no longer running")]
  ControllerStopped,
}

impl CartError {
  /// Human-readable detail worth showing as-is, when the error carries one.
  pub fn detail(&self) -> Option<&str> {
    match self {
      CartError::Service { detail, .. } => detail.as_deref(),
      CartError::Validation(message) => Some(message.as_str()),
      _ => None,
    }
  }

  pub fn is_unauthenticated(&self) -> bool {
    matches!(self, CartError::Unauthenticated)
  }
}

impl From<reqwest::Error> for CartError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_decode() {
      CartError::MalformedResponse(err.to_string())
    } else if err.is_timeout() {
      CartError::Network(format!("request timed out: {}", err))
    } else {
      CartError::Network(err.to_string())
    }
  }
}

impl From<serde_json::Error> for CartError {
  fn from(err: serde_json::Error) -> Self {
    CartError::MalformedResponse(err.to_string())
  }
}

pub type Result<T, E = CartError> = std::result::Result<T, E>;
