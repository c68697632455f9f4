// cartflow/src/credential.rs

//! The opaque bearer token attached to every cart request.
//!
//! Where the token comes from is the caller's business (a login flow, an
//! environment variable, a keychain). This crate only consumes it.

use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
  /// Wraps a raw token. Blank input yields `None`, the same as holding no credential.
  pub fn new(raw: impl Into<String>) -> Option<Self> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      None
    } else {
      Some(BearerToken(trimmed.to_string()))
    }
  }

  pub fn expose(&self) -> &str {
    &self.0
  }

  /// Value for the `Authorization` header.
  pub fn header_value(&self) -> String {
    format!("Bearer {}", self.0)
  }
}

// Tokens end up in config structs that get logged with `?`.
impl fmt::Debug for BearerToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("BearerToken([REDACTED])")
  }
}
