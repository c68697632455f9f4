// cartflow/src/config.rs

use crate::credential::BearerToken;
use crate::error::{CartError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_PAYMENT_METHOD: &str = "credit_card";

#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Root every endpoint path is resolved against. Always ends with `/`.
  pub api_base_url: Url,
  pub token: Option<BearerToken>,

  /// Upper bound on any single request to the cart service.
  pub request_timeout: Duration,
  /// How long the order confirmation stays visible before moving to the order-review surface.
  pub redirect_delay: Duration,
  /// How long a transient notice is shown.
  pub notice_ttl: Duration,

  pub payment_method: String,
  pub login_surface: String,
  pub order_review_surface: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base_url: parse_base_url(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
      token: None,
      request_timeout: Duration::from_secs(10),
      redirect_delay: Duration::from_millis(2000),
      notice_ttl: Duration::from_millis(3000),
      payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
      login_surface: "login.html".to_string(),
      order_review_surface: "/orders.html".to_string(),
    }
  }
}

impl ClientConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let cfg = Self::from_lookup(|name| env::var(name).ok())?;
    tracing::info!(api_base_url = %cfg.api_base_url, has_token = cfg.token.is_some(), "Client configuration loaded.");
    Ok(cfg)
  }

  /// Builds the config from an arbitrary variable source. Unset variables fall back to defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let mut cfg = Self::default();

    if let Some(base) = lookup("STOREFRONT_API_BASE_URL") {
      cfg.api_base_url = parse_base_url(&base)?;
    }
    cfg.token = lookup("STOREFRONT_TOKEN").and_then(BearerToken::new);

    if let Some(secs) = lookup("STOREFRONT_REQUEST_TIMEOUT_SECS") {
      cfg.request_timeout = Duration::from_secs(parse_number("STOREFRONT_REQUEST_TIMEOUT_SECS", &secs)?);
    }
    if let Some(ms) = lookup("STOREFRONT_REDIRECT_DELAY_MS") {
      cfg.redirect_delay = Duration::from_millis(parse_number("STOREFRONT_REDIRECT_DELAY_MS", &ms)?);
    }
    if let Some(ms) = lookup("STOREFRONT_NOTICE_TTL_MS") {
      cfg.notice_ttl = Duration::from_millis(parse_number("STOREFRONT_NOTICE_TTL_MS", &ms)?);
    }
    if let Some(method) = lookup("STOREFRONT_PAYMENT_METHOD").filter(|m| !m.trim().is_empty()) {
      cfg.payment_method = method.trim().to_string();
    }
    if let Some(surface) = lookup("STOREFRONT_LOGIN_SURFACE") {
      cfg.login_surface = surface;
    }
    if let Some(surface) = lookup("STOREFRONT_ORDER_REVIEW_SURFACE") {
      cfg.order_review_surface = surface;
    }

    if cfg.request_timeout.is_zero() {
      return Err(CartError::Validation(
        "STOREFRONT_REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
      ));
    }
    Ok(cfg)
  }

  pub fn with_base_url(mut self, base: &str) -> Result<Self> {
    self.api_base_url = parse_base_url(base)?;
    Ok(self)
  }

  pub fn with_token(mut self, token: Option<BearerToken>) -> Self {
    self.token = token;
    self
  }

  /// Resolves an endpoint path such as `/cart/add` under the base URL, keeping any base path prefix.
  pub fn endpoint(&self, path: &str) -> Result<Url> {
    self
      .api_base_url
      .join(path.trim_start_matches('/'))
      .map_err(|e| CartError::Validation(format!("Invalid endpoint path '{}': {}", path, e)))
  }
}

fn parse_base_url(raw: &str) -> Result<Url> {
  let trimmed = raw.trim();
  let with_slash = if trimmed.ends_with('/') {
    trimmed.to_string()
  } else {
    format!("{}/", trimmed)
  };
  let url = Url::parse(&with_slash)
    .map_err(|e| CartError::Validation(format!("Invalid STOREFRONT_API_BASE_URL '{}': {}", raw, e)))?;
  if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
    return Err(CartError::Validation(format!(
      "STOREFRONT_API_BASE_URL must be an http(s) URL, got '{}'",
      raw
    )));
  }
  Ok(url)
}

fn parse_number(var_name: &str, raw: &str) -> Result<u64> {
  raw
    .trim()
    .parse::<u64>()
    .map_err(|e| CartError::Validation(format!("Invalid {}: {}", var_name, e)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn defaults_apply_when_nothing_is_set() {
    let cfg = ClientConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg.api_base_url.as_str(), "http://localhost:8000/api/");
    assert!(cfg.token.is_none());
    assert_eq!(cfg.redirect_delay, Duration::from_millis(2000));
    assert_eq!(cfg.payment_method, "credit_card");
    assert_eq!(cfg.order_review_surface, "/orders.html");
  }

  #[test]
  fn endpoints_keep_the_base_path_prefix() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("STOREFRONT_API_BASE_URL", "https://shop.test/api")])).unwrap();
    assert_eq!(cfg.endpoint("/cart/").unwrap().as_str(), "https://shop.test/api/cart/");
    assert_eq!(cfg.endpoint("/cart/42").unwrap().as_str(), "https://shop.test/api/cart/42");
    assert_eq!(cfg.endpoint("/payments/").unwrap().as_str(), "https://shop.test/api/payments/");
  }

  #[test]
  fn overrides_are_parsed() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
      ("STOREFRONT_TOKEN", "tok-123"),
      ("STOREFRONT_REQUEST_TIMEOUT_SECS", "3"),
      ("STOREFRONT_REDIRECT_DELAY_MS", "0"),
      ("STOREFRONT_PAYMENT_METHOD", "paypal"),
    ]))
    .unwrap();
    assert_eq!(cfg.token.as_ref().map(|t| t.expose()), Some("tok-123"));
    assert_eq!(cfg.request_timeout, Duration::from_secs(3));
    assert_eq!(cfg.redirect_delay, Duration::ZERO);
    assert_eq!(cfg.payment_method, "paypal");
  }

  #[test]
  fn rejects_bad_values() {
    assert!(ClientConfig::from_lookup(lookup_from(&[("STOREFRONT_API_BASE_URL", "not a url")])).is_err());
    assert!(ClientConfig::from_lookup(lookup_from(&[("STOREFRONT_API_BASE_URL", "ftp://shop.test")])).is_err());
    assert!(ClientConfig::from_lookup(lookup_from(&[("STOREFRONT_REQUEST_TIMEOUT_SECS", "0")])).is_err());
    assert!(ClientConfig::from_lookup(lookup_from(&[("STOREFRONT_NOTICE_TTL_MS", "soon")])).is_err());
  }
}
