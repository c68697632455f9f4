// cartflow/src/service/http.rs

//! [`CartService`] over HTTP/JSON with bearer authentication.

use super::CartService;
use crate::config::ClientConfig;
use crate::credential::BearerToken;
use crate::error::{CartError, Result};
use crate::models::{CartItem, CartItemId, NewCartItem, NewPayment, Order, PaymentRecord, QuantityUpdate};
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

pub struct HttpCartService {
  http: Client,
  config: ClientConfig,
  credential: RwLock<Option<BearerToken>>,
}

impl HttpCartService {
  /// Builds the client with the configured per-request timeout. The initial
  /// credential is taken from `config.token`.
  pub fn new(config: ClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.request_timeout)
      .build()
      .map_err(|e| CartError::Network(format!("failed to build HTTP client: {}", e)))?;
    Ok(Self::with_client(http, config))
  }

  pub fn with_client(http: Client, config: ClientConfig) -> Self {
    let credential = RwLock::new(config.token.clone());
    Self { http, config, credential }
  }

  pub fn set_credential(&self, token: BearerToken) {
    *self.credential.write() = Some(token);
  }

  pub fn clear_credential(&self) {
    *self.credential.write() = None;
  }

  pub fn has_credential(&self) -> bool {
    self.credential.read().is_some()
  }

  /// The `Authorization` value, or `Unauthenticated` before anything touches the network.
  fn authorization(&self) -> Result<String> {
    self
      .credential
      .read()
      .as_ref()
      .map(BearerToken::header_value)
      .ok_or(CartError::Unauthenticated)
  }

  fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
    let authorization = self.authorization()?;
    let url = self.config.endpoint(path)?;
    debug!(%method, %url, "Preparing cart service request.");
    Ok(self.http.request(method, url).header(AUTHORIZATION, authorization))
  }

  async fn send(&self, request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    // Bodies of failed responses are best-effort; a broken body still yields the status.
    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    if status == StatusCode::UNAUTHORIZED {
      warn!(?detail, "Cart service rejected the bearer token.");
      return Err(CartError::Unauthenticated);
    }
    warn!(status = status.as_u16(), ?detail, "Cart service returned a non-success status.");
    Err(CartError::Service {
      status: status.as_u16(),
      detail,
    })
  }

  async fn send_for_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
    let response = self.send(request).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
  }

  async fn send_json_body<B: Serialize + Sync>(&self, method: Method, path: &str, body: &B) -> Result<Response> {
    let request = self.request(method, path)?.json(body);
    self.send(request).await
  }
}

#[async_trait]
impl CartService for HttpCartService {
  #[instrument(name = "HttpCartService::list_cart", skip_all, err(Display))]
  async fn list_cart(&self) -> Result<Vec<CartItem>> {
    let request = self.request(Method::GET, "/cart/")?;
    let items: Vec<CartItem> = self.send_for_json(request).await?;
    debug!(lines = items.len(), "Cart fetched.");
    Ok(items)
  }

  #[instrument(name = "HttpCartService::add_item", skip_all, fields(game_id = item.game_id, quantity = item.quantity), err(Display))]
  async fn add_item(&self, item: &NewCartItem) -> Result<()> {
    self.send_json_body(Method::POST, "/cart/add", item).await?;
    Ok(())
  }

  #[instrument(name = "HttpCartService::update_quantity", skip(self), err(Display))]
  async fn update_quantity(&self, item_id: CartItemId, quantity: u32) -> Result<()> {
    let path = format!("/cart/{}", item_id);
    self.send_json_body(Method::PUT, &path, &QuantityUpdate { quantity }).await?;
    Ok(())
  }

  #[instrument(name = "HttpCartService::remove_item", skip(self), err(Display))]
  async fn remove_item(&self, item_id: CartItemId) -> Result<()> {
    let request = self.request(Method::DELETE, &format!("/cart/{}", item_id))?;
    self.send(request).await?;
    Ok(())
  }

  #[instrument(name = "HttpCartService::checkout", skip_all, err(Display))]
  async fn checkout(&self) -> Result<Order> {
    let request = self.request(Method::POST, "/cart/checkout")?;
    self.send_for_json(request).await
  }

  #[instrument(name = "HttpCartService::submit_payment", skip_all, fields(order_id = payment.order_id), err(Display))]
  async fn submit_payment(&self, payment: &NewPayment) -> Result<PaymentRecord> {
    let response = self.send_json_body(Method::POST, "/payments/", payment).await?;
    let bytes = response.bytes().await?;
    // Success is decided by the status; an unexpected body is only worth a log line.
    match serde_json::from_slice::<PaymentRecord>(&bytes) {
      Ok(record) => Ok(record),
      Err(e) => {
        warn!(error = %e, "Payment accepted but the reply body could not be parsed.");
        Ok(PaymentRecord::default())
      }
    }
  }
}

/// Pulls the human-readable `detail` out of an error body.
///
/// Handles `{"detail": "..."}` and the validation form
/// `{"detail": [{"msg": "..."}, ...]}`, whose messages are joined with `"; "`.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  let detail = match value.get("detail")? {
    serde_json::Value::String(s) => s.trim().to_string(),
    serde_json::Value::Array(entries) => entries
      .iter()
      .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
      .collect::<Vec<_>>()
      .join("; "),
    _ => return None,
  };
  if detail.is_empty() {
    None
  } else {
    Some(detail)
  }
}
