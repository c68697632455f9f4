// storefront_cli/src/main.rs

mod cli;
mod report;

use crate::cli::{Cli, Command};
use anyhow::{anyhow, Context};
use cartflow::controller::DEFAULT_QUEUE_DEPTH;
use cartflow::{BearerToken, CartController, CartService, ClientConfig, Control, HttpCartService, Intent};
use clap::Parser;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let mut config = ClientConfig::from_env().context("Failed to load client configuration")?;
  if let Some(base) = cli.base_url.as_deref() {
    config = config.with_base_url(base)?;
  }
  if let Some(raw) = cli.token.as_deref() {
    config = config.with_token(BearerToken::new(raw));
  }

  let service: Arc<dyn CartService> = Arc::new(HttpCartService::new(config.clone())?);
  let (handle, task) = CartController::new(service, &config)?.spawn(DEFAULT_QUEUE_DEPTH);

  let current = handle.dispatch(Intent::Refresh).await?;
  // A cart that could not be loaded is reported as is; acting on it would only mislead.
  if !matches!(cli.command, Command::Show) && report::has_error(&current) {
    report::print_update(&current);
    drop(handle);
    task.await.context("Cart controller task failed")?;
    return Ok(());
  }
  let intent = match cli.command {
    Command::Show => None,
    Command::Add { game_id, quantity } => Some(Intent::AddItem { game_id, quantity }),
    Command::Set { item_id, quantity } => Some(Intent::UpdateQuantity { item_id, quantity }),
    Command::Remove { item_id } => Some(Intent::RemoveItem { item_id }),
    Command::Inc { item_id } => Some(row_control(&current, item_id, |row| row.increment)?.into()),
    Command::Dec { item_id } => Some(row_control(&current, item_id, |row| row.decrement)?.into()),
    Command::Checkout => Some(Intent::Checkout),
  };

  let update = match intent {
    Some(intent) => handle.dispatch(intent).await?,
    None => current,
  };
  let redirect = report::print_update(&update);
  if let Some(after) = redirect.filter(|d| !d.is_zero() && !cli.no_wait) {
    tokio::time::sleep(after).await;
  }

  drop(handle);
  task.await.context("Cart controller task failed")?;
  Ok(())
}

fn row_control(
  update: &cartflow::Update,
  item_id: i64,
  pick: impl Fn(&cartflow::CartRow) -> Control,
) -> anyhow::Result<Control> {
  update
    .view
    .rows()
    .find(|row| row.item_id == item_id)
    .map(pick)
    .ok_or_else(|| anyhow!("No cart line with id {}", item_id))
}
