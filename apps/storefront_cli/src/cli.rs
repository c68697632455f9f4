// storefront_cli/src/cli.rs

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront-cart", about = "Inspect and check out a storefront cart", long_about = None)]
pub struct Cli {
  /// Overrides STOREFRONT_API_BASE_URL.
  #[arg(long, global = true)]
  pub base_url: Option<String>,

  /// Overrides STOREFRONT_TOKEN.
  #[arg(long, global = true)]
  pub token: Option<String>,

  /// Skip waiting out the redirect delay after a checkout.
  #[arg(long, global = true, default_value_t = false)]
  pub no_wait: bool,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Show the cart lines and total.
  Show,
  /// Add a game to the cart.
  Add {
    game_id: i64,
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,
  },
  /// Set the quantity of a cart line.
  Set { item_id: i64, quantity: u32 },
  /// One more copy of a cart line.
  Inc { item_id: i64 },
  /// One copy fewer. Never removes the line.
  Dec { item_id: i64 },
  /// Remove a cart line.
  Remove { item_id: i64 },
  /// Create the order and pay for it.
  Checkout,
}
