//! CLI schema for the bricky binary.

use std::path::PathBuf;

use bricky_consent::ConsentCategory;
use bricky_primitives::Money;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bricky")]
#[command(about = "Drive a storefront's cart, consent and newsletter flows from the terminal")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to the platform config directory)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Answer yes to every confirmation prompt
	#[arg(short, long, global = true)]
	pub yes: bool,

	/// Session cookie header, e.g. "sessionid=...; csrftoken=..."
	#[arg(long, global = true, value_name = "HEADER")]
	pub cookie: Option<String>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Change the cart
	Cart {
		#[command(subcommand)]
		action: CartAction,
	},
	/// Add a product to the cart
	Add {
		/// Product identifier.
		product: String,
		/// Units to add, as typed into the quantity box
		#[arg(long, short = 'q', default_value = "1")]
		quantity: String,
	},
	/// Manage cookie consent
	Consent {
		#[command(subcommand)]
		action: ConsentAction,
	},
	/// Subscribe to the newsletter
	Newsletter {
		email: String,
		/// Unsubscribe instead
		#[arg(long)]
		unsubscribe: bool,
	},
	/// Show search suggestions for a query
	Search { query: String },
}

/// Cart subcommands.
#[derive(Subcommand, Debug)]
pub enum CartAction {
	/// Set a line's quantity
	Set {
		/// Cart line identifier.
		item: String,
		/// New quantity, as typed into the quantity box
		quantity: String,
		/// Quantity currently shown for the line
		#[arg(long, default_value_t = 1)]
		current: u32,
		/// Line total currently shown
		#[arg(long, value_parser = parse_money)]
		line_total: Option<Money>,
	},
	/// Remove a line
	Remove {
		/// Cart line identifier.
		item: String,
		/// Other lines left in the cart
		#[arg(long, default_value_t = 0)]
		others: usize,
	},
	/// Empty the cart
	Clear,
	/// Choose a shipping method
	Shipping {
		method: String,
		#[arg(value_parser = parse_money)]
		cost: Money,
		/// Cart subtotal currently shown
		#[arg(long, value_parser = parse_money)]
		subtotal: Money,
	},
}

/// Consent subcommands.
#[derive(Subcommand, Debug)]
pub enum ConsentAction {
	/// Flip one category and save
	Toggle { category: ConsentCategory },
	/// Grant every category
	AcceptAll,
	/// Refuse every optional category
	RejectAll,
	/// Store the current choices again
	Save,
	/// Print the stored choices
	Show,
}

fn parse_money(raw: &str) -> Result<Money, String> {
	Money::parse(raw).map_err(|e| e.to_string())
}
