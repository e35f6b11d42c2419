mod app;
mod cli;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use bricky_config::Config;
use clap::Parser;
use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = Config::discover(cli.config.as_deref()).context("loading configuration")?;
	tracing::debug!(base_url = %config.base_url, "configuration loaded");

	app::run(cli, config).await
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("bricky=debug,warn")
			} else {
				EnvFilter::new("bricky=info,warn")
			}
		})
	};

	// BRICKY_LOG_DIR sends logs to a per-process file
	if let Some(log_dir) = std::env::var("BRICKY_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("bricky.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry().with(filter()).with(file_layer).init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
