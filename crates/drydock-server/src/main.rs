// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Drydock project management server binary.

use axum::http::HeaderValue;
use clap::{Parser, Subcommand};
use drydock_server::{create_app_state, create_router};
use tower_http::{
	cors::{AllowOrigin, Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Drydock server - HTTP server for marine retrofit project management.
#[derive(Parser, Debug)]
#[command(
	name = "drydock-server",
	about = "Drydock project management server",
	version
)]
struct Args {
	/// Subcommands for drydock-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	// Handle subcommands that should not start the server
	if let Some(Command::Version) = args.command {
		println!("drydock-server version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = drydock_server_config::load_config()?;

	// Setup tracing, honoring RUST_LOG over the configured level
	let fmt_layer = if config.logging.json {
		tracing_subscriber::fmt::layer().json().boxed()
	} else {
		tracing_subscriber::fmt::layer().boxed()
	};
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(fmt_layer)
		.init();

	tracing::info!(
			host = %config.http.host,
			port = config.http.port,
			database = %config.database.url,
			"starting drydock-server"
	);

	// Create database pool
	let pool = drydock_server::db::create_pool(&config.database.url).await?;

	// Run database migrations
	drydock_server::db::run_migrations(&pool).await?;

	let state = create_app_state(pool.clone(), &config).await;

	// The upload directory must exist before the first blueprint arrives
	state.storage.ensure_root().await?;

	let cors = cors_layer(&config.http.cors_origins);
	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(cors);

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	// Run server with graceful shutdown
	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}

/// Build the CORS layer from the configured origins.
///
/// Origins that do not parse as header values are skipped with a warning; an
/// empty list falls back to allowing any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
	let parsed: Vec<HeaderValue> = origins
		.iter()
		.filter_map(|origin| match origin.parse::<HeaderValue>() {
			Ok(value) => Some(value),
			Err(_) => {
				tracing::warn!(origin = %origin, "ignoring unparseable CORS origin");
				None
			}
		})
		.collect();

	if parsed.is_empty() {
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any)
	} else {
		CorsLayer::new()
			.allow_origin(AllowOrigin::list(parsed))
			.allow_methods(Any)
			.allow_headers(Any)
	}
}
