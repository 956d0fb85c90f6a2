// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tokio::time::Instant;

use crate::{
	api::AppState,
	health::{self, HealthComponents, HealthResponse, HealthStatus},
};

/// GET /health - Liveness and database connectivity check.
#[utoipa::path(
	get,
	path = "/health",
	responses(
		(status = 200, description = "System is healthy", body = HealthResponse),
		(status = 503, description = "System is unhealthy", body = HealthResponse)
	),
	tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let start = Instant::now();

	let database = health::check_database(&state.pool).await;

	let status = database.status;
	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: start.elapsed().as_millis() as u64,
		version: env!("CARGO_PKG_VERSION").to_string(),
		components: HealthComponents { database },
	};

	let code = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(code, Json(response))
}
