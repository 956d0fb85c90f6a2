// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard statistics handler.

use axum::{extract::State, response::IntoResponse, Json};
use drydock_server_api::DashboardStats;

use crate::{
	api::AppState, auth_middleware::RequireAuth, error::ServerError, stats::DashboardService,
};

/// GET /api/dashboard/stats - Role-scoped summary counts.
///
/// Project and task counts cover only rows the caller's lists would show;
/// inventory counts are the same for every role.
#[utoipa::path(
	get,
	path = "/api/dashboard/stats",
	responses(
		(status = 200, description = "Summary counts", body = DashboardStats),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "dashboard"
)]
#[axum::debug_handler]
pub async fn get_stats(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
	let service = DashboardService::new(
		state.project_repo.clone(),
		state.task_repo.clone(),
		state.inventory_repo.clone(),
	);
	let stats = service.stats_for(&current_user.user).await?;
	Ok(Json(stats))
}
