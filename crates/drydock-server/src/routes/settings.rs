// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-user settings handlers.
//!
//! Settings are strictly owner-scoped, so every route operates on the
//! caller's own row. The row is materialized from defaults on first touch.

use axum::{extract::State, response::IntoResponse, Json};
use drydock_server_api::{SettingsResponse, UpdateSettingsRequest};
use drydock_server_auth::policy::{decide, Action, ResourceCtx};
use drydock_server_auth::types::UserId;
use drydock_server_db::UserSettings;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ensure_allowed, ServerError},
};

/// Fetch the caller's settings row, creating the default one if absent.
///
/// Two concurrent first reads can race on the UNIQUE user_id; the loser
/// rereads the row the winner inserted.
async fn ensure_settings_row(
	state: &AppState,
	user_id: UserId,
) -> Result<UserSettings, ServerError> {
	if let Some(settings) = state.settings_repo.get_settings_by_user(&user_id).await? {
		return Ok(settings);
	}

	let settings = UserSettings::defaults_for(user_id);
	match state.settings_repo.create_settings(&settings).await {
		Ok(()) => Ok(settings),
		Err(create_err) => state
			.settings_repo
			.get_settings_by_user(&user_id)
			.await?
			.ok_or(ServerError::Db(create_err)),
	}
}

/// GET /api/settings/me - The caller's settings.
#[utoipa::path(
	get,
	path = "/api/settings/me",
	responses(
		(status = 200, description = "Current settings", body = SettingsResponse),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "settings"
)]
#[axum::debug_handler]
pub async fn get_my_settings(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
	let ctx = ResourceCtx::user_settings(current_user.user.id);
	ensure_allowed(&decide(&current_user.principal, Action::Read, &ctx))?;

	let settings = ensure_settings_row(&state, current_user.user.id).await?;
	Ok(Json(SettingsResponse::from(settings)))
}

/// PUT /api/settings/me - Update the caller's settings.
#[utoipa::path(
	put,
	path = "/api/settings/me",
	request_body = UpdateSettingsRequest,
	responses(
		(status = 200, description = "Updated settings", body = SettingsResponse),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "settings"
)]
#[axum::debug_handler]
pub async fn update_my_settings(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let ctx = ResourceCtx::user_settings(current_user.user.id);
	ensure_allowed(&decide(&current_user.principal, Action::Update, &ctx))?;

	let mut settings = ensure_settings_row(&state, current_user.user.id).await?;

	if let Some(theme) = request.theme {
		settings.theme = theme.into();
	}
	if let Some(language) = request.language {
		settings.language = language;
	}
	if let Some(timezone) = request.timezone {
		settings.timezone = timezone;
	}
	if let Some(date_format) = request.date_format {
		settings.date_format = date_format;
	}
	if let Some(notifications_enabled) = request.notifications_enabled {
		settings.notifications_enabled = notifications_enabled;
	}
	if let Some(email_notifications) = request.email_notifications {
		settings.email_notifications = email_notifications;
	}
	if let Some(dashboard_layout) = request.dashboard_layout {
		settings.dashboard_layout = Some(dashboard_layout);
	}
	if let Some(items_per_page) = request.items_per_page {
		settings.items_per_page = items_per_page;
	}
	settings.updated_at = chrono::Utc::now();

	state.settings_repo.update_settings(&settings).await?;

	tracing::debug!(user_id = %current_user.user.id, "updated user settings");

	Ok(Json(SettingsResponse::from(settings)))
}

/// POST /api/settings/reset - Restore the caller's settings to defaults.
#[utoipa::path(
	post,
	path = "/api/settings/reset",
	responses(
		(status = 200, description = "Settings reset to defaults", body = SettingsResponse),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "settings"
)]
#[axum::debug_handler]
pub async fn reset_my_settings(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
	let ctx = ResourceCtx::user_settings(current_user.user.id);
	ensure_allowed(&decide(&current_user.principal, Action::Delete, &ctx))?;

	state
		.settings_repo
		.delete_settings_by_user(&current_user.user.id)
		.await?;

	let settings = UserSettings::defaults_for(current_user.user.id);
	state.settings_repo.create_settings(&settings).await?;

	tracing::info!(user_id = %current_user.user.id, "reset user settings to defaults");

	Ok(Json(SettingsResponse::from(settings)))
}
