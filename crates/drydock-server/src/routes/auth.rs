// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Registration and token issuance handlers.

use axum::{extract::State, response::IntoResponse, Json};
use drydock_server_api::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use drydock_server_auth::types::Role;
use drydock_server_auth::{hash_password, verify_password, AccessToken, User};
use drydock_server_db::UserSettings;

use crate::{api::AppState, error::ServerError};

/// POST /api/register - Create a new user account.
///
/// Registration is open; accounts default to the technician role unless the
/// request names another one. A default settings row is created alongside the
/// account so first login never hits an empty settings read.
#[utoipa::path(
	post,
	path = "/api/register",
	request_body = RegisterRequest,
	responses(
		(status = 200, description = "Account created", body = UserResponse),
		(status = 400, description = "Username or email already registered", body = drydock_server_api::ErrorResponse),
		(status = 500, description = "Internal server error", body = drydock_server_api::ErrorResponse)
	),
	tag = "auth"
)]
#[axum::debug_handler]
pub async fn register(
	State(state): State<AppState>,
	Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServerError> {
	if state
		.user_repo
		.get_user_by_username(&request.username)
		.await?
		.is_some()
	{
		return Err(ServerError::BadRequest(
			"Username already registered".to_string(),
		));
	}

	if state
		.user_repo
		.get_user_by_email(&request.email)
		.await?
		.is_some()
	{
		return Err(ServerError::BadRequest(
			"Email already registered".to_string(),
		));
	}

	let password_hash = hash_password(&request.password)?;
	let role = request.role.map(Role::from).unwrap_or(Role::Technician);

	let user = User::new(
		request.username,
		request.email,
		password_hash,
		request.full_name,
		role,
		request.phone,
	);
	state.user_repo.create_user(&user).await?;

	// A fresh account always starts from the default settings row
	let settings = UserSettings::defaults_for(user.id);
	state.settings_repo.create_settings(&settings).await?;

	tracing::info!(user_id = %user.id, role = %role, "registered new user");

	Ok(Json(UserResponse::from_user(&user)?))
}

/// POST /api/token - Exchange credentials for a bearer access token.
///
/// Unknown usernames and wrong passwords produce the same 401 so the endpoint
/// does not reveal which accounts exist. Deactivated accounts are rejected
/// after the password check with a distinct 400.
#[utoipa::path(
	post,
	path = "/api/token",
	request_body = LoginRequest,
	responses(
		(status = 200, description = "Access token issued", body = TokenResponse),
		(status = 400, description = "Inactive user", body = drydock_server_api::ErrorResponse),
		(status = 401, description = "Incorrect username or password", body = drydock_server_api::ErrorResponse)
	),
	tag = "auth"
)]
#[axum::debug_handler]
pub async fn login(
	State(state): State<AppState>,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let user = match state.user_repo.get_user_by_username(&request.username).await? {
		Some(user) => user,
		None => {
			tracing::debug!("login attempt for unknown username");
			return Err(ServerError::Unauthorized(
				"Incorrect username or password".to_string(),
			));
		}
	};

	if !verify_password(&request.password, &user.password_hash) {
		tracing::debug!(user_id = %user.id, "login attempt with wrong password");
		return Err(ServerError::Unauthorized(
			"Incorrect username or password".to_string(),
		));
	}

	if !user.is_active {
		tracing::debug!(user_id = %user.id, "login attempt for inactive user");
		return Err(ServerError::BadRequest("Inactive user".to_string()));
	}

	let (token, plaintext) = AccessToken::new(user.id);
	state.token_repo.create_token(&token).await?;

	tracing::info!(user_id = %user.id, token_id = %token.id, "issued access token");

	Ok(Json(TokenResponse::bearer(plaintext)))
}
