// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User profile and account management handlers.
//!
//! Reads are open to any authenticated user; the directory listing is
//! restricted to privileged roles. Updates follow admin-or-self rules, with
//! role and activation changes reserved for admins.

use axum::{
	extract::{Path, Query, State},
	response::IntoResponse,
	Json,
};
use drydock_server_api::{ListUsersParams, UpdateUserRequest, UserResponse};
use drydock_server_auth::types::{Role, UserId};
use drydock_server_auth::hash_password;
use uuid::Uuid;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::ServerError,
	pagination::{clamp_limit, clamp_skip},
};

/// GET /api/users/me - Current user's profile.
#[utoipa::path(
	get,
	path = "/api/users/me",
	responses(
		(status = 200, description = "Current user profile", body = UserResponse),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "users"
)]
#[axum::debug_handler]
pub async fn get_current_user(
	RequireAuth(current_user): RequireAuth,
) -> Result<impl IntoResponse, ServerError> {
	tracing::debug!(user_id = %current_user.user.id, "retrieved current user");
	Ok(Json(UserResponse::from_user(&current_user.user)?))
}

/// GET /api/users - List user accounts.
///
/// Restricted to admins and project managers; the optional `is_active` filter
/// narrows to active or deactivated accounts.
#[utoipa::path(
	get,
	path = "/api/users",
	params(ListUsersParams),
	responses(
		(status = 200, description = "User accounts", body = Vec<UserResponse>),
		(status = 403, description = "Insufficient role", body = drydock_server_api::ErrorResponse)
	),
	tag = "users"
)]
#[axum::debug_handler]
pub async fn list_users(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Query(params): Query<ListUsersParams>,
) -> Result<impl IntoResponse, ServerError> {
	if !current_user.principal.role.is_privileged() {
		return Err(ServerError::Forbidden("Not authorized".to_string()));
	}

	let limit = clamp_limit(params.limit);
	let skip = clamp_skip(params.skip);

	let users = state.user_repo.list_users(limit, skip, params.is_active).await?;
	let responses = users
		.iter()
		.map(UserResponse::from_user)
		.collect::<Result<Vec<_>, _>>()?;

	Ok(Json(responses))
}

/// GET /api/users/{user_id} - Look up one user.
#[utoipa::path(
	get,
	path = "/api/users/{user_id}",
	params(("user_id" = Uuid, Path, description = "User ID")),
	responses(
		(status = 200, description = "User profile", body = UserResponse),
		(status = 404, description = "User not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "users"
)]
#[axum::debug_handler]
pub async fn get_user(
	RequireAuth(_current_user): RequireAuth,
	State(state): State<AppState>,
	Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let user = state
		.user_repo
		.get_user_by_id(&UserId::new(user_id))
		.await?
		.ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

	Ok(Json(UserResponse::from_user(&user)?))
}

/// PUT /api/users/{user_id} - Update a user account.
///
/// Admins may update any account, including role and activation. Other users
/// may update only their own profile fields; requests that try to change role
/// or activation are rejected outright.
#[utoipa::path(
	put,
	path = "/api/users/{user_id}",
	params(("user_id" = Uuid, Path, description = "User ID")),
	request_body = UpdateUserRequest,
	responses(
		(status = 200, description = "Updated user", body = UserResponse),
		(status = 403, description = "Not authorized", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "User not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "users"
)]
#[axum::debug_handler]
pub async fn update_user(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(user_id): Path<Uuid>,
	Json(request): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let target_id = UserId::new(user_id);

	let mut user = state
		.user_repo
		.get_user_by_id(&target_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

	let is_admin = current_user.principal.role == Role::Admin;
	let is_self = current_user.user.id == target_id;

	if !is_admin && !is_self {
		return Err(ServerError::Forbidden("Not authorized".to_string()));
	}

	// Role and activation changes stay admin-only even on your own account
	if !is_admin && (request.role.is_some() || request.is_active.is_some()) {
		return Err(ServerError::Forbidden("Not authorized".to_string()));
	}

	if let Some(email) = request.email {
		user.email = email;
	}
	if let Some(full_name) = request.full_name {
		user.full_name = full_name;
	}
	if let Some(phone) = request.phone {
		user.phone = Some(phone);
	}
	if let Some(password) = request.password {
		user.password_hash = hash_password(&password)?;
	}
	if let Some(role) = request.role {
		user.role = Role::from(role).to_string();
	}
	if let Some(is_active) = request.is_active {
		user.is_active = is_active;
	}
	user.updated_at = chrono::Utc::now();

	state.user_repo.update_user(&user).await?;

	tracing::info!(user_id = %user.id, updated_by = %current_user.user.id, "updated user");

	Ok(Json(UserResponse::from_user(&user)?))
}
