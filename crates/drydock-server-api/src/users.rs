// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use drydock_server_auth::{AuthError, Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// Role names as they travel over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RoleApi {
	Admin,
	ProjectManager,
	Engineer,
	Technician,
}

impl From<Role> for RoleApi {
	fn from(role: Role) -> Self {
		match role {
			Role::Admin => RoleApi::Admin,
			Role::ProjectManager => RoleApi::ProjectManager,
			Role::Engineer => RoleApi::Engineer,
			Role::Technician => RoleApi::Technician,
		}
	}
}

impl From<RoleApi> for Role {
	fn from(role: RoleApi) -> Self {
		match role {
			RoleApi::Admin => Role::Admin,
			RoleApi::ProjectManager => Role::ProjectManager,
			RoleApi::Engineer => Role::Engineer,
			RoleApi::Technician => Role::Technician,
		}
	}
}

/// A user profile in API responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserResponse {
	pub id: Uuid,
	pub username: String,
	pub email: String,
	pub full_name: String,
	pub role: RoleApi,
	pub phone: Option<String>,
	pub is_active: bool,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl UserResponse {
	/// Project a stored user into its API shape.
	///
	/// Fails with `InvalidRole` if the stored role string is outside the
	/// closed set; a corrupted row must never serialize as a valid profile.
	pub fn from_user(user: &User) -> Result<Self, AuthError> {
		Ok(Self {
			id: user.id.into_inner(),
			username: user.username.clone(),
			email: user.email.clone(),
			full_name: user.full_name.clone(),
			role: user.role()?.into(),
			phone: user.phone.clone(),
			is_active: user.is_active,
			created_at: user.created_at,
			updated_at: user.updated_at,
		})
	}
}

/// Request to update a user.
///
/// Role and activation changes are admin-only; handlers reject them for
/// self-service updates.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateUserRequest {
	pub email: Option<String>,
	pub full_name: Option<String>,
	pub phone: Option<String>,
	pub password: Option<String>,
	pub role: Option<RoleApi>,
	pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct ListUsersParams {
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
	pub is_active: Option<bool>,
}

pub(crate) fn default_limit() -> i64 {
	100
}
