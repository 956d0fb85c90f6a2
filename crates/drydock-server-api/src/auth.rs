// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::users::RoleApi;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RegisterRequest {
	pub username: String,
	pub email: String,
	pub password: String,
	pub full_name: String,
	/// Omitted role defaults to technician.
	pub role: Option<RoleApi>,
	pub phone: Option<String>,
}

/// Credentials for the token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
	pub username: String,
	pub password: String,
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TokenResponse {
	pub access_token: String,
	pub token_type: String,
}

impl TokenResponse {
	pub fn bearer(access_token: String) -> Self {
		Self {
			access_token,
			token_type: "bearer".to_string(),
		}
	}
}
