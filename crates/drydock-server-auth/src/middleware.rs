// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware support for extracting and validating bearer tokens.
//!
//! This module provides:
//! - [`CurrentUser`] - authenticated user context extracted from requests
//! - [`AuthContext`] - auth state for request processing
//! - Helper functions for extracting bearer tokens from headers
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Extract Bearer Token → Hash Lookup → Validate → AuthContext
//!                                       │
//!                                       ├── expired/revoked → 401
//!                                       ├── inactive user   → 400
//!                                       └── unknown role    → 403
//! ```
//!
//! # Security Notes
//!
//! - Bearer tokens are extracted from the Authorization header only
//! - Token values are never logged

use http::header::AUTHORIZATION;
use http::HeaderMap;
use tracing::instrument;

use crate::access_token::ACCESS_TOKEN_PREFIX;
use crate::error::AuthError;
use crate::types::Principal;
use crate::user::User;

/// The currently authenticated user, extracted from request context.
///
/// Carries both the full user row and the [`Principal`] derived from it. The
/// principal is built exactly once, when the token is resolved, so a stored
/// role that no longer parses rejects the request before any handler runs.
#[derive(Debug, Clone)]
pub struct CurrentUser {
	/// The authenticated user.
	pub user: User,
	/// The access-decision view of the user.
	pub principal: Principal,
}

impl CurrentUser {
	/// Create a new CurrentUser from an access-token authentication.
	///
	/// Fails with [`AuthError::InvalidRole`] when the stored role does not
	/// parse, and with [`AuthError::InactiveUser`] when the account is
	/// deactivated.
	pub fn from_access_token(user: User) -> Result<Self, AuthError> {
		let principal = user.principal()?;
		if !principal.active {
			return Err(AuthError::InactiveUser);
		}
		Ok(Self { user, principal })
	}

	/// The authenticated user's id.
	pub fn user_id(&self) -> crate::types::UserId {
		self.principal.id
	}
}

/// Authentication context for request processing.
///
/// This struct is used to pass authentication state through the request pipeline.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	/// Whether the request is authenticated.
	pub is_authenticated: bool,
	/// The current user, if authenticated.
	pub current_user: Option<CurrentUser>,
}

impl AuthContext {
	/// Create a new unauthenticated context.
	pub fn unauthenticated() -> Self {
		Self {
			is_authenticated: false,
			current_user: None,
		}
	}

	/// Create a new authenticated context.
	pub fn authenticated(current_user: CurrentUser) -> Self {
		Self {
			is_authenticated: true,
			current_user: Some(current_user),
		}
	}

	/// Get the current user, if authenticated.
	pub fn user(&self) -> Option<&CurrentUser> {
		self.current_user.as_ref()
	}

	/// Require authentication, returning the current user or an error.
	pub fn require_user(&self) -> Result<&CurrentUser, AuthError> {
		self.current_user
			.as_ref()
			.ok_or(AuthError::AuthenticationRequired)
	}
}

/// Extract bearer token from the Authorization header.
///
/// Expects the format: `Authorization: Bearer <token>`
///
/// # Returns
///
/// The bearer token value if found, or `None` if not present or malformed.
///
/// # Security
///
/// The returned token is a secret. Hash it immediately; never log it.
#[instrument(level = "trace", skip_all, fields(has_auth_header))]
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

/// Check if a token is an access token (starts with `dk_`).
pub fn is_access_token(token: &str) -> bool {
	token.starts_with(ACCESS_TOKEN_PREFIX)
}
