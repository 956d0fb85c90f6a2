// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and authorization error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during authentication and authorization.
#[derive(Debug, Error)]
pub enum AuthError {
	// =========================================================================
	// Authentication Errors
	// =========================================================================
	/// No authentication credentials provided.
	#[error("authentication required")]
	AuthenticationRequired,

	/// The provided credentials are invalid.
	#[error("incorrect username or password")]
	InvalidCredentials,

	/// The access token is invalid.
	#[error("invalid access token")]
	InvalidAccessToken,

	/// The access token has expired.
	#[error("access token expired")]
	AccessTokenExpired,

	/// The access token was revoked.
	#[error("access token revoked")]
	AccessTokenRevoked,

	/// The user account is deactivated.
	#[error("inactive user")]
	InactiveUser,

	// =========================================================================
	// Authorization Errors
	// =========================================================================
	/// Access denied by the authorization policy.
	#[error("access denied")]
	AccessDenied,

	/// Forbidden operation with a specific reason.
	#[error("forbidden: {0}")]
	Forbidden(String),

	/// The principal's stored role is outside the closed role set. Always
	/// fatal to the request; never downgraded to a default role.
	#[error("invalid user role: {0}")]
	InvalidRole(String),

	// =========================================================================
	// User Errors
	// =========================================================================
	/// The user was not found.
	#[error("user not found: {0}")]
	UserNotFound(Uuid),

	/// Username already registered.
	#[error("username already registered")]
	UsernameTaken,

	/// Email already registered.
	#[error("email already registered")]
	EmailTaken,

	// =========================================================================
	// Infrastructure Errors
	// =========================================================================
	/// Password or token hashing error.
	#[error("hashing error: {0}")]
	HashingError(String),

	/// Internal error.
	#[error("internal error: {0}")]
	Internal(String),
}

impl AuthError {
	/// Returns true if this error should be logged at error level.
	pub fn is_internal(&self) -> bool {
		matches!(self, AuthError::HashingError(_) | AuthError::Internal(_))
	}

	/// Returns the HTTP status code for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			// 401 Unauthorized
			AuthError::AuthenticationRequired
			| AuthError::InvalidCredentials
			| AuthError::InvalidAccessToken
			| AuthError::AccessTokenExpired
			| AuthError::AccessTokenRevoked => 401,

			// 400 Bad Request
			AuthError::InactiveUser | AuthError::UsernameTaken | AuthError::EmailTaken => 400,

			// 403 Forbidden
			AuthError::AccessDenied | AuthError::Forbidden(_) | AuthError::InvalidRole(_) => 403,

			// 404 Not Found
			AuthError::UserNotFound(_) => 404,

			// 500 Internal Server Error
			AuthError::HashingError(_) | AuthError::Internal(_) => 500,
		}
	}
}
