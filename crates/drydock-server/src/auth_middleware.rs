// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication middleware for Axum.
//!
//! This module provides middleware and extractors for authenticating requests
//! via bearer access tokens.
//!
//! # Security Properties
//!
//! - **Token Protection**: Tokens are hashed with SHA-256 before database lookup;
//!   raw tokens are never stored or logged.
//! - **Sliding Expiry**: Each authenticated request pushes the token's expiry
//!   window forward, so active clients stay signed in.
//! - **Revocation**: Revoked and expired tokens are rejected immediately.
//! - **Account State**: Tokens belonging to deactivated accounts are rejected
//!   with an explicit error rather than silently treated as anonymous.
//!
//! # Usage
//!
//! Add the [`auth_layer`] middleware to your router to extract authentication
//! context:
//!
//! ```ignore
//! use axum::Router;
//! use axum::middleware::from_fn_with_state;
//!
//! let app = Router::new()
//!     .route("/api/projects", get(list_projects))
//!     .layer(from_fn_with_state(state.clone(), auth_layer));
//! ```
//!
//! Then use the [`RequireAuth`] extractor in handlers:
//!
//! ```ignore
//! async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
//!     format!("Hello, {}!", user.user.full_name)
//! }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use drydock_server_api::ErrorResponse;
use drydock_server_auth::{
	extract_bearer_token, hash_access_token, is_access_token, AuthContext, AuthError, CurrentUser,
};
use std::sync::Arc;
use tracing::instrument;

use crate::{
	api::AppState,
	db::{AccessTokenRepository, UserRepository},
	error::ServerError,
};

/// Authentication middleware that extracts auth context from requests.
///
/// This middleware:
/// 1. Extracts the bearer token from the `Authorization` header
/// 2. Validates the token hash, expiry, and revocation state against the database
/// 3. Stores `AuthContext` as a request extension for downstream handlers
///
/// Requests without a recognizable token proceed with an unauthenticated
/// context; route-level middleware decides whether that is acceptable. A token
/// that resolves to a deactivated account or an unknown stored role is a hard
/// failure and short-circuits with an error response.
///
/// # Security
///
/// - Tokens are immediately hashed; raw tokens are never logged
/// - Failed authentication attempts are logged at debug level (no token details)
/// - Successful authentication logs user_id only
#[instrument(
	name = "auth_layer",
	skip(state, request, next),
	fields(
		auth_method = tracing::field::Empty,
		user_id = tracing::field::Empty,
	)
)]
pub async fn auth_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	let headers = request.headers();
	let span = tracing::Span::current();

	if let Some(bearer_token) = extract_bearer_token(headers) {
		if is_access_token(&bearer_token) {
			match authenticate_access_token(&bearer_token, &state.token_repo, &state.user_repo).await
			{
				Ok(Some(auth_ctx)) => {
					if let Some(user) = auth_ctx.user() {
						span.record("auth_method", "access_token");
						span.record("user_id", tracing::field::display(&user.user.id));
					}
					request.extensions_mut().insert(auth_ctx);
					return next.run(request).await;
				}
				Ok(None) => {}
				Err(e) => return e.into_response(),
			}
		} else {
			tracing::debug!("Unrecognized bearer token format");
		}
	}

	// No valid authentication found - store unauthenticated context
	span.record("auth_method", "none");
	request
		.extensions_mut()
		.insert(AuthContext::unauthenticated());
	next.run(request).await
}

/// Authenticate via access token bearer token.
///
/// Returns `Ok(Some(_))` for a valid token, `Ok(None)` when the token does not
/// resolve to a live credential (unknown, expired, or revoked), and `Err(_)`
/// when the credential is live but the account cannot be used (deactivated, or
/// a stored role that no longer parses).
///
/// # Security
///
/// - Token is hashed before database lookup
/// - Expiry and revocation are checked before the user is loaded
/// - Expiry window is extended asynchronously on successful use
#[instrument(skip(access_token, token_repo, user_repo), fields(token_id = tracing::field::Empty))]
async fn authenticate_access_token(
	access_token: &str,
	token_repo: &Arc<AccessTokenRepository>,
	user_repo: &Arc<UserRepository>,
) -> Result<Option<AuthContext>, ServerError> {
	let token_hash = hash_access_token(access_token);

	let mut token = match token_repo.get_token_by_hash(&token_hash).await {
		Ok(Some(token)) => token,
		Ok(None) => {
			tracing::debug!("Access token not found for token hash");
			return Ok(None);
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to look up access token");
			return Ok(None);
		}
	};

	tracing::Span::current().record("token_id", tracing::field::display(&token.id));

	if !token.is_valid() {
		tracing::debug!(token_id = %token.id, "Access token expired or revoked");
		return Ok(None);
	}

	// Get the user
	let user = match user_repo.get_user_by_id(&token.user_id).await {
		Ok(Some(user)) => user,
		Ok(None) => {
			tracing::warn!(user_id = %token.user_id, "User not found for valid access token");
			return Ok(None);
		}
		Err(e) => {
			tracing::error!(error = %e, "Failed to look up user");
			return Ok(None);
		}
	};

	let current_user = match CurrentUser::from_access_token(user) {
		Ok(current_user) => current_user,
		Err(AuthError::InactiveUser) => {
			tracing::debug!(user_id = %token.user_id, "Access token belongs to inactive user");
			return Err(ServerError::BadRequest("Inactive user".to_string()));
		}
		Err(e) => {
			tracing::warn!(user_id = %token.user_id, error = %e, "Access token belongs to unusable account");
			return Err(ServerError::Auth(e));
		}
	};

	// Extend the sliding expiry window (fire and forget)
	token.extend();
	let token_repo = token_repo.clone();
	tokio::spawn(async move {
		if let Err(e) = token_repo.extend_token(&token).await {
			tracing::warn!(error = %e, "Failed to extend access token expiry");
		}
	});

	Ok(Some(AuthContext::authenticated(current_user)))
}

/// Extractor that requires authentication.
///
/// Use this in handlers that require an authenticated user.
/// Returns 401 Unauthorized if the request is not authenticated.
///
/// # Security
///
/// - Rejects unauthenticated requests with 401 status
/// - Error response does not leak any authentication details
///
/// # Example
///
/// ```ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.user.full_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAuth
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth_ctx = parts
			.extensions
			.get::<AuthContext>()
			.cloned()
			.unwrap_or_else(AuthContext::unauthenticated);

		match auth_ctx.current_user {
			Some(user) => {
				tracing::debug!(user_id = %user.user.id, "Authentication required: success");
				Ok(RequireAuth(user))
			}
			None => {
				tracing::debug!("Authentication required: no valid credentials");
				let response = (
					StatusCode::UNAUTHORIZED,
					Json(ErrorResponse {
						error: "unauthorized".to_string(),
						message: "Authentication required".to_string(),
					}),
				);
				Err(response.into_response())
			}
		}
	}
}
