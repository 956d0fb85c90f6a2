// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use drydock_server_api::ErrorResponse;
use drydock_server_auth::{AssignmentError, AuthError};
use drydock_server_db::DbError;

/// Server error type for all HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database operation failed.
	#[error("Database error: {0}")]
	Db(#[from] DbError),

	/// Authentication or authorization failure.
	#[error("Auth error: {0}")]
	Auth(#[from] AuthError),

	/// Task assignment rejected by the integrity checker.
	#[error("Assignment error: {0}")]
	Assignment(#[from] AssignmentError),

	/// Target resource does not exist.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// Unauthorized (authentication failed).
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// Forbidden (insufficient permissions).
	#[error("Forbidden: {0}")]
	Forbidden(String),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

/// Stable error code for a status, used in the response envelope.
fn error_code(status: StatusCode) -> &'static str {
	match status {
		StatusCode::BAD_REQUEST => "bad_request",
		StatusCode::UNAUTHORIZED => "unauthorized",
		StatusCode::FORBIDDEN => "forbidden",
		StatusCode::NOT_FOUND => "not_found",
		StatusCode::CONFLICT => "conflict",
		_ => "internal_error",
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, message) = match &self {
			ServerError::Db(DbError::NotFound(what)) => {
				(StatusCode::NOT_FOUND, what.clone())
			}
			ServerError::Db(DbError::Conflict(what)) => {
				(StatusCode::CONFLICT, what.clone())
			}
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"A database error occurred".to_string(),
				)
			}
			ServerError::Auth(e) => {
				if e.is_internal() {
					tracing::error!(error = %e, "auth infrastructure error");
					(
						StatusCode::INTERNAL_SERVER_ERROR,
						"An internal error occurred".to_string(),
					)
				} else {
					let status = StatusCode::from_u16(e.status_code())
						.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
					(status, e.to_string())
				}
			}
			ServerError::Assignment(e) => {
				let status = StatusCode::from_u16(e.status_code())
					.unwrap_or(StatusCode::BAD_REQUEST);
				(status, e.to_string())
			}
			ServerError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
			ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
			ServerError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
			ServerError::Forbidden(message) => (StatusCode::FORBIDDEN, message.clone()),
			ServerError::Internal(message) => {
				tracing::error!(error = %message, "internal server error");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					"An internal error occurred".to_string(),
				)
			}
		};

		let body = ErrorResponse {
			error: error_code(status).to_string(),
			message,
		};
		(status, Json(body)).into_response()
	}
}

/// Turn a policy decision into a handler result.
///
/// Denials become 403 responses carrying the decision's human-readable
/// reason, so every gated route phrases refusals the same way.
pub fn ensure_allowed(decision: &drydock_server_auth::policy::Decision) -> Result<(), ServerError> {
	match decision.deny_reason() {
		None => Ok(()),
		Some(reason) => Err(ServerError::Forbidden(reason.to_string())),
	}
}
