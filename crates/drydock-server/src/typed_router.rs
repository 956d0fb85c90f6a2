// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Router newtypes that make the authentication boundary explicit.
//!
//! Every route is registered on either a [`PublicRouter`] or an
//! [`AuthedRouter`]. The types cannot be merged into each other, so a handler
//! cannot silently end up on the wrong side of the auth middleware.

use axum::{
	body::Body,
	extract::State,
	http::{Request, StatusCode},
	middleware::{from_fn_with_state, Next},
	response::{IntoResponse, Response},
	routing::MethodRouter,
	Json, Router,
};
use drydock_server_api::ErrorResponse;
use drydock_server_auth::AuthContext;
use tracing::instrument;

use crate::{api::AppState, auth_middleware::auth_layer};

#[instrument(
	name = "require_auth_layer",
	skip(_state, request, next),
	fields(authenticated = tracing::field::Empty)
)]
pub async fn require_auth_layer(
	State(_state): State<AppState>,
	request: Request<Body>,
	next: Next,
) -> Response {
	let (parts, body) = request.into_parts();

	let auth_ctx = parts
		.extensions
		.get::<AuthContext>()
		.cloned()
		.unwrap_or_else(AuthContext::unauthenticated);

	if auth_ctx.current_user.is_none() {
		tracing::Span::current().record("authenticated", false);
		return (
			StatusCode::UNAUTHORIZED,
			Json(ErrorResponse {
				error: "unauthorized".to_string(),
				message: "Authentication required".to_string(),
			}),
		)
			.into_response();
	}

	tracing::Span::current().record("authenticated", true);
	let request = Request::from_parts(parts, body);
	next.run(request).await
}

pub struct AuthedRouter(Router<AppState>);

impl AuthedRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn nest(self, path: &str, router: AuthedRouter) -> Self {
		Self(self.0.nest(path, router.0))
	}

	pub fn build(self, state: AppState) -> Router<AppState> {
		self
			.0
			.layer(from_fn_with_state(state.clone(), require_auth_layer))
			.layer(from_fn_with_state(state, auth_layer))
	}
}

impl Default for AuthedRouter {
	fn default() -> Self {
		Self::new()
	}
}

pub struct PublicRouter(Router<AppState>);

impl PublicRouter {
	pub fn new() -> Self {
		Self(Router::new())
	}

	pub fn route(self, path: &str, method_router: MethodRouter<AppState>) -> Self {
		Self(self.0.route(path, method_router))
	}

	pub fn nest(self, path: &str, router: PublicRouter) -> Self {
		Self(self.0.nest(path, router.0))
	}

	pub fn build(self) -> Router<AppState> {
		self.0
	}
}

impl Default for PublicRouter {
	fn default() -> Self {
		Self::new()
	}
}
