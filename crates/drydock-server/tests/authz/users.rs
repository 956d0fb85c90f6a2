// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for user account routes.

use axum::http::StatusCode;
use serde_json::json;

use super::support::{TestApp, FIXTURE_PASSWORD};

async fn parse_json(response: axum::response::Response) -> serde_json::Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

// ============================================================================
// Profile Read Tests
// ============================================================================

#[tokio::test]
async fn me_returns_profile_without_credentials() {
	let app = TestApp::new().await;

	let response = app.get("/api/users/me", Some(&app.fixtures.engineer)).await;
	assert_eq!(response.status(), StatusCode::OK);

	let profile = parse_json(response).await;
	assert_eq!(profile["username"], "pjacobs");
	assert_eq!(profile["role"], "engineer");
	assert_eq!(profile["full_name"], "Petra Jacobs");
	assert!(profile.get("password").is_none());
	assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn any_authenticated_user_reads_another_profile() {
	let app = TestApp::new().await;
	let engineer_id = app.fixtures.engineer.user.id.to_string();

	let response = app
		.get(
			&format!("/api/users/{engineer_id}"),
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let profile = parse_json(response).await;
	assert_eq!(profile["full_name"], "Petra Jacobs");
}

#[tokio::test]
async fn unknown_user_returns_404() {
	let app = TestApp::new().await;

	let response = app
		.get(
			"/api/users/00000000-0000-0000-0000-000000000000",
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "User not found");
}

// ============================================================================
// Directory Listing Tests
// ============================================================================

#[tokio::test]
async fn directory_is_restricted_to_privileged_roles() {
	let app = TestApp::new().await;

	for user in [&app.fixtures.engineer, &app.fixtures.technician] {
		let response = app.get("/api/users", Some(user)).await;
		assert_eq!(
			response.status(),
			StatusCode::FORBIDDEN,
			"{} should not list accounts",
			user.user.username
		);
	}

	let response = app.get("/api/users", Some(&app.fixtures.manager)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let users = parse_json(response).await;
	assert_eq!(users.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn directory_filters_on_activation() {
	let app = TestApp::new().await;
	let outsider_id = app.fixtures.outsider.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{outsider_id}"),
			Some(&app.fixtures.admin),
			json!({"is_active": false}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = app
		.get("/api/users?is_active=false", Some(&app.fixtures.admin))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let users = parse_json(response).await;
	let users = users.as_array().unwrap();
	assert_eq!(users.len(), 1);
	assert_eq!(users[0]["id"], outsider_id);

	let response = app
		.get("/api/users?is_active=true", Some(&app.fixtures.admin))
		.await;
	let users = parse_json(response).await;
	assert_eq!(users.as_array().unwrap().len(), 5);
}

// ============================================================================
// Update Authorization Tests
// ============================================================================

#[tokio::test]
async fn user_updates_own_profile_fields() {
	let app = TestApp::new().await;
	let engineer_id = app.fixtures.engineer.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{engineer_id}"),
			Some(&app.fixtures.engineer),
			json!({"full_name": "Petra J. Jacobs", "phone": "+31 6 1234 5678"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let profile = parse_json(response).await;
	assert_eq!(profile["full_name"], "Petra J. Jacobs");
	assert_eq!(profile["phone"], "+31 6 1234 5678");
}

#[tokio::test]
async fn user_cannot_update_someone_else() {
	let app = TestApp::new().await;
	let technician_id = app.fixtures.technician.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{technician_id}"),
			Some(&app.fixtures.engineer),
			json!({"full_name": "Hijacked"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "Not authorized");
}

#[tokio::test]
async fn self_service_role_escalation_is_rejected() {
	let app = TestApp::new().await;
	let engineer_id = app.fixtures.engineer.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{engineer_id}"),
			Some(&app.fixtures.engineer),
			json!({"role": "admin"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	// Activation changes are equally admin-only, even on your own account
	let response = app
		.put(
			&format!("/api/users/{engineer_id}"),
			Some(&app.fixtures.engineer),
			json!({"is_active": false}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let response = app.get("/api/users/me", Some(&app.fixtures.engineer)).await;
	let profile = parse_json(response).await;
	assert_eq!(profile["role"], "engineer");
}

#[tokio::test]
async fn admin_changes_role_and_activation() {
	let app = TestApp::new().await;
	let engineer_id = app.fixtures.engineer.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{engineer_id}"),
			Some(&app.fixtures.admin),
			json!({"role": "project_manager"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let profile = parse_json(response).await;
	assert_eq!(profile["role"], "project_manager");
}

// ============================================================================
// Deactivation Tests
// ============================================================================

#[tokio::test]
async fn deactivated_account_is_locked_out() {
	let app = TestApp::new().await;
	let outsider_id = app.fixtures.outsider.user.id.to_string();

	let response = app
		.put(
			&format!("/api/users/{outsider_id}"),
			Some(&app.fixtures.admin),
			json!({"is_active": false}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	// A previously issued token stops working
	let response = app.get("/api/users/me", Some(&app.fixtures.outsider)).await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "Inactive user");

	// And fresh logins are refused
	let response = app
		.post(
			"/api/token",
			None,
			json!({"username": "ilang", "password": FIXTURE_PASSWORD}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "Inactive user");
}
