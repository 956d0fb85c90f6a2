// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tests for the owner-scoped settings routes.

use axum::http::StatusCode;
use serde_json::json;

use super::support::{TestApp, TestUser};

async fn fetch_settings(app: &TestApp, user: &TestUser) -> serde_json::Value {
	let response = app.get("/api/settings/me", Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn first_read_materializes_defaults() {
	let app = TestApp::new().await;

	let settings = fetch_settings(&app, &app.fixtures.engineer).await;
	assert_eq!(
		settings["user_id"],
		app.fixtures.engineer.user.id.to_string()
	);
	assert_eq!(settings["theme"], "light");
	assert_eq!(settings["language"], "en");
	assert_eq!(settings["timezone"], "UTC");
	assert_eq!(settings["date_format"], "YYYY-MM-DD");
	assert_eq!(settings["notifications_enabled"], true);
	assert_eq!(settings["email_notifications"], true);
	assert!(settings["dashboard_layout"].is_null());
	assert_eq!(settings["items_per_page"], 10);
}

#[tokio::test]
async fn update_merges_into_existing_settings() {
	let app = TestApp::new().await;

	let response = app
		.put(
			"/api/settings/me",
			Some(&app.fixtures.engineer),
			json!({"theme": "dark", "items_per_page": 25}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	// A later partial update leaves earlier choices alone
	let response = app
		.put(
			"/api/settings/me",
			Some(&app.fixtures.engineer),
			json!({"language": "nl"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let settings = fetch_settings(&app, &app.fixtures.engineer).await;
	assert_eq!(settings["theme"], "dark");
	assert_eq!(settings["items_per_page"], 25);
	assert_eq!(settings["language"], "nl");
	assert_eq!(settings["timezone"], "UTC");
}

#[tokio::test]
async fn update_without_a_prior_read_creates_the_row() {
	let app = TestApp::new().await;

	// No GET has touched this user's settings yet
	let response = app
		.put(
			"/api/settings/me",
			Some(&app.fixtures.technician),
			json!({"timezone": "Europe/Amsterdam"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let settings = fetch_settings(&app, &app.fixtures.technician).await;
	assert_eq!(settings["timezone"], "Europe/Amsterdam");
	assert_eq!(settings["theme"], "light");
}

#[tokio::test]
async fn reset_restores_defaults() {
	let app = TestApp::new().await;

	let response = app
		.put(
			"/api/settings/me",
			Some(&app.fixtures.manager),
			json!({
				"theme": "dark",
				"language": "de",
				"dashboard_layout": "{\"panels\":[\"tasks\"]}",
				"items_per_page": 50
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = app
		.post("/api/settings/reset", Some(&app.fixtures.manager), json!({}))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let settings = fetch_settings(&app, &app.fixtures.manager).await;
	assert_eq!(settings["theme"], "light");
	assert_eq!(settings["language"], "en");
	assert!(settings["dashboard_layout"].is_null());
	assert_eq!(settings["items_per_page"], 10);
}

#[tokio::test]
async fn settings_are_isolated_per_user() {
	let app = TestApp::new().await;

	let response = app
		.put(
			"/api/settings/me",
			Some(&app.fixtures.engineer),
			json!({"theme": "dark"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	// Another user's settings stay untouched
	let settings = fetch_settings(&app, &app.fixtures.technician).await;
	assert_eq!(settings["theme"], "light");

	let settings = fetch_settings(&app, &app.fixtures.engineer).await;
	assert_eq!(settings["theme"], "dark");
}
