// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for project routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{run_authz_cases, AuthzCase, TestApp};

async fn listed_project_ids(app: &TestApp, user: &super::support::TestUser) -> Vec<String> {
	let response = app.get("/api/projects", Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let projects: serde_json::Value = serde_json::from_slice(&body).unwrap();
	projects
		.as_array()
		.unwrap()
		.iter()
		.map(|p| p["id"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Row Visibility Tests
// ============================================================================

#[tokio::test]
async fn admin_lists_every_project() {
	let app = TestApp::new().await;

	let ids = listed_project_ids(&app, &app.fixtures.admin).await;
	assert_eq!(ids.len(), 3, "Admin should see all three projects");
}

#[tokio::test]
async fn manager_lists_only_created_projects() {
	let app = TestApp::new().await;

	let ids = listed_project_ids(&app, &app.fixtures.manager).await;
	assert_eq!(ids.len(), 2, "Manager should see exactly the projects they created");
	assert!(ids.contains(&app.fixtures.refit.id.to_string()));
	assert!(ids.contains(&app.fixtures.survey.id.to_string()));
	assert!(!ids.contains(&app.fixtures.ballast.id.to_string()));
}

#[tokio::test]
async fn engineer_lists_only_team_projects() {
	let app = TestApp::new().await;

	let ids = listed_project_ids(&app, &app.fixtures.engineer).await;
	assert_eq!(ids, vec![app.fixtures.refit.id.to_string()]);
}

#[tokio::test]
async fn outsider_lists_no_projects() {
	let app = TestApp::new().await;

	let ids = listed_project_ids(&app, &app.fixtures.outsider).await;
	assert!(ids.is_empty(), "User on no team should see an empty list");
}

// ============================================================================
// Per-Row Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_project_authorization() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();
	let ballast_id = app.fixtures.ballast.id.to_string();

	let cases = vec![
		// GET /api/projects/{id} - engineer_can_read_team_project
		AuthzCase {
			name: "engineer_can_read_team_project",
			method: Method::GET,
			path: format!("/api/projects/{refit_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		// GET /api/projects/{id} - engineer_cannot_read_off_team_project
		AuthzCase {
			name: "engineer_cannot_read_off_team_project",
			method: Method::GET,
			path: format!("/api/projects/{ballast_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// GET /api/projects/{id} - outsider_cannot_read_project
		AuthzCase {
			name: "outsider_cannot_read_project",
			method: Method::GET,
			path: format!("/api/projects/{refit_id}"),
			user: Some(app.fixtures.outsider.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// GET /api/projects/{id} - admin_can_read_any_project
		AuthzCase {
			name: "admin_can_read_any_project",
			method: Method::GET,
			path: format!("/api/projects/{ballast_id}"),
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		// PUT /api/projects/{id} - manager_can_update_own_project
		AuthzCase {
			name: "manager_can_update_own_project",
			method: Method::PUT,
			path: format!("/api/projects/{refit_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: Some(json!({"description": "Scope extended to rudder bearings"})),
			expected_status: StatusCode::OK,
		},
		// PUT /api/projects/{id} - manager_cannot_update_foreign_project
		AuthzCase {
			name: "manager_cannot_update_foreign_project",
			method: Method::PUT,
			path: format!("/api/projects/{ballast_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: Some(json!({"description": "Should not update"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// PUT /api/projects/{id} - technician_cannot_update_project
		AuthzCase {
			name: "technician_cannot_update_project",
			method: Method::PUT,
			path: format!("/api/projects/{refit_id}"),
			user: Some(app.fixtures.technician.clone()),
			body: Some(json!({"description": "Should not update"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// POST /api/projects - technician_cannot_create_project
		AuthzCase {
			name: "technician_cannot_create_project",
			method: Method::POST,
			path: "/api/projects".to_string(),
			user: Some(app.fixtures.technician.clone()),
			body: Some(json!({
				"project_name": "Unauthorized Refit",
				"vessel_name": "MV Nope"
			})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /api/projects/{id} - engineer_cannot_delete_project
		AuthzCase {
			name: "engineer_cannot_delete_project",
			method: Method::DELETE,
			path: format!("/api/projects/{refit_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /api/projects/{id} - manager_cannot_delete_foreign_project
		AuthzCase {
			name: "manager_cannot_delete_foreign_project",
			method: Method::DELETE,
			path: format!("/api/projects/{ballast_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn missing_project_returns_404_before_authorization() {
	let app = TestApp::new().await;

	// A technician could never read this project if it existed; existence is
	// still reported first.
	let response = app
		.get(
			"/api/projects/00000000-0000-0000-0000-000000000000",
			Some(&app.fixtures.technician),
		)
		.await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(json["message"], "Project not found");
}

// ============================================================================
// Create / Team Assignment Tests
// ============================================================================

#[tokio::test]
async fn manager_creates_project_with_team() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/api/projects",
			Some(&app.fixtures.manager),
			json!({
				"project_name": "Prop Shaft Renewal",
				"vessel_name": "MV Coral Dawn",
				"status": "planning",
				"assigned_user_ids": [
					app.fixtures.engineer.user.id.to_string(),
					app.fixtures.technician.user.id.to_string()
				]
			}),
		)
		.await;

	assert_eq!(response.status(), StatusCode::CREATED);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let project: serde_json::Value = serde_json::from_slice(&body).unwrap();

	assert_eq!(project["project_name"], "Prop Shaft Renewal");
	assert_eq!(project["status"], "planning");
	assert_eq!(
		project["created_by"],
		app.fixtures.manager.user.id.to_string()
	);
	assert_eq!(project["team_members"].as_array().unwrap().len(), 2);

	// New team members can now see the project in their lists
	let project_id = project["id"].as_str().unwrap();
	let response = app
		.get(&format!("/api/projects/{project_id}"), Some(&app.fixtures.engineer))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_project_rejects_unknown_team_member() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/api/projects",
			Some(&app.fixtures.manager),
			json!({
				"project_name": "Ghost Crew Refit",
				"vessel_name": "MV Coral Dawn",
				"assigned_user_ids": ["11111111-1111-1111-1111-111111111111"]
			}),
		)
		.await;

	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	let message = json["message"].as_str().unwrap();
	assert!(
		message.contains("not found"),
		"Expected unknown-user message, got: {message}"
	);
}

#[tokio::test]
async fn manager_deletes_own_project() {
	let app = TestApp::new().await;
	let survey_id = app.fixtures.survey.id.to_string();

	let response = app
		.delete(&format!("/api/projects/{survey_id}"), Some(&app.fixtures.manager))
		.await;
	assert_eq!(response.status(), StatusCode::NO_CONTENT);

	let response = app
		.get(&format!("/api/projects/{survey_id}"), Some(&app.fixtures.manager))
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_project_replaces_team() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	// Drop the technician from the crew
	let response = app
		.put(
			&format!("/api/projects/{refit_id}"),
			Some(&app.fixtures.manager),
			json!({
				"assigned_user_ids": [
					app.fixtures.manager.user.id.to_string(),
					app.fixtures.engineer.user.id.to_string()
				]
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let project: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(project["team_members"].as_array().unwrap().len(), 2);

	// The dropped technician loses read access
	let response = app
		.get(&format!("/api/projects/{refit_id}"), Some(&app.fixtures.technician))
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
