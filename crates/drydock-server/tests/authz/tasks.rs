// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization and assignment-integrity tests for task routes.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{run_authz_cases, AuthzCase, TestApp, TestUser};

async fn listed_task_ids(app: &TestApp, user: &TestUser) -> Vec<String> {
	let response = app.get("/api/tasks", Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let tasks: serde_json::Value = serde_json::from_slice(&body).unwrap();
	tasks
		.as_array()
		.unwrap()
		.iter()
		.map(|t| t["id"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Row Visibility Tests
// ============================================================================

#[tokio::test]
async fn engineer_sees_only_assigned_tasks() {
	let app = TestApp::new().await;

	let ids = listed_task_ids(&app, &app.fixtures.engineer).await;
	assert_eq!(
		ids.len(),
		2,
		"Engineer should see exactly their two assigned tasks out of five"
	);
	for task in &app.fixtures.engineer_tasks {
		assert!(ids.contains(&task.id.to_string()));
	}
	assert!(!ids.contains(&app.fixtures.unassigned_task.id.to_string()));
	assert!(!ids.contains(&app.fixtures.technician_task.id.to_string()));
}

#[tokio::test]
async fn manager_sees_tasks_in_created_projects() {
	let app = TestApp::new().await;

	let ids = listed_task_ids(&app, &app.fixtures.manager).await;
	assert_eq!(ids.len(), 4, "Manager should see the four tasks on their projects");
	assert!(!ids.contains(&app.fixtures.ballast_task.id.to_string()));
}

#[tokio::test]
async fn admin_sees_every_task() {
	let app = TestApp::new().await;

	let ids = listed_task_ids(&app, &app.fixtures.admin).await;
	assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn task_list_can_be_scoped_to_a_project() {
	let app = TestApp::new().await;
	let ballast_id = app.fixtures.ballast.id.to_string();

	let response = app
		.get(
			&format!("/api/tasks?project_id={ballast_id}"),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let tasks: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(tasks.as_array().unwrap().len(), 1);
	assert_eq!(
		tasks[0]["id"],
		app.fixtures.ballast_task.id.to_string()
	);
}

// ============================================================================
// Per-Row Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_task_authorization() {
	let app = TestApp::new().await;
	let engineer_task_id = app.fixtures.engineer_tasks[0].id.to_string();
	let unassigned_id = app.fixtures.unassigned_task.id.to_string();
	let ballast_task_id = app.fixtures.ballast_task.id.to_string();
	let refit_id = app.fixtures.refit.id.to_string();

	let cases = vec![
		// GET /api/tasks/{id} - engineer_can_read_assigned_task
		AuthzCase {
			name: "engineer_can_read_assigned_task",
			method: Method::GET,
			path: format!("/api/tasks/{engineer_task_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		// GET /api/tasks/{id} - engineer_cannot_read_unassigned_task
		AuthzCase {
			name: "engineer_cannot_read_unassigned_task",
			method: Method::GET,
			path: format!("/api/tasks/{unassigned_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// GET /api/tasks/{id} - technician_cannot_read_anothers_task
		AuthzCase {
			name: "technician_cannot_read_anothers_task",
			method: Method::GET,
			path: format!("/api/tasks/{engineer_task_id}"),
			user: Some(app.fixtures.technician.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// GET /api/tasks/{id} - manager_can_read_task_in_own_project
		AuthzCase {
			name: "manager_can_read_task_in_own_project",
			method: Method::GET,
			path: format!("/api/tasks/{unassigned_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		// GET /api/tasks/{id} - manager_cannot_read_foreign_task
		AuthzCase {
			name: "manager_cannot_read_foreign_task",
			method: Method::GET,
			path: format!("/api/tasks/{ballast_task_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// GET /api/tasks/{id} - admin_can_read_any_task
		AuthzCase {
			name: "admin_can_read_any_task",
			method: Method::GET,
			path: format!("/api/tasks/{ballast_task_id}"),
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::OK,
		},
		// POST /api/tasks - engineer_cannot_create_task
		AuthzCase {
			name: "engineer_cannot_create_task",
			method: Method::POST,
			path: "/api/tasks".to_string(),
			user: Some(app.fixtures.engineer.clone()),
			body: Some(json!({
				"project_id": refit_id,
				"task_name": "Self-serve task"
			})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /api/tasks/{id} - engineer_cannot_delete_own_task
		AuthzCase {
			name: "engineer_cannot_delete_own_task",
			method: Method::DELETE,
			path: format!("/api/tasks/{engineer_task_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /api/tasks/{id} - manager_can_delete_task_in_own_project
		AuthzCase {
			name: "manager_can_delete_task_in_own_project",
			method: Method::DELETE,
			path: format!("/api/tasks/{unassigned_id}"),
			user: Some(app.fixtures.manager.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn missing_task_returns_404_before_authorization() {
	let app = TestApp::new().await;

	let response = app
		.get(
			"/api/tasks/00000000-0000-0000-0000-000000000000",
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(json["message"], "Task not found");
}

// ============================================================================
// Assignment Integrity Tests
// ============================================================================

#[tokio::test]
async fn create_task_requires_assignee_on_project_team() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	// The outsider is not on the refit team
	let response = app
		.post(
			"/api/tasks",
			Some(&app.fixtures.manager),
			json!({
				"project_id": refit_id,
				"task_name": "Check bilge pumps",
				"assigned_to": app.fixtures.outsider.user.id.to_string()
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	let message = json["message"].as_str().unwrap();
	assert!(
		message.contains("is not assigned to project"),
		"Expected team-membership message, got: {message}"
	);

	// The same request with a crew member succeeds
	let response = app
		.post(
			"/api/tasks",
			Some(&app.fixtures.manager),
			json!({
				"project_id": refit_id,
				"task_name": "Check bilge pumps",
				"assigned_to": app.fixtures.technician.user.id.to_string()
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["status"], "pending");
	assert_eq!(task["priority"], "medium");
	assert_eq!(
		task["assigned_to"],
		app.fixtures.technician.user.id.to_string()
	);
}

#[tokio::test]
async fn create_task_on_missing_project_returns_404() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/api/tasks",
			Some(&app.fixtures.manager),
			json!({
				"project_id": "00000000-0000-0000-0000-000000000000",
				"task_name": "Orphan task"
			}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reassigning_a_task_checks_the_new_assignee() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.unassigned_task.id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"assigned_to": app.fixtures.outsider.user.id.to_string()}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"assigned_to": app.fixtures.engineer.user.id.to_string()}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(
		task["assigned_to"],
		app.fixtures.engineer.user.id.to_string()
	);
	assert_eq!(task["assigned_to_name"], "Petra Jacobs");
}

#[tokio::test]
async fn clearing_an_assignee_skips_the_team_check() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.engineer_tasks[0].id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"assigned_to": null}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert!(task["assigned_to"].is_null());
}

// ============================================================================
// Task Move Tests
// ============================================================================

#[tokio::test]
async fn moving_a_task_requires_authority_over_both_projects() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.unassigned_task.id.to_string();
	let ballast_id = app.fixtures.ballast.id.to_string();
	let survey_id = app.fixtures.survey.id.to_string();

	// Destination owned by another manager: denied even though the source is
	// the caller's own project
	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"project_id": ballast_id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	// Destination owned by the caller: allowed
	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"project_id": survey_id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["project_id"], survey_id);
}

#[tokio::test]
async fn moving_an_assigned_task_revalidates_team_membership() {
	let app = TestApp::new().await;
	// Assigned to the engineer, who is not on the survey team
	let task_id = app.fixtures.engineer_tasks[0].id.to_string();
	let survey_id = app.fixtures.survey.id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"project_id": survey_id}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	let message = json["message"].as_str().unwrap();
	assert!(
		message.contains("is not assigned to project"),
		"Expected team-membership message, got: {message}"
	);

	// The task stays on its original project
	let response = app
		.get(&format!("/api/tasks/{task_id}"), Some(&app.fixtures.manager))
		.await;
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["project_id"], app.fixtures.refit.id.to_string());
}

#[tokio::test]
async fn moving_a_task_to_a_missing_project_returns_404() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.unassigned_task.id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"project_id": "00000000-0000-0000-0000-000000000000"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Completion Tests
// ============================================================================

#[tokio::test]
async fn engineer_completes_own_task_and_completion_date_is_stamped() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.engineer_tasks[0].id.to_string();

	let response = app
		.patch(
			&format!("/api/tasks/{task_id}/complete"),
			Some(&app.fixtures.engineer),
			json!({}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["status"], "completed");
	assert!(
		task["completion_date"].is_string(),
		"Completion should stamp the completion date"
	);
}

#[tokio::test]
async fn technician_cannot_complete_anothers_task() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.engineer_tasks[0].id.to_string();

	let response = app
		.patch(
			&format!("/api/tasks/{task_id}/complete"),
			Some(&app.fixtures.technician),
			json!({}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_to_completed_status_stamps_completion_date() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.unassigned_task.id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.manager),
			json!({"status": "completed"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["status"], "completed");
	assert!(task["completion_date"].is_string());
}

#[tokio::test]
async fn engineer_updates_status_of_own_task() {
	let app = TestApp::new().await;
	let task_id = app.fixtures.engineer_tasks[1].id.to_string();

	let response = app
		.put(
			&format!("/api/tasks/{task_id}"),
			Some(&app.fixtures.engineer),
			json!({"status": "in_progress"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let task: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(task["status"], "in_progress");
	assert!(task["completion_date"].is_null());
}
