// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-scoped dashboard count tests.

use axum::http::StatusCode;
use serde_json::json;

use super::support::{TestApp, TestUser};

async fn fetch_stats(app: &TestApp, user: &TestUser) -> serde_json::Value {
	let response = app.get("/api/dashboard/stats", Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

fn assert_stats(
	stats: &serde_json::Value,
	projects: i64,
	open_tasks: i64,
	completed: i64,
	who: &str,
) {
	assert_eq!(stats["total_projects"], projects, "{who}: total_projects");
	assert_eq!(stats["total_tasks"], open_tasks, "{who}: total_tasks");
	assert_eq!(stats["completed_tasks"], completed, "{who}: completed_tasks");
	// Inventory counts are shared across roles
	assert_eq!(stats["total_inventory"], 2, "{who}: total_inventory");
	assert_eq!(stats["low_stock_items"], 1, "{who}: low_stock_items");
}

#[tokio::test]
async fn counts_follow_list_visibility() {
	let app = TestApp::new().await;

	let stats = fetch_stats(&app, &app.fixtures.admin).await;
	assert_stats(&stats, 3, 5, 0, "admin");

	let stats = fetch_stats(&app, &app.fixtures.manager).await;
	assert_stats(&stats, 2, 4, 0, "manager");

	let stats = fetch_stats(&app, &app.fixtures.engineer).await;
	assert_stats(&stats, 1, 2, 0, "engineer");

	// No team, no created projects: only the shared inventory counts remain
	let stats = fetch_stats(&app, &app.fixtures.outsider).await;
	assert_stats(&stats, 0, 0, 0, "outsider");
}

#[tokio::test]
async fn completing_a_task_moves_it_between_counts() {
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

	let stats = fetch_stats(&app, &app.fixtures.engineer).await;
	assert_eq!(stats["total_tasks"], 1);
	assert_eq!(stats["completed_tasks"], 1);

	// The completion shows up in wider scopes too
	let stats = fetch_stats(&app, &app.fixtures.admin).await;
	assert_eq!(stats["total_tasks"], 4);
	assert_eq!(stats["completed_tasks"], 1);
}
