// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for inventory routes. Reads are open to every
//! authenticated role; writes are reserved for privileged roles.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::support::{run_authz_cases, AuthzCase, TestApp, TestUser};

async fn listed_item_ids(app: &TestApp, user: &TestUser, path: &str) -> Vec<String> {
	let response = app.get(path, Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let items: serde_json::Value = serde_json::from_slice(&body).unwrap();
	items
		.as_array()
		.unwrap()
		.iter()
		.map(|i| i["id"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Read Visibility Tests
// ============================================================================

#[tokio::test]
async fn every_role_sees_the_full_inventory() {
	let app = TestApp::new().await;

	for user in [
		&app.fixtures.admin,
		&app.fixtures.manager,
		&app.fixtures.engineer,
		&app.fixtures.technician,
		&app.fixtures.outsider,
	] {
		let ids = listed_item_ids(&app, user, "/api/inventory").await;
		assert_eq!(
			ids.len(),
			2,
			"{} should see both stock items",
			user.user.username
		);
	}
}

#[tokio::test]
async fn every_role_sees_the_low_stock_report() {
	let app = TestApp::new().await;

	for user in [
		&app.fixtures.admin,
		&app.fixtures.engineer,
		&app.fixtures.outsider,
	] {
		let ids = listed_item_ids(&app, user, "/api/inventory/low-stock").await;
		assert_eq!(ids, vec![app.fixtures.low_stock_item.id.to_string()]);
	}
}

#[tokio::test]
async fn technician_reads_a_single_item() {
	let app = TestApp::new().await;
	let item_id = app.fixtures.stocked_item.id.to_string();

	let response = app
		.get(
			&format!("/api/inventory/{item_id}"),
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let item: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(item["item_name"], "Marine epoxy");
	assert_eq!(item["quantity"], 80);
}

// ============================================================================
// Write Authorization Tests
// ============================================================================

#[tokio::test]
async fn test_inventory_authorization() {
	let app = TestApp::new().await;
	let item_id = app.fixtures.stocked_item.id.to_string();

	let cases = vec![
		// POST /api/inventory - technician_cannot_create_item
		AuthzCase {
			name: "technician_cannot_create_item",
			method: Method::POST,
			path: "/api/inventory".to_string(),
			user: Some(app.fixtures.technician.clone()),
			body: Some(json!({"item_name": "Hose clamps"})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// PUT /api/inventory/{id} - engineer_cannot_update_item
		AuthzCase {
			name: "engineer_cannot_update_item",
			method: Method::PUT,
			path: format!("/api/inventory/{item_id}"),
			user: Some(app.fixtures.engineer.clone()),
			body: Some(json!({"quantity": 5})),
			expected_status: StatusCode::FORBIDDEN,
		},
		// DELETE /api/inventory/{id} - technician_cannot_delete_item
		AuthzCase {
			name: "technician_cannot_delete_item",
			method: Method::DELETE,
			path: format!("/api/inventory/{item_id}"),
			user: Some(app.fixtures.technician.clone()),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		// POST /api/inventory - manager_can_create_item
		AuthzCase {
			name: "manager_can_create_item",
			method: Method::POST,
			path: "/api/inventory".to_string(),
			user: Some(app.fixtures.manager.clone()),
			body: Some(json!({"item_name": "Hose clamps", "quantity": 40})),
			expected_status: StatusCode::CREATED,
		},
		// PUT /api/inventory/{id} - admin_can_update_item
		AuthzCase {
			name: "admin_can_update_item",
			method: Method::PUT,
			path: format!("/api/inventory/{item_id}"),
			user: Some(app.fixtures.admin.clone()),
			body: Some(json!({"quantity": 75})),
			expected_status: StatusCode::OK,
		},
		// DELETE /api/inventory/{id} - admin_can_delete_item
		AuthzCase {
			name: "admin_can_delete_item",
			method: Method::DELETE,
			path: format!("/api/inventory/{item_id}"),
			user: Some(app.fixtures.admin.clone()),
			body: None,
			expected_status: StatusCode::NO_CONTENT,
		},
	];

	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn missing_item_returns_404_before_authorization() {
	let app = TestApp::new().await;

	// The technician could never update an item, yet absence wins
	let response = app
		.put(
			"/api/inventory/00000000-0000-0000-0000-000000000000",
			Some(&app.fixtures.technician),
			json!({"quantity": 1}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(json["message"], "Inventory item not found");
	assert_eq!(json["error"], "not_found");
}

// ============================================================================
// Low Stock Boundary Tests
// ============================================================================

#[tokio::test]
async fn low_stock_report_tracks_the_reorder_level() {
	let app = TestApp::new().await;
	let item_id = app.fixtures.low_stock_item.id.to_string();

	// Quantity equal to the reorder level counts as low
	let ids = listed_item_ids(&app, &app.fixtures.admin, "/api/inventory/low-stock").await;
	assert_eq!(ids, vec![item_id.clone()]);

	// One unit above the reorder level clears the report
	let response = app
		.put(
			&format!("/api/inventory/{item_id}"),
			Some(&app.fixtures.admin),
			json!({"quantity": 11}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let ids = listed_item_ids(&app, &app.fixtures.admin, "/api/inventory/low-stock").await;
	assert!(ids.is_empty());

	// Draining stock puts it back
	let response = app
		.put(
			&format!("/api/inventory/{item_id}"),
			Some(&app.fixtures.admin),
			json!({"quantity": 3}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let ids = listed_item_ids(&app, &app.fixtures.admin, "/api/inventory/low-stock").await;
	assert_eq!(ids, vec![item_id]);
}

#[tokio::test]
async fn created_item_applies_defaults() {
	let app = TestApp::new().await;

	let response = app
		.post(
			"/api/inventory",
			Some(&app.fixtures.admin),
			json!({"item_name": "Cotter pins"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	let item: serde_json::Value = serde_json::from_slice(&body).unwrap();
	assert_eq!(item["quantity"], 0);
	assert_eq!(item["reorder_level"], 10);

	// A brand-new empty item is immediately low on stock
	let ids = listed_item_ids(&app, &app.fixtures.admin, "/api/inventory/low-stock").await;
	assert!(ids.contains(&item["id"].as_str().unwrap().to_string()));
}
