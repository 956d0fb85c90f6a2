// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization and file-handling tests for blueprint routes.

use axum::http::StatusCode;
use drydock_server_auth::types::BlueprintId;
use drydock_server_db::Blueprint;
use serde_json::json;

use super::support::{TestApp, TestUser};

const DRAWING: &[u8] = b"%PDF-1.4 hull section A-A";

async fn parse_json(response: axum::response::Response) -> serde_json::Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

async fn listed_blueprint_ids(app: &TestApp, user: &TestUser) -> Vec<String> {
	let response = app.get("/api/blueprints", Some(user)).await;
	assert_eq!(response.status(), StatusCode::OK);
	let blueprints = parse_json(response).await;
	blueprints
		.as_array()
		.unwrap()
		.iter()
		.map(|b| b["id"].as_str().unwrap().to_string())
		.collect()
}

// ============================================================================
// Upload Tests
// ============================================================================

#[tokio::test]
async fn technician_uploads_a_drawing_to_a_team_project() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(
			&app.fixtures.technician,
			&refit_id,
			"hull-section.pdf",
			DRAWING,
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let blueprint = parse_json(response).await;
	assert_eq!(blueprint["original_name"], "hull-section.pdf");
	assert_eq!(blueprint["version"], "1.0");
	assert_eq!(blueprint["file_size"], DRAWING.len() as i64);
	assert_eq!(blueprint["file_type"], "application/pdf");
	assert_eq!(
		blueprint["uploaded_by"],
		app.fixtures.technician.user.id.to_string()
	);
	assert_eq!(blueprint["uploader_name"], "Tobi Okafor");
	// The stored name is uniquified, never the raw upload name
	assert_ne!(blueprint["file_name"], "hull-section.pdf");
}

#[tokio::test]
async fn upload_to_a_missing_project_returns_404() {
	let app = TestApp::new().await;

	let response = app
		.upload_blueprint(
			&app.fixtures.manager,
			"00000000-0000-0000-0000-000000000000",
			"ghost.pdf",
			DRAWING,
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "Project not found");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
	let app = TestApp::with_max_upload_bytes(1024).await;
	let refit_id = app.fixtures.refit.id.to_string();
	let oversized = vec![0u8; 2048];

	let response = app
		.upload_blueprint(&app.fixtures.manager, &refit_id, "huge.pdf", &oversized)
		.await;
	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "File exceeds the maximum upload size");
}

// ============================================================================
// Visibility Tests
// ============================================================================

#[tokio::test]
async fn crew_see_only_drawings_for_their_projects() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(&app.fixtures.manager, &refit_id, "deck-plan.pdf", DRAWING)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	// Refit crew members see it
	let ids = listed_blueprint_ids(&app, &app.fixtures.engineer).await;
	assert_eq!(ids, vec![blueprint_id.clone()]);

	// A user on no team sees nothing
	let ids = listed_blueprint_ids(&app, &app.fixtures.outsider).await;
	assert!(ids.is_empty());

	// Privileged roles see everything without team membership
	let ids = listed_blueprint_ids(&app, &app.fixtures.other_manager).await;
	assert_eq!(ids, vec![blueprint_id.clone()]);

	// Metadata reads follow the same gate
	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.outsider),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn uploader_off_the_team_cannot_read_back_their_own_drawing() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	// Any active user may upload, even off-team
	let response = app
		.upload_blueprint(&app.fixtures.outsider, &refit_id, "notes.pdf", DRAWING)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	// Reading back requires team membership regardless of who uploaded
	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.outsider),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn blueprint_list_can_be_scoped_to_a_project() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();
	let ballast_id = app.fixtures.ballast.id.to_string();

	app.upload_blueprint(&app.fixtures.manager, &refit_id, "refit.pdf", DRAWING)
		.await;
	let response = app
		.upload_blueprint(
			&app.fixtures.other_manager,
			&ballast_id,
			"ballast.pdf",
			DRAWING,
		)
		.await;
	let ballast_blueprint = parse_json(response).await;

	let response = app
		.get(
			&format!("/api/blueprints?project_id={ballast_id}"),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let blueprints = parse_json(response).await;
	let blueprints = blueprints.as_array().unwrap();
	assert_eq!(blueprints.len(), 1);
	assert_eq!(blueprints[0]["id"], ballast_blueprint["id"]);
}

// ============================================================================
// Download Tests
// ============================================================================

#[tokio::test]
async fn team_member_downloads_the_original_bytes() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(&app.fixtures.engineer, &refit_id, "piping.pdf", DRAWING)
		.await;
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}/download"),
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let content_type = response.headers()["content-type"].to_str().unwrap();
	assert_eq!(content_type, "application/pdf");
	let disposition = response.headers()["content-disposition"]
		.to_str()
		.unwrap();
	assert!(disposition.contains("attachment"));
	assert!(disposition.contains("piping.pdf"));

	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	assert_eq!(&body[..], DRAWING);
}

#[tokio::test]
async fn off_team_download_is_denied() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(&app.fixtures.engineer, &refit_id, "piping.pdf", DRAWING)
		.await;
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}/download"),
			Some(&app.fixtures.outsider),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "You don't have access to this blueprint");

	// Admins bypass the team gate
	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}/download"),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn download_of_a_vanished_file_returns_404() {
	let app = TestApp::new().await;
	let now = chrono::Utc::now();

	// A row whose stored file never made it to disk
	let orphan = Blueprint {
		id: BlueprintId::generate(),
		project_id: app.fixtures.refit.id,
		file_name: "gone.pdf".to_string(),
		original_name: "gone.pdf".to_string(),
		file_path: "/nonexistent/gone.pdf".to_string(),
		file_size: 42,
		file_type: Some("application/pdf".to_string()),
		version: "1.0".to_string(),
		description: None,
		uploaded_by: app.fixtures.manager.user.id,
		uploaded_at: now,
		updated_at: now,
		is_active: true,
	};
	app.state.blueprint_repo.create_blueprint(&orphan).await.unwrap();

	let response = app
		.get(
			&format!("/api/blueprints/{}/download", orphan.id),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);

	let json = parse_json(response).await;
	assert_eq!(json["message"], "File not found on server");
}

// ============================================================================
// Metadata and Deletion Tests
// ============================================================================

#[tokio::test]
async fn metadata_update_changes_version_but_not_the_file() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(&app.fixtures.manager, &refit_id, "wiring.pdf", DRAWING)
		.await;
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	let response = app
		.put(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.manager),
			json!({"version": "2.0", "description": "Revised after survey"}),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let blueprint = parse_json(response).await;
	assert_eq!(blueprint["version"], "2.0");
	assert_eq!(blueprint["description"], "Revised after survey");
	assert_eq!(blueprint["file_size"], DRAWING.len() as i64);

	// The file still downloads unchanged
	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}/download"),
			Some(&app.fixtures.manager),
		)
		.await;
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	assert_eq!(&body[..], DRAWING);
}

#[tokio::test]
async fn only_privileged_roles_delete_drawings() {
	let app = TestApp::new().await;
	let refit_id = app.fixtures.refit.id.to_string();

	let response = app
		.upload_blueprint(&app.fixtures.technician, &refit_id, "old-rev.pdf", DRAWING)
		.await;
	let uploaded = parse_json(response).await;
	let blueprint_id = uploaded["id"].as_str().unwrap().to_string();

	// Crew roles cannot retire a drawing, not even one they uploaded
	let response = app
		.delete(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.technician),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let response = app
		.delete(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = parse_json(response).await;
	assert_eq!(json["message"], "Blueprint deleted successfully");

	// Soft-deleted rows read as missing
	let response = app
		.get(
			&format!("/api/blueprints/{blueprint_id}"),
			Some(&app.fixtures.admin),
		)
		.await;
	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
