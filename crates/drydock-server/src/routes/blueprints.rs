// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blueprint upload, download, and metadata handlers.
//!
//! Files land on disk under a per-upload unique name while rows carry the
//! metadata. Any active role may upload and edit metadata; engineer and
//! technician only see and fetch drawings for projects whose team they are
//! on, and only admin and project manager may retire a drawing.

use axum::{
	extract::{Multipart, Path, Query, State},
	http::{header, StatusCode},
	response::IntoResponse,
	Json,
};
use drydock_server_api::{
	BlueprintResponse, ListBlueprintsParams, SuccessResponse, UpdateBlueprintRequest,
};
use drydock_server_auth::policy::{decide, list_filter, Action, ResourceCtx, ResourceKind};
use drydock_server_auth::types::{BlueprintId, ProjectId, UserId};
use drydock_server_db::{Blueprint, BlueprintDetail};
use uuid::Uuid;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ensure_allowed, ServerError},
	pagination::{clamp_limit, clamp_skip},
	storage::BlueprintStorage,
};

/// One parsed upload form: the project, the file, and optional metadata.
struct UploadForm {
	project_id: ProjectId,
	file_name: String,
	content_type: Option<String>,
	data: Vec<u8>,
	description: Option<String>,
	version: String,
}

/// Pull the upload form out of a multipart body.
async fn parse_upload_form(mut multipart: Multipart) -> Result<UploadForm, ServerError> {
	let mut project_id: Option<ProjectId> = None;
	let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
	let mut description: Option<String> = None;
	let mut version: Option<String> = None;

	while let Some(field) = multipart
		.next_field()
		.await
		.map_err(|e| ServerError::BadRequest(format!("Failed to read multipart data: {e}")))?
	{
		let name = field.name().map(|s| s.to_string());
		match name.as_deref() {
			Some("project_id") => {
				let bytes = field.bytes().await.map_err(|e| {
					ServerError::BadRequest(format!("Failed to read project_id field: {e}"))
				})?;
				let text = String::from_utf8_lossy(&bytes);
				let id = Uuid::parse_str(text.trim())
					.map_err(|_| ServerError::BadRequest("Invalid project ID".to_string()))?;
				project_id = Some(ProjectId::new(id));
			}
			Some("description") => {
				let bytes = field.bytes().await.map_err(|e| {
					ServerError::BadRequest(format!("Failed to read description field: {e}"))
				})?;
				let text = String::from_utf8_lossy(&bytes).to_string();
				if !text.is_empty() {
					description = Some(text);
				}
			}
			Some("version") => {
				let bytes = field.bytes().await.map_err(|e| {
					ServerError::BadRequest(format!("Failed to read version field: {e}"))
				})?;
				let text = String::from_utf8_lossy(&bytes).to_string();
				if !text.is_empty() {
					version = Some(text);
				}
			}
			Some("file") => {
				let file_name = field
					.file_name()
					.map(|s| s.to_string())
					.unwrap_or_else(|| "blueprint".to_string());
				let content_type = field.content_type().map(|s| s.to_string());
				let bytes = field.bytes().await.map_err(|e| {
					ServerError::BadRequest(format!("Failed to read file {file_name}: {e}"))
				})?;
				file = Some((file_name, content_type, bytes.to_vec()));
			}
			_ => {}
		}
	}

	let project_id = project_id
		.ok_or_else(|| ServerError::BadRequest("project_id field is required".to_string()))?;
	let (file_name, content_type, data) =
		file.ok_or_else(|| ServerError::BadRequest("file field is required".to_string()))?;

	Ok(UploadForm {
		project_id,
		file_name,
		content_type,
		data,
		description,
		version: version.unwrap_or_else(|| "1.0".to_string()),
	})
}

/// Row-level policy facts for a stored blueprint.
async fn blueprint_ctx(
	state: &AppState,
	principal_id: &UserId,
	blueprint: &Blueprint,
) -> Result<ResourceCtx, ServerError> {
	let is_member = state
		.project_repo
		.is_team_member(&blueprint.project_id, principal_id)
		.await?;
	Ok(ResourceCtx::blueprint().with_team_member(is_member))
}

/// GET /api/blueprints - List drawings visible to the caller.
#[utoipa::path(
	get,
	path = "/api/blueprints",
	params(ListBlueprintsParams),
	responses(
		(status = 200, description = "Visible blueprints", body = Vec<BlueprintResponse>),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn list_blueprints(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Query(params): Query<ListBlueprintsParams>,
) -> Result<impl IntoResponse, ServerError> {
	let filter = list_filter(&current_user.principal, ResourceKind::Blueprint)?;

	let limit = clamp_limit(params.limit);
	let skip = clamp_skip(params.skip);
	let project_id = params.project_id.map(ProjectId::new);

	let blueprints = state
		.blueprint_repo
		.list_blueprints(&filter, project_id.as_ref(), limit, skip)
		.await?;

	let responses: Vec<BlueprintResponse> =
		blueprints.into_iter().map(BlueprintResponse::from).collect();
	Ok(Json(responses))
}

/// GET /api/blueprints/{blueprint_id} - Look up one drawing.
#[utoipa::path(
	get,
	path = "/api/blueprints/{blueprint_id}",
	params(("blueprint_id" = Uuid, Path, description = "Blueprint ID")),
	responses(
		(status = 200, description = "Blueprint metadata", body = BlueprintResponse),
		(status = 403, description = "Caller is not on the project team", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Blueprint not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn get_blueprint(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(blueprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let blueprint_id = BlueprintId::new(blueprint_id);

	let detail = state
		.blueprint_repo
		.get_blueprint_detail_by_id(&blueprint_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Blueprint not found".to_string()))?;

	let ctx = blueprint_ctx(&state, &current_user.principal.id, &detail.blueprint).await?;
	ensure_allowed(&decide(&current_user.principal, Action::Read, &ctx))?;

	Ok(Json(BlueprintResponse::from(detail)))
}

/// POST /api/blueprints/upload - Upload a new drawing.
///
/// Multipart form with a `project_id` text field, the `file` itself, and
/// optional `description` and `version` fields. The stored name is unique per
/// upload, so re-uploading the same filename never clobbers an earlier one.
#[utoipa::path(
	post,
	path = "/api/blueprints/upload",
	responses(
		(status = 200, description = "Blueprint uploaded", body = BlueprintResponse),
		(status = 400, description = "Malformed form or oversized file", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Project not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn upload_blueprint(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	multipart: Multipart,
) -> Result<impl IntoResponse, ServerError> {
	let form = parse_upload_form(multipart).await?;

	state
		.project_repo
		.get_project_by_id(&form.project_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Project not found".to_string()))?;

	ensure_allowed(&decide(
		&current_user.principal,
		Action::Create,
		&ResourceCtx::blueprint(),
	))?;

	if form.data.len() as u64 > state.max_upload_bytes {
		return Err(ServerError::BadRequest(
			"File exceeds the maximum upload size".to_string(),
		));
	}

	let uploaded_at = chrono::Utc::now();
	let stored_name = BlueprintStorage::stored_name(&form.project_id, &form.file_name, uploaded_at);
	let stored_path = state.storage.save(&stored_name, &form.data).await?;

	let blueprint = Blueprint {
		id: BlueprintId::generate(),
		project_id: form.project_id,
		file_name: stored_name,
		original_name: form.file_name,
		file_path: stored_path.to_string_lossy().into_owned(),
		file_size: form.data.len() as i64,
		file_type: form.content_type,
		version: form.version,
		description: form.description,
		uploaded_by: current_user.user.id,
		uploaded_at,
		updated_at: uploaded_at,
		is_active: true,
	};

	state.blueprint_repo.create_blueprint(&blueprint).await?;

	tracing::info!(
		blueprint_id = %blueprint.id,
		project_id = %blueprint.project_id,
		size = blueprint.file_size,
		"uploaded blueprint"
	);

	let detail = BlueprintDetail {
		blueprint,
		uploader_name: Some(current_user.user.full_name.clone()),
	};
	Ok(Json(BlueprintResponse::from(detail)))
}

/// GET /api/blueprints/{blueprint_id}/download - Fetch the stored file.
#[utoipa::path(
	get,
	path = "/api/blueprints/{blueprint_id}/download",
	params(("blueprint_id" = Uuid, Path, description = "Blueprint ID")),
	responses(
		(status = 200, description = "File contents"),
		(status = 403, description = "Caller is not on the project team", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Blueprint or file not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn download_blueprint(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(blueprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let blueprint_id = BlueprintId::new(blueprint_id);

	let blueprint = state
		.blueprint_repo
		.get_blueprint_by_id(&blueprint_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Blueprint not found".to_string()))?;

	let ctx = blueprint_ctx(&state, &current_user.principal.id, &blueprint).await?;
	let decision = decide(&current_user.principal, Action::Download, &ctx);
	if !decision.is_allowed() {
		return Err(ServerError::Forbidden(
			"You don't have access to this blueprint".to_string(),
		));
	}

	let bytes = state
		.storage
		.read(&blueprint.file_path)
		.await?
		.ok_or_else(|| ServerError::NotFound("File not found on server".to_string()))?;

	let content_type = blueprint
		.file_type
		.unwrap_or_else(|| "application/octet-stream".to_string());

	Ok((
		[
			(header::CONTENT_TYPE, content_type),
			(
				header::CONTENT_DISPOSITION,
				format!("attachment; filename=\"{}\"", blueprint.original_name),
			),
		],
		bytes,
	))
}

/// PUT /api/blueprints/{blueprint_id} - Update drawing metadata.
///
/// The stored file is immutable; only description and version change.
#[utoipa::path(
	put,
	path = "/api/blueprints/{blueprint_id}",
	params(("blueprint_id" = Uuid, Path, description = "Blueprint ID")),
	request_body = UpdateBlueprintRequest,
	responses(
		(status = 200, description = "Updated metadata", body = BlueprintResponse),
		(status = 404, description = "Blueprint not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn update_blueprint(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(blueprint_id): Path<Uuid>,
	Json(request): Json<UpdateBlueprintRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let blueprint_id = BlueprintId::new(blueprint_id);

	let mut blueprint = state
		.blueprint_repo
		.get_blueprint_by_id(&blueprint_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Blueprint not found".to_string()))?;

	ensure_allowed(&decide(
		&current_user.principal,
		Action::Update,
		&ResourceCtx::blueprint(),
	))?;

	if let Some(description) = request.description {
		blueprint.description = Some(description);
	}
	if let Some(version) = request.version {
		blueprint.version = version;
	}
	blueprint.updated_at = chrono::Utc::now();

	state.blueprint_repo.update_blueprint(&blueprint).await?;

	tracing::info!(blueprint_id = %blueprint.id, updated_by = %current_user.user.id, "updated blueprint metadata");

	let detail = state
		.blueprint_repo
		.get_blueprint_detail_by_id(&blueprint_id)
		.await?
		.ok_or_else(|| {
			ServerError::Internal(format!("blueprint {blueprint_id} missing after write"))
		})?;
	Ok(Json(BlueprintResponse::from(detail)))
}

/// DELETE /api/blueprints/{blueprint_id} - Retire a drawing.
///
/// Soft-deletes the row so later reads treat it as missing, then removes the
/// stored file on a best-effort basis.
#[utoipa::path(
	delete,
	path = "/api/blueprints/{blueprint_id}",
	params(("blueprint_id" = Uuid, Path, description = "Blueprint ID")),
	responses(
		(status = 200, description = "Blueprint deleted", body = SuccessResponse),
		(status = 403, description = "Crew roles may not delete drawings", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Blueprint not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "blueprints"
)]
#[axum::debug_handler]
pub async fn delete_blueprint(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(blueprint_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let blueprint_id = BlueprintId::new(blueprint_id);

	let blueprint = state
		.blueprint_repo
		.get_blueprint_by_id(&blueprint_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Blueprint not found".to_string()))?;

	ensure_allowed(&decide(
		&current_user.principal,
		Action::Delete,
		&ResourceCtx::blueprint(),
	))?;

	state
		.blueprint_repo
		.soft_delete_blueprint(&blueprint_id)
		.await?;
	state.storage.remove(&blueprint.file_path).await;

	tracing::info!(blueprint_id = %blueprint_id, deleted_by = %current_user.user.id, "deleted blueprint");

	Ok(Json(SuccessResponse {
		message: "Blueprint deleted successfully".to_string(),
	}))
}
