// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project CRUD handlers.
//!
//! Every read is scoped by the policy's row filter and every row-level
//! operation re-checks the decision against the stored creator, so admins see
//! everything, project managers operate on their own projects, and crew roles
//! see only projects they are assigned to.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use drydock_server_api::{
	CreateProjectRequest, ListProjectsParams, ProjectResponse, UpdateProjectRequest,
};
use drydock_server_auth::policy::{decide, list_filter, Action, ResourceCtx, ResourceKind};
use drydock_server_auth::types::{ProjectId, UserId};
use drydock_server_auth::AssignmentError;
use drydock_server_db::{Project, ProjectStatus};
use uuid::Uuid;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ensure_allowed, ServerError},
	pagination::{clamp_limit, clamp_skip},
};

/// Assemble the enriched response for one project row.
async fn project_response(
	state: &AppState,
	project: &Project,
) -> Result<ProjectResponse, ServerError> {
	let owner_name = state
		.user_repo
		.get_user_by_id(&project.created_by)
		.await?
		.map(|owner| owner.full_name);
	let team = state.project_repo.team_members(&project.id).await?;
	Ok(ProjectResponse::from_parts(project, owner_name, team))
}

/// Reject team ids that do not belong to an existing user.
async fn check_team_ids(state: &AppState, ids: &[UserId]) -> Result<(), ServerError> {
	for user_id in ids {
		if state.user_repo.get_user_by_id(user_id).await?.is_none() {
			return Err(ServerError::Assignment(AssignmentError::UserNotFound(
				*user_id,
			)));
		}
	}
	Ok(())
}

/// GET /api/projects - List projects visible to the caller.
#[utoipa::path(
	get,
	path = "/api/projects",
	params(ListProjectsParams),
	responses(
		(status = 200, description = "Visible projects", body = Vec<ProjectResponse>),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "projects"
)]
#[axum::debug_handler]
pub async fn list_projects(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Query(params): Query<ListProjectsParams>,
) -> Result<impl IntoResponse, ServerError> {
	let filter = list_filter(&current_user.principal, ResourceKind::Project)?;

	let limit = clamp_limit(params.limit);
	let skip = clamp_skip(params.skip);

	let projects = state.project_repo.list_projects(&filter, limit, skip).await?;

	let mut responses = Vec::with_capacity(projects.len());
	for project in &projects {
		responses.push(project_response(&state, project).await?);
	}

	Ok(Json(responses))
}

/// GET /api/projects/{project_id} - Look up one project.
#[utoipa::path(
	get,
	path = "/api/projects/{project_id}",
	params(("project_id" = Uuid, Path, description = "Project ID")),
	responses(
		(status = 200, description = "Project detail", body = ProjectResponse),
		(status = 403, description = "Not visible to this role", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Project not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "projects"
)]
#[axum::debug_handler]
pub async fn get_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = ProjectId::new(project_id);

	let project = state
		.project_repo
		.get_project_by_id(&project_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Project not found".to_string()))?;

	let is_member = state
		.project_repo
		.is_team_member(&project_id, &current_user.principal.id)
		.await?;
	let ctx = ResourceCtx::project(project.created_by).with_team_member(is_member);
	ensure_allowed(&decide(&current_user.principal, Action::Read, &ctx))?;

	Ok(Json(project_response(&state, &project).await?))
}

/// POST /api/projects - Create a project.
///
/// The caller becomes the creator. An initial team may be supplied; every id
/// must name an existing user.
#[utoipa::path(
	post,
	path = "/api/projects",
	request_body = CreateProjectRequest,
	responses(
		(status = 201, description = "Project created", body = ProjectResponse),
		(status = 403, description = "Role may not create projects", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "A team member id does not exist", body = drydock_server_api::ErrorResponse)
	),
	tag = "projects"
)]
#[axum::debug_handler]
pub async fn create_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let ctx = ResourceCtx::collection(ResourceKind::Project);
	ensure_allowed(&decide(&current_user.principal, Action::Create, &ctx))?;

	let team_ids: Vec<UserId> = request
		.assigned_user_ids
		.clone()
		.unwrap_or_default()
		.into_iter()
		.map(UserId::new)
		.collect();
	check_team_ids(&state, &team_ids).await?;

	let now = chrono::Utc::now();
	let project = Project {
		id: ProjectId::generate(),
		project_name: request.project_name,
		vessel_name: request.vessel_name,
		vessel_type: request.vessel_type,
		vessel_owner: request.vessel_owner,
		start_date: request.start_date,
		end_date: request.end_date,
		status: request
			.status
			.map(ProjectStatus::from)
			.unwrap_or(ProjectStatus::Planning),
		budget: request.budget,
		spending: request.spending,
		description: request.description,
		created_by: current_user.principal.id,
		created_at: now,
		updated_at: now,
	};

	state.project_repo.create_project(&project).await?;
	if !team_ids.is_empty() {
		state.project_repo.replace_team(&project.id, &team_ids).await?;
	}

	tracing::info!(project_id = %project.id, created_by = %project.created_by, "created project");

	let response = project_response(&state, &project).await?;
	Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/projects/{project_id} - Update a project.
///
/// Absent fields keep their stored value. A present `assigned_user_ids`
/// replaces the team wholesale after the ids are verified.
#[utoipa::path(
	put,
	path = "/api/projects/{project_id}",
	params(("project_id" = Uuid, Path, description = "Project ID")),
	request_body = UpdateProjectRequest,
	responses(
		(status = 200, description = "Updated project", body = ProjectResponse),
		(status = 403, description = "Not the project creator", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Project not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "projects"
)]
#[axum::debug_handler]
pub async fn update_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<Uuid>,
	Json(request): Json<UpdateProjectRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = ProjectId::new(project_id);

	let mut project = state
		.project_repo
		.get_project_by_id(&project_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Project not found".to_string()))?;

	let ctx = ResourceCtx::project(project.created_by);
	ensure_allowed(&decide(&current_user.principal, Action::Update, &ctx))?;

	if let Some(project_name) = request.project_name {
		project.project_name = project_name;
	}
	if let Some(vessel_name) = request.vessel_name {
		project.vessel_name = vessel_name;
	}
	if let Some(vessel_type) = request.vessel_type {
		project.vessel_type = Some(vessel_type);
	}
	if let Some(vessel_owner) = request.vessel_owner {
		project.vessel_owner = Some(vessel_owner);
	}
	if let Some(start_date) = request.start_date {
		project.start_date = Some(start_date);
	}
	if let Some(end_date) = request.end_date {
		project.end_date = Some(end_date);
	}
	if let Some(status) = request.status {
		project.status = status.into();
	}
	if let Some(budget) = request.budget {
		project.budget = Some(budget);
	}
	if let Some(spending) = request.spending {
		project.spending = Some(spending);
	}
	if let Some(description) = request.description {
		project.description = Some(description);
	}
	project.updated_at = chrono::Utc::now();

	state.project_repo.update_project(&project).await?;

	if let Some(ids) = request.assigned_user_ids {
		let team_ids: Vec<UserId> = ids.into_iter().map(UserId::new).collect();
		check_team_ids(&state, &team_ids).await?;
		state.project_repo.replace_team(&project.id, &team_ids).await?;
	}

	tracing::info!(project_id = %project.id, updated_by = %current_user.user.id, "updated project");

	Ok(Json(project_response(&state, &project).await?))
}

/// DELETE /api/projects/{project_id} - Delete a project.
///
/// Removes the project together with its tasks and team assignments.
#[utoipa::path(
	delete,
	path = "/api/projects/{project_id}",
	params(("project_id" = Uuid, Path, description = "Project ID")),
	responses(
		(status = 204, description = "Project deleted"),
		(status = 403, description = "Not the project creator", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Project not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "projects"
)]
#[axum::debug_handler]
pub async fn delete_project(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(project_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = ProjectId::new(project_id);

	let project = state
		.project_repo
		.get_project_by_id(&project_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Project not found".to_string()))?;

	let ctx = ResourceCtx::project(project.created_by);
	ensure_allowed(&decide(&current_user.principal, Action::Delete, &ctx))?;

	state.project_repo.delete_project(&project_id).await?;

	tracing::info!(project_id = %project_id, deleted_by = %current_user.user.id, "deleted project");

	Ok(StatusCode::NO_CONTENT)
}
