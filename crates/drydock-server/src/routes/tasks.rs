// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task CRUD and completion handlers.
//!
//! Row-level decisions always run against the task's project creator and
//! current assignee. Moving a task evaluates the update gate twice, once for
//! the source project and once for the destination, and re-validates the
//! assignment against the destination team before anything is written.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use drydock_server_api::{CreateTaskRequest, ListTasksParams, TaskResponse, UpdateTaskRequest};
use drydock_server_auth::policy::{decide, list_filter, Action, ResourceCtx, ResourceKind};
use drydock_server_auth::types::{ProjectId, TaskId, UserId};
use drydock_server_auth::{validate_assignment, AssignmentError, AssignmentFacts};
use drydock_server_db::{Project, Task, TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ensure_allowed, ServerError},
	pagination::{clamp_limit, clamp_skip},
};

/// Gather the integrity-checker facts for a proposed assignment.
///
/// Facts are only recorded for rows that actually exist, so the checker's
/// not-found and membership errors fall out of absent entries.
async fn assignment_facts(
	state: &AppState,
	project: Option<&Project>,
	assignee: Option<UserId>,
) -> Result<AssignmentFacts, ServerError> {
	let mut facts = AssignmentFacts::new();

	if let Some(project) = project {
		facts = facts.with_project(project.id, project.project_name.clone());
	}

	if let Some(assignee_id) = assignee {
		if let Some(user) = state.user_repo.get_user_by_id(&assignee_id).await? {
			facts = facts.with_assignee(user.id, user.full_name);
		}
		if let Some(project) = project {
			if state
				.project_repo
				.is_team_member(&project.id, &assignee_id)
				.await?
			{
				facts = facts.with_team_member(assignee_id);
			}
		}
	}

	Ok(facts)
}

/// Row-level policy facts for an existing task.
///
/// A vanished project row yields a bare context; the policy then denies every
/// non-admin action instead of guessing at ownership.
async fn task_ctx(state: &AppState, task: &Task) -> Result<ResourceCtx, ServerError> {
	let project = state.project_repo.get_project_by_id(&task.project_id).await?;
	Ok(match project {
		Some(project) => ResourceCtx::task(project.created_by, task.assigned_to),
		None => ResourceCtx::collection(ResourceKind::Task),
	})
}

/// Fetch the enriched response row for a task that was just written.
async fn task_response(state: &AppState, id: &TaskId) -> Result<TaskResponse, ServerError> {
	let detail = state
		.task_repo
		.get_task_detail_by_id(id)
		.await?
		.ok_or_else(|| ServerError::Internal(format!("task {id} missing after write")))?;
	Ok(TaskResponse::from(detail))
}

/// GET /api/tasks - List tasks visible to the caller.
#[utoipa::path(
	get,
	path = "/api/tasks",
	params(ListTasksParams),
	responses(
		(status = 200, description = "Visible tasks", body = Vec<TaskResponse>),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn list_tasks(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Query(params): Query<ListTasksParams>,
) -> Result<impl IntoResponse, ServerError> {
	let filter = list_filter(&current_user.principal, ResourceKind::Task)?;

	let limit = clamp_limit(params.limit);
	let skip = clamp_skip(params.skip);
	let project_id = params.project_id.map(ProjectId::new);

	let tasks = state
		.task_repo
		.list_tasks(&filter, project_id.as_ref(), limit, skip)
		.await?;

	let responses: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();
	Ok(Json(responses))
}

/// GET /api/tasks/{task_id} - Look up one task.
#[utoipa::path(
	get,
	path = "/api/tasks/{task_id}",
	params(("task_id" = Uuid, Path, description = "Task ID")),
	responses(
		(status = 200, description = "Task detail", body = TaskResponse),
		(status = 403, description = "Not visible to this role", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Task not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn get_task(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let task_id = TaskId::new(task_id);

	let detail = state
		.task_repo
		.get_task_detail_by_id(&task_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

	let ctx = task_ctx(&state, &detail.task).await?;
	ensure_allowed(&decide(&current_user.principal, Action::Read, &ctx))?;

	Ok(Json(TaskResponse::from(detail)))
}

/// POST /api/tasks - Create a task.
///
/// The target project must exist, the caller must be allowed to create tasks
/// there, and a proposed assignee must be on the project team.
#[utoipa::path(
	post,
	path = "/api/tasks",
	request_body = CreateTaskRequest,
	responses(
		(status = 201, description = "Task created", body = TaskResponse),
		(status = 400, description = "Assignee is not on the project team", body = drydock_server_api::ErrorResponse),
		(status = 403, description = "Role may not create tasks here", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Project or assignee not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn create_task(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let project_id = ProjectId::new(request.project_id);
	let assigned_to = request.assigned_to.map(UserId::new);

	let project = state
		.project_repo
		.get_project_by_id(&project_id)
		.await?
		.ok_or(ServerError::Assignment(AssignmentError::ProjectNotFound(
			project_id,
		)))?;

	let ctx = ResourceCtx::task(project.created_by, assigned_to);
	ensure_allowed(&decide(&current_user.principal, Action::Create, &ctx))?;

	let facts = assignment_facts(&state, Some(&project), assigned_to).await?;
	validate_assignment(project_id, assigned_to, &facts)?;

	let now = chrono::Utc::now();
	let task = Task {
		id: TaskId::generate(),
		project_id,
		task_name: request.task_name,
		description: request.description,
		assigned_to,
		priority: request
			.priority
			.map(TaskPriority::from)
			.unwrap_or(TaskPriority::Medium),
		status: request
			.status
			.map(TaskStatus::from)
			.unwrap_or(TaskStatus::Pending),
		is_maintenance: request.is_maintenance,
		start_date: request.start_date,
		due_date: request.due_date,
		completion_date: None,
		created_at: now,
		updated_at: now,
	};

	state.task_repo.create_task(&task).await?;

	tracing::info!(task_id = %task.id, project_id = %project_id, "created task");

	let response = task_response(&state, &task.id).await?;
	Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/tasks/{task_id} - Update a task.
///
/// A move to another project requires the update gate to pass against both
/// projects; the assignment is re-validated against the final project
/// whenever the assignee or project changes. An explicit `assigned_to: null`
/// unassigns without validation.
#[utoipa::path(
	put,
	path = "/api/tasks/{task_id}",
	params(("task_id" = Uuid, Path, description = "Task ID")),
	request_body = UpdateTaskRequest,
	responses(
		(status = 200, description = "Updated task", body = TaskResponse),
		(status = 400, description = "Assignee is not on the final project team", body = drydock_server_api::ErrorResponse),
		(status = 403, description = "Caller may not update this task", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Task, project, or assignee not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn update_task(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(task_id): Path<Uuid>,
	Json(request): Json<UpdateTaskRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let task_id = TaskId::new(task_id);

	let mut task = state
		.task_repo
		.get_task_by_id(&task_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

	let current_project = state.project_repo.get_project_by_id(&task.project_id).await?;
	let current_ctx = match &current_project {
		Some(project) => ResourceCtx::task(project.created_by, task.assigned_to),
		None => ResourceCtx::collection(ResourceKind::Task),
	};
	ensure_allowed(&decide(&current_user.principal, Action::Update, &current_ctx))?;

	// Resolve the final assignee before any move gate runs
	let assignee_changed = request.assigned_to.is_some();
	let final_assignee = match request.assigned_to {
		None => task.assigned_to,
		Some(None) => None,
		Some(Some(id)) => Some(UserId::new(id)),
	};

	// Resolve the final project, gating the destination on a real move
	let requested_project = request.project_id.map(ProjectId::new);
	let moving = requested_project.is_some_and(|dest| dest != task.project_id);
	let final_project = if let Some(dest_id) = requested_project {
		if moving {
			let destination = state
				.project_repo
				.get_project_by_id(&dest_id)
				.await?
				.ok_or(ServerError::Assignment(AssignmentError::ProjectNotFound(
					dest_id,
				)))?;
			let dest_ctx = ResourceCtx::task(destination.created_by, final_assignee);
			ensure_allowed(&decide(&current_user.principal, Action::Update, &dest_ctx))?;
			Some(destination)
		} else {
			current_project
		}
	} else {
		current_project
	};
	let final_project_id = final_project.as_ref().map(|p| p.id).unwrap_or(task.project_id);

	// Re-validate whenever the assignee or project is part of the change set;
	// explicit unassignment needs no team check
	if (assignee_changed || requested_project.is_some()) && final_assignee.is_some() {
		let facts = assignment_facts(&state, final_project.as_ref(), final_assignee).await?;
		validate_assignment(final_project_id, final_assignee, &facts)?;
	}

	let previous_status = task.status;

	task.project_id = final_project_id;
	task.assigned_to = final_assignee;
	if let Some(task_name) = request.task_name {
		task.task_name = task_name;
	}
	if let Some(description) = request.description {
		task.description = Some(description);
	}
	if let Some(priority) = request.priority {
		task.priority = priority.into();
	}
	if let Some(status) = request.status {
		task.status = status.into();
	}
	if let Some(is_maintenance) = request.is_maintenance {
		task.is_maintenance = is_maintenance;
	}
	if let Some(start_date) = request.start_date {
		task.start_date = Some(start_date);
	}
	if let Some(due_date) = request.due_date {
		task.due_date = Some(due_date);
	}
	if let Some(completion_date) = request.completion_date {
		task.completion_date = Some(completion_date);
	}

	// Completing via update stamps the completion date like the dedicated
	// completion endpoint does
	if task.status == TaskStatus::Completed
		&& previous_status != TaskStatus::Completed
		&& request.completion_date.is_none()
	{
		task.completion_date = Some(chrono::Utc::now().date_naive());
	}

	task.updated_at = chrono::Utc::now();

	state.task_repo.update_task(&task).await?;

	tracing::info!(task_id = %task.id, updated_by = %current_user.user.id, "updated task");

	Ok(Json(task_response(&state, &task.id).await?))
}

/// PATCH /api/tasks/{task_id}/complete - Mark a task completed.
///
/// Crew roles may complete only their own assignment; project managers only
/// tasks in their own projects. Sets the completion date to today.
#[utoipa::path(
	patch,
	path = "/api/tasks/{task_id}/complete",
	params(("task_id" = Uuid, Path, description = "Task ID")),
	responses(
		(status = 200, description = "Task completed", body = TaskResponse),
		(status = 403, description = "Caller may not complete this task", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Task not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn complete_task(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let task_id = TaskId::new(task_id);

	let mut task = state
		.task_repo
		.get_task_by_id(&task_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

	let ctx = task_ctx(&state, &task).await?;
	ensure_allowed(&decide(&current_user.principal, Action::Complete, &ctx))?;

	task.status = TaskStatus::Completed;
	task.completion_date = Some(chrono::Utc::now().date_naive());
	task.updated_at = chrono::Utc::now();

	state.task_repo.update_task(&task).await?;

	tracing::info!(task_id = %task.id, completed_by = %current_user.user.id, "completed task");

	Ok(Json(task_response(&state, &task.id).await?))
}

/// DELETE /api/tasks/{task_id} - Delete a task.
#[utoipa::path(
	delete,
	path = "/api/tasks/{task_id}",
	params(("task_id" = Uuid, Path, description = "Task ID")),
	responses(
		(status = 204, description = "Task deleted"),
		(status = 403, description = "Caller may not delete this task", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Task not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "tasks"
)]
#[axum::debug_handler]
pub async fn delete_task(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(task_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let task_id = TaskId::new(task_id);

	let task = state
		.task_repo
		.get_task_by_id(&task_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Task not found".to_string()))?;

	let ctx = task_ctx(&state, &task).await?;
	ensure_allowed(&decide(&current_user.principal, Action::Delete, &ctx))?;

	state.task_repo.delete_task(&task_id).await?;

	tracing::info!(task_id = %task_id, deleted_by = %current_user.user.id, "deleted task");

	Ok(StatusCode::NO_CONTENT)
}
