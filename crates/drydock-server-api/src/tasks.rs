// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, NaiveDate, Utc};
use drydock_server_db::{TaskDetail, TaskPriority, TaskStatus};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::users::default_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskPriorityApi {
	Low,
	Medium,
	High,
	Critical,
}

impl From<TaskPriority> for TaskPriorityApi {
	fn from(priority: TaskPriority) -> Self {
		match priority {
			TaskPriority::Low => TaskPriorityApi::Low,
			TaskPriority::Medium => TaskPriorityApi::Medium,
			TaskPriority::High => TaskPriorityApi::High,
			TaskPriority::Critical => TaskPriorityApi::Critical,
		}
	}
}

impl From<TaskPriorityApi> for TaskPriority {
	fn from(priority: TaskPriorityApi) -> Self {
		match priority {
			TaskPriorityApi::Low => TaskPriority::Low,
			TaskPriorityApi::Medium => TaskPriority::Medium,
			TaskPriorityApi::High => TaskPriority::High,
			TaskPriorityApi::Critical => TaskPriority::Critical,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum TaskStatusApi {
	Pending,
	InProgress,
	Completed,
	Blocked,
}

impl From<TaskStatus> for TaskStatusApi {
	fn from(status: TaskStatus) -> Self {
		match status {
			TaskStatus::Pending => TaskStatusApi::Pending,
			TaskStatus::InProgress => TaskStatusApi::InProgress,
			TaskStatus::Completed => TaskStatusApi::Completed,
			TaskStatus::Blocked => TaskStatusApi::Blocked,
		}
	}
}

impl From<TaskStatusApi> for TaskStatus {
	fn from(status: TaskStatusApi) -> Self {
		match status {
			TaskStatusApi::Pending => TaskStatus::Pending,
			TaskStatusApi::InProgress => TaskStatus::InProgress,
			TaskStatusApi::Completed => TaskStatus::Completed,
			TaskStatusApi::Blocked => TaskStatus::Blocked,
		}
	}
}

/// A task in API responses, enriched with display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TaskResponse {
	pub id: Uuid,
	pub project_id: Uuid,
	pub task_name: String,
	pub description: Option<String>,
	pub assigned_to: Option<Uuid>,
	pub priority: TaskPriorityApi,
	pub status: TaskStatusApi,
	pub is_maintenance: bool,
	pub start_date: Option<NaiveDate>,
	pub due_date: Option<NaiveDate>,
	pub completion_date: Option<NaiveDate>,
	/// "Unknown" when the project row has vanished.
	pub project_name: String,
	/// "Unassigned" when nobody holds the task, "Unknown" when the assignee
	/// row has vanished.
	pub assigned_to_name: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<TaskDetail> for TaskResponse {
	fn from(detail: TaskDetail) -> Self {
		let task = detail.task;
		let assigned_to_name = match task.assigned_to {
			None => "Unassigned".to_string(),
			Some(_) => detail
				.assignee_name
				.unwrap_or_else(|| "Unknown".to_string()),
		};
		Self {
			id: task.id.into_inner(),
			project_id: task.project_id.into_inner(),
			task_name: task.task_name,
			description: task.description,
			assigned_to: task.assigned_to.map(|u| u.into_inner()),
			priority: task.priority.into(),
			status: task.status.into(),
			is_maintenance: task.is_maintenance,
			start_date: task.start_date,
			due_date: task.due_date,
			completion_date: task.completion_date,
			project_name: detail
				.project_name
				.unwrap_or_else(|| "Unknown".to_string()),
			assigned_to_name,
			created_at: task.created_at,
			updated_at: task.updated_at,
		}
	}
}

/// Request to create a task.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateTaskRequest {
	pub project_id: Uuid,
	pub task_name: String,
	pub description: Option<String>,
	pub assigned_to: Option<Uuid>,
	/// Omitted priority defaults to medium.
	pub priority: Option<TaskPriorityApi>,
	/// Omitted status defaults to pending.
	pub status: Option<TaskStatusApi>,
	#[serde(default)]
	pub is_maintenance: bool,
	pub start_date: Option<NaiveDate>,
	pub due_date: Option<NaiveDate>,
}

/// Request to update a task. Absent fields keep their stored value.
///
/// `assigned_to` distinguishes absent from explicit null: absent leaves the
/// assignee alone, `"assigned_to": null` unassigns.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateTaskRequest {
	pub project_id: Option<Uuid>,
	pub task_name: Option<String>,
	pub description: Option<String>,
	#[serde(default, deserialize_with = "double_option")]
	#[cfg_attr(feature = "openapi", schema(value_type = Option<Uuid>))]
	pub assigned_to: Option<Option<Uuid>>,
	pub priority: Option<TaskPriorityApi>,
	pub status: Option<TaskStatusApi>,
	pub is_maintenance: Option<bool>,
	pub start_date: Option<NaiveDate>,
	pub due_date: Option<NaiveDate>,
	pub completion_date: Option<NaiveDate>,
}

/// Map a present-but-null field to `Some(None)` so handlers can tell
/// "leave unchanged" from "clear".
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<Uuid>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct ListTasksParams {
	pub project_id: Option<Uuid>,
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
}
