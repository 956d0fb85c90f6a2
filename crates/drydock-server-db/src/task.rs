// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task repository for database operations.
//!
//! Tasks always belong to a project and may be assigned to one user. Listing
//! returns [`TaskDetail`] rows with project and assignee names joined in, so
//! handlers never fan out per-row lookups. Visibility is driven by compiled
//! row filters, with an optional project scope ANDed on top.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use drydock_server_auth::policy::RowFilter;
use drydock_server_auth::{ProjectId, TaskId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::compile;
use crate::project::parse_optional_date;
use crate::user::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
	Low,
	Medium,
	High,
	Critical,
}

impl TaskPriority {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskPriority::Low => "low",
			TaskPriority::Medium => "medium",
			TaskPriority::High => "high",
			TaskPriority::Critical => "critical",
		}
	}
}

impl std::str::FromStr for TaskPriority {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"low" => Ok(TaskPriority::Low),
			"medium" => Ok(TaskPriority::Medium),
			"high" => Ok(TaskPriority::High),
			"critical" => Ok(TaskPriority::Critical),
			_ => Err(format!("unknown task priority: {s}")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
	Pending,
	InProgress,
	Completed,
	Blocked,
}

impl TaskStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskStatus::Pending => "pending",
			TaskStatus::InProgress => "in_progress",
			TaskStatus::Completed => "completed",
			TaskStatus::Blocked => "blocked",
		}
	}
}

impl std::str::FromStr for TaskStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"pending" => Ok(TaskStatus::Pending),
			"in_progress" => Ok(TaskStatus::InProgress),
			"completed" => Ok(TaskStatus::Completed),
			"blocked" => Ok(TaskStatus::Blocked),
			_ => Err(format!("unknown task status: {s}")),
		}
	}
}

/// A unit of work inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
	pub id: TaskId,
	pub project_id: ProjectId,
	pub task_name: String,
	pub description: Option<String>,
	pub assigned_to: Option<UserId>,
	pub priority: TaskPriority,
	pub status: TaskStatus,
	/// Maintenance tasks are recurring upkeep rather than retrofit work.
	pub is_maintenance: bool,
	pub start_date: Option<NaiveDate>,
	pub due_date: Option<NaiveDate>,
	pub completion_date: Option<NaiveDate>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A task joined with display names for its project and assignee.
///
/// The names are `None` when the referenced row no longer exists; response
/// mapping substitutes placeholders.
#[derive(Debug, Clone)]
pub struct TaskDetail {
	pub task: Task,
	pub project_name: Option<String>,
	pub assignee_name: Option<String>,
}

#[async_trait]
pub trait TaskStore: Send + Sync {
	async fn create_task(&self, task: &Task) -> Result<(), DbError>;
	async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>, DbError>;
	async fn get_task_detail_by_id(&self, id: &TaskId) -> Result<Option<TaskDetail>, DbError>;
	async fn update_task(&self, task: &Task) -> Result<(), DbError>;
	async fn delete_task(&self, id: &TaskId) -> Result<(), DbError>;
	async fn list_tasks(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TaskDetail>, DbError>;
	async fn count_open_tasks(&self, filter: &RowFilter) -> Result<i64, DbError>;
	async fn count_completed_tasks(&self, filter: &RowFilter) -> Result<i64, DbError>;
}

/// Repository for task database operations.
#[derive(Clone)]
pub struct TaskRepository {
	pool: SqlitePool,
}

impl TaskRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, task), fields(task_id = %task.id, project_id = %task.project_id))]
	pub async fn create_task(&self, task: &Task) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO tasks (
				id, project_id, task_name, description, assigned_to,
				priority, status, is_maintenance,
				start_date, due_date, completion_date,
				created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(task.id.to_string())
		.bind(task.project_id.to_string())
		.bind(&task.task_name)
		.bind(&task.description)
		.bind(task.assigned_to.map(|u| u.to_string()))
		.bind(task.priority.as_str())
		.bind(task.status.as_str())
		.bind(task.is_maintenance)
		.bind(task.start_date.map(|d| d.to_string()))
		.bind(task.due_date.map(|d| d.to_string()))
		.bind(task.completion_date.map(|d| d.to_string()))
		.bind(task.created_at.to_rfc3339())
		.bind(task.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(task_id = %task.id, "task created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, project_id, task_name, description, assigned_to,
				   priority, status, is_maintenance,
				   start_date, due_date, completion_date,
				   created_at, updated_at
			FROM tasks
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_task(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn get_task_detail_by_id(&self, id: &TaskId) -> Result<Option<TaskDetail>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT tasks.id, tasks.project_id, tasks.task_name, tasks.description,
				   tasks.assigned_to, tasks.priority, tasks.status, tasks.is_maintenance,
				   tasks.start_date, tasks.due_date, tasks.completion_date,
				   tasks.created_at, tasks.updated_at,
				   projects.project_name, users.full_name AS assignee_name
			FROM tasks
			LEFT JOIN projects ON projects.id = tasks.project_id
			LEFT JOIN users ON users.id = tasks.assigned_to
			WHERE tasks.id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_task_detail(&r)).transpose()
	}

	#[tracing::instrument(skip(self, task), fields(task_id = %task.id))]
	pub async fn update_task(&self, task: &Task) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE tasks
			SET project_id = ?, task_name = ?, description = ?, assigned_to = ?,
				priority = ?, status = ?, is_maintenance = ?,
				start_date = ?, due_date = ?, completion_date = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(task.project_id.to_string())
		.bind(&task.task_name)
		.bind(&task.description)
		.bind(task.assigned_to.map(|u| u.to_string()))
		.bind(task.priority.as_str())
		.bind(task.status.as_str())
		.bind(task.is_maintenance)
		.bind(task.start_date.map(|d| d.to_string()))
		.bind(task.due_date.map(|d| d.to_string()))
		.bind(task.completion_date.map(|d| d.to_string()))
		.bind(now)
		.bind(task.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("task {}", task.id)));
		}

		tracing::debug!(task_id = %task.id, "task updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn delete_task(&self, id: &TaskId) -> Result<(), DbError> {
		let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("task {id}")));
		}

		tracing::debug!(task_id = %id, "task deleted");
		Ok(())
	}

	/// List tasks visible under `filter`, optionally scoped to one project,
	/// newest first.
	///
	/// Filter clauses name bare task columns; `projects` and `users` share
	/// none of them, so the joined query leaves the clause untouched.
	#[tracing::instrument(skip(self, filter, project_id))]
	pub async fn list_tasks(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TaskDetail>, DbError> {
		let compiled = compile(filter);
		let project_clause = if project_id.is_some() {
			" AND tasks.project_id = ?"
		} else {
			""
		};
		let sql = format!(
			r#"
			SELECT tasks.id, tasks.project_id, tasks.task_name, tasks.description,
				   tasks.assigned_to, tasks.priority, tasks.status, tasks.is_maintenance,
				   tasks.start_date, tasks.due_date, tasks.completion_date,
				   tasks.created_at, tasks.updated_at,
				   projects.project_name, users.full_name AS assignee_name
			FROM tasks
			LEFT JOIN projects ON projects.id = tasks.project_id
			LEFT JOIN users ON users.id = tasks.assigned_to
			WHERE {}{}
			ORDER BY tasks.created_at DESC
			LIMIT ? OFFSET ?
			"#,
			compiled.clause(),
			project_clause
		);

		let mut query = sqlx::query(&sql);
		for bind in compiled.binds() {
			query = query.bind(bind);
		}
		if let Some(project_id) = project_id {
			query = query.bind(project_id.to_string());
		}
		let rows = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

		rows.iter().map(row_to_task_detail).collect()
	}

	/// Count visible tasks that are not yet completed.
	#[tracing::instrument(skip(self, filter))]
	pub async fn count_open_tasks(&self, filter: &RowFilter) -> Result<i64, DbError> {
		self.count_by_completion(filter, false).await
	}

	/// Count visible tasks that are completed.
	#[tracing::instrument(skip(self, filter))]
	pub async fn count_completed_tasks(&self, filter: &RowFilter) -> Result<i64, DbError> {
		self.count_by_completion(filter, true).await
	}

	async fn count_by_completion(
		&self,
		filter: &RowFilter,
		completed: bool,
	) -> Result<i64, DbError> {
		let compiled = compile(filter);
		let status_clause = if completed {
			"status = 'completed'"
		} else {
			"status != 'completed'"
		};
		let sql = format!(
			"SELECT COUNT(*) AS count FROM tasks WHERE {} AND {}",
			compiled.clause(),
			status_clause
		);

		let mut query = sqlx::query(&sql);
		for bind in compiled.binds() {
			query = query.bind(bind);
		}
		let row = query.fetch_one(&self.pool).await?;

		Ok(row.get("count"))
	}
}

fn row_to_task(row: &sqlx::sqlite::SqliteRow) -> Result<Task, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid task ID: {e}")))?;

	let project_id_str: String = row.get("project_id");
	let project_id = Uuid::parse_str(&project_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid project ID: {e}")))?;

	let assigned_to_str: Option<String> = row.get("assigned_to");
	let assigned_to = assigned_to_str
		.map(|s| {
			Uuid::parse_str(&s)
				.map(UserId::new)
				.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))
		})
		.transpose()?;

	let priority_str: String = row.get("priority");
	let priority = priority_str.parse().map_err(DbError::Internal)?;

	let status_str: String = row.get("status");
	let status = status_str.parse().map_err(DbError::Internal)?;

	Ok(Task {
		id: TaskId::new(id),
		project_id: ProjectId::new(project_id),
		task_name: row.get("task_name"),
		description: row.get("description"),
		assigned_to,
		priority,
		status,
		is_maintenance: row.get("is_maintenance"),
		start_date: parse_optional_date(row, "start_date")?,
		due_date: parse_optional_date(row, "due_date")?,
		completion_date: parse_optional_date(row, "completion_date")?,
		created_at: parse_timestamp(row, "created_at")?,
		updated_at: parse_timestamp(row, "updated_at")?,
	})
}

fn row_to_task_detail(row: &sqlx::sqlite::SqliteRow) -> Result<TaskDetail, DbError> {
	Ok(TaskDetail {
		task: row_to_task(row)?,
		project_name: row.get("project_name"),
		assignee_name: row.get("assignee_name"),
	})
}

#[async_trait]
impl TaskStore for TaskRepository {
	async fn create_task(&self, task: &Task) -> Result<(), DbError> {
		self.create_task(task).await
	}

	async fn get_task_by_id(&self, id: &TaskId) -> Result<Option<Task>, DbError> {
		self.get_task_by_id(id).await
	}

	async fn get_task_detail_by_id(&self, id: &TaskId) -> Result<Option<TaskDetail>, DbError> {
		self.get_task_detail_by_id(id).await
	}

	async fn update_task(&self, task: &Task) -> Result<(), DbError> {
		self.update_task(task).await
	}

	async fn delete_task(&self, id: &TaskId) -> Result<(), DbError> {
		self.delete_task(id).await
	}

	async fn list_tasks(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<TaskDetail>, DbError> {
		self.list_tasks(filter, project_id, limit, offset).await
	}

	async fn count_open_tasks(&self, filter: &RowFilter) -> Result<i64, DbError> {
		self.count_open_tasks(filter).await
	}

	async fn count_completed_tasks(&self, filter: &RowFilter) -> Result<i64, DbError> {
		self.count_completed_tasks(filter).await
	}
}
