// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project repository for database operations.
//!
//! Projects carry vessel metadata, budget figures, and a creator. Team
//! membership is the `project_assignments` relation; the repository exposes
//! it both as display rows (for response enrichment) and as bare id sets (for
//! policy facts and assignment validation).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use drydock_server_auth::policy::RowFilter;
use drydock_server_auth::{AssignmentId, ProjectId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::compile;
use crate::user::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
	Planning,
	InProgress,
	OnHold,
	Completed,
	Cancelled,
}

impl ProjectStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			ProjectStatus::Planning => "planning",
			ProjectStatus::InProgress => "in_progress",
			ProjectStatus::OnHold => "on_hold",
			ProjectStatus::Completed => "completed",
			ProjectStatus::Cancelled => "cancelled",
		}
	}
}

impl std::str::FromStr for ProjectStatus {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"planning" => Ok(ProjectStatus::Planning),
			"in_progress" => Ok(ProjectStatus::InProgress),
			"on_hold" => Ok(ProjectStatus::OnHold),
			"completed" => Ok(ProjectStatus::Completed),
			"cancelled" => Ok(ProjectStatus::Cancelled),
			_ => Err(format!("unknown project status: {s}")),
		}
	}
}

/// A marine-retrofit project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub project_name: String,
	pub vessel_name: String,
	pub vessel_type: Option<String>,
	pub vessel_owner: Option<String>,
	pub start_date: Option<NaiveDate>,
	pub end_date: Option<NaiveDate>,
	pub status: ProjectStatus,
	pub budget: Option<f64>,
	/// Spend to date; `None` means spending is not tracked for this project.
	pub spending: Option<f64>,
	pub description: Option<String>,
	pub created_by: UserId,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

/// A project team member, joined with profile fields for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
	pub user_id: UserId,
	pub full_name: String,
	pub role: String,
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
	async fn create_project(&self, project: &Project) -> Result<(), DbError>;
	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError>;
	async fn update_project(&self, project: &Project) -> Result<(), DbError>;
	async fn delete_project(&self, id: &ProjectId) -> Result<(), DbError>;
	async fn list_projects(
		&self,
		filter: &RowFilter,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Project>, DbError>;
	async fn count_projects(&self, filter: &RowFilter) -> Result<i64, DbError>;
	async fn replace_team(&self, project_id: &ProjectId, user_ids: &[UserId])
		-> Result<(), DbError>;
	async fn team_members(&self, project_id: &ProjectId) -> Result<Vec<TeamMember>, DbError>;
	async fn member_ids(&self, project_id: &ProjectId) -> Result<Vec<UserId>, DbError>;
	async fn is_team_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError>;
}

/// Repository for project database operations.
#[derive(Clone)]
pub struct ProjectRepository {
	pool: SqlitePool,
}

impl ProjectRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO projects (
				id, project_name, vessel_name, vessel_type, vessel_owner,
				start_date, end_date, status, budget, spending,
				description, created_by, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(project.id.to_string())
		.bind(&project.project_name)
		.bind(&project.vessel_name)
		.bind(&project.vessel_type)
		.bind(&project.vessel_owner)
		.bind(project.start_date.map(|d| d.to_string()))
		.bind(project.end_date.map(|d| d.to_string()))
		.bind(project.status.as_str())
		.bind(project.budget)
		.bind(project.spending)
		.bind(&project.description)
		.bind(project.created_by.to_string())
		.bind(project.created_at.to_rfc3339())
		.bind(project.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(project_id = %project.id, "project created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, project_name, vessel_name, vessel_type, vessel_owner,
				   start_date, end_date, status, budget, spending,
				   description, created_by, created_at, updated_at
			FROM projects
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_project(&r)).transpose()
	}

	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE projects
			SET project_name = ?, vessel_name = ?, vessel_type = ?, vessel_owner = ?,
				start_date = ?, end_date = ?, status = ?, budget = ?, spending = ?,
				description = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&project.project_name)
		.bind(&project.vessel_name)
		.bind(&project.vessel_type)
		.bind(&project.vessel_owner)
		.bind(project.start_date.map(|d| d.to_string()))
		.bind(project.end_date.map(|d| d.to_string()))
		.bind(project.status.as_str())
		.bind(project.budget)
		.bind(project.spending)
		.bind(&project.description)
		.bind(now)
		.bind(project.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("project {}", project.id)));
		}

		tracing::debug!(project_id = %project.id, "project updated");
		Ok(())
	}

	/// Delete a project together with its assignments and tasks.
	///
	/// Tasks must not outlive their project, so the three deletes run in one
	/// transaction.
	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn delete_project(&self, id: &ProjectId) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("DELETE FROM tasks WHERE project_id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;

		sqlx::query("DELETE FROM project_assignments WHERE project_id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;

		let result = sqlx::query("DELETE FROM projects WHERE id = ?")
			.bind(id.to_string())
			.execute(&mut *tx)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("project {id}")));
		}

		tx.commit().await?;
		tracing::debug!(project_id = %id, "project deleted");
		Ok(())
	}

	/// List projects visible under `filter`, newest first.
	#[tracing::instrument(skip(self, filter))]
	pub async fn list_projects(
		&self,
		filter: &RowFilter,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Project>, DbError> {
		let compiled = compile(filter);
		let sql = format!(
			r#"
			SELECT id, project_name, vessel_name, vessel_type, vessel_owner,
				   start_date, end_date, status, budget, spending,
				   description, created_by, created_at, updated_at
			FROM projects
			WHERE {}
			ORDER BY created_at DESC
			LIMIT ? OFFSET ?
			"#,
			compiled.clause()
		);

		let mut query = sqlx::query(&sql);
		for bind in compiled.binds() {
			query = query.bind(bind);
		}
		let rows = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;

		rows.iter().map(row_to_project).collect()
	}

	/// Count projects visible under `filter`.
	///
	/// Shares the compiled predicate with [`Self::list_projects`] so dashboard
	/// counts always agree with listings.
	#[tracing::instrument(skip(self, filter))]
	pub async fn count_projects(&self, filter: &RowFilter) -> Result<i64, DbError> {
		let compiled = compile(filter);
		let sql = format!(
			"SELECT COUNT(*) AS count FROM projects WHERE {}",
			compiled.clause()
		);

		let mut query = sqlx::query(&sql);
		for bind in compiled.binds() {
			query = query.bind(bind);
		}
		let row = query.fetch_one(&self.pool).await?;

		Ok(row.get("count"))
	}

	/// Replace the project's team wholesale.
	///
	/// Existing assignment rows are dropped and the new set inserted in one
	/// transaction. Duplicate ids in `user_ids` collapse to one row.
	#[tracing::instrument(skip(self, user_ids), fields(project_id = %project_id, members = user_ids.len()))]
	pub async fn replace_team(
		&self,
		project_id: &ProjectId,
		user_ids: &[UserId],
	) -> Result<(), DbError> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("DELETE FROM project_assignments WHERE project_id = ?")
			.bind(project_id.to_string())
			.execute(&mut *tx)
			.await?;

		let now = Utc::now().to_rfc3339();
		for user_id in user_ids {
			sqlx::query(
				r#"
				INSERT OR IGNORE INTO project_assignments (id, project_id, user_id, assigned_at)
				VALUES (?, ?, ?, ?)
				"#,
			)
			.bind(AssignmentId::generate().to_string())
			.bind(project_id.to_string())
			.bind(user_id.to_string())
			.bind(&now)
			.execute(&mut *tx)
			.await?;
		}

		tx.commit().await?;
		tracing::debug!(project_id = %project_id, "project team replaced");
		Ok(())
	}

	/// Team members with display fields, in assignment order.
	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn team_members(&self, project_id: &ProjectId) -> Result<Vec<TeamMember>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT u.id AS user_id, u.full_name, u.role
			FROM project_assignments pa
			JOIN users u ON u.id = pa.user_id
			WHERE pa.project_id = ?
			ORDER BY pa.assigned_at
			"#,
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter()
			.map(|row| {
				let user_id_str: String = row.get("user_id");
				let user_id = Uuid::parse_str(&user_id_str)
					.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;
				Ok(TeamMember {
					user_id: UserId::new(user_id),
					full_name: row.get("full_name"),
					role: row.get("role"),
				})
			})
			.collect()
	}

	/// Bare member ids for policy facts and assignment validation.
	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn member_ids(&self, project_id: &ProjectId) -> Result<Vec<UserId>, DbError> {
		let rows = sqlx::query(
			"SELECT user_id FROM project_assignments WHERE project_id = ?",
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter()
			.map(|row| {
				let user_id_str: String = row.get("user_id");
				Uuid::parse_str(&user_id_str)
					.map(UserId::new)
					.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))
			})
			.collect()
	}

	/// One atomic membership fact for a (project, user) pair.
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn is_team_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		let row = sqlx::query(
			r#"
			SELECT COUNT(*) AS count
			FROM project_assignments
			WHERE project_id = ? AND user_id = ?
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_one(&self.pool)
		.await?;

		let count: i64 = row.get("count");
		Ok(count > 0)
	}
}

fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid project ID: {e}")))?;

	let created_by_str: String = row.get("created_by");
	let created_by = Uuid::parse_str(&created_by_str)
		.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	let status_str: String = row.get("status");
	let status = status_str.parse().map_err(DbError::Internal)?;

	let created_at = parse_timestamp(row, "created_at")?;
	let updated_at = parse_timestamp(row, "updated_at")?;

	Ok(Project {
		id: ProjectId::new(id),
		project_name: row.get("project_name"),
		vessel_name: row.get("vessel_name"),
		vessel_type: row.get("vessel_type"),
		vessel_owner: row.get("vessel_owner"),
		start_date: parse_optional_date(row, "start_date")?,
		end_date: parse_optional_date(row, "end_date")?,
		status,
		budget: row.get("budget"),
		spending: row.get("spending"),
		description: row.get("description"),
		created_by: UserId::new(created_by),
		created_at,
		updated_at,
	})
}

pub(crate) fn parse_optional_date(
	row: &sqlx::sqlite::SqliteRow,
	column: &str,
) -> Result<Option<NaiveDate>, DbError> {
	let value: Option<String> = row.get(column);
	value
		.map(|s| {
			s.parse::<NaiveDate>()
				.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
		})
		.transpose()
}

#[async_trait]
impl ProjectStore for ProjectRepository {
	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.create_project(project).await
	}

	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.get_project_by_id(id).await
	}

	async fn update_project(&self, project: &Project) -> Result<(), DbError> {
		self.update_project(project).await
	}

	async fn delete_project(&self, id: &ProjectId) -> Result<(), DbError> {
		self.delete_project(id).await
	}

	async fn list_projects(
		&self,
		filter: &RowFilter,
		limit: i64,
		offset: i64,
	) -> Result<Vec<Project>, DbError> {
		self.list_projects(filter, limit, offset).await
	}

	async fn count_projects(&self, filter: &RowFilter) -> Result<i64, DbError> {
		self.count_projects(filter).await
	}

	async fn replace_team(
		&self,
		project_id: &ProjectId,
		user_ids: &[UserId],
	) -> Result<(), DbError> {
		self.replace_team(project_id, user_ids).await
	}

	async fn team_members(&self, project_id: &ProjectId) -> Result<Vec<TeamMember>, DbError> {
		self.team_members(project_id).await
	}

	async fn member_ids(&self, project_id: &ProjectId) -> Result<Vec<UserId>, DbError> {
		self.member_ids(project_id).await
	}

	async fn is_team_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		self.is_team_member(project_id, user_id).await
	}
}
