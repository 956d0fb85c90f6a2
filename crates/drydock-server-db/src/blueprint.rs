// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blueprint repository for database operations.
//!
//! Blueprints are uploaded drawings attached to a project. Deletion is soft:
//! rows flip `is_active` to 0 and every read in this module excludes them, so
//! a soft-deleted blueprint is indistinguishable from a missing one. The
//! stored file is immutable once uploaded; only version and description can
//! change afterwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_server_auth::policy::RowFilter;
use drydock_server_auth::{BlueprintId, ProjectId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::filter::compile;
use crate::user::parse_timestamp;

/// An uploaded blueprint file attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
	pub id: BlueprintId,
	pub project_id: ProjectId,
	/// Name of the file as stored on disk, unique per upload.
	pub file_name: String,
	/// Name of the file as the uploader submitted it.
	pub original_name: String,
	pub file_path: String,
	pub file_size: i64,
	pub file_type: Option<String>,
	pub version: String,
	pub description: Option<String>,
	pub uploaded_by: UserId,
	pub uploaded_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	pub is_active: bool,
}

/// A blueprint joined with its uploader's display name.
#[derive(Debug, Clone)]
pub struct BlueprintDetail {
	pub blueprint: Blueprint,
	pub uploader_name: Option<String>,
}

#[async_trait]
pub trait BlueprintStore: Send + Sync {
	async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError>;
	async fn get_blueprint_by_id(&self, id: &BlueprintId) -> Result<Option<Blueprint>, DbError>;
	async fn get_blueprint_detail_by_id(
		&self,
		id: &BlueprintId,
	) -> Result<Option<BlueprintDetail>, DbError>;
	async fn update_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError>;
	async fn soft_delete_blueprint(&self, id: &BlueprintId) -> Result<(), DbError>;
	async fn list_blueprints(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<BlueprintDetail>, DbError>;
}

/// Repository for blueprint database operations.
#[derive(Clone)]
pub struct BlueprintRepository {
	pool: SqlitePool,
}

impl BlueprintRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, blueprint), fields(blueprint_id = %blueprint.id, project_id = %blueprint.project_id))]
	pub async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO blueprints (
				id, project_id, file_name, original_name, file_path,
				file_size, file_type, version, description, uploaded_by,
				uploaded_at, updated_at, is_active
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(blueprint.id.to_string())
		.bind(blueprint.project_id.to_string())
		.bind(&blueprint.file_name)
		.bind(&blueprint.original_name)
		.bind(&blueprint.file_path)
		.bind(blueprint.file_size)
		.bind(&blueprint.file_type)
		.bind(&blueprint.version)
		.bind(&blueprint.description)
		.bind(blueprint.uploaded_by.to_string())
		.bind(blueprint.uploaded_at.to_rfc3339())
		.bind(blueprint.updated_at.to_rfc3339())
		.bind(blueprint.is_active)
		.execute(&self.pool)
		.await?;

		tracing::debug!(blueprint_id = %blueprint.id, "blueprint created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(blueprint_id = %id))]
	pub async fn get_blueprint_by_id(
		&self,
		id: &BlueprintId,
	) -> Result<Option<Blueprint>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, project_id, file_name, original_name, file_path,
				   file_size, file_type, version, description, uploaded_by,
				   uploaded_at, updated_at, is_active
			FROM blueprints
			WHERE id = ? AND is_active = 1
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_blueprint(&r)).transpose()
	}

	#[tracing::instrument(skip(self), fields(blueprint_id = %id))]
	pub async fn get_blueprint_detail_by_id(
		&self,
		id: &BlueprintId,
	) -> Result<Option<BlueprintDetail>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT blueprints.id, blueprints.project_id, blueprints.file_name,
				   blueprints.original_name, blueprints.file_path, blueprints.file_size,
				   blueprints.file_type, blueprints.version, blueprints.description,
				   blueprints.uploaded_by, blueprints.uploaded_at, blueprints.updated_at,
				   blueprints.is_active, users.full_name AS uploader_name
			FROM blueprints
			LEFT JOIN users ON users.id = blueprints.uploaded_by
			WHERE blueprints.id = ? AND blueprints.is_active = 1
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_blueprint_detail(&r)).transpose()
	}

	/// Update the mutable metadata of a blueprint.
	///
	/// The stored file never changes after upload, so only version and
	/// description are written back.
	#[tracing::instrument(skip(self, blueprint), fields(blueprint_id = %blueprint.id))]
	pub async fn update_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE blueprints
			SET version = ?, description = ?, updated_at = ?
			WHERE id = ? AND is_active = 1
			"#,
		)
		.bind(&blueprint.version)
		.bind(&blueprint.description)
		.bind(now)
		.bind(blueprint.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("blueprint {}", blueprint.id)));
		}

		tracing::debug!(blueprint_id = %blueprint.id, "blueprint updated");
		Ok(())
	}

	/// Mark a blueprint inactive. The file on disk is left in place.
	#[tracing::instrument(skip(self), fields(blueprint_id = %id))]
	pub async fn soft_delete_blueprint(&self, id: &BlueprintId) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE blueprints
			SET is_active = 0, updated_at = ?
			WHERE id = ? AND is_active = 1
			"#,
		)
		.bind(now)
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("blueprint {id}")));
		}

		tracing::debug!(blueprint_id = %id, "blueprint soft deleted");
		Ok(())
	}

	/// List active blueprints visible under `filter`, optionally scoped to
	/// one project, newest upload first.
	#[tracing::instrument(skip(self, filter, project_id))]
	pub async fn list_blueprints(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<BlueprintDetail>, DbError> {
		let compiled = compile(filter);
		let project_clause = if project_id.is_some() {
			" AND blueprints.project_id = ?"
		} else {
			""
		};
		let sql = format!(
			r#"
			SELECT blueprints.id, blueprints.project_id, blueprints.file_name,
				   blueprints.original_name, blueprints.file_path, blueprints.file_size,
				   blueprints.file_type, blueprints.version, blueprints.description,
				   blueprints.uploaded_by, blueprints.uploaded_at, blueprints.updated_at,
				   blueprints.is_active, users.full_name AS uploader_name
			FROM blueprints
			LEFT JOIN users ON users.id = blueprints.uploaded_by
			WHERE {} AND blueprints.is_active = 1{}
			ORDER BY blueprints.uploaded_at DESC
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

		rows.iter().map(row_to_blueprint_detail).collect()
	}
}

fn row_to_blueprint(row: &sqlx::sqlite::SqliteRow) -> Result<Blueprint, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid blueprint ID: {e}")))?;

	let project_id_str: String = row.get("project_id");
	let project_id = Uuid::parse_str(&project_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid project ID: {e}")))?;

	let uploaded_by_str: String = row.get("uploaded_by");
	let uploaded_by = Uuid::parse_str(&uploaded_by_str)
		.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	Ok(Blueprint {
		id: BlueprintId::new(id),
		project_id: ProjectId::new(project_id),
		file_name: row.get("file_name"),
		original_name: row.get("original_name"),
		file_path: row.get("file_path"),
		file_size: row.get("file_size"),
		file_type: row.get("file_type"),
		version: row.get("version"),
		description: row.get("description"),
		uploaded_by: UserId::new(uploaded_by),
		uploaded_at: parse_timestamp(row, "uploaded_at")?,
		updated_at: parse_timestamp(row, "updated_at")?,
		is_active: row.get("is_active"),
	})
}

fn row_to_blueprint_detail(row: &sqlx::sqlite::SqliteRow) -> Result<BlueprintDetail, DbError> {
	Ok(BlueprintDetail {
		blueprint: row_to_blueprint(row)?,
		uploader_name: row.get("uploader_name"),
	})
}

#[async_trait]
impl BlueprintStore for BlueprintRepository {
	async fn create_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError> {
		self.create_blueprint(blueprint).await
	}

	async fn get_blueprint_by_id(&self, id: &BlueprintId) -> Result<Option<Blueprint>, DbError> {
		self.get_blueprint_by_id(id).await
	}

	async fn get_blueprint_detail_by_id(
		&self,
		id: &BlueprintId,
	) -> Result<Option<BlueprintDetail>, DbError> {
		self.get_blueprint_detail_by_id(id).await
	}

	async fn update_blueprint(&self, blueprint: &Blueprint) -> Result<(), DbError> {
		self.update_blueprint(blueprint).await
	}

	async fn soft_delete_blueprint(&self, id: &BlueprintId) -> Result<(), DbError> {
		self.soft_delete_blueprint(id).await
	}

	async fn list_blueprints(
		&self,
		filter: &RowFilter,
		project_id: Option<&ProjectId>,
		limit: i64,
		offset: i64,
	) -> Result<Vec<BlueprintDetail>, DbError> {
		self.list_blueprints(filter, project_id, limit, offset).await
	}
}
