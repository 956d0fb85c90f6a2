// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.
//!
//! Stores credential and profile rows for every account. The `role` column is
//! raw text here; parsing into the closed role enum happens at identity
//! resolution, never in this layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_server_auth::{User, UserId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create_user(&self, user: &User) -> Result<(), DbError>;
	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError>;
	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError>;
	async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError>;
	async fn update_user(&self, user: &User) -> Result<(), DbError>;
	async fn list_users(
		&self,
		limit: i64,
		offset: i64,
		is_active: Option<bool>,
	) -> Result<Vec<User>, DbError>;
}

/// Repository for user database operations.
///
/// All user IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	/// Create a new repository with the given connection pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new user in the database.
	///
	/// # Errors
	/// Returns `DbError::Sqlx` if the insert fails (e.g., duplicate username
	/// or email, both UNIQUE at the DB level).
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn create_user(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO users (
				id, username, email, password_hash, full_name,
				role, phone, is_active, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.full_name)
		.bind(&user.role)
		.bind(&user.phone)
		.bind(user.is_active as i32)
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(())
	}

	/// Get a user by their unique ID.
	#[tracing::instrument(skip(self), fields(user_id = %id))]
	pub async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, full_name,
				   role, phone, is_active, created_at, updated_at
			FROM users
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Get a user by their username (exact match).
	#[tracing::instrument(skip(self))]
	pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, full_name,
				   role, phone, is_active, created_at, updated_at
			FROM users
			WHERE username = ?
			"#,
		)
		.bind(username)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Get a user by their email address.
	#[tracing::instrument(skip(self, email))]
	pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, username, email, password_hash, full_name,
				   role, phone, is_active, created_at, updated_at
			FROM users
			WHERE email = ?
			"#,
		)
		.bind(email)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Persist every mutable field of the user row.
	///
	/// `updated_at` is stamped here; callers mutate the struct and hand it over.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_user(&self, user: &User) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE users
			SET username = ?, email = ?, password_hash = ?, full_name = ?,
				role = ?, phone = ?, is_active = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.full_name)
		.bind(&user.role)
		.bind(&user.phone)
		.bind(user.is_active as i32)
		.bind(now)
		.bind(user.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("user {}", user.id)));
		}

		tracing::debug!(user_id = %user.id, "user updated");
		Ok(())
	}

	/// List users, newest first, optionally restricted by active flag.
	#[tracing::instrument(skip(self))]
	pub async fn list_users(
		&self,
		limit: i64,
		offset: i64,
		is_active: Option<bool>,
	) -> Result<Vec<User>, DbError> {
		let rows = match is_active {
			Some(active) => {
				sqlx::query(
					r#"
					SELECT id, username, email, password_hash, full_name,
						   role, phone, is_active, created_at, updated_at
					FROM users
					WHERE is_active = ?
					ORDER BY created_at DESC
					LIMIT ? OFFSET ?
					"#,
				)
				.bind(active as i32)
				.bind(limit)
				.bind(offset)
				.fetch_all(&self.pool)
				.await?
			}
			None => {
				sqlx::query(
					r#"
					SELECT id, username, email, password_hash, full_name,
						   role, phone, is_active, created_at, updated_at
					FROM users
					WHERE 1 = 1
					ORDER BY created_at DESC
					LIMIT ? OFFSET ?
					"#,
				)
				.bind(limit)
				.bind(offset)
				.fetch_all(&self.pool)
				.await?
			}
		};

		rows.iter().map(row_to_user).collect()
	}
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id_str: String = row.get("id");
	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	let created_at = parse_timestamp(row, "created_at")?;
	let updated_at = parse_timestamp(row, "updated_at")?;

	let is_active: i32 = row.get("is_active");

	Ok(User {
		id: UserId::new(id),
		username: row.get("username"),
		email: row.get("email"),
		password_hash: row.get("password_hash"),
		full_name: row.get("full_name"),
		role: row.get("role"),
		phone: row.get("phone"),
		is_active: is_active != 0,
		created_at,
		updated_at,
	})
}

pub(crate) fn parse_timestamp(
	row: &sqlx::sqlite::SqliteRow,
	column: &str,
) -> Result<DateTime<Utc>, DbError> {
	let value: String = row.get(column);
	DateTime::parse_from_rfc3339(&value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create_user(&self, user: &User) -> Result<(), DbError> {
		self.create_user(user).await
	}

	async fn get_user_by_id(&self, id: &UserId) -> Result<Option<User>, DbError> {
		self.get_user_by_id(id).await
	}

	async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_username(username).await
	}

	async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
		self.get_user_by_email(email).await
	}

	async fn update_user(&self, user: &User) -> Result<(), DbError> {
		self.update_user(user).await
	}

	async fn list_users(
		&self,
		limit: i64,
		offset: i64,
		is_active: Option<bool>,
	) -> Result<Vec<User>, DbError> {
		self.list_users(limit, offset, is_active).await
	}
}
