// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access token repository.
//!
//! Rows hold SHA-256 digests only; the middleware hashes the presented
//! bearer token and looks the digest up here. Validity (expiry, revocation)
//! is judged in `drydock-server-auth`, not in SQL, so clock handling stays in
//! one place.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_server_auth::{AccessToken, TokenId, UserId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::user::parse_timestamp;

#[async_trait]
pub trait AccessTokenStore: Send + Sync {
	async fn create_token(&self, token: &AccessToken) -> Result<(), DbError>;
	async fn get_token_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, DbError>;
	async fn extend_token(&self, token: &AccessToken) -> Result<(), DbError>;
}

/// Repository for access token database operations.
#[derive(Clone)]
pub struct AccessTokenRepository {
	pool: SqlitePool,
}

impl AccessTokenRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Store a freshly issued token.
	#[tracing::instrument(skip(self, token), fields(token_id = %token.id, user_id = %token.user_id))]
	pub async fn create_token(&self, token: &AccessToken) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO access_tokens (
				id, user_id, token_hash, created_at, last_used_at, expires_at, revoked_at
			) VALUES (?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(token.id.to_string())
		.bind(token.user_id.to_string())
		.bind(&token.token_hash)
		.bind(token.created_at.to_rfc3339())
		.bind(token.last_used_at.map(|dt| dt.to_rfc3339()))
		.bind(token.expires_at.to_rfc3339())
		.bind(token.revoked_at.map(|dt| dt.to_rfc3339()))
		.execute(&self.pool)
		.await?;

		tracing::debug!(token_id = %token.id, "access token stored");
		Ok(())
	}

	/// Look up a token row by its SHA-256 digest.
	#[tracing::instrument(skip(self, token_hash))]
	pub async fn get_token_by_hash(
		&self,
		token_hash: &str,
	) -> Result<Option<AccessToken>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, user_id, token_hash, created_at, last_used_at, expires_at, revoked_at
			FROM access_tokens
			WHERE token_hash = ?
			"#,
		)
		.bind(token_hash)
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_token(&r)).transpose()
	}

	/// Persist a sliding-expiry extension produced by [`AccessToken::extend`].
	#[tracing::instrument(skip(self, token), fields(token_id = %token.id))]
	pub async fn extend_token(&self, token: &AccessToken) -> Result<(), DbError> {
		sqlx::query(
			r#"
			UPDATE access_tokens
			SET last_used_at = ?, expires_at = ?
			WHERE id = ?
			"#,
		)
		.bind(token.last_used_at.map(|dt| dt.to_rfc3339()))
		.bind(token.expires_at.to_rfc3339())
		.bind(token.id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(())
	}
}

fn row_to_token(row: &sqlx::sqlite::SqliteRow) -> Result<AccessToken, DbError> {
	let id_str: String = row.get("id");
	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid token ID: {e}")))?;

	let user_id_str: String = row.get("user_id");
	let user_id = Uuid::parse_str(&user_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	let created_at = parse_timestamp(row, "created_at")?;
	let expires_at = parse_timestamp(row, "expires_at")?;
	let last_used_at = parse_optional_timestamp(row, "last_used_at")?;
	let revoked_at = parse_optional_timestamp(row, "revoked_at")?;

	Ok(AccessToken {
		id: TokenId::new(id),
		user_id: UserId::new(user_id),
		token_hash: row.get("token_hash"),
		created_at,
		last_used_at,
		expires_at,
		revoked_at,
	})
}

pub(crate) fn parse_optional_timestamp(
	row: &sqlx::sqlite::SqliteRow,
	column: &str,
) -> Result<Option<DateTime<Utc>>, DbError> {
	let value: Option<String> = row.get(column);
	value
		.map(|s| {
			DateTime::parse_from_rfc3339(&s)
				.map(|dt| dt.with_timezone(&Utc))
				.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
		})
		.transpose()
}

#[async_trait]
impl AccessTokenStore for AccessTokenRepository {
	async fn create_token(&self, token: &AccessToken) -> Result<(), DbError> {
		self.create_token(token).await
	}

	async fn get_token_by_hash(&self, token_hash: &str) -> Result<Option<AccessToken>, DbError> {
		self.get_token_by_hash(token_hash).await
	}

	async fn extend_token(&self, token: &AccessToken) -> Result<(), DbError> {
		self.extend_token(token).await
	}
}
