// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User settings repository for database operations.
//!
//! Each user owns at most one settings row, keyed by a UNIQUE `user_id`.
//! Callers materialize defaults on first read and reset by deleting the row
//! and recreating it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_server_auth::{SettingId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::user::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
	Light,
	Dark,
	Auto,
}

impl Theme {
	pub fn as_str(&self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
			Theme::Auto => "auto",
		}
	}
}

impl std::str::FromStr for Theme {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"light" => Ok(Theme::Light),
			"dark" => Ok(Theme::Dark),
			"auto" => Ok(Theme::Auto),
			_ => Err(format!("unknown theme: {s}")),
		}
	}
}

/// Per-user interface preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
	pub id: SettingId,
	pub user_id: UserId,
	pub theme: Theme,
	pub language: String,
	pub timezone: String,
	pub date_format: String,
	pub notifications_enabled: bool,
	pub email_notifications: bool,
	/// Opaque layout blob owned by the client; the server stores it as-is.
	pub dashboard_layout: Option<String>,
	pub items_per_page: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl UserSettings {
	/// The settings a user has before ever saving any.
	pub fn defaults_for(user_id: UserId) -> Self {
		let now = Utc::now();
		Self {
			id: SettingId::generate(),
			user_id,
			theme: Theme::Light,
			language: "en".to_string(),
			timezone: "UTC".to_string(),
			date_format: "YYYY-MM-DD".to_string(),
			notifications_enabled: true,
			email_notifications: true,
			dashboard_layout: None,
			items_per_page: 10,
			created_at: now,
			updated_at: now,
		}
	}
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
	async fn create_settings(&self, settings: &UserSettings) -> Result<(), DbError>;
	async fn get_settings_by_user(&self, user_id: &UserId)
		-> Result<Option<UserSettings>, DbError>;
	async fn update_settings(&self, settings: &UserSettings) -> Result<(), DbError>;
	async fn delete_settings_by_user(&self, user_id: &UserId) -> Result<(), DbError>;
}

/// Repository for user settings database operations.
#[derive(Clone)]
pub struct SettingsRepository {
	pool: SqlitePool,
}

impl SettingsRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, settings), fields(setting_id = %settings.id, user_id = %settings.user_id))]
	pub async fn create_settings(&self, settings: &UserSettings) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO user_settings (
				id, user_id, theme, language, timezone, date_format,
				notifications_enabled, email_notifications, dashboard_layout,
				items_per_page, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(settings.id.to_string())
		.bind(settings.user_id.to_string())
		.bind(settings.theme.as_str())
		.bind(&settings.language)
		.bind(&settings.timezone)
		.bind(&settings.date_format)
		.bind(settings.notifications_enabled)
		.bind(settings.email_notifications)
		.bind(&settings.dashboard_layout)
		.bind(settings.items_per_page)
		.bind(settings.created_at.to_rfc3339())
		.bind(settings.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(user_id = %settings.user_id, "user settings created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn get_settings_by_user(
		&self,
		user_id: &UserId,
	) -> Result<Option<UserSettings>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, user_id, theme, language, timezone, date_format,
				   notifications_enabled, email_notifications, dashboard_layout,
				   items_per_page, created_at, updated_at
			FROM user_settings
			WHERE user_id = ?
			"#,
		)
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_settings(&r)).transpose()
	}

	#[tracing::instrument(skip(self, settings), fields(setting_id = %settings.id))]
	pub async fn update_settings(&self, settings: &UserSettings) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE user_settings
			SET theme = ?, language = ?, timezone = ?, date_format = ?,
				notifications_enabled = ?, email_notifications = ?,
				dashboard_layout = ?, items_per_page = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(settings.theme.as_str())
		.bind(&settings.language)
		.bind(&settings.timezone)
		.bind(&settings.date_format)
		.bind(settings.notifications_enabled)
		.bind(settings.email_notifications)
		.bind(&settings.dashboard_layout)
		.bind(settings.items_per_page)
		.bind(now)
		.bind(settings.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("settings {}", settings.id)));
		}

		tracing::debug!(user_id = %settings.user_id, "user settings updated");
		Ok(())
	}

	/// Drop the user's settings row. Missing rows are fine; the next read
	/// materializes defaults anyway.
	#[tracing::instrument(skip(self), fields(user_id = %user_id))]
	pub async fn delete_settings_by_user(&self, user_id: &UserId) -> Result<(), DbError> {
		sqlx::query("DELETE FROM user_settings WHERE user_id = ?")
			.bind(user_id.to_string())
			.execute(&self.pool)
			.await?;

		tracing::debug!(user_id = %user_id, "user settings deleted");
		Ok(())
	}
}

fn row_to_settings(row: &sqlx::sqlite::SqliteRow) -> Result<UserSettings, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid setting ID: {e}")))?;

	let user_id_str: String = row.get("user_id");
	let user_id = Uuid::parse_str(&user_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;

	let theme_str: String = row.get("theme");
	let theme = theme_str.parse().map_err(DbError::Internal)?;

	Ok(UserSettings {
		id: SettingId::new(id),
		user_id: UserId::new(user_id),
		theme,
		language: row.get("language"),
		timezone: row.get("timezone"),
		date_format: row.get("date_format"),
		notifications_enabled: row.get("notifications_enabled"),
		email_notifications: row.get("email_notifications"),
		dashboard_layout: row.get("dashboard_layout"),
		items_per_page: row.get("items_per_page"),
		created_at: parse_timestamp(row, "created_at")?,
		updated_at: parse_timestamp(row, "updated_at")?,
	})
}

#[async_trait]
impl SettingsStore for SettingsRepository {
	async fn create_settings(&self, settings: &UserSettings) -> Result<(), DbError> {
		self.create_settings(settings).await
	}

	async fn get_settings_by_user(
		&self,
		user_id: &UserId,
	) -> Result<Option<UserSettings>, DbError> {
		self.get_settings_by_user(user_id).await
	}

	async fn update_settings(&self, settings: &UserSettings) -> Result<(), DbError> {
		self.update_settings(settings).await
	}

	async fn delete_settings_by_user(&self, user_id: &UserId) -> Result<(), DbError> {
		self.delete_settings_by_user(user_id).await
	}
}
