// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use drydock_server_db::{Theme, UserSettings};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ThemeApi {
	Light,
	Dark,
	Auto,
}

impl From<Theme> for ThemeApi {
	fn from(theme: Theme) -> Self {
		match theme {
			Theme::Light => ThemeApi::Light,
			Theme::Dark => ThemeApi::Dark,
			Theme::Auto => ThemeApi::Auto,
		}
	}
}

impl From<ThemeApi> for Theme {
	fn from(theme: ThemeApi) -> Self {
		match theme {
			ThemeApi::Light => Theme::Light,
			ThemeApi::Dark => Theme::Dark,
			ThemeApi::Auto => Theme::Auto,
		}
	}
}

/// A user's interface preferences in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SettingsResponse {
	pub id: Uuid,
	pub user_id: Uuid,
	pub theme: ThemeApi,
	pub language: String,
	pub timezone: String,
	pub date_format: String,
	pub notifications_enabled: bool,
	pub email_notifications: bool,
	pub dashboard_layout: Option<String>,
	pub items_per_page: i64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<UserSettings> for SettingsResponse {
	fn from(settings: UserSettings) -> Self {
		Self {
			id: settings.id.into_inner(),
			user_id: settings.user_id.into_inner(),
			theme: settings.theme.into(),
			language: settings.language,
			timezone: settings.timezone,
			date_format: settings.date_format,
			notifications_enabled: settings.notifications_enabled,
			email_notifications: settings.email_notifications,
			dashboard_layout: settings.dashboard_layout,
			items_per_page: settings.items_per_page,
			created_at: settings.created_at,
			updated_at: settings.updated_at,
		}
	}
}

/// Request to update settings. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateSettingsRequest {
	pub theme: Option<ThemeApi>,
	pub language: Option<String>,
	pub timezone: Option<String>,
	pub date_format: Option<String>,
	pub notifications_enabled: Option<bool>,
	pub email_notifications: Option<bool>,
	pub dashboard_layout: Option<String>,
	pub items_per_page: Option<i64>,
}
