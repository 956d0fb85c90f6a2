// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use drydock_server_db::BlueprintDetail;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::users::default_limit;

/// A blueprint in API responses, enriched with the uploader's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BlueprintResponse {
	pub id: Uuid,
	pub project_id: Uuid,
	pub file_name: String,
	pub original_name: String,
	pub file_size: i64,
	pub file_type: Option<String>,
	pub version: String,
	pub description: Option<String>,
	pub uploaded_by: Uuid,
	/// "[User deleted]" when the uploader row has vanished.
	pub uploader_name: String,
	pub uploaded_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<BlueprintDetail> for BlueprintResponse {
	fn from(detail: BlueprintDetail) -> Self {
		let blueprint = detail.blueprint;
		Self {
			id: blueprint.id.into_inner(),
			project_id: blueprint.project_id.into_inner(),
			file_name: blueprint.file_name,
			original_name: blueprint.original_name,
			file_size: blueprint.file_size,
			file_type: blueprint.file_type,
			version: blueprint.version,
			description: blueprint.description,
			uploaded_by: blueprint.uploaded_by.into_inner(),
			uploader_name: detail
				.uploader_name
				.unwrap_or_else(|| "[User deleted]".to_string()),
			uploaded_at: blueprint.uploaded_at,
			updated_at: blueprint.updated_at,
		}
	}
}

/// Request to update blueprint metadata.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateBlueprintRequest {
	pub description: Option<String>,
	pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct ListBlueprintsParams {
	pub project_id: Option<Uuid>,
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
}
