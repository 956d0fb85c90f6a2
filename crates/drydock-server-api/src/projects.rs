// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, NaiveDate, Utc};
use drydock_server_db::{Project, ProjectStatus, TeamMember};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::users::default_limit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatusApi {
	Planning,
	InProgress,
	OnHold,
	Completed,
	Cancelled,
}

impl From<ProjectStatus> for ProjectStatusApi {
	fn from(status: ProjectStatus) -> Self {
		match status {
			ProjectStatus::Planning => ProjectStatusApi::Planning,
			ProjectStatus::InProgress => ProjectStatusApi::InProgress,
			ProjectStatus::OnHold => ProjectStatusApi::OnHold,
			ProjectStatus::Completed => ProjectStatusApi::Completed,
			ProjectStatus::Cancelled => ProjectStatusApi::Cancelled,
		}
	}
}

impl From<ProjectStatusApi> for ProjectStatus {
	fn from(status: ProjectStatusApi) -> Self {
		match status {
			ProjectStatusApi::Planning => ProjectStatus::Planning,
			ProjectStatusApi::InProgress => ProjectStatus::InProgress,
			ProjectStatusApi::OnHold => ProjectStatus::OnHold,
			ProjectStatusApi::Completed => ProjectStatus::Completed,
			ProjectStatusApi::Cancelled => ProjectStatus::Cancelled,
		}
	}
}

/// A project team member in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TeamMemberResponse {
	pub user_id: Uuid,
	pub full_name: String,
	pub role: String,
}

impl From<TeamMember> for TeamMemberResponse {
	fn from(member: TeamMember) -> Self {
		Self {
			user_id: member.user_id.into_inner(),
			full_name: member.full_name,
			role: member.role,
		}
	}
}

/// A project in API responses, enriched with owner and team display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProjectResponse {
	pub id: Uuid,
	pub project_name: String,
	pub vessel_name: String,
	pub vessel_type: Option<String>,
	pub vessel_owner: Option<String>,
	pub start_date: Option<NaiveDate>,
	pub end_date: Option<NaiveDate>,
	pub status: ProjectStatusApi,
	pub budget: Option<f64>,
	pub spending: Option<f64>,
	pub description: Option<String>,
	pub created_by: Uuid,
	pub owner_name: Option<String>,
	pub assigned_user_ids: Vec<Uuid>,
	pub team_members: Vec<TeamMemberResponse>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
	/// Assemble the enriched response from a project row and its team.
	///
	/// `assigned_user_ids` is derived from the team rows so the two fields
	/// can never disagree.
	pub fn from_parts(
		project: &Project,
		owner_name: Option<String>,
		team: Vec<TeamMember>,
	) -> Self {
		let assigned_user_ids = team.iter().map(|m| m.user_id.into_inner()).collect();
		Self {
			id: project.id.into_inner(),
			project_name: project.project_name.clone(),
			vessel_name: project.vessel_name.clone(),
			vessel_type: project.vessel_type.clone(),
			vessel_owner: project.vessel_owner.clone(),
			start_date: project.start_date,
			end_date: project.end_date,
			status: project.status.into(),
			budget: project.budget,
			spending: project.spending,
			description: project.description.clone(),
			created_by: project.created_by.into_inner(),
			owner_name,
			assigned_user_ids,
			team_members: team.into_iter().map(Into::into).collect(),
			created_at: project.created_at,
			updated_at: project.updated_at,
		}
	}
}

/// Request to create a project.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateProjectRequest {
	pub project_name: String,
	pub vessel_name: String,
	pub vessel_type: Option<String>,
	pub vessel_owner: Option<String>,
	pub start_date: Option<NaiveDate>,
	pub end_date: Option<NaiveDate>,
	/// Omitted status defaults to planning.
	pub status: Option<ProjectStatusApi>,
	pub budget: Option<f64>,
	pub spending: Option<f64>,
	pub description: Option<String>,
	/// When present, these users become the initial team.
	pub assigned_user_ids: Option<Vec<Uuid>>,
}

/// Request to update a project. Absent fields keep their stored value;
/// a present `assigned_user_ids` replaces the team wholesale.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateProjectRequest {
	pub project_name: Option<String>,
	pub vessel_name: Option<String>,
	pub vessel_type: Option<String>,
	pub vessel_owner: Option<String>,
	pub start_date: Option<NaiveDate>,
	pub end_date: Option<NaiveDate>,
	pub status: Option<ProjectStatusApi>,
	pub budget: Option<f64>,
	pub spending: Option<f64>,
	pub description: Option<String>,
	pub assigned_user_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct ListProjectsParams {
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
}
