// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Task assignment integrity checks.
//!
//! A task may only be assigned to a user who is on the team of the task's
//! project. The check itself is pure: callers look up the proposed assignee,
//! the target project and its team, bundle them into [`AssignmentFacts`], and
//! ask [`validate_assignment`] for a verdict.
//!
//! The same check runs on task creation and on task update, against the
//! destination project when the task is being moved. Team removals are
//! deliberately not re-validated: pulling a user off a team leaves their
//! existing tasks assigned, so task history survives roster churn.
//!
//! Checks run in a fixed order so the error surface is stable: assignee
//! existence, then project existence, then team membership.

use std::collections::HashSet;

use crate::types::{ProjectId, UserId};

// ============================================================================
// Errors
// ============================================================================

/// Why a proposed assignment was rejected.
///
/// Messages are part of the API surface and are returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
	/// The proposed assignee does not exist.
	#[error("User with ID {0} not found")]
	UserNotFound(UserId),

	/// The target project does not exist.
	#[error("Project with ID {0} not found")]
	ProjectNotFound(ProjectId),

	/// The proposed assignee exists but is not on the project's team.
	#[error("User '{user_name}' is not assigned to project '{project_name}'. Only team members of this project can be assigned tasks.")]
	NotTeamMember {
		user_name: String,
		project_name: String,
	},
}

impl AssignmentError {
	/// HTTP status code for this rejection.
	pub fn status_code(&self) -> u16 {
		match self {
			AssignmentError::UserNotFound(_) | AssignmentError::ProjectNotFound(_) => 404,
			AssignmentError::NotTeamMember { .. } => 400,
		}
	}
}

// ============================================================================
// Facts
// ============================================================================

/// Rows the caller looked up before asking for a verdict.
///
/// `None` means the row was looked up and did not exist. Names are carried
/// along so rejection messages can quote them without a second query.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFacts {
	/// The target project's id and name, if the row exists.
	pub project: Option<(ProjectId, String)>,
	/// The proposed assignee's id and full name, if the row exists.
	pub assignee: Option<(UserId, String)>,
	/// Ids of every user on the target project's team.
	pub team_member_ids: HashSet<UserId>,
}

impl AssignmentFacts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_project(mut self, id: ProjectId, name: impl Into<String>) -> Self {
		self.project = Some((id, name.into()));
		self
	}

	pub fn with_assignee(mut self, id: UserId, full_name: impl Into<String>) -> Self {
		self.assignee = Some((id, full_name.into()));
		self
	}

	pub fn with_team_member(mut self, id: UserId) -> Self {
		self.team_member_ids.insert(id);
		self
	}
}

// ============================================================================
// Validation
// ============================================================================

/// Validates a proposed task assignment against the gathered facts.
///
/// An unassigned task (`proposed_assignee` of `None`) is always valid; the
/// project itself is not checked in that case, matching task creation into a
/// project the caller has already been authorized against.
pub fn validate_assignment(
	project_id: ProjectId,
	proposed_assignee: Option<UserId>,
	facts: &AssignmentFacts,
) -> Result<(), AssignmentError> {
	let Some(assignee_id) = proposed_assignee else {
		return Ok(());
	};

	let user_name = match &facts.assignee {
		Some((id, name)) if *id == assignee_id => name,
		_ => return Err(AssignmentError::UserNotFound(assignee_id)),
	};

	let project_name = match &facts.project {
		Some((id, name)) if *id == project_id => name,
		_ => return Err(AssignmentError::ProjectNotFound(project_id)),
	};

	if !facts.team_member_ids.contains(&assignee_id) {
		return Err(AssignmentError::NotTeamMember {
			user_name: user_name.clone(),
			project_name: project_name.clone(),
		});
	}

	Ok(())
}
