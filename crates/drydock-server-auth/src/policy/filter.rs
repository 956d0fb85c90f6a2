// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Row-visibility filters.
//!
//! A [`RowFilter`] is the abstract condition a list decision carries: one
//! deterministic predicate per (principal, resource) pair, compiled by the
//! storage layer into its own query mechanism. Lists and aggregate counts
//! compile the same filter, which is what keeps them consistent with each
//! other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::UserId;

/// A visibility predicate over resource rows, parameterized by principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "user_id")]
pub enum RowFilter {
	/// Every row is visible.
	All,
	/// No row is visible.
	Nothing,
	/// Projects created by the given user.
	ProjectCreatedBy(UserId),
	/// Projects whose team includes the given user.
	ProjectTeamMember(UserId),
	/// Tasks assigned to the given user.
	TaskAssignedTo(UserId),
	/// Tasks belonging to projects created by the given user.
	TaskInProjectsCreatedBy(UserId),
	/// Blueprints of projects whose team includes the given user.
	BlueprintOnTeamOf(UserId),
	/// Settings rows owned by the given user.
	SettingsOwnedBy(UserId),
}

impl RowFilter {
	/// Returns true if the filter admits every row.
	pub fn is_unrestricted(&self) -> bool {
		matches!(self, RowFilter::All)
	}
}

impl fmt::Display for RowFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RowFilter::All => write!(f, "all"),
			RowFilter::Nothing => write!(f, "nothing"),
			RowFilter::ProjectCreatedBy(id) => write!(f, "project_created_by({id})"),
			RowFilter::ProjectTeamMember(id) => write!(f, "project_team_member({id})"),
			RowFilter::TaskAssignedTo(id) => write!(f, "task_assigned_to({id})"),
			RowFilter::TaskInProjectsCreatedBy(id) => {
				write!(f, "task_in_projects_created_by({id})")
			}
			RowFilter::BlueprintOnTeamOf(id) => write!(f, "blueprint_on_team_of({id})"),
			RowFilter::SettingsOwnedBy(id) => write!(f, "settings_owned_by({id})"),
		}
	}
}
