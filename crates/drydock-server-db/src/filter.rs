// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Compilation of policy row filters into SQL WHERE fragments.
//!
//! The policy engine hands listing routes a [`RowFilter`] describing which
//! rows a principal may see. This module turns that value into a WHERE
//! fragment plus bind values, so listing and counting queries share one
//! predicate and stay consistent with each other.
//!
//! Each variant compiles against its natural table: `Project*` filters
//! against `projects`, `Task*` against `tasks`, `BlueprintOnTeamOf` against
//! `blueprints`, `SettingsOwnedBy` against `user_settings`. Repositories only
//! ever receive filters for their own kind; a mismatched filter fails at
//! query time rather than silently widening the listing.

use drydock_server_auth::policy::RowFilter;

/// A compiled WHERE fragment with its bind values.
///
/// The clause contains only static SQL with `?` placeholders; every value
/// travels through the binds, never through string interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFilter {
	clause: String,
	binds: Vec<String>,
}

impl SqlFilter {
	/// The WHERE fragment, without the `WHERE` keyword.
	pub fn clause(&self) -> &str {
		&self.clause
	}

	/// Values to bind, in placeholder order.
	pub fn binds(&self) -> &[String] {
		&self.binds
	}
}

/// Compile a row filter to SQL.
pub fn compile(filter: &RowFilter) -> SqlFilter {
	match filter {
		RowFilter::All => SqlFilter {
			clause: "1 = 1".to_string(),
			binds: vec![],
		},
		RowFilter::Nothing => SqlFilter {
			clause: "1 = 0".to_string(),
			binds: vec![],
		},
		RowFilter::ProjectCreatedBy(user_id) => SqlFilter {
			clause: "created_by = ?".to_string(),
			binds: vec![user_id.to_string()],
		},
		RowFilter::ProjectTeamMember(user_id) => SqlFilter {
			clause: "id IN (SELECT project_id FROM project_assignments WHERE user_id = ?)"
				.to_string(),
			binds: vec![user_id.to_string()],
		},
		RowFilter::TaskAssignedTo(user_id) => SqlFilter {
			clause: "assigned_to = ?".to_string(),
			binds: vec![user_id.to_string()],
		},
		RowFilter::TaskInProjectsCreatedBy(user_id) => SqlFilter {
			clause: "project_id IN (SELECT id FROM projects WHERE created_by = ?)".to_string(),
			binds: vec![user_id.to_string()],
		},
		RowFilter::BlueprintOnTeamOf(user_id) => SqlFilter {
			clause: "project_id IN (SELECT project_id FROM project_assignments WHERE user_id = ?)"
				.to_string(),
			binds: vec![user_id.to_string()],
		},
		RowFilter::SettingsOwnedBy(user_id) => SqlFilter {
			clause: "user_id = ?".to_string(),
			binds: vec![user_id.to_string()],
		},
	}
}
