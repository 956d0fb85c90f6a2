// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for policy evaluation.
//!
//! This module defines the data structures the authorization policy decides
//! over:
//!
//! - [`Action`]: the operation being performed
//! - [`ResourceKind`]: which resource family the target belongs to
//! - [`ResourceCtx`]: the facts about the target the rules read
//! - [`Decision`] / [`DenyReason`]: the outcome
//!
//! # Design Principles
//!
//! 1. **Immutable evaluation**: all facts are computed before evaluation
//! 2. **No database access**: policy functions are pure; data is pre-loaded
//! 3. **Explicit facts**: every relevant fact is an explicit field, not derived
//! 4. **Fail closed**: a fact the rules need but the caller did not supply
//!    reads as "no"

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::policy::filter::RowFilter;
use crate::types::UserId;

/// Actions that can be performed on resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Create,
	Read,
	List,
	Update,
	Delete,
	/// Mark a task completed. Follows the task update gate plus its own
	/// role restrictions.
	Complete,
	/// Fetch a blueprint's file content. Follows the blueprint read gate.
	Download,
}

/// Resource families protected by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Project,
	Task,
	Inventory,
	Blueprint,
	UserSettings,
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceKind::Project => write!(f, "project"),
			ResourceKind::Task => write!(f, "task"),
			ResourceKind::Inventory => write!(f, "inventory"),
			ResourceKind::Blueprint => write!(f, "blueprint"),
			ResourceKind::UserSettings => write!(f, "user_settings"),
		}
	}
}

/// Facts about the target resource.
///
/// Row-level facts are optional because collection actions (create, list)
/// have no row. A rule that needs an absent fact denies; callers are expected
/// to load the row first (existence is checked before authorization).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCtx {
	pub kind: ResourceKind,
	/// Creator of the project this resource is (or belongs to):
	/// the project itself, or a task's project.
	pub project_creator: Option<UserId>,
	/// A task's current assignee, if any.
	pub task_assignee: Option<UserId>,
	/// Owner of a settings row.
	pub settings_owner: Option<UserId>,
	/// Whether the principal is on the relevant project's team.
	pub principal_is_team_member: Option<bool>,
}

impl ResourceCtx {
	fn bare(kind: ResourceKind) -> Self {
		Self {
			kind,
			project_creator: None,
			task_assignee: None,
			settings_owner: None,
			principal_is_team_member: None,
		}
	}

	/// Facts for a collection action (create or list) on a resource family.
	///
	/// Task creation should use [`ResourceCtx::task`] instead, carrying the
	/// destination project's creator.
	pub fn collection(kind: ResourceKind) -> Self {
		Self::bare(kind)
	}

	/// Facts for a specific project row.
	pub fn project(creator: UserId) -> Self {
		Self {
			project_creator: Some(creator),
			..Self::bare(ResourceKind::Project)
		}
	}

	/// Facts for a task row (or a task about to be created on a project).
	pub fn task(project_creator: UserId, assignee: Option<UserId>) -> Self {
		Self {
			project_creator: Some(project_creator),
			task_assignee: assignee,
			..Self::bare(ResourceKind::Task)
		}
	}

	/// Facts for an inventory item. Inventory rules are purely role-gated.
	pub fn inventory() -> Self {
		Self::bare(ResourceKind::Inventory)
	}

	/// Facts for a blueprint row.
	pub fn blueprint() -> Self {
		Self::bare(ResourceKind::Blueprint)
	}

	/// Facts for a settings row owned by the given user.
	pub fn user_settings(owner: UserId) -> Self {
		Self {
			settings_owner: Some(owner),
			..Self::bare(ResourceKind::UserSettings)
		}
	}

	/// Builder: record whether the principal is on the relevant team.
	pub fn with_team_member(mut self, is_member: bool) -> Self {
		self.principal_is_team_member = Some(is_member);
		self
	}
}

/// Why an action was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
	/// The principal's account is deactivated.
	InactivePrincipal,
	/// The principal's role does not permit this operation at all.
	RoleNotPermitted,
	/// The operation is limited to the owning project's creator.
	NotProjectOwner,
	/// The operation is limited to the task's assignee.
	NotAssignee,
	/// The principal is not on the relevant project's team.
	NotTeamMember,
	/// Settings rows are only accessible to their owner.
	NotSettingsOwner,
}

impl DenyReason {
	/// Stable machine-readable code for logs and error envelopes.
	pub fn as_str(&self) -> &'static str {
		match self {
			DenyReason::InactivePrincipal => "inactive_principal",
			DenyReason::RoleNotPermitted => "role_not_permitted",
			DenyReason::NotProjectOwner => "not_project_owner",
			DenyReason::NotAssignee => "not_assignee",
			DenyReason::NotTeamMember => "not_team_member",
			DenyReason::NotSettingsOwner => "not_settings_owner",
		}
	}
}

impl fmt::Display for DenyReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenyReason::InactivePrincipal => write!(f, "inactive user account"),
			DenyReason::RoleNotPermitted => write!(f, "not enough permissions"),
			DenyReason::NotProjectOwner => {
				write!(f, "only the project creator can perform this operation")
			}
			DenyReason::NotAssignee => write!(f, "you can only work on tasks assigned to you"),
			DenyReason::NotTeamMember => write!(f, "you are not on this project's team"),
			DenyReason::NotSettingsOwner => write!(f, "settings belong to their owner"),
		}
	}
}

/// Outcome of a policy evaluation.
///
/// `Allow` optionally carries the row-visibility filter for list actions;
/// point actions allow with no filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
	Allow { filter: Option<RowFilter> },
	Deny(DenyReason),
}

impl Decision {
	/// Unconditional allow.
	pub fn allow() -> Self {
		Decision::Allow { filter: None }
	}

	/// Allow restricted to rows matching `filter`.
	pub fn allow_filtered(filter: RowFilter) -> Self {
		Decision::Allow {
			filter: Some(filter),
		}
	}

	/// Deny with the given reason.
	pub fn deny(reason: DenyReason) -> Self {
		Decision::Deny(reason)
	}

	/// Returns true for any allow, filtered or not.
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow { .. })
	}

	/// The visibility filter for list decisions. Unfiltered allows see
	/// everything.
	pub fn filter(&self) -> Option<&RowFilter> {
		match self {
			Decision::Allow { filter } => filter.as_ref(),
			Decision::Deny(_) => None,
		}
	}

	/// The deny reason, if denied.
	pub fn deny_reason(&self) -> Option<DenyReason> {
		match self {
			Decision::Allow { .. } => None,
			Decision::Deny(reason) => Some(*reason),
		}
	}
}
