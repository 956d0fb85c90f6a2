// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authentication and authorization.
//!
//! This module defines the foundational types used throughout the auth system:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for different entity types
//!   ([`UserId`], [`ProjectId`], [`TaskId`], etc.) preventing accidental mixing
//! - **[`Role`]**: the closed set of user roles; anything outside it is rejected
//!   at parse time, never defaulted
//! - **[`Principal`]**: the authenticated actor a request resolves to
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AuthError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(TaskId, "Unique identifier for a task.");
define_id_type!(ItemId, "Unique identifier for an inventory item.");
define_id_type!(BlueprintId, "Unique identifier for a blueprint.");
define_id_type!(SettingId, "Unique identifier for a user-settings row.");
define_id_type!(TokenId, "Unique identifier for an access token.");
define_id_type!(AssignmentId, "Unique identifier for a project assignment.");

// =============================================================================
// Roles
// =============================================================================

/// User roles. A closed enumeration: every stored role value must parse to one
/// of these four variants before any access decision runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	/// Full access to every resource.
	Admin,
	/// Owns the projects they created; full control within them.
	ProjectManager,
	/// Works assigned tasks on projects they are a team member of.
	Engineer,
	/// Works assigned tasks on projects they are a team member of.
	Technician,
}

impl Role {
	/// Returns all available roles.
	pub fn all() -> &'static [Role] {
		&[
			Role::Admin,
			Role::ProjectManager,
			Role::Engineer,
			Role::Technician,
		]
	}

	/// Returns true for the roles that manage resources (admin, project manager).
	pub fn is_privileged(&self) -> bool {
		matches!(self, Role::Admin | Role::ProjectManager)
	}

	/// Returns true for the hands-on roles (engineer, technician).
	pub fn is_crew(&self) -> bool {
		matches!(self, Role::Engineer | Role::Technician)
	}
}

impl FromStr for Role {
	type Err = AuthError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"admin" => Ok(Role::Admin),
			"project_manager" => Ok(Role::ProjectManager),
			"engineer" => Ok(Role::Engineer),
			"technician" => Ok(Role::Technician),
			other => Err(AuthError::InvalidRole(other.to_string())),
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Admin => write!(f, "admin"),
			Role::ProjectManager => write!(f, "project_manager"),
			Role::Engineer => write!(f, "engineer"),
			Role::Technician => write!(f, "technician"),
		}
	}
}

// =============================================================================
// Principal
// =============================================================================

/// The authenticated actor making a request.
///
/// Constructed once per request by identity resolution and immutable for the
/// request's duration. Construction is the single place raw role strings are
/// parsed; an unrecognized value fails with [`AuthError::InvalidRole`] so no
/// downstream decision ever runs on an unknown role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
	pub id: UserId,
	pub role: Role,
	pub active: bool,
}

impl Principal {
	/// Build a principal from stored user facts, validating the role string.
	///
	/// # Errors
	/// Returns [`AuthError::InvalidRole`] if `role` is not one of the four
	/// enumerated values.
	pub fn from_parts(id: UserId, role: &str, active: bool) -> Result<Self, AuthError> {
		Ok(Self {
			id,
			role: role.parse()?,
			active,
		})
	}

	/// Build a principal from an already-validated role.
	pub fn new(id: UserId, role: Role, active: bool) -> Self {
		Self { id, role, active }
	}
}
