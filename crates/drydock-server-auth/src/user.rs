// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User entity and its principal view.

use chrono::{DateTime, Utc};

use crate::error::AuthError;
use crate::types::{Principal, Role, UserId};

/// A user in the system.
///
/// # PII Handling
///
/// `email`, `full_name`, and `phone` are user-provided PII and should be
/// redacted in logs. `password_hash` must never leave this process.
#[derive(Debug, Clone)]
pub struct User {
	/// Unique identifier for this user.
	pub id: UserId,

	/// Unique login name.
	pub username: String,

	/// Unique email address.
	pub email: String,

	/// Argon2 password hash.
	pub password_hash: String,

	/// Display name shown in task/blueprint enrichment.
	pub full_name: String,

	/// Stored role value, exactly as persisted. Validated into a [`Role`]
	/// through [`User::role`] or [`User::principal`]; kept raw so every
	/// decision point revalidates instead of trusting an earlier parse.
	pub role: String,

	/// Optional contact phone number.
	pub phone: Option<String>,

	/// Deactivated users keep their rows but cannot authenticate.
	pub is_active: bool,

	/// When the user was created.
	pub created_at: DateTime<Utc>,

	/// When the user was last updated.
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Create a new active user with a freshly generated id.
	pub fn new(
		username: impl Into<String>,
		email: impl Into<String>,
		password_hash: impl Into<String>,
		full_name: impl Into<String>,
		role: Role,
		phone: Option<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: UserId::generate(),
			username: username.into(),
			email: email.into(),
			password_hash: password_hash.into(),
			full_name: full_name.into(),
			role: role.to_string(),
			phone,
			is_active: true,
			created_at: now,
			updated_at: now,
		}
	}

	/// Parse the stored role value.
	///
	/// # Errors
	/// Returns [`AuthError::InvalidRole`] for anything outside the closed set.
	pub fn role(&self) -> Result<Role, AuthError> {
		self.role.parse()
	}

	/// Build the principal this user acts as.
	///
	/// # Errors
	/// Returns [`AuthError::InvalidRole`] if the stored role is unrecognized.
	pub fn principal(&self) -> Result<Principal, AuthError> {
		Principal::from_parts(self.id, &self.role, self.is_active)
	}
}
