// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored in PHC string format. Verification never reveals whether
//! the stored hash or the supplied password was malformed; both fail closed.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::argon2_config::argon2_instance;
use crate::error::AuthError;

/// Hash a password with a fresh random salt.
///
/// # Errors
/// Returns [`AuthError::HashingError`] if the underlying hasher rejects the
/// input (practically only on invalid parameters).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| AuthError::HashingError(e.to_string()))
}

/// Verify a password against its stored Argon2 hash.
///
/// Returns false for malformed stored hashes rather than erroring, so a
/// corrupted row behaves like a wrong password.
pub fn verify_password(password: &str, hash: &str) -> bool {
	let parsed_hash = match PasswordHash::new(hash) {
		Ok(h) => h,
		Err(_) => return false,
	};
	argon2_instance()
		.verify_password(password.as_bytes(), &parsed_hash)
		.is_ok()
}
