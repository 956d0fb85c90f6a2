// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bearer access token management.
//!
//! Tokens are issued by `POST /api/token`, carried in the `Authorization`
//! header, and stored hashed with SHA-256; the plaintext is only shown once
//! at issuance. Expiry is a sliding window extended on each authenticated use.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{TokenId, UserId};

/// Duration for access token sliding expiry (30 days).
pub const ACCESS_TOKEN_EXPIRY_DAYS: i64 = 30;

/// Number of random bytes in an access token (produces 64 hex chars).
pub const ACCESS_TOKEN_BYTES: usize = 32;

/// Prefix for all Drydock access tokens.
pub const ACCESS_TOKEN_PREFIX: &str = "dk_";

/// A stored access token.
///
/// The plaintext token is only available at creation time and stored hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
	/// Unique identifier for this access token.
	pub id: TokenId,
	/// User who owns this token.
	pub user_id: UserId,
	/// SHA-256 hash of the token (the actual token is never stored).
	pub token_hash: String,
	/// When the token was created.
	pub created_at: DateTime<Utc>,
	/// When the token was last used.
	pub last_used_at: Option<DateTime<Utc>>,
	/// When the token expires (sliding, extended on each use).
	pub expires_at: DateTime<Utc>,
	/// When the token was revoked (None if active).
	pub revoked_at: Option<DateTime<Utc>>,
}

impl AccessToken {
	/// Create a new access token.
	///
	/// Returns both the AccessToken struct and the plaintext token string.
	/// The plaintext must be shown to the caller immediately; it cannot be
	/// recovered later.
	pub fn new(user_id: UserId) -> (Self, String) {
		let (plaintext_token, token_hash) = generate_access_token();
		let now = Utc::now();
		let expires_at = now + Duration::days(ACCESS_TOKEN_EXPIRY_DAYS);

		let access_token = Self {
			id: TokenId::generate(),
			user_id,
			token_hash,
			created_at: now,
			last_used_at: None,
			expires_at,
			revoked_at: None,
		};

		(access_token, plaintext_token)
	}

	/// Check if the token has expired.
	pub fn is_expired(&self) -> bool {
		Utc::now() > self.expires_at
	}

	/// Check if the token has been revoked.
	pub fn is_revoked(&self) -> bool {
		self.revoked_at.is_some()
	}

	/// Check if the token is valid (not expired and not revoked).
	pub fn is_valid(&self) -> bool {
		!self.is_expired() && !self.is_revoked()
	}

	/// Extend the token expiry (sliding expiry on use).
	///
	/// Updates `last_used_at` to now and pushes `expires_at` forward by the
	/// standard window.
	pub fn extend(&mut self) {
		let now = Utc::now();
		self.last_used_at = Some(now);
		self.expires_at = now + Duration::days(ACCESS_TOKEN_EXPIRY_DAYS);
	}

	/// Revoke the token.
	pub fn revoke(&mut self) {
		self.revoked_at = Some(Utc::now());
	}

	/// Verify a plaintext token against this token's hash.
	pub fn verify(&self, plaintext_token: &str) -> bool {
		verify_access_token(plaintext_token, &self.token_hash)
	}
}

/// Generate a new access token.
///
/// Returns a tuple of (plaintext_token, sha256_hash).
/// The plaintext token format is: `dk_` + 64 hex characters (32 bytes).
pub fn generate_access_token() -> (String, String) {
	use rand::Rng;
	let mut rng = rand::thread_rng();
	let bytes: [u8; ACCESS_TOKEN_BYTES] = rng.gen();
	let token = format!("{}{}", ACCESS_TOKEN_PREFIX, hex::encode(bytes));
	let hash = hash_access_token(&token);
	(token, hash)
}

/// Hash an access token using SHA-256.
///
/// The resulting hash can be safely stored in the database.
/// SHA-256 is sufficient for high-entropy random tokens (32+ bytes).
/// This must match the hash used by the auth middleware for lookup.
pub fn hash_access_token(token: &str) -> String {
	use sha2::{Digest, Sha256};
	let mut hasher = Sha256::new();
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

/// Verify an access token against its stored SHA-256 hash.
pub fn verify_access_token(token: &str, hash: &str) -> bool {
	hash_access_token(token) == hash
}

/// Check if a string looks like a valid access token format.
pub fn is_valid_access_token_format(token: &str) -> bool {
	if let Some(hex_part) = token.strip_prefix(ACCESS_TOKEN_PREFIX) {
		hex_part.len() == ACCESS_TOKEN_BYTES * 2 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
	} else {
		false
	}
}
