// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication and authorization for Drydock.
//!
//! This crate provides:
//! - User identity with password credentials
//! - Access-token issuance and validation for API clients
//! - A role-aware policy engine for fine-grained access control
//! - Task assignment integrity checks
//!
//! # Policy Design Rationale
//!
//! The policy engine decides every resource access from three inputs:
//!
//! - **Principal**: who is making the request (user id, role, activity)
//! - **Resource facts**: what is being accessed (kind, creator, assignee, team membership)
//! - **Action**: what operation is requested (read, list, update, complete, ...)
//!
//! Decisions are pure functions over those inputs, which buys:
//!
//! 1. **Consistency**: routes and dashboard aggregates share one rule table
//! 2. **Row scoping**: list decisions return a [`policy::RowFilter`] instead of a bare yes/no
//! 3. **Fail-closed defaults**: missing facts and unknown stored roles always deny
//! 4. **Testability**: every rule is exercisable without a database
//!
//! # Security Considerations
//!
//! - Passwords are stored as Argon2 hashes, access tokens as SHA-256 hashes
//! - Raw token values never reach logs; only hashes are stored or printed
//! - Role strings are parsed into the closed [`Role`] enum before any decision runs

pub mod access_token;
mod argon2_config;
pub mod assignment;
pub mod error;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod types;
pub mod user;

pub use access_token::{
	generate_access_token, hash_access_token, is_valid_access_token_format, verify_access_token,
	AccessToken, ACCESS_TOKEN_BYTES, ACCESS_TOKEN_EXPIRY_DAYS, ACCESS_TOKEN_PREFIX,
};
pub use assignment::{validate_assignment, AssignmentError, AssignmentFacts};
pub use error::AuthError;
pub use middleware::{extract_bearer_token, is_access_token, AuthContext, CurrentUser};
pub use password::{hash_password, verify_password};
pub use types::*;
pub use user::User;
