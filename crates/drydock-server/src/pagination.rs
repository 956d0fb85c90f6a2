// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared pagination utilities for API handlers.
//!
//! Listing routes accept `skip` and `limit` query parameters. The values are
//! clamped here so repository queries never see a negative offset or an
//! unbounded page size.

/// Largest page any listing will return regardless of the requested limit.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: i64) -> i64 {
	limit.clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a requested offset to zero or more.
pub fn clamp_skip(skip: i64) -> i64 {
	skip.max(0)
}
