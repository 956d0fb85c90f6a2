// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Role-scoped dashboard counters.
///
/// Project and task counts follow the caller's visibility; the two inventory
/// numbers are shop-wide and identical for every role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DashboardStats {
	pub total_projects: i64,
	/// Visible tasks not yet completed.
	pub total_tasks: i64,
	/// Visible tasks with status completed.
	pub completed_tasks: i64,
	pub total_inventory: i64,
	pub low_stock_items: i64,
}
