// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Dashboard aggregation service.
//!
//! Counts are scoped with the same row filters the list endpoints use, so the
//! dashboard can never show a user more than their project and task lists
//! would. Inventory counts are deliberately unscoped: stock levels are a
//! shared, cross-role fact.

use std::sync::Arc;

use drydock_server_api::DashboardStats;
use drydock_server_auth::policy::{list_filter, ResourceKind};
use drydock_server_auth::User;

use crate::db::{InventoryRepository, ProjectRepository, TaskRepository};
use crate::error::ServerError;

pub struct DashboardService {
	project_repo: Arc<ProjectRepository>,
	task_repo: Arc<TaskRepository>,
	inventory_repo: Arc<InventoryRepository>,
}

impl DashboardService {
	pub fn new(
		project_repo: Arc<ProjectRepository>,
		task_repo: Arc<TaskRepository>,
		inventory_repo: Arc<InventoryRepository>,
	) -> Self {
		Self {
			project_repo,
			task_repo,
			inventory_repo,
		}
	}

	/// Compute dashboard counts for one user.
	///
	/// A stored role that no longer parses is an error here, not an empty
	/// dashboard. `total_tasks` counts visible tasks that are not yet
	/// completed; `completed_tasks` counts the rest of the visible set.
	pub async fn stats_for(&self, user: &User) -> Result<DashboardStats, ServerError> {
		let principal = user.principal()?;

		let project_filter = list_filter(&principal, ResourceKind::Project)?;
		let task_filter = list_filter(&principal, ResourceKind::Task)?;

		let total_projects = self.project_repo.count_projects(&project_filter).await?;
		let total_tasks = self.task_repo.count_open_tasks(&task_filter).await?;
		let completed_tasks = self.task_repo.count_completed_tasks(&task_filter).await?;
		let total_inventory = self.inventory_repo.count_items().await?;
		let low_stock_items = self.inventory_repo.count_low_stock_items().await?;

		Ok(DashboardStats {
			total_projects,
			total_tasks,
			completed_tasks,
			total_inventory,
			low_stock_items,
		})
	}
}
