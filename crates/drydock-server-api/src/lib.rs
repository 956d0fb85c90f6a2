// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # drydock-server-api
//!
//! Wire types for the Drydock HTTP API: request bodies, query parameters,
//! and response shapes, with conversions from the domain types they project.
//! Handlers live in `drydock-server`; this crate only defines the contract.
//!
//! With the `openapi` feature (on by default) every type derives
//! `utoipa::ToSchema`/`IntoParams` so the served OpenAPI document stays in
//! lockstep with the code.

pub mod auth;
pub mod blueprints;
pub mod common;
pub mod dashboard;
pub mod inventory;
pub mod projects;
pub mod settings;
pub mod tasks;
pub mod users;

pub use auth::{LoginRequest, RegisterRequest, TokenResponse};
pub use blueprints::{BlueprintResponse, ListBlueprintsParams, UpdateBlueprintRequest};
pub use common::{ErrorResponse, SuccessResponse};
pub use dashboard::DashboardStats;
pub use inventory::{
	CreateInventoryItemRequest, InventoryItemResponse, ListInventoryParams,
	UpdateInventoryItemRequest,
};
pub use projects::{
	CreateProjectRequest, ListProjectsParams, ProjectResponse, ProjectStatusApi,
	TeamMemberResponse, UpdateProjectRequest,
};
pub use settings::{SettingsResponse, ThemeApi, UpdateSettingsRequest};
pub use tasks::{
	CreateTaskRequest, ListTasksParams, TaskPriorityApi, TaskResponse, TaskStatusApi,
	UpdateTaskRequest,
};
pub use users::{ListUsersParams, RoleApi, UpdateUserRequest, UserResponse};
