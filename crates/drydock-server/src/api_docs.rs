// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for drydock-server.
//!
//! This module provides the OpenAPI specification for the Drydock API,
//! generated from Rust types using utoipa.

use utoipa::OpenApi;

/// Main OpenAPI documentation struct.
///
/// This generates the complete OpenAPI specification for the Drydock API.
/// Access the interactive documentation at `/docs` and the raw JSON spec at
/// `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drydock API",
        version = "1.0.0",
        description = "Project management backend for marine retrofit projects: users, projects, tasks, inventory, blueprints, and per-user settings with role-aware visibility.",
        license(name = "Proprietary"),
        contact(
            name = "Geoffrey Huntley",
            email = "ghuntley@ghuntley.com",
            url = "https://ghuntley.com"
        )
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "auth", description = "Registration and token issuance"),
        (name = "users", description = "User profile management"),
        (name = "projects", description = "Retrofit project CRUD and team assignment"),
        (name = "tasks", description = "Task CRUD, assignment, and completion"),
        (name = "inventory", description = "Shop-wide stock catalogue"),
        (name = "blueprints", description = "Drawing upload, download, and metadata"),
        (name = "settings", description = "Per-user interface preferences"),
        (name = "dashboard", description = "Role-scoped summary counts"),
        (name = "health", description = "Health checks and system status")
    ),
    paths(
        // Auth endpoints
        crate::routes::auth::register,
        crate::routes::auth::login,
        // User endpoints
        crate::routes::users::get_current_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        // Project endpoints
        crate::routes::projects::list_projects,
        crate::routes::projects::get_project,
        crate::routes::projects::create_project,
        crate::routes::projects::update_project,
        crate::routes::projects::delete_project,
        // Task endpoints
        crate::routes::tasks::list_tasks,
        crate::routes::tasks::get_task,
        crate::routes::tasks::create_task,
        crate::routes::tasks::update_task,
        crate::routes::tasks::complete_task,
        crate::routes::tasks::delete_task,
        // Inventory endpoints
        crate::routes::inventory::list_inventory,
        crate::routes::inventory::list_low_stock,
        crate::routes::inventory::get_inventory_item,
        crate::routes::inventory::create_inventory_item,
        crate::routes::inventory::update_inventory_item,
        crate::routes::inventory::delete_inventory_item,
        // Blueprint endpoints
        crate::routes::blueprints::list_blueprints,
        crate::routes::blueprints::get_blueprint,
        crate::routes::blueprints::upload_blueprint,
        crate::routes::blueprints::download_blueprint,
        crate::routes::blueprints::update_blueprint,
        crate::routes::blueprints::delete_blueprint,
        // Settings endpoints
        crate::routes::settings::get_my_settings,
        crate::routes::settings::update_my_settings,
        crate::routes::settings::reset_my_settings,
        // Dashboard endpoints
        crate::routes::dashboard::get_stats,
        // Health endpoints
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            // Auth types
            drydock_server_api::RegisterRequest,
            drydock_server_api::LoginRequest,
            drydock_server_api::TokenResponse,
            // User types
            drydock_server_api::UserResponse,
            drydock_server_api::UpdateUserRequest,
            drydock_server_api::RoleApi,
            // Project types
            drydock_server_api::ProjectResponse,
            drydock_server_api::CreateProjectRequest,
            drydock_server_api::UpdateProjectRequest,
            drydock_server_api::ProjectStatusApi,
            drydock_server_api::TeamMemberResponse,
            // Task types
            drydock_server_api::TaskResponse,
            drydock_server_api::CreateTaskRequest,
            drydock_server_api::UpdateTaskRequest,
            drydock_server_api::TaskPriorityApi,
            drydock_server_api::TaskStatusApi,
            // Inventory types
            drydock_server_api::InventoryItemResponse,
            drydock_server_api::CreateInventoryItemRequest,
            drydock_server_api::UpdateInventoryItemRequest,
            // Blueprint types
            drydock_server_api::BlueprintResponse,
            drydock_server_api::UpdateBlueprintRequest,
            // Settings types
            drydock_server_api::SettingsResponse,
            drydock_server_api::UpdateSettingsRequest,
            drydock_server_api::ThemeApi,
            // Dashboard types
            drydock_server_api::DashboardStats,
            // Envelope types
            drydock_server_api::ErrorResponse,
            drydock_server_api::SuccessResponse,
            // Health types
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthComponents,
            crate::health::DatabaseHealth,
        )
    )
)]
pub struct ApiDoc;
