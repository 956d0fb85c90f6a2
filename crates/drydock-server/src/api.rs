// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP API routes and shared application state.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post};
use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use drydock_server_config::ServerConfig;

use crate::{
	db::{
		AccessTokenRepository, BlueprintRepository, InventoryRepository, ProjectRepository,
		SettingsRepository, TaskRepository, UserRepository,
	},
	routes,
	storage::BlueprintStorage,
	typed_router::{AuthedRouter, PublicRouter},
};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub user_repo: Arc<UserRepository>,
	pub token_repo: Arc<AccessTokenRepository>,
	pub project_repo: Arc<ProjectRepository>,
	pub task_repo: Arc<TaskRepository>,
	pub inventory_repo: Arc<InventoryRepository>,
	pub blueprint_repo: Arc<BlueprintRepository>,
	pub settings_repo: Arc<SettingsRepository>,
	pub storage: BlueprintStorage,
	pub max_upload_bytes: u64,
	pub pool: SqlitePool,
}

/// Creates the application state from a connection pool and configuration.
pub async fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let user_repo = Arc::new(UserRepository::new(pool.clone()));
	let token_repo = Arc::new(AccessTokenRepository::new(pool.clone()));
	let project_repo = Arc::new(ProjectRepository::new(pool.clone()));
	let task_repo = Arc::new(TaskRepository::new(pool.clone()));
	let inventory_repo = Arc::new(InventoryRepository::new(pool.clone()));
	let blueprint_repo = Arc::new(BlueprintRepository::new(pool.clone()));
	let settings_repo = Arc::new(SettingsRepository::new(pool.clone()));

	let storage = BlueprintStorage::new(&config.storage.upload_dir);

	AppState {
		user_repo,
		token_repo,
		project_repo,
		task_repo,
		inventory_repo,
		blueprint_repo,
		settings_repo,
		storage,
		max_upload_bytes: config.storage.max_upload_bytes,
		pool,
	}
}

/// Creates the application router with all routes configured.
pub fn create_router(state: AppState) -> Router {
	// Room for multipart framing and text fields next to the file bytes
	let upload_body_limit = DefaultBodyLimit::max(
		usize::try_from(state.max_upload_bytes.saturating_add(64 * 1024)).unwrap_or(usize::MAX),
	);

	// Routes that do not require authentication
	let public = PublicRouter::new()
		.route("/health", get(routes::health::health_check))
		.route("/api/register", post(routes::auth::register))
		.route("/api/token", post(routes::auth::login))
		.build();

	// Routes that require a valid access token
	let authed = AuthedRouter::new()
		// Users
		.route("/api/users/me", get(routes::users::get_current_user))
		.route("/api/users", get(routes::users::list_users))
		.route(
			"/api/users/{user_id}",
			get(routes::users::get_user).put(routes::users::update_user),
		)
		// Projects
		.route(
			"/api/projects",
			get(routes::projects::list_projects).post(routes::projects::create_project),
		)
		.route(
			"/api/projects/{project_id}",
			get(routes::projects::get_project)
				.put(routes::projects::update_project)
				.delete(routes::projects::delete_project),
		)
		// Tasks
		.route(
			"/api/tasks",
			get(routes::tasks::list_tasks).post(routes::tasks::create_task),
		)
		.route(
			"/api/tasks/{task_id}",
			get(routes::tasks::get_task)
				.put(routes::tasks::update_task)
				.delete(routes::tasks::delete_task),
		)
		.route(
			"/api/tasks/{task_id}/complete",
			patch(routes::tasks::complete_task),
		)
		// Inventory
		.route(
			"/api/inventory",
			get(routes::inventory::list_inventory)
				.post(routes::inventory::create_inventory_item),
		)
		.route(
			"/api/inventory/low-stock",
			get(routes::inventory::list_low_stock),
		)
		.route(
			"/api/inventory/{item_id}",
			get(routes::inventory::get_inventory_item)
				.put(routes::inventory::update_inventory_item)
				.delete(routes::inventory::delete_inventory_item),
		)
		// Blueprints
		.route("/api/blueprints", get(routes::blueprints::list_blueprints))
		.route(
			"/api/blueprints/upload",
			post(routes::blueprints::upload_blueprint).layer(upload_body_limit),
		)
		.route(
			"/api/blueprints/{blueprint_id}",
			get(routes::blueprints::get_blueprint)
				.put(routes::blueprints::update_blueprint)
				.delete(routes::blueprints::delete_blueprint),
		)
		.route(
			"/api/blueprints/{blueprint_id}/download",
			get(routes::blueprints::download_blueprint),
		)
		// Settings
		.route(
			"/api/settings/me",
			get(routes::settings::get_my_settings).put(routes::settings::update_my_settings),
		)
		.route("/api/settings/reset", post(routes::settings::reset_my_settings))
		// Dashboard
		.route("/api/dashboard/stats", get(routes::dashboard::get_stats))
		.build(state.clone());

	Router::new()
		.merge(public)
		.merge(authed)
		.with_state(state)
		.merge(SwaggerUi::new("/docs").url("/api/openapi.json", crate::api_docs::ApiDoc::openapi()))
}
