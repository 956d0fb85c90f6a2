// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Drydock project management server.
//!
//! This crate provides the HTTP server for Drydock: role-aware project,
//! task, inventory, blueprint, and settings management over a SQLite
//! database.

pub mod api;
pub mod api_docs;
pub mod auth_middleware;
pub mod db;
pub mod error;
pub mod health;
pub mod pagination;
pub mod routes;
pub mod stats;
pub mod storage;
pub mod typed_router;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use db::run_migrations;
pub use drydock_server_config::ServerConfig;
pub use error::ServerError;
pub use stats::DashboardService;
pub use storage::BlueprintStorage;
pub use typed_router::{AuthedRouter, PublicRouter};
