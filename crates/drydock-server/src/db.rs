// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database wiring for the server binary.
//!
//! Re-exports the repositories from drydock-server-db and provides the
//! server's migration runner.

use sqlx::sqlite::SqlitePool;

use crate::error::ServerError;

pub use drydock_server_db::{
	create_pool, AccessTokenRepository, BlueprintRepository, DbError, InventoryRepository,
	ProjectRepository, SettingsRepository, TaskRepository, UserRepository,
};

/// Run all database migrations.
///
/// Migrations are idempotent - safe to run multiple times. Statements that
/// fail because an object already exists are skipped.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ServerError> {
	let m1 = include_str!("../migrations/001_initial.sql");
	apply_statements(pool, m1).await?;

	let m2 = include_str!("../migrations/002_indexes.sql");
	apply_statements(pool, m2).await?;

	tracing::debug!("database migrations applied");
	Ok(())
}

async fn apply_statements(pool: &SqlitePool, sql: &str) -> Result<(), ServerError> {
	for stmt in sql.split(';').filter(|s| !s.trim().is_empty()) {
		if let Err(e) = sqlx::query(stmt).execute(pool).await {
			let msg = e.to_string();
			if !msg.contains("duplicate column") && !msg.contains("already exists") {
				return Err(ServerError::Db(DbError::from(e)));
			}
		}
	}
	Ok(())
}
