// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::Utc;
use drydock_server_auth::UserId;
use sqlx::sqlite::SqlitePool;

pub async fn create_test_pool() -> SqlitePool {
	SqlitePool::connect(":memory:").await.unwrap()
}

pub async fn create_users_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS users (
			id TEXT PRIMARY KEY,
			username TEXT NOT NULL UNIQUE,
			email TEXT NOT NULL UNIQUE,
			password_hash TEXT NOT NULL,
			full_name TEXT NOT NULL,
			role TEXT NOT NULL,
			phone TEXT,
			is_active INTEGER NOT NULL DEFAULT 1,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_access_tokens_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS access_tokens (
			id TEXT PRIMARY KEY,
			user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
			token_hash TEXT NOT NULL UNIQUE,
			created_at TEXT NOT NULL,
			last_used_at TEXT,
			expires_at TEXT NOT NULL,
			revoked_at TEXT
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();

	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_access_tokens_token_hash ON access_tokens(token_hash)",
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_projects_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS projects (
			id TEXT PRIMARY KEY,
			project_name TEXT NOT NULL,
			vessel_name TEXT NOT NULL,
			vessel_type TEXT,
			vessel_owner TEXT,
			start_date TEXT,
			end_date TEXT,
			status TEXT NOT NULL DEFAULT 'planning',
			budget REAL,
			spending REAL,
			description TEXT,
			created_by TEXT NOT NULL REFERENCES users(id),
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_project_assignments_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS project_assignments (
			id TEXT PRIMARY KEY,
			project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
			user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
			assigned_at TEXT NOT NULL,
			UNIQUE(project_id, user_id)
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_tasks_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS tasks (
			id TEXT PRIMARY KEY,
			project_id TEXT NOT NULL REFERENCES projects(id),
			task_name TEXT NOT NULL,
			description TEXT,
			assigned_to TEXT REFERENCES users(id),
			priority TEXT NOT NULL DEFAULT 'medium',
			status TEXT NOT NULL DEFAULT 'pending',
			is_maintenance INTEGER NOT NULL DEFAULT 0,
			start_date TEXT,
			due_date TEXT,
			completion_date TEXT,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_inventory_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS inventory (
			id TEXT PRIMARY KEY,
			item_name TEXT NOT NULL,
			category TEXT,
			description TEXT,
			quantity INTEGER NOT NULL DEFAULT 0,
			unit TEXT,
			unit_price REAL,
			reorder_level INTEGER NOT NULL DEFAULT 10,
			supplier_name TEXT,
			location TEXT,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_blueprints_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS blueprints (
			id TEXT PRIMARY KEY,
			project_id TEXT NOT NULL REFERENCES projects(id),
			file_name TEXT NOT NULL,
			original_name TEXT NOT NULL,
			file_path TEXT NOT NULL,
			file_size INTEGER NOT NULL,
			file_type TEXT,
			version TEXT NOT NULL DEFAULT '1.0',
			description TEXT,
			uploaded_by TEXT NOT NULL REFERENCES users(id),
			uploaded_at TEXT NOT NULL,
			updated_at TEXT NOT NULL,
			is_active INTEGER NOT NULL DEFAULT 1
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_user_settings_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS user_settings (
			id TEXT PRIMARY KEY,
			user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
			theme TEXT NOT NULL DEFAULT 'light',
			language TEXT NOT NULL DEFAULT 'en',
			timezone TEXT NOT NULL DEFAULT 'UTC',
			date_format TEXT NOT NULL DEFAULT 'YYYY-MM-DD',
			notifications_enabled INTEGER NOT NULL DEFAULT 1,
			email_notifications INTEGER NOT NULL DEFAULT 1,
			dashboard_layout TEXT,
			items_per_page INTEGER NOT NULL DEFAULT 10,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_user_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	pool
}

pub async fn create_token_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	create_access_tokens_table(&pool).await;
	pool
}

pub async fn create_project_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	create_projects_table(&pool).await;
	create_project_assignments_table(&pool).await;
	create_tasks_table(&pool).await;
	pool
}

pub async fn create_task_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	create_projects_table(&pool).await;
	create_tasks_table(&pool).await;
	pool
}

pub async fn create_inventory_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_inventory_table(&pool).await;
	pool
}

pub async fn create_blueprint_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	create_projects_table(&pool).await;
	create_project_assignments_table(&pool).await;
	create_blueprints_table(&pool).await;
	pool
}

pub async fn create_settings_test_pool() -> SqlitePool {
	let pool = create_test_pool().await;
	create_users_table(&pool).await;
	create_user_settings_table(&pool).await;
	pool
}

/// Insert a minimal engineer row with the given id, for tests that only need
/// a user to exist behind a foreign key or display join.
pub async fn insert_test_user(pool: &SqlitePool, user_id: &UserId) {
	let id_str = user_id.to_string();
	let tag = &id_str[..8];
	let now = Utc::now().to_rfc3339();
	sqlx::query(
		r#"
		INSERT INTO users (id, username, email, password_hash, full_name, role, is_active, created_at, updated_at)
		VALUES (?, ?, ?, '$argon2id$stub', ?, 'engineer', 1, ?, ?)
		"#,
	)
	.bind(user_id.to_string())
	.bind(format!("user_{tag}"))
	.bind(format!("user_{tag}@example.com"))
	.bind(format!("Test User {tag}"))
	.bind(&now)
	.bind(&now)
	.execute(pool)
	.await
	.unwrap();
}
