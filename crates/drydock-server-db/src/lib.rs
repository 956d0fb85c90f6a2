// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # drydock-server-db
//!
//! Centralized persistence layer for the Drydock server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each domain has two components:
//! - **`*Store` trait**: Defines the interface (e.g., `UserStore`, `ProjectStore`)
//! - **`*Repository` struct**: Concrete implementation holding a `SqlitePool`
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait FooStore: Send + Sync {
//!     async fn get_foo(&self, id: &FooId) -> Result<Option<Foo>, DbError>;
//!     async fn create_foo(&self, foo: &Foo) -> Result<(), DbError>;
//! }
//!
//! pub struct FooRepository {
//!     pool: SqlitePool,
//! }
//!
//! impl FooRepository {
//!     pub fn new(pool: SqlitePool) -> Self { Self { pool } }
//! }
//!
//! #[async_trait]
//! impl FooStore for FooRepository { /* delegate to inherent methods */ }
//! ```
//!
//! ## Row Visibility Filters
//!
//! Listing and counting methods on projects, tasks, and blueprints take a
//! [`RowFilter`](drydock_server_auth::policy::RowFilter) produced by the
//! policy engine. [`compile`] turns the filter into a WHERE fragment with
//! positional binds, so the set of rows a caller can list and the set it can
//! count are always the same shape. Repositories never widen a filter; a
//! caller that wants everything must hold a filter that says so.
//!
//! ## Error Handling
//!
//! Use [`DbError`] variants appropriately:
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | Resource must exist but doesn't (update/delete by ID, foreign key lookup) |
//! | `Conflict` | Unique constraint violation, concurrent modification, business rule conflict |
//! | `Sqlx` | Let sqlx errors propagate via `?` for unexpected database errors |
//! | `Internal` | Data corruption, invalid stored data (e.g., unparseable UUID) |
//!
//! **`Option<T>` vs `NotFound`:**
//! - Return `Result<Option<T>>` for lookups where absence is normal (get by ID, get by email)
//! - Return `DbError::NotFound` only when the caller provided an ID that should exist
//!
//! ## Return Type Conventions
//!
//! | Operation | Return type |
//! |-----------|-------------|
//! | Get by ID/unique key | `Result<Option<T>>` |
//! | List/search | `Result<Vec<T>>` |
//! | Create | `Result<()>` or `Result<Id>` if ID is generated |
//! | Update | `Result<()>` |
//! | Delete | `Result<bool>` (true if deleted) or `Result<()>` |
//! | Exists/count | `Result<bool>` or `Result<i64>` |
//!
//! ## Method Naming
//!
//! - `get_*_by_*` - Single item lookup (returns `Option<T>`)
//! - `list_*` - Multiple items, possibly filtered
//! - `create_*` - Insert new record
//! - `update_*` - Modify existing record
//! - `delete_*` / `soft_delete_*` - Remove or mark as deleted
//! - `count_*` - Return count
//!
//! ## Testing
//!
//! Tests use in-memory SQLite with manually created schemas:
//!
//! ```rust,ignore
//! async fn create_test_pool() -> SqlitePool {
//!     let pool = SqlitePool::connect(":memory:").await.unwrap();
//!     sqlx::query("CREATE TABLE ...").execute(&pool).await.unwrap();
//!     pool
//! }
//!
//! #[tokio::test]
//! async fn test_example() {
//!     let pool = create_test_pool().await;
//!     let repo = FooRepository::new(pool);
//!     // test operations...
//! }
//! ```
//!
//! Prefer property-based tests (`proptest`) for filter compilation and
//! pagination bounds.
//!
//! ## Adding a New Repository
//!
//! 1. Create `src/foo.rs` with module doc explaining the domain
//! 2. Define `FooStore` trait with all async methods
//! 3. Define `FooRepository` struct with `pool: SqlitePool`
//! 4. Implement inherent methods on `FooRepository` with `#[tracing::instrument]`
//! 5. Implement `FooStore for FooRepository` by delegating to inherent methods
//! 6. Add `pub mod foo;` and re-exports to this file
//! 7. Add migration to `drydock-server/migrations/NNN_foo.sql`
//! 8. Add tests (unit + proptest for invariants)
//!
//! ## Instrumentation
//!
//! Use `#[tracing::instrument]` on all public methods:
//!
//! ```rust,ignore
//! #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
//! pub async fn create_user(&self, user: &User) -> Result<(), DbError> { ... }
//! ```
//!
//! Skip `self` and large/sensitive arguments; include identifying fields.

pub mod blueprint;
mod error;
pub mod filter;
pub mod inventory;
pub mod pool;
pub mod project;
pub mod settings;
pub mod task;
pub mod token;
pub mod user;

#[cfg(test)]
pub mod testing;

pub use blueprint::{Blueprint, BlueprintDetail, BlueprintRepository, BlueprintStore};
pub use error::{DbError, Result};
pub use filter::{compile, SqlFilter};
pub use inventory::{InventoryItem, InventoryRepository, InventoryStore};
pub use pool::create_pool;
pub use project::{
	Project, ProjectRepository, ProjectStatus, ProjectStore, TeamMember,
};
pub use settings::{SettingsRepository, SettingsStore, Theme, UserSettings};
pub use task::{Task, TaskDetail, TaskPriority, TaskRepository, TaskStatus, TaskStore};
pub use token::{AccessTokenRepository, AccessTokenStore};
pub use user::{UserRepository, UserStore};
