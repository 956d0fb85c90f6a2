// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inventory repository for database operations.
//!
//! Inventory is a single shop-wide catalog: every authenticated user sees all
//! of it, so listings take no row filter. An item is low on stock when its
//! quantity has fallen to or below its reorder level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drydock_server_auth::ItemId;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::user::parse_timestamp;

/// A stock item in the shop catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
	pub id: ItemId,
	pub item_name: String,
	pub category: Option<String>,
	pub description: Option<String>,
	pub quantity: i64,
	pub unit: Option<String>,
	pub unit_price: Option<f64>,
	/// Quantity at or below which the item counts as low stock.
	pub reorder_level: i64,
	pub supplier_name: Option<String>,
	pub location: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
	pub fn is_low_stock(&self) -> bool {
		self.quantity <= self.reorder_level
	}
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
	async fn create_item(&self, item: &InventoryItem) -> Result<(), DbError>;
	async fn get_item_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, DbError>;
	async fn update_item(&self, item: &InventoryItem) -> Result<(), DbError>;
	async fn delete_item(&self, id: &ItemId) -> Result<(), DbError>;
	async fn list_items(&self, limit: i64, offset: i64) -> Result<Vec<InventoryItem>, DbError>;
	async fn list_low_stock_items(&self) -> Result<Vec<InventoryItem>, DbError>;
	async fn count_items(&self) -> Result<i64, DbError>;
	async fn count_low_stock_items(&self) -> Result<i64, DbError>;
}

/// Repository for inventory database operations.
#[derive(Clone)]
pub struct InventoryRepository {
	pool: SqlitePool,
}

impl InventoryRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
	pub async fn create_item(&self, item: &InventoryItem) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO inventory (
				id, item_name, category, description, quantity, unit,
				unit_price, reorder_level, supplier_name, location,
				created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(item.id.to_string())
		.bind(&item.item_name)
		.bind(&item.category)
		.bind(&item.description)
		.bind(item.quantity)
		.bind(&item.unit)
		.bind(item.unit_price)
		.bind(item.reorder_level)
		.bind(&item.supplier_name)
		.bind(&item.location)
		.bind(item.created_at.to_rfc3339())
		.bind(item.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(item_id = %item.id, "inventory item created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(item_id = %id))]
	pub async fn get_item_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, item_name, category, description, quantity, unit,
				   unit_price, reorder_level, supplier_name, location,
				   created_at, updated_at
			FROM inventory
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_item(&r)).transpose()
	}

	#[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
	pub async fn update_item(&self, item: &InventoryItem) -> Result<(), DbError> {
		let now = Utc::now().to_rfc3339();
		let result = sqlx::query(
			r#"
			UPDATE inventory
			SET item_name = ?, category = ?, description = ?, quantity = ?,
				unit = ?, unit_price = ?, reorder_level = ?,
				supplier_name = ?, location = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&item.item_name)
		.bind(&item.category)
		.bind(&item.description)
		.bind(item.quantity)
		.bind(&item.unit)
		.bind(item.unit_price)
		.bind(item.reorder_level)
		.bind(&item.supplier_name)
		.bind(&item.location)
		.bind(now)
		.bind(item.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("inventory item {}", item.id)));
		}

		tracing::debug!(item_id = %item.id, "inventory item updated");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(item_id = %id))]
	pub async fn delete_item(&self, id: &ItemId) -> Result<(), DbError> {
		let result = sqlx::query("DELETE FROM inventory WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("inventory item {id}")));
		}

		tracing::debug!(item_id = %id, "inventory item deleted");
		Ok(())
	}

	/// List items alphabetically by name.
	#[tracing::instrument(skip(self))]
	pub async fn list_items(
		&self,
		limit: i64,
		offset: i64,
	) -> Result<Vec<InventoryItem>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, item_name, category, description, quantity, unit,
				   unit_price, reorder_level, supplier_name, location,
				   created_at, updated_at
			FROM inventory
			ORDER BY item_name
			LIMIT ? OFFSET ?
			"#,
		)
		.bind(limit)
		.bind(offset)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_item).collect()
	}

	/// Items whose quantity is at or below their reorder level.
	#[tracing::instrument(skip(self))]
	pub async fn list_low_stock_items(&self) -> Result<Vec<InventoryItem>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, item_name, category, description, quantity, unit,
				   unit_price, reorder_level, supplier_name, location,
				   created_at, updated_at
			FROM inventory
			WHERE quantity <= reorder_level
			ORDER BY item_name
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_item).collect()
	}

	#[tracing::instrument(skip(self))]
	pub async fn count_items(&self) -> Result<i64, DbError> {
		let row = sqlx::query("SELECT COUNT(*) AS count FROM inventory")
			.fetch_one(&self.pool)
			.await?;

		Ok(row.get("count"))
	}

	#[tracing::instrument(skip(self))]
	pub async fn count_low_stock_items(&self) -> Result<i64, DbError> {
		let row = sqlx::query(
			"SELECT COUNT(*) AS count FROM inventory WHERE quantity <= reorder_level",
		)
		.fetch_one(&self.pool)
		.await?;

		Ok(row.get("count"))
	}
}

fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<InventoryItem, DbError> {
	let id_str: String = row.get("id");
	let id = Uuid::parse_str(&id_str)
		.map_err(|e| DbError::Internal(format!("Invalid item ID: {e}")))?;

	Ok(InventoryItem {
		id: ItemId::new(id),
		item_name: row.get("item_name"),
		category: row.get("category"),
		description: row.get("description"),
		quantity: row.get("quantity"),
		unit: row.get("unit"),
		unit_price: row.get("unit_price"),
		reorder_level: row.get("reorder_level"),
		supplier_name: row.get("supplier_name"),
		location: row.get("location"),
		created_at: parse_timestamp(row, "created_at")?,
		updated_at: parse_timestamp(row, "updated_at")?,
	})
}

#[async_trait]
impl InventoryStore for InventoryRepository {
	async fn create_item(&self, item: &InventoryItem) -> Result<(), DbError> {
		self.create_item(item).await
	}

	async fn get_item_by_id(&self, id: &ItemId) -> Result<Option<InventoryItem>, DbError> {
		self.get_item_by_id(id).await
	}

	async fn update_item(&self, item: &InventoryItem) -> Result<(), DbError> {
		self.update_item(item).await
	}

	async fn delete_item(&self, id: &ItemId) -> Result<(), DbError> {
		self.delete_item(id).await
	}

	async fn list_items(&self, limit: i64, offset: i64) -> Result<Vec<InventoryItem>, DbError> {
		self.list_items(limit, offset).await
	}

	async fn list_low_stock_items(&self) -> Result<Vec<InventoryItem>, DbError> {
		self.list_low_stock_items().await
	}

	async fn count_items(&self) -> Result<i64, DbError> {
		self.count_items().await
	}

	async fn count_low_stock_items(&self) -> Result<i64, DbError> {
		self.count_low_stock_items().await
	}
}
