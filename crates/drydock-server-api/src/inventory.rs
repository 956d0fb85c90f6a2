// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use drydock_server_db::InventoryItem;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

use crate::users::default_limit;

/// A stock item in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InventoryItemResponse {
	pub id: Uuid,
	pub item_name: String,
	pub category: Option<String>,
	pub description: Option<String>,
	pub quantity: i64,
	pub unit: Option<String>,
	pub unit_price: Option<f64>,
	pub reorder_level: i64,
	pub supplier_name: Option<String>,
	pub location: Option<String>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl From<InventoryItem> for InventoryItemResponse {
	fn from(item: InventoryItem) -> Self {
		Self {
			id: item.id.into_inner(),
			item_name: item.item_name,
			category: item.category,
			description: item.description,
			quantity: item.quantity,
			unit: item.unit,
			unit_price: item.unit_price,
			reorder_level: item.reorder_level,
			supplier_name: item.supplier_name,
			location: item.location,
			created_at: item.created_at,
			updated_at: item.updated_at,
		}
	}
}

/// Request to add a stock item.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateInventoryItemRequest {
	pub item_name: String,
	pub category: Option<String>,
	pub description: Option<String>,
	#[serde(default)]
	pub quantity: i64,
	pub unit: Option<String>,
	pub unit_price: Option<f64>,
	#[serde(default = "default_reorder_level")]
	pub reorder_level: i64,
	pub supplier_name: Option<String>,
	pub location: Option<String>,
}

fn default_reorder_level() -> i64 {
	10
}

/// Request to update a stock item. Absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UpdateInventoryItemRequest {
	pub item_name: Option<String>,
	pub category: Option<String>,
	pub description: Option<String>,
	pub quantity: Option<i64>,
	pub unit: Option<String>,
	pub unit_price: Option<f64>,
	pub reorder_level: Option<i64>,
	pub supplier_name: Option<String>,
	pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(IntoParams))]
pub struct ListInventoryParams {
	#[serde(default)]
	pub skip: i64,
	#[serde(default = "default_limit")]
	pub limit: i64,
}
