// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Inventory catalogue handlers.
//!
//! The catalogue is shop-wide: every active role reads the same rows, and
//! only admin and project manager may change them.

use axum::{
	extract::{Path, Query, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use drydock_server_api::{
	CreateInventoryItemRequest, InventoryItemResponse, ListInventoryParams,
	UpdateInventoryItemRequest,
};
use drydock_server_auth::policy::{decide, Action, ResourceCtx};
use drydock_server_auth::types::ItemId;
use drydock_server_db::InventoryItem;
use uuid::Uuid;

use crate::{
	api::AppState,
	auth_middleware::RequireAuth,
	error::{ensure_allowed, ServerError},
	pagination::{clamp_limit, clamp_skip},
};

/// GET /api/inventory - List the full catalogue.
#[utoipa::path(
	get,
	path = "/api/inventory",
	params(ListInventoryParams),
	responses(
		(status = 200, description = "Stock items", body = Vec<InventoryItemResponse>),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn list_inventory(
	RequireAuth(_current_user): RequireAuth,
	State(state): State<AppState>,
	Query(params): Query<ListInventoryParams>,
) -> Result<impl IntoResponse, ServerError> {
	let limit = clamp_limit(params.limit);
	let skip = clamp_skip(params.skip);

	let items = state.inventory_repo.list_items(limit, skip).await?;

	let responses: Vec<InventoryItemResponse> =
		items.into_iter().map(InventoryItemResponse::from).collect();
	Ok(Json(responses))
}

/// GET /api/inventory/low-stock - Items at or below their reorder level.
#[utoipa::path(
	get,
	path = "/api/inventory/low-stock",
	responses(
		(status = 200, description = "Items needing reorder", body = Vec<InventoryItemResponse>),
		(status = 401, description = "Not authenticated", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn list_low_stock(
	RequireAuth(_current_user): RequireAuth,
	State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
	let items = state.inventory_repo.list_low_stock_items().await?;

	let responses: Vec<InventoryItemResponse> =
		items.into_iter().map(InventoryItemResponse::from).collect();
	Ok(Json(responses))
}

/// GET /api/inventory/{item_id} - Look up one stock item.
#[utoipa::path(
	get,
	path = "/api/inventory/{item_id}",
	params(("item_id" = Uuid, Path, description = "Inventory item ID")),
	responses(
		(status = 200, description = "Stock item", body = InventoryItemResponse),
		(status = 404, description = "Item not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn get_inventory_item(
	RequireAuth(_current_user): RequireAuth,
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let item_id = ItemId::new(item_id);

	let item = state
		.inventory_repo
		.get_item_by_id(&item_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Inventory item not found".to_string()))?;

	Ok(Json(InventoryItemResponse::from(item)))
}

/// POST /api/inventory - Add a stock item.
#[utoipa::path(
	post,
	path = "/api/inventory",
	request_body = CreateInventoryItemRequest,
	responses(
		(status = 201, description = "Item created", body = InventoryItemResponse),
		(status = 403, description = "Crew roles may not change stock", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn create_inventory_item(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<CreateInventoryItemRequest>,
) -> Result<impl IntoResponse, ServerError> {
	ensure_allowed(&decide(
		&current_user.principal,
		Action::Create,
		&ResourceCtx::inventory(),
	))?;

	let now = chrono::Utc::now();
	let item = InventoryItem {
		id: ItemId::generate(),
		item_name: request.item_name,
		category: request.category,
		description: request.description,
		quantity: request.quantity,
		unit: request.unit,
		unit_price: request.unit_price,
		reorder_level: request.reorder_level,
		supplier_name: request.supplier_name,
		location: request.location,
		created_at: now,
		updated_at: now,
	};

	state.inventory_repo.create_item(&item).await?;

	tracing::info!(item_id = %item.id, created_by = %current_user.user.id, "created inventory item");

	Ok((StatusCode::CREATED, Json(InventoryItemResponse::from(item))))
}

/// PUT /api/inventory/{item_id} - Update a stock item.
#[utoipa::path(
	put,
	path = "/api/inventory/{item_id}",
	params(("item_id" = Uuid, Path, description = "Inventory item ID")),
	request_body = UpdateInventoryItemRequest,
	responses(
		(status = 200, description = "Updated item", body = InventoryItemResponse),
		(status = 403, description = "Crew roles may not change stock", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Item not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn update_inventory_item(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
	Json(request): Json<UpdateInventoryItemRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let item_id = ItemId::new(item_id);

	let mut item = state
		.inventory_repo
		.get_item_by_id(&item_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Inventory item not found".to_string()))?;

	ensure_allowed(&decide(
		&current_user.principal,
		Action::Update,
		&ResourceCtx::inventory(),
	))?;

	if let Some(item_name) = request.item_name {
		item.item_name = item_name;
	}
	if let Some(category) = request.category {
		item.category = Some(category);
	}
	if let Some(description) = request.description {
		item.description = Some(description);
	}
	if let Some(quantity) = request.quantity {
		item.quantity = quantity;
	}
	if let Some(unit) = request.unit {
		item.unit = Some(unit);
	}
	if let Some(unit_price) = request.unit_price {
		item.unit_price = Some(unit_price);
	}
	if let Some(reorder_level) = request.reorder_level {
		item.reorder_level = reorder_level;
	}
	if let Some(supplier_name) = request.supplier_name {
		item.supplier_name = Some(supplier_name);
	}
	if let Some(location) = request.location {
		item.location = Some(location);
	}
	item.updated_at = chrono::Utc::now();

	state.inventory_repo.update_item(&item).await?;

	tracing::info!(item_id = %item.id, updated_by = %current_user.user.id, "updated inventory item");

	Ok(Json(InventoryItemResponse::from(item)))
}

/// DELETE /api/inventory/{item_id} - Remove a stock item.
#[utoipa::path(
	delete,
	path = "/api/inventory/{item_id}",
	params(("item_id" = Uuid, Path, description = "Inventory item ID")),
	responses(
		(status = 204, description = "Item deleted"),
		(status = 403, description = "Crew roles may not change stock", body = drydock_server_api::ErrorResponse),
		(status = 404, description = "Item not found", body = drydock_server_api::ErrorResponse)
	),
	tag = "inventory"
)]
#[axum::debug_handler]
pub async fn delete_inventory_item(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ServerError> {
	let item_id = ItemId::new(item_id);

	state
		.inventory_repo
		.get_item_by_id(&item_id)
		.await?
		.ok_or_else(|| ServerError::NotFound("Inventory item not found".to_string()))?;

	ensure_allowed(&decide(
		&current_user.principal,
		Action::Delete,
		&ResourceCtx::inventory(),
	))?;

	state.inventory_repo.delete_item(&item_id).await?;

	tracing::info!(item_id = %item_id, deleted_by = %current_user.user.id, "deleted inventory item");

	Ok(StatusCode::NO_CONTENT)
}
