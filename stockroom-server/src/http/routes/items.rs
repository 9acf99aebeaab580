//! Item endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::repos::{Item, ItemRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, RecordId};
use crate::http::server::AppState;
use crate::models::patch::{non_null, present};
use crate::models::{
    ItemName, ItemUpdate, NewItem, Pagination, PaginationParams, Price, Quantity, ValidationError,
};

/// Default threshold for `GET /items/low-stock`
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Create item request
#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub memo: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = ValidationError;

    fn try_from(req: CreateItemRequest) -> Result<Self, Self::Error> {
        NewItem::new(&req.name, req.memo, req.quantity, req.price)
    }
}

/// Partial item update: absent fields stay untouched, `memo: null` clears memo
#[derive(Deserialize, Default)]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub memo: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<Decimal>>,
}

impl TryFrom<UpdateItemRequest> for ItemUpdate {
    type Error = ValidationError;

    fn try_from(req: UpdateItemRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: non_null("name", req.name)?
                .map(|name| ItemName::new(&name))
                .transpose()?,
            memo: req.memo,
            quantity: non_null("quantity", req.quantity)?
                .map(Quantity::new)
                .transpose()?,
            price: non_null("price", req.price)?.map(Price::new).transpose()?,
        })
    }
}

/// Listing query: pagination plus optional name filter
///
/// Not `#[serde(flatten)]`: flattened query fields arrive as strings.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
}

impl ListItemsParams {
    fn pagination(&self) -> Pagination {
        Pagination::from(PaginationParams {
            skip: self.skip,
            limit: self.limit,
        })
    }
}

/// Low-stock query
#[derive(Debug, Default, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<i32>,
}

/// Item response
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub memo: Option<String>,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            name: i.name,
            memo: i.memo,
            quantity: i.quantity,
            price: i.price,
        }
    }
}

fn responses(items: Vec<Item>) -> Json<Vec<ItemResponse>> {
    Json(items.into_iter().map(ItemResponse::from).collect())
}

/// GET /items - list items, or search by name when `name` is non-empty
async fn list_items(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<ListItemsParams>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let page = params.pagination();
    let repo = ItemRepo::new(&state.pool);

    let items = match params.name.as_deref() {
        Some(name) if !name.is_empty() => repo.search_by_name(name, page).await?,
        _ => repo.list(page).await?,
    };

    Ok(responses(items))
}

/// POST /items - create a new item
async fn create_item(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let new = NewItem::try_from(req)?;
    let item = ItemRepo::new(&state.pool).create(new).await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// GET /items/low-stock - items at or below the threshold
async fn low_stock_items(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<LowStockParams>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let threshold = params.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let items = ItemRepo::new(&state.pool).low_stock(threshold).await?;

    Ok(responses(items))
}

/// GET /items/{id} - get a single item
async fn get_item(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = ItemRepo::new(&state.pool).get(id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// PUT /items/{id} - partial update
async fn update_item(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    ApiJson(req): ApiJson<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let update = ItemUpdate::try_from(req)?;
    let item = ItemRepo::new(&state.pool).update(id, update).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// DELETE /items/{id} - delete an item
async fn delete_item(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<StatusCode, ApiError> {
    ItemRepo::new(&state.pool).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    let collection = get(list_items).post(create_item);

    Router::new()
        .route("/items", collection.clone())
        .route("/items/", collection)
        .route("/items/low-stock", get(low_stock_items))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
}
