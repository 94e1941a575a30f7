//! Item CRUD handlers.
//!
//! Request-shape validation (blank id, missing body or attributes, limit
//! format) lives here; everything the engine can judge for itself is
//! delegated and mapped through [`ApiError`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    handlers::ApiError,
    models::{CreateItemRequest, ItemResponse, ListItemsResponse},
    state::AppState,
};

/// Query parameters for listing items.
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Resume token from a previous page.
    pub cursor: Option<String>,
    /// Page size; kept as a string so a malformed value maps to
    /// INVALID_LIMIT instead of a framework rejection.
    pub limit: Option<String>,
}

/// Create a new item (POST /items/{id}).
pub async fn create_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("MISSING_ID", "ID is required in path"));
    }
    if body.trim().is_empty() {
        return Err(ApiError::bad_request(
            "MISSING_BODY",
            "Request body is required",
        ));
    }

    let request: CreateItemRequest = serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(%err, "invalid JSON in request body");
        ApiError::bad_request("INVALID_JSON", "Invalid JSON format")
    })?;

    let attributes = match request.attributes {
        Some(attributes) if !attributes.is_empty() => attributes,
        _ => {
            return Err(ApiError::bad_request(
                "MISSING_ATTRIBUTES",
                "Attributes are required",
            ))
        }
    };

    let item = state.engine.create_item(&id, attributes).await?;
    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Move an item from `created` to `in_progress` (PUT /items/{id}).
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("MISSING_ID", "ID is required in path"));
    }

    let item = state.engine.transition_item(&id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// Delete an item in whichever status it holds (DELETE /items/{id}).
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request("MISSING_ID", "ID is required in path"));
    }

    state.engine.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List items with cursor-based pagination (GET /items).
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<ListItemsResponse>, ApiError> {
    let limit = match query.limit.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ApiError::bad_request("INVALID_LIMIT", "Limit must be a positive integer")
        })?),
    };

    let page = state
        .engine
        .list_items(query.cursor.as_deref(), limit)
        .await?;
    Ok(Json(ListItemsResponse::from(page)))
}

/// Fallback for known paths hit with an unsupported verb.
pub async fn unsupported_method() -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        "UNSUPPORTED_METHOD",
        "Method not allowed",
    )
}
