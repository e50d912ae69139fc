//! Station group handlers: CRUD plus reference-price management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use super::{parse_decimal, parse_fuel};
use crate::api::dto::{
    GroupListResponse, GroupRequest, GroupResponse, PaginationParams, ReferencePriceEntry,
    SetReferencePricesRequest,
};
use crate::app_state::AppState;
use crate::domain::GroupId;
use crate::error::ApiError;

/// `POST /groups` — Register a station group.
async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<GroupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let group = state.catalog.create_group(req.name).await?;
    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

/// `GET /groups` — List groups with pagination.
async fn list_groups(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let groups = state.catalog.list_groups().await?;
    let (data, pagination) = params.paginate(groups);
    Ok(Json(GroupListResponse {
        data: data.into_iter().map(GroupResponse::from).collect(),
        pagination,
    }))
}

/// `GET /groups/{id}` — Get one group with its reference prices.
async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let (group, prices) = state.catalog.get_group(GroupId::from_uuid(id)).await?;
    let mut response = GroupResponse::from(group);
    response.reference_prices = Some(
        prices
            .into_iter()
            .map(ReferencePriceEntry::from)
            .collect(),
    );
    Ok(Json(response))
}

/// `PUT /groups/{id}` — Rename a group.
async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<GroupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let group = state
        .catalog
        .update_group(GroupId::from_uuid(id), req.name)
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// `DELETE /groups/{id}` — Delete a group; member stations detach.
async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.catalog.delete_group(GroupId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /groups/{id}/reference-prices` — Upsert per-fuel targets.
async fn set_reference_prices(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<SetReferencePricesRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut prices = Vec::with_capacity(req.prices.len());
    for entry in req.prices {
        let fuel = parse_fuel(&entry.fuel)?;
        let price = parse_decimal("price_per_liter", &entry.price_per_liter)?;
        prices.push((fuel, price));
    }
    state
        .pricing
        .set_reference_prices(GroupId::from_uuid(id), prices)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(create_group).get(list_groups))
        .route(
            "/groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route("/groups/{id}/reference-prices", put(set_reference_prices))
}
