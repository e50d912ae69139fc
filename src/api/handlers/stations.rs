//! Station CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::{parse_decimal, parse_flag};
use crate::api::dto::{
    PaginationParams, StationListResponse, StationRequest, StationResponse,
};
use crate::app_state::AppState;
use crate::domain::StationId;
use crate::error::ApiError;
use crate::service::catalog_service::StationInput;

fn to_input(req: StationRequest) -> Result<StationInput, ApiError> {
    let flag = parse_flag(&req.flag)?;
    let monthly_volume_liters = req
        .monthly_volume_liters
        .as_deref()
        .map(|v| parse_decimal("monthly_volume_liters", v))
        .transpose()?;
    Ok(StationInput {
        name: req.name,
        city_id: req.city_id,
        flag,
        group_id: req.group_id,
        monthly_volume_liters,
        active: req.active,
    })
}

/// `POST /stations` — Register a station.
async fn create_station(
    State(state): State<AppState>,
    Json(req): Json<StationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state.catalog.create_station(to_input(req)?).await?;
    Ok((StatusCode::CREATED, Json(StationResponse::from(station))))
}

/// `GET /stations` — List stations with pagination.
async fn list_stations(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let stations = state.catalog.list_stations().await?;
    let (data, pagination) = params.paginate(stations);
    Ok(Json(StationListResponse {
        data: data.into_iter().map(StationResponse::from).collect(),
        pagination,
    }))
}

/// `GET /stations/{id}` — Get one station.
async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state.catalog.get_station(StationId::from_uuid(id)).await?;
    Ok(Json(StationResponse::from(station)))
}

/// `PUT /stations/{id}` — Update a station.
async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<StationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let station = state
        .catalog
        .update_station(StationId::from_uuid(id), to_input(req)?)
        .await?;
    Ok(Json(StationResponse::from(station)))
}

/// `DELETE /stations/{id}` — Delete a station.
async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .catalog
        .delete_station(StationId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Station routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stations", post(create_station).get(list_stations))
        .route(
            "/stations/{id}",
            get(get_station).put(update_station).delete(delete_station),
        )
}
