//! City CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CityListResponse, CityRequest, CityResponse, PaginationParams};
use crate::app_state::AppState;
use crate::domain::CityId;
use crate::error::{ApiError, ErrorResponse};
use crate::service::catalog_service::CityInput;

impl From<CityRequest> for CityInput {
    fn from(req: CityRequest) -> Self {
        Self {
            name: req.name,
            state: req.state,
            is_supply_base: req.is_supply_base,
        }
    }
}

/// `POST /cities` — Register a city.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input.
#[utoipa::path(
    post,
    path = "/api/v1/cities",
    tag = "Cities",
    summary = "Register a city",
    request_body = CityRequest,
    responses(
        (status = 201, description = "City created", body = CityResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_city(
    State(state): State<AppState>,
    Json(req): Json<CityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let city = state.catalog.create_city(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CityResponse::from(city))))
}

/// `GET /cities` — List cities with pagination.
///
/// # Errors
///
/// Returns [`ApiError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    tag = "Cities",
    summary = "List cities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated city list", body = CityListResponse),
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let cities = state.catalog.list_cities().await?;
    let (data, pagination) = params.paginate(cities);
    Ok(Json(CityListResponse {
        data: data.into_iter().map(CityResponse::from).collect(),
        pagination,
    }))
}

/// `GET /cities/{id}` — Get one city.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the city does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    summary = "Get city details",
    params(("id" = uuid::Uuid, Path, description = "City UUID")),
    responses(
        (status = 200, description = "City details", body = CityResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let city = state.catalog.get_city(CityId::from_uuid(id)).await?;
    Ok(Json(CityResponse::from(city)))
}

/// `PUT /cities/{id}` — Update a city.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the city does not exist.
#[utoipa::path(
    put,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    summary = "Update a city",
    params(("id" = uuid::Uuid, Path, description = "City UUID")),
    request_body = CityRequest,
    responses(
        (status = 200, description = "City updated", body = CityResponse),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<CityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let city = state
        .catalog
        .update_city(CityId::from_uuid(id), req.into())
        .await?;
    Ok(Json(CityResponse::from(city)))
}

/// `DELETE /cities/{id}` — Delete a city.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the city does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    summary = "Delete a city",
    params(("id" = uuid::Uuid, Path, description = "City UUID")),
    responses(
        (status = 204, description = "City deleted"),
        (status = 404, description = "City not found", body = ErrorResponse),
    )
)]
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.catalog.delete_city(CityId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// City routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", post(create_city).get(list_cities))
        .route(
            "/cities/{id}",
            get(get_city).put(update_city).delete(delete_city),
        )
}
