//! Supplier CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    PaginationParams, SupplierListResponse, SupplierRequest, SupplierResponse,
};
use crate::app_state::AppState;
use crate::domain::SupplierId;
use crate::error::{ApiError, ErrorResponse};
use crate::service::catalog_service::SupplierInput;

impl From<SupplierRequest> for SupplierInput {
    fn from(req: SupplierRequest) -> Self {
        Self {
            name: req.name,
            tax_id: req.tax_id,
            base_city_id: req.base_city_id,
            payment_term_days: req.payment_term_days,
            active: req.active,
        }
    }
}

/// `POST /suppliers` — Register a supplier.
///
/// # Errors
///
/// Returns [`ApiError`] when the base city is missing or not a supply
/// base.
#[utoipa::path(
    post,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    summary = "Register a supplier",
    description = "Registers a supplier loading from a supply-base city. The payment term in days drives financial cost in best-cost resolution.",
    request_body = SupplierRequest,
    responses(
        (status = 201, description = "Supplier created", body = SupplierResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Base city not found", body = ErrorResponse),
    )
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(req): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state.catalog.create_supplier(req.into()).await?;
    Ok((StatusCode::CREATED, Json(SupplierResponse::from(supplier))))
}

/// `GET /suppliers` — List suppliers with pagination.
///
/// # Errors
///
/// Returns [`ApiError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/suppliers",
    tag = "Suppliers",
    summary = "List suppliers",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated supplier list", body = SupplierListResponse),
    )
)]
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let suppliers = state.catalog.list_suppliers().await?;
    let (data, pagination) = params.paginate(suppliers);
    Ok(Json(SupplierListResponse {
        data: data.into_iter().map(SupplierResponse::from).collect(),
        pagination,
    }))
}

/// `GET /suppliers/{id}` — Get one supplier.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the supplier does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    summary = "Get supplier details",
    params(("id" = uuid::Uuid, Path, description = "Supplier UUID")),
    responses(
        (status = 200, description = "Supplier details", body = SupplierResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    )
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .catalog
        .get_supplier(SupplierId::from_uuid(id))
        .await?;
    Ok(Json(SupplierResponse::from(supplier)))
}

/// `PUT /suppliers/{id}` — Update a supplier.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the supplier does not exist.
#[utoipa::path(
    put,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    summary = "Update a supplier",
    params(("id" = uuid::Uuid, Path, description = "Supplier UUID")),
    request_body = SupplierRequest,
    responses(
        (status = 200, description = "Supplier updated", body = SupplierResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    )
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let supplier = state
        .catalog
        .update_supplier(SupplierId::from_uuid(id), req.into())
        .await?;
    Ok(Json(SupplierResponse::from(supplier)))
}

/// `DELETE /suppliers/{id}` — Delete a supplier.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the supplier does not exist.
#[utoipa::path(
    delete,
    path = "/api/v1/suppliers/{id}",
    tag = "Suppliers",
    summary = "Delete a supplier",
    params(("id" = uuid::Uuid, Path, description = "Supplier UUID")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    )
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .catalog
        .delete_supplier(SupplierId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/suppliers", post(create_supplier).get(list_suppliers))
        .route(
            "/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}
