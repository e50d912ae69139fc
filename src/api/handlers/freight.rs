//! Freight route handlers: quote, list, delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};

use super::{parse_decimal, parse_vehicle};
use crate::api::dto::{RouteListParams, RouteResponse, SubmitRouteRequest};
use crate::app_state::AppState;
use crate::domain::RouteId;
use crate::error::ApiError;
use crate::service::pricing_service::RouteInput;

/// `POST /freight-routes` — Quote a freight rate; an existing rate for
/// the same (origin, destination, vehicle) is replaced.
async fn submit_route(
    State(state): State<AppState>,
    Json(req): Json<SubmitRouteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RouteInput {
        origin_city_id: req.origin_city_id,
        dest_city_id: req.dest_city_id,
        vehicle: parse_vehicle(&req.vehicle)?,
        cost_per_liter: parse_decimal("cost_per_liter", &req.cost_per_liter)?,
    };
    let route = state.pricing.submit_route(input).await?;
    Ok((StatusCode::CREATED, Json(RouteResponse::from(route))))
}

/// `GET /freight-routes` — List routes, optionally filtered by origin
/// and/or destination city.
async fn list_routes(
    State(state): State<AppState>,
    Query(params): Query<RouteListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let routes = state
        .pricing
        .list_routes(params.origin_city_id, params.dest_city_id)
        .await?;
    let data: Vec<RouteResponse> = routes.into_iter().map(RouteResponse::from).collect();
    Ok(Json(data))
}

/// `DELETE /freight-routes/{id}` — Remove a route.
async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.pricing.delete_route(RouteId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Freight routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/freight-routes", post(submit_route).get(list_routes))
        .route("/freight-routes/{id}", delete(delete_route))
}
