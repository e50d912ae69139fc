//! Dashboard handlers: the comparative and analytical views.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::{parse_decimal, parse_fuel, parse_vehicle};
use crate::api::dto::{
    BestCostParams, CostBreakdownDto, DeviationDto, DeviationParams, FinancialSummaryDto,
    PeriodParams, PriceVariationDto, PriceVariationParams, VolumeBucketDto, VolumeParams,
};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `GET /dashboard/best-cost` — Best supply options for a station.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if the station does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/best-cost",
    tag = "Dashboard",
    summary = "Resolve best supply costs",
    description = "For a station and fuel on a business date, ranks every admissible supplier and freight combination by total cost per liter (product + freight + payment-term amortization). Quotes without an admissible freight route are excluded.",
    params(BestCostParams),
    responses(
        (status = 200, description = "Options, cheapest first", body = Vec<CostBreakdownDto>),
        (status = 404, description = "Station not found", body = ErrorResponse),
    )
)]
pub async fn best_cost(
    State(state): State<AppState>,
    Query(params): Query<BestCostParams>,
) -> Result<impl IntoResponse, ApiError> {
    let fuel = parse_fuel(&params.fuel)?;
    let vehicle = params.vehicle.as_deref().map(parse_vehicle).transpose()?;
    let costs = state
        .pricing
        .best_costs(params.station_id, fuel, params.date, vehicle)
        .await?;
    let data: Vec<CostBreakdownDto> = costs.into_iter().map(CostBreakdownDto::from).collect();
    Ok(Json(data))
}

/// `GET /dashboard/price-deviations` — Groups vs. reference prices.
///
/// # Errors
///
/// Returns [`ApiError`] on an invalid fuel or threshold.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/price-deviations",
    tag = "Dashboard",
    summary = "Detect group price deviations",
    description = "Compares each group's best achievable cost against its per-fuel reference price and flags deviations beyond the threshold in either direction.",
    params(DeviationParams),
    responses(
        (status = 200, description = "Deviations, worst first", body = Vec<DeviationDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn price_deviations(
    State(state): State<AppState>,
    Query(params): Query<DeviationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let fuel = parse_fuel(&params.fuel)?;
    let threshold = params
        .threshold_pct
        .as_deref()
        .map(|t| parse_decimal("threshold_pct", t))
        .transpose()?
        .unwrap_or(state.deviation_threshold_pct);
    let deviations = state
        .pricing
        .group_deviations(fuel, params.date, threshold)
        .await?;
    let data: Vec<DeviationDto> = deviations.into_iter().map(DeviationDto::from).collect();
    Ok(Json(data))
}

/// `GET /dashboard/volume` — Volume and spend per bucket.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] on an inverted range.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/volume",
    tag = "Dashboard",
    summary = "Volume analytics",
    description = "Totals liters and landed spend across a date range, bucketed by supplier, fuel, or station. Cancelled orders are excluded.",
    params(VolumeParams),
    responses(
        (status = 200, description = "Buckets, largest first", body = Vec<VolumeBucketDto>),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    )
)]
pub async fn volume(
    State(state): State<AppState>,
    Query(params): Query<VolumeParams>,
) -> Result<impl IntoResponse, ApiError> {
    let buckets = state
        .orders
        .volume_dashboard(params.from, params.to, params.group_by)
        .await?;
    let data: Vec<VolumeBucketDto> = buckets.into_iter().map(VolumeBucketDto::from).collect();
    Ok(Json(data))
}

/// `GET /dashboard/financial-summary` — Spend totals for a period.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] on an inverted range.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/financial-summary",
    tag = "Dashboard",
    summary = "Financial summary",
    description = "Product, freight, and total spend plus the volume-weighted average cost per liter across a date range.",
    params(PeriodParams),
    responses(
        (status = 200, description = "Period totals", body = FinancialSummaryDto),
        (status = 400, description = "Invalid range", body = ErrorResponse),
    )
)]
pub async fn financial_summary(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .orders
        .financial_dashboard(params.from, params.to)
        .await?;
    Ok(Json(FinancialSummaryDto::from(summary)))
}

/// `GET /dashboard/price-variation` — Per-supplier price movement.
///
/// # Errors
///
/// Returns [`ApiError`] on an invalid fuel or inverted range.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/price-variation",
    tag = "Dashboard",
    summary = "Price variation analytics",
    description = "Per-supplier quote series for one fuel across a date range: first, last, min, max, average, and percent variation.",
    params(PriceVariationParams),
    responses(
        (status = 200, description = "One row per supplier", body = Vec<PriceVariationDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn price_variation(
    State(state): State<AppState>,
    Query(params): Query<PriceVariationParams>,
) -> Result<impl IntoResponse, ApiError> {
    let fuel = parse_fuel(&params.fuel)?;
    let views = state
        .pricing
        .price_variation(fuel, params.from, params.to)
        .await?;
    let data: Vec<PriceVariationDto> = views.into_iter().map(PriceVariationDto::from).collect();
    Ok(Json(data))
}

/// Dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/best-cost", get(best_cost))
        .route("/dashboard/price-deviations", get(price_deviations))
        .route("/dashboard/volume", get(volume))
        .route("/dashboard/financial-summary", get(financial_summary))
        .route("/dashboard/price-variation", get(price_variation))
}
