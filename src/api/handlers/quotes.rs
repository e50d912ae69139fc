//! Daily price quote handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use super::{parse_decimal, parse_flag, parse_fuel};
use crate::api::dto::{QuoteListParams, QuoteResponse, SubmitQuoteRequest};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::service::pricing_service::QuoteInput;

/// `POST /price-quotes` — Submit a daily price quote.
///
/// # Errors
///
/// Returns [`ApiError`] on invalid input or unknown supplier.
#[utoipa::path(
    post,
    path = "/api/v1/price-quotes",
    tag = "Pricing",
    summary = "Submit a daily price quote",
    description = "Registers one supplier's price for a fuel on a business date. A quote already stored for the same supplier, fuel, and date is replaced.",
    request_body = SubmitQuoteRequest,
    responses(
        (status = 201, description = "Quote stored", body = QuoteResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Supplier not found", body = ErrorResponse),
    )
)]
pub async fn submit_quote(
    State(state): State<AppState>,
    Json(req): Json<SubmitQuoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = QuoteInput {
        supplier_id: req.supplier_id,
        base_city_id: req.base_city_id,
        fuel: parse_fuel(&req.fuel)?,
        quote_date: req.quote_date,
        price_per_liter: parse_decimal("price_per_liter", &req.price_per_liter)?,
        flag_restriction: req
            .flag_restriction
            .as_deref()
            .map(parse_flag)
            .transpose()?,
    };
    let quote = state.pricing.submit_quote(input).await?;
    Ok((StatusCode::CREATED, Json(QuoteResponse::from(quote))))
}

/// `GET /price-quotes` — List quotes for a business date.
///
/// # Errors
///
/// Returns [`ApiError`] on an invalid fuel filter.
#[utoipa::path(
    get,
    path = "/api/v1/price-quotes",
    tag = "Pricing",
    summary = "List quotes for a date",
    params(QuoteListParams),
    responses(
        (status = 200, description = "Quotes on the date", body = Vec<QuoteResponse>),
        (status = 400, description = "Invalid fuel filter", body = ErrorResponse),
    )
)]
pub async fn list_quotes(
    State(state): State<AppState>,
    Query(params): Query<QuoteListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let fuel = params.fuel.as_deref().map(parse_fuel).transpose()?;
    let quotes = state
        .pricing
        .quotes_on(params.date, fuel, params.supplier_id)
        .await?;
    let data: Vec<QuoteResponse> = quotes.into_iter().map(QuoteResponse::from).collect();
    Ok(Json(data))
}

/// Quote routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/price-quotes", post(submit_quote).get(list_quotes))
}
