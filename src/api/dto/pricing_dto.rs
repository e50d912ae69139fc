//! Pricing DTOs: daily quotes, freight routes, and best-cost results.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::pricing::CostBreakdown;
use crate::domain::{CityId, FreightRoute, PriceQuote, QuoteId, RouteId, SupplierId};

/// Request body for `POST /price-quotes`. Submitting a second quote
/// for the same (supplier, fuel, date) replaces the first.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitQuoteRequest {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Loading city; defaults to the supplier's base when omitted.
    #[serde(default)]
    pub base_city_id: Option<CityId>,
    /// Fuel discriminator.
    pub fuel: String,
    /// Business date the price is valid for.
    pub quote_date: NaiveDate,
    /// Product price per liter, as a decimal string.
    pub price_per_liter: String,
    /// Optional flag restriction discriminator.
    #[serde(default)]
    pub flag_restriction: Option<String>,
}

/// Quote representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    /// Unique quote identifier.
    pub id: QuoteId,
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Loading city the price assumes.
    pub base_city_id: CityId,
    /// Fuel discriminator.
    pub fuel: String,
    /// Business date.
    pub quote_date: NaiveDate,
    /// Product price per liter, as a decimal string.
    pub price_per_liter: String,
    /// Flag restriction discriminator, when any.
    pub flag_restriction: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<PriceQuote> for QuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            id: quote.id,
            supplier_id: quote.supplier_id,
            base_city_id: quote.base_city_id,
            fuel: quote.fuel.as_str().to_string(),
            quote_date: quote.quote_date,
            price_per_liter: quote.price_per_liter.to_string(),
            flag_restriction: quote.flag_restriction.map(|f| f.as_str().to_string()),
            created_at: quote.created_at,
        }
    }
}

/// Query parameters for `GET /price-quotes`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct QuoteListParams {
    /// Business date to list quotes for.
    pub date: NaiveDate,
    /// Restrict to one fuel discriminator.
    #[serde(default)]
    pub fuel: Option<String>,
    /// Restrict to one supplier.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

/// Request body for `POST /freight-routes`. Submitting a second rate
/// for the same (origin, destination, vehicle) replaces the first.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRouteRequest {
    /// Loading city (base).
    pub origin_city_id: CityId,
    /// Delivery city.
    pub dest_city_id: CityId,
    /// Vehicle discriminator.
    pub vehicle: String,
    /// Freight cost per liter, as a decimal string.
    pub cost_per_liter: String,
}

/// Freight route representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct RouteResponse {
    /// Unique route identifier.
    pub id: RouteId,
    /// Loading city.
    pub origin_city_id: CityId,
    /// Delivery city.
    pub dest_city_id: CityId,
    /// Vehicle discriminator.
    pub vehicle: String,
    /// Freight cost per liter, as a decimal string.
    pub cost_per_liter: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<FreightRoute> for RouteResponse {
    fn from(route: FreightRoute) -> Self {
        Self {
            id: route.id,
            origin_city_id: route.origin_city_id,
            dest_city_id: route.dest_city_id,
            vehicle: route.vehicle.as_str().to_string(),
            cost_per_liter: route.cost_per_liter.to_string(),
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}

/// Query parameters for `GET /freight-routes`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RouteListParams {
    /// Restrict to routes loading from this city.
    #[serde(default)]
    pub origin_city_id: Option<CityId>,
    /// Restrict to routes delivering to this city.
    #[serde(default)]
    pub dest_city_id: Option<CityId>,
}

/// One costed supply option in best-cost responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CostBreakdownDto {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Supplier name, for display.
    pub supplier_name: String,
    /// Base city the fuel loads from.
    pub base_city_id: CityId,
    /// Vehicle of the selected freight route.
    pub vehicle: String,
    /// Product price per liter, as a decimal string.
    pub product_price: String,
    /// Freight cost per liter, as a decimal string.
    pub freight_cost: String,
    /// Amortized payment-term cost per liter, as a decimal string.
    pub financial_cost: String,
    /// Total cost per liter, as a decimal string.
    pub total_per_liter: String,
}

impl From<CostBreakdown> for CostBreakdownDto {
    fn from(cost: CostBreakdown) -> Self {
        Self {
            supplier_id: cost.supplier_id,
            supplier_name: cost.supplier_name,
            base_city_id: cost.base_city_id,
            vehicle: cost.vehicle.as_str().to_string(),
            product_price: cost.product_price.to_string(),
            freight_cost: cost.freight_cost.to_string(),
            financial_cost: cost.financial_cost.to_string(),
            total_per_liter: cost.total_per_liter.to_string(),
        }
    }
}
