//! REST endpoint handlers organized by resource.

pub mod cities;
pub mod dashboard;
pub mod freight;
pub mod groups;
pub mod orders;
pub mod quotes;
pub mod stations;
pub mod suppliers;
pub mod system;

use axum::Router;
use rust_decimal::Decimal;

use crate::app_state::AppState;
use crate::domain::{Flag, FuelType, OrderStatus, VehicleType};
use crate::error::ApiError;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(cities::routes())
        .merge(suppliers::routes())
        .merge(stations::routes())
        .merge(groups::routes())
        .merge(freight::routes())
        .merge(quotes::routes())
        .merge(orders::routes())
        .merge(dashboard::routes())
}

// ── Wire Parsing Helpers ────────────────────────────────────────────────

pub(crate) fn parse_fuel(s: &str) -> Result<FuelType, ApiError> {
    s.parse().map_err(|_| ApiError::InvalidFuelType(s.to_string()))
}

pub(crate) fn parse_vehicle(s: &str) -> Result<VehicleType, ApiError> {
    s.parse()
        .map_err(|_| ApiError::InvalidVehicleType(s.to_string()))
}

pub(crate) fn parse_flag(s: &str) -> Result<Flag, ApiError> {
    s.parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid flag: {s}")))
}

pub(crate) fn parse_status(s: &str) -> Result<OrderStatus, ApiError> {
    s.parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid order status: {s}")))
}

pub(crate) fn parse_decimal(field: &str, s: &str) -> Result<Decimal, ApiError> {
    s.parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid {field}: {s}")))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_fuel_accepts_known_values() {
        assert_eq!(parse_fuel("ethanol").ok(), Some(FuelType::Ethanol));
        assert!(parse_fuel("av_gas").is_err());
    }

    #[test]
    fn parse_decimal_names_the_field() {
        let err = parse_decimal("price_per_liter", "three-fifty");
        let Err(err) = err else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("price_per_liter"));
    }
}
