//! Pricing service: daily quotes, freight routes, reference prices,
//! and the best-cost and deviation operations.
//!
//! Every analytical operation follows the same shape: fetch the rows
//! in play, then delegate to the pure cores in [`crate::domain::pricing`]
//! and [`crate::domain::analytics`].

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::analytics::{
    self, GroupCostSample, GroupDeviation, PriceVariation,
};
use crate::domain::pricing::{self, CostBreakdown};
use crate::domain::{
    CityId, Flag, FreightRoute, FuelType, GroupId, PriceQuote, QuoteId, RouteId, StationId,
    SupplierId, VehicleType,
};
use crate::error::ApiError;
use crate::persistence::PgStore;

/// Fields accepted when submitting a daily quote.
#[derive(Debug, Clone)]
pub struct QuoteInput {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Loading city; defaults to the supplier's base when absent.
    pub base_city_id: Option<CityId>,
    /// Quoted fuel.
    pub fuel: FuelType,
    /// Business date the price is valid for.
    pub quote_date: NaiveDate,
    /// Product price per liter.
    pub price_per_liter: Decimal,
    /// Optional flag restriction.
    pub flag_restriction: Option<Flag>,
}

/// Fields accepted when quoting a freight route.
#[derive(Debug, Clone)]
pub struct RouteInput {
    /// Loading city (base).
    pub origin_city_id: CityId,
    /// Delivery city.
    pub dest_city_id: CityId,
    /// Vehicle the rate is quoted for.
    pub vehicle: VehicleType,
    /// Freight cost per liter.
    pub cost_per_liter: Decimal,
}

/// Price variation joined with the supplier's display name.
#[derive(Debug, Clone)]
pub struct PriceVariationView {
    /// Supplier name, for display.
    pub supplier_name: String,
    /// The computed series.
    pub variation: PriceVariation,
}

/// Orchestration layer for pricing data and comparisons.
#[derive(Debug, Clone)]
pub struct PricingService {
    store: PgStore,
    monthly_rate: Decimal,
}

impl PricingService {
    /// Creates a new `PricingService`. `monthly_rate` is the buyer's
    /// monthly cost of capital used for payment-term amortization.
    #[must_use]
    pub fn new(store: PgStore, monthly_rate: Decimal) -> Self {
        Self {
            store,
            monthly_rate,
        }
    }

    fn validate_price(price: Decimal) -> Result<(), ApiError> {
        if price <= Decimal::ZERO {
            return Err(ApiError::InvalidRequest(
                "price_per_liter must be positive".to_string(),
            ));
        }
        Ok(())
    }

    // ── Quotes ──────────────────────────────────────────────────────────

    /// Submits a daily quote. A quote already stored for the same
    /// (supplier, fuel, date) is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn submit_quote(&self, input: QuoteInput) -> Result<PriceQuote, ApiError> {
        Self::validate_price(input.price_per_liter)?;

        let supplier = self
            .store
            .get_supplier(*input.supplier_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("supplier", input.supplier_id))?;

        let base_city_id = input.base_city_id.unwrap_or(supplier.base_city_id);
        let quote = PriceQuote {
            id: QuoteId::new(),
            supplier_id: supplier.id,
            base_city_id,
            fuel: input.fuel,
            quote_date: input.quote_date,
            price_per_liter: input.price_per_liter,
            flag_restriction: input.flag_restriction,
            created_at: Utc::now(),
        };
        let id = self.store.upsert_quote(&quote).await?;
        tracing::info!(
            quote_id = %id,
            supplier_id = %supplier.id,
            fuel = %input.fuel,
            date = %input.quote_date,
            "quote submitted"
        );
        Ok(PriceQuote {
            id: QuoteId::from_uuid(id),
            ..quote
        })
    }

    /// Lists quotes for one business date, optionally narrowed by fuel
    /// and/or supplier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn quotes_on(
        &self,
        date: NaiveDate,
        fuel: Option<FuelType>,
        supplier: Option<SupplierId>,
    ) -> Result<Vec<PriceQuote>, ApiError> {
        self.store
            .quotes_on(date, fuel, supplier.map(|s| *s.as_uuid()))
            .await
    }

    // ── Freight routes ──────────────────────────────────────────────────

    /// Quotes a freight route; an existing rate for the same
    /// (origin, destination, vehicle) is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn submit_route(&self, input: RouteInput) -> Result<FreightRoute, ApiError> {
        if input.cost_per_liter < Decimal::ZERO {
            return Err(ApiError::InvalidRequest(
                "cost_per_liter must not be negative".to_string(),
            ));
        }
        let origin = self
            .store
            .get_city(*input.origin_city_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("city", input.origin_city_id))?;
        if !origin.is_supply_base {
            return Err(ApiError::InvalidRequest(format!(
                "origin city {} is not a supply base",
                origin.name
            )));
        }
        self.store
            .get_city(*input.dest_city_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("city", input.dest_city_id))?;

        let now = Utc::now();
        let route = FreightRoute {
            id: RouteId::new(),
            origin_city_id: input.origin_city_id,
            dest_city_id: input.dest_city_id,
            vehicle: input.vehicle,
            cost_per_liter: input.cost_per_liter,
            created_at: now,
            updated_at: now,
        };
        let id = self.store.upsert_route(&route).await?;
        tracing::info!(route_id = %id, vehicle = %input.vehicle, "freight route quoted");
        Ok(FreightRoute {
            id: RouteId::from_uuid(id),
            ..route
        })
    }

    /// Deletes a freight route.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the route does not exist.
    pub async fn delete_route(&self, id: RouteId) -> Result<(), ApiError> {
        if !self.store.delete_route(*id.as_uuid()).await? {
            return Err(ApiError::not_found("freight route", id));
        }
        Ok(())
    }

    /// Lists freight routes, optionally filtered by origin and/or
    /// destination city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_routes(
        &self,
        origin: Option<CityId>,
        destination: Option<CityId>,
    ) -> Result<Vec<FreightRoute>, ApiError> {
        self.store
            .list_routes(origin.map(|c| *c.as_uuid()), destination.map(|c| *c.as_uuid()))
            .await
    }

    // ── Reference prices ────────────────────────────────────────────────

    /// Replaces the given per-fuel reference prices of a group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn set_reference_prices(
        &self,
        group_id: GroupId,
        prices: Vec<(FuelType, Decimal)>,
    ) -> Result<(), ApiError> {
        self.store
            .get_group(*group_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("group", group_id))?;

        for (fuel, price) in &prices {
            Self::validate_price(*price)?;
            self.store
                .set_reference_price(*group_id.as_uuid(), *fuel, *price)
                .await?;
        }
        tracing::info!(group_id = %group_id, count = prices.len(), "reference prices set");
        Ok(())
    }

    // ── Comparisons ─────────────────────────────────────────────────────

    /// Resolves the best supply options for a station and fuel on a
    /// business date, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the station does not exist.
    pub async fn best_costs(
        &self,
        station_id: StationId,
        fuel: FuelType,
        date: NaiveDate,
        vehicle: Option<VehicleType>,
    ) -> Result<Vec<CostBreakdown>, ApiError> {
        let station = self
            .store
            .get_station(*station_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("station", station_id))?;

        let quotes = self.store.quotes_on(date, Some(fuel), None).await?;
        let routes = self
            .store
            .list_routes(None, Some(*station.city_id.as_uuid()))
            .await?;
        let suppliers = self.store.list_suppliers().await?;

        Ok(pricing::resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station,
            fuel,
            self.monthly_rate,
            vehicle,
        ))
    }

    /// Compares each group's best achievable cost for `fuel` on `date`
    /// against its reference price, flagging deviations beyond
    /// `threshold_pct` in magnitude.
    ///
    /// A group's best achievable cost is the minimum best-cost total
    /// across its active stations; groups with no reference price, no
    /// stations, or no admissible supply option are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn group_deviations(
        &self,
        fuel: FuelType,
        date: NaiveDate,
        threshold_pct: Decimal,
    ) -> Result<Vec<GroupDeviation>, ApiError> {
        let references = self.store.reference_prices_for_fuel(fuel).await?;
        let quotes = self.store.quotes_on(date, Some(fuel), None).await?;
        let routes = self.store.list_routes(None, None).await?;
        let suppliers = self.store.list_suppliers().await?;

        let mut samples = Vec::with_capacity(references.len());
        for reference in references {
            let Some(group) = self.store.get_group(*reference.group_id.as_uuid()).await? else {
                continue;
            };
            let stations = self
                .store
                .stations_in_group(*reference.group_id.as_uuid())
                .await?;

            let best_total = stations
                .iter()
                .filter_map(|station| {
                    pricing::resolve_best_costs(
                        &quotes,
                        &routes,
                        &suppliers,
                        station,
                        fuel,
                        self.monthly_rate,
                        None,
                    )
                    .first()
                    .map(|c| c.total_per_liter)
                })
                .min();

            if let Some(best_total) = best_total {
                samples.push(GroupCostSample {
                    group_id: group.id,
                    group_name: group.name,
                    reference_price: reference.price_per_liter,
                    best_total,
                });
            }
        }

        Ok(analytics::detect_price_deviations(&samples, threshold_pct))
    }

    /// Per-supplier price variation for one fuel across a date range.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when `from` is after `to`.
    pub async fn price_variation(
        &self,
        fuel: FuelType,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceVariationView>, ApiError> {
        if from > to {
            return Err(ApiError::InvalidRequest(
                "from must not be after to".to_string(),
            ));
        }
        let quotes = self.store.quotes_between(fuel, from, to).await?;
        let suppliers = self.store.list_suppliers().await?;

        Ok(analytics::price_variation(&quotes)
            .into_iter()
            .map(|variation| {
                let supplier_name = suppliers
                    .iter()
                    .find(|s| s.id == variation.supplier_id)
                    .map_or_else(|| variation.supplier_id.to_string(), |s| s.name.clone());
                PriceVariationView {
                    supplier_name,
                    variation,
                }
            })
            .collect())
    }
}
