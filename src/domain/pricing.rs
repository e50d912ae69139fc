//! Best-cost resolution: the price-comparison core.
//!
//! Pure functions over in-memory slices. The service layer fetches the
//! day's quotes, the freight table, and the supplier roster, then this
//! module answers: for a given station and fuel, which supplier and
//! vehicle combination lands fuel at the lowest total cost per liter?
//!
//! Total cost per liter is the sum of three components:
//!
//! - the supplier's quoted product price,
//! - the cheapest admissible freight from the quote's base city to the
//!   station's city,
//! - the financial cost of carrying the supplier's payment term.
//!
//! A quote with no admissible freight route is excluded from the
//! result, never priced at zero freight.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::{FreightRoute, FuelType, PriceQuote, Station, Supplier, VehicleType};
use super::ids::{CityId, SupplierId};

/// Days per month assumed by the linear payment-term amortization.
const DAYS_PER_MONTH: u32 = 30;

/// One fully-costed supply option for a station and fuel.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CostBreakdown {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Supplier name, for display.
    pub supplier_name: String,
    /// Base city the fuel loads from.
    pub base_city_id: CityId,
    /// Vehicle of the selected freight route.
    pub vehicle: VehicleType,
    /// Product price per liter.
    #[schema(value_type = String)]
    pub product_price: Decimal,
    /// Freight cost per liter.
    #[schema(value_type = String)]
    pub freight_cost: Decimal,
    /// Amortized payment-term cost per liter.
    #[schema(value_type = String)]
    pub financial_cost: Decimal,
    /// Sum of the three components.
    #[schema(value_type = String)]
    pub total_per_liter: Decimal,
}

/// Amortized cost per liter of carrying a supplier's payment term.
///
/// Linear pro-rata of the buyer's monthly capital rate over the term:
/// `price * monthly_rate * term_days / 30`. A zero term or zero rate
/// costs nothing.
#[must_use]
pub fn financial_cost_per_liter(
    price_per_liter: Decimal,
    monthly_rate: Decimal,
    payment_term_days: u32,
) -> Decimal {
    if payment_term_days == 0 || monthly_rate.is_zero() {
        return Decimal::ZERO;
    }
    price_per_liter * monthly_rate * Decimal::from(payment_term_days)
        / Decimal::from(DAYS_PER_MONTH)
}

/// Lowest-cost freight route between two cities.
///
/// When `vehicle` is set, only routes quoted for that vehicle type are
/// considered. Returns `None` when no route connects the cities.
#[must_use]
pub fn cheapest_freight<'a>(
    routes: &'a [FreightRoute],
    origin: CityId,
    destination: CityId,
    vehicle: Option<VehicleType>,
) -> Option<&'a FreightRoute> {
    routes
        .iter()
        .filter(|r| r.origin_city_id == origin && r.dest_city_id == destination)
        .filter(|r| vehicle.is_none_or(|v| r.vehicle == v))
        .min_by_key(|r| (r.cost_per_liter, r.vehicle.capacity_liters()))
}

/// Resolves all admissible supply options for `station` and `fuel`,
/// cheapest first.
///
/// Filtering rules:
/// - quotes for a different fuel are ignored;
/// - a quote with a flag restriction admits only stations of that flag;
/// - quotes from unknown or inactive suppliers are ignored;
/// - a quote whose base city has no admissible freight to the station's
///   city is excluded.
///
/// The result is sorted ascending by total per liter, with ties broken
/// by product price and then supplier id so the ordering is
/// deterministic. The first element, when present, is the best buy.
#[must_use]
pub fn resolve_best_costs(
    quotes: &[PriceQuote],
    routes: &[FreightRoute],
    suppliers: &[Supplier],
    station: &Station,
    fuel: FuelType,
    monthly_rate: Decimal,
    vehicle: Option<VehicleType>,
) -> Vec<CostBreakdown> {
    let mut options: Vec<CostBreakdown> = quotes
        .iter()
        .filter(|q| q.fuel == fuel)
        .filter(|q| q.flag_restriction.is_none_or(|f| f == station.flag))
        .filter_map(|quote| {
            let supplier = suppliers
                .iter()
                .find(|s| s.id == quote.supplier_id)
                .filter(|s| s.active)?;
            let route = cheapest_freight(routes, quote.base_city_id, station.city_id, vehicle)?;

            let financial_cost = financial_cost_per_liter(
                quote.price_per_liter,
                monthly_rate,
                supplier.payment_term_days,
            );
            Some(CostBreakdown {
                supplier_id: supplier.id,
                supplier_name: supplier.name.clone(),
                base_city_id: quote.base_city_id,
                vehicle: route.vehicle,
                product_price: quote.price_per_liter,
                freight_cost: route.cost_per_liter,
                financial_cost,
                total_per_liter: quote.price_per_liter + route.cost_per_liter + financial_cost,
            })
        })
        .collect();

    options.sort_by(|a, b| {
        a.total_per_liter
            .cmp(&b.total_per_liter)
            .then_with(|| a.product_price.cmp(&b.product_price))
            .then_with(|| a.supplier_id.cmp(&b.supplier_id))
    });
    options
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::catalog::Flag;
    use crate::domain::ids::{QuoteId, RouteId, StationId};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default()
    }

    fn supplier(id: SupplierId, base: CityId, term_days: u32, active: bool) -> Supplier {
        Supplier {
            id,
            name: format!("supplier-{id}"),
            tax_id: None,
            base_city_id: base,
            payment_term_days: term_days,
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quote(
        supplier_id: SupplierId,
        base: CityId,
        fuel: FuelType,
        price: Decimal,
        flag: Option<Flag>,
    ) -> PriceQuote {
        PriceQuote {
            id: QuoteId::new(),
            supplier_id,
            base_city_id: base,
            fuel,
            quote_date: date(),
            price_per_liter: price,
            flag_restriction: flag,
            created_at: Utc::now(),
        }
    }

    fn route(origin: CityId, dest: CityId, vehicle: VehicleType, cost: Decimal) -> FreightRoute {
        FreightRoute {
            id: RouteId::new(),
            origin_city_id: origin,
            dest_city_id: dest,
            vehicle,
            cost_per_liter: cost,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn station(city: CityId, flag: Flag) -> Station {
        Station {
            id: StationId::new(),
            name: "posto teste".to_string(),
            city_id: city,
            flag,
            group_id: None,
            monthly_volume_liters: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn financial_cost_is_linear_in_term() {
        // 3.00/L at 1% per month over 30 days -> 0.03/L
        let cost = financial_cost_per_liter(Decimal::new(300, 2), Decimal::new(1, 2), 30);
        assert_eq!(cost, Decimal::new(3, 2));

        // Half the term, half the cost.
        let cost = financial_cost_per_liter(Decimal::new(300, 2), Decimal::new(1, 2), 15);
        assert_eq!(cost, Decimal::new(15, 3));
    }

    #[test]
    fn financial_cost_zero_term_or_rate() {
        assert_eq!(
            financial_cost_per_liter(Decimal::new(300, 2), Decimal::new(1, 2), 0),
            Decimal::ZERO
        );
        assert_eq!(
            financial_cost_per_liter(Decimal::new(300, 2), Decimal::ZERO, 30),
            Decimal::ZERO
        );
    }

    #[test]
    fn cheapest_freight_picks_minimum_cost() {
        let origin = CityId::new();
        let dest = CityId::new();
        let routes = vec![
            route(origin, dest, VehicleType::Truck, Decimal::new(20, 2)),
            route(origin, dest, VehicleType::Bitrem, Decimal::new(12, 2)),
            route(origin, dest, VehicleType::Carreta, Decimal::new(15, 2)),
        ];

        let best = cheapest_freight(&routes, origin, dest, None);
        let Some(best) = best else {
            panic!("expected a route");
        };
        assert_eq!(best.vehicle, VehicleType::Bitrem);
        assert_eq!(best.cost_per_liter, Decimal::new(12, 2));
    }

    #[test]
    fn cheapest_freight_honors_vehicle_filter() {
        let origin = CityId::new();
        let dest = CityId::new();
        let routes = vec![
            route(origin, dest, VehicleType::Truck, Decimal::new(20, 2)),
            route(origin, dest, VehicleType::Bitrem, Decimal::new(12, 2)),
        ];

        let best = cheapest_freight(&routes, origin, dest, Some(VehicleType::Truck));
        let Some(best) = best else {
            panic!("expected a route");
        };
        assert_eq!(best.vehicle, VehicleType::Truck);
    }

    #[test]
    fn cheapest_freight_none_when_unconnected() {
        let routes = vec![route(
            CityId::new(),
            CityId::new(),
            VehicleType::Truck,
            Decimal::new(20, 2),
        )];
        assert!(cheapest_freight(&routes, CityId::new(), CityId::new(), None).is_none());
    }

    #[test]
    fn best_cost_row_has_minimum_total() {
        let base_a = CityId::new();
        let base_b = CityId::new();
        let dest = CityId::new();
        let sup_a = SupplierId::new();
        let sup_b = SupplierId::new();

        let suppliers = vec![
            supplier(sup_a, base_a, 0, true),
            supplier(sup_b, base_b, 0, true),
        ];
        // A quotes cheaper product but has expensive freight.
        let quotes = vec![
            quote(sup_a, base_a, FuelType::Ethanol, Decimal::new(340, 2), None),
            quote(sup_b, base_b, FuelType::Ethanol, Decimal::new(350, 2), None),
        ];
        let routes = vec![
            route(base_a, dest, VehicleType::Carreta, Decimal::new(30, 2)),
            route(base_b, dest, VehicleType::Carreta, Decimal::new(10, 2)),
        ];

        let result = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station(dest, Flag::White),
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );

        assert_eq!(result.len(), 2);
        let Some(first) = result.first() else {
            panic!("expected results");
        };
        // 3.50 + 0.10 beats 3.40 + 0.30.
        assert_eq!(first.supplier_id, sup_b);
        assert_eq!(first.total_per_liter, Decimal::new(360, 2));
        let min_total = result
            .iter()
            .map(|c| c.total_per_liter)
            .min()
            .unwrap_or_default();
        assert_eq!(first.total_per_liter, min_total);
    }

    #[test]
    fn missing_freight_excludes_quote() {
        let base = CityId::new();
        let dest = CityId::new();
        let sup = SupplierId::new();

        let suppliers = vec![supplier(sup, base, 0, true)];
        let quotes = vec![quote(sup, base, FuelType::DieselS10, Decimal::new(380, 2), None)];

        // No route from base to dest at all.
        let result = resolve_best_costs(
            &quotes,
            &[],
            &suppliers,
            &station(dest, Flag::White),
            FuelType::DieselS10,
            Decimal::ZERO,
            None,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn flag_restriction_filters_stations() {
        let base = CityId::new();
        let dest = CityId::new();
        let sup = SupplierId::new();

        let suppliers = vec![supplier(sup, base, 0, true)];
        let quotes = vec![quote(
            sup,
            base,
            FuelType::Ethanol,
            Decimal::new(340, 2),
            Some(Flag::White),
        )];
        let routes = vec![route(base, dest, VehicleType::Truck, Decimal::new(10, 2))];

        let white = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station(dest, Flag::White),
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );
        assert_eq!(white.len(), 1);

        let branded = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station(dest, Flag::Branded),
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );
        assert!(branded.is_empty());
    }

    #[test]
    fn inactive_supplier_is_skipped() {
        let base = CityId::new();
        let dest = CityId::new();
        let sup = SupplierId::new();

        let suppliers = vec![supplier(sup, base, 0, false)];
        let quotes = vec![quote(sup, base, FuelType::Ethanol, Decimal::new(340, 2), None)];
        let routes = vec![route(base, dest, VehicleType::Truck, Decimal::new(10, 2))];

        let result = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station(dest, Flag::White),
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn payment_term_can_flip_the_winner() {
        let base_a = CityId::new();
        let base_b = CityId::new();
        let dest = CityId::new();
        let sup_a = SupplierId::new();
        let sup_b = SupplierId::new();

        // A is 2 cents cheaper on product but takes a 30-day term;
        // B is pricier with cash payment. The winner depends on the
        // capital rate.
        let suppliers = vec![
            supplier(sup_a, base_a, 30, true),
            supplier(sup_b, base_b, 0, true),
        ];
        let quotes = vec![
            quote(sup_a, base_a, FuelType::Ethanol, Decimal::new(348, 2), None),
            quote(sup_b, base_b, FuelType::Ethanol, Decimal::new(350, 2), None),
        ];
        let routes = vec![
            route(base_a, dest, VehicleType::Truck, Decimal::new(10, 2)),
            route(base_b, dest, VehicleType::Truck, Decimal::new(10, 2)),
        ];
        let st = station(dest, Flag::White);

        let at_zero = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &st,
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );
        assert_eq!(at_zero.first().map(|c| c.supplier_id), Some(sup_a));

        // 2% per month over 30 days adds ~0.0696 to A's liter.
        let financed = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &st,
            FuelType::Ethanol,
            Decimal::new(2, 2),
            None,
        );
        assert_eq!(financed.first().map(|c| c.supplier_id), Some(sup_b));
    }

    #[test]
    fn ties_break_by_product_price_then_supplier_id() {
        let base = CityId::new();
        let dest = CityId::new();
        let mut ids = [SupplierId::new(), SupplierId::new()];
        ids.sort();
        let [lo, hi] = ids;

        let suppliers = vec![supplier(lo, base, 0, true), supplier(hi, base, 0, true)];
        // Identical totals and product prices.
        let quotes = vec![
            quote(hi, base, FuelType::Ethanol, Decimal::new(340, 2), None),
            quote(lo, base, FuelType::Ethanol, Decimal::new(340, 2), None),
        ];
        let routes = vec![route(base, dest, VehicleType::Truck, Decimal::new(10, 2))];

        let result = resolve_best_costs(
            &quotes,
            &routes,
            &suppliers,
            &station(dest, Flag::White),
            FuelType::Ethanol,
            Decimal::ZERO,
            None,
        );
        let order: Vec<SupplierId> = result.iter().map(|c| c.supplier_id).collect();
        assert_eq!(order, vec![lo, hi]);
    }
}
