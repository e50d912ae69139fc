//! Aggregation views behind the dashboards.
//!
//! Like [`super::pricing`], everything here is a pure function over
//! rows already fetched: deviation detection against group reference
//! prices, volume buckets, financial summaries, and per-supplier price
//! variation over a date range.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::catalog::{OrderStatus, PriceQuote, PurchaseOrder};
use super::ids::{GroupId, SupplierId};

/// Best achievable cost for a group, paired with its reference price.
///
/// Assembled by the service layer from per-station cost resolution;
/// one sample per group.
#[derive(Debug, Clone)]
pub struct GroupCostSample {
    /// Group the sample belongs to.
    pub group_id: GroupId,
    /// Group name, for display.
    pub group_name: String,
    /// The group's negotiated target price per liter.
    pub reference_price: Decimal,
    /// Best total cost per liter achievable today.
    pub best_total: Decimal,
}

/// Deviation of a group's best achievable cost from its reference.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupDeviation {
    /// Group the deviation refers to.
    pub group_id: GroupId,
    /// Group name, for display.
    pub group_name: String,
    /// Reference price per liter.
    #[schema(value_type = String)]
    pub reference_price: Decimal,
    /// Best total cost per liter.
    #[schema(value_type = String)]
    pub best_total: Decimal,
    /// Signed deviation percent; negative means below reference.
    #[schema(value_type = String)]
    pub deviation_pct: Decimal,
    /// True when the magnitude exceeds the threshold.
    pub flagged: bool,
}

/// Compares each group's best achievable cost against its reference
/// price and flags deviations beyond `threshold_pct` in magnitude.
///
/// Samples with a zero reference price are skipped (no meaningful
/// percentage exists). Output is ordered by descending magnitude so
/// the worst offenders lead.
#[must_use]
pub fn detect_price_deviations(
    samples: &[GroupCostSample],
    threshold_pct: Decimal,
) -> Vec<GroupDeviation> {
    let mut deviations: Vec<GroupDeviation> = samples
        .iter()
        .filter(|s| !s.reference_price.is_zero())
        .map(|s| {
            let deviation_pct = (s.best_total - s.reference_price) / s.reference_price
                * Decimal::ONE_HUNDRED;
            GroupDeviation {
                group_id: s.group_id,
                group_name: s.group_name.clone(),
                reference_price: s.reference_price,
                best_total: s.best_total,
                deviation_pct,
                flagged: deviation_pct.abs() > threshold_pct,
            }
        })
        .collect();

    deviations.sort_by(|a, b| b.deviation_pct.abs().cmp(&a.deviation_pct.abs()));
    deviations
}

/// Dimension to bucket volume aggregates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VolumeGroupBy {
    /// One bucket per supplier.
    Supplier,
    /// One bucket per fuel type.
    Fuel,
    /// One bucket per station.
    Station,
}

/// Aggregated volume and spend for one bucket key.
///
/// `key` is the dimension value as a string (entity UUID or fuel
/// discriminator); the service layer resolves display labels.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VolumeBucket {
    /// Bucket key (UUID or fuel discriminator).
    pub key: String,
    /// Total liters ordered.
    #[schema(value_type = String)]
    pub liters: Decimal,
    /// Total landed spend (product + freight).
    #[schema(value_type = String)]
    pub spend: Decimal,
    /// Number of orders in the bucket.
    pub order_count: u64,
}

/// Buckets orders by the chosen dimension, excluding cancelled orders.
///
/// Buckets are sorted descending by liters; equal-liters buckets sort
/// by key for determinism.
#[must_use]
pub fn volume_summary(orders: &[PurchaseOrder], group_by: VolumeGroupBy) -> Vec<VolumeBucket> {
    let mut buckets: BTreeMap<String, (Decimal, Decimal, u64)> = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
    {
        let key = match group_by {
            VolumeGroupBy::Supplier => order.supplier_id.to_string(),
            VolumeGroupBy::Fuel => order.fuel.as_str().to_string(),
            VolumeGroupBy::Station => order.station_id.to_string(),
        };
        let slot = buckets
            .entry(key)
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        slot.0 += order.volume_liters;
        slot.1 += order.total_value();
        slot.2 += 1;
    }

    let mut result: Vec<VolumeBucket> = buckets
        .into_iter()
        .map(|(key, (liters, spend, order_count))| VolumeBucket {
            key,
            liters,
            spend,
            order_count,
        })
        .collect();
    result.sort_by(|a, b| b.liters.cmp(&a.liters).then_with(|| a.key.cmp(&b.key)));
    result
}

/// Spend totals across a period.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FinancialSummary {
    /// Product spend (price × volume).
    #[schema(value_type = String)]
    pub product_spend: Decimal,
    /// Freight spend (freight × volume).
    #[schema(value_type = String)]
    pub freight_spend: Decimal,
    /// Landed total spend.
    #[schema(value_type = String)]
    pub total_spend: Decimal,
    /// Total liters ordered.
    #[schema(value_type = String)]
    pub total_liters: Decimal,
    /// Volume-weighted average cost per liter.
    #[schema(value_type = String)]
    pub avg_cost_per_liter: Decimal,
    /// Freight share of total spend, in percent.
    #[schema(value_type = String)]
    pub freight_share_pct: Decimal,
    /// Number of non-cancelled orders.
    pub order_count: u64,
}

/// Totals spend and volume for the given orders, excluding cancelled
/// ones. An empty input yields an all-zero summary.
#[must_use]
pub fn financial_summary(orders: &[PurchaseOrder]) -> FinancialSummary {
    let mut product_spend = Decimal::ZERO;
    let mut freight_spend = Decimal::ZERO;
    let mut total_liters = Decimal::ZERO;
    let mut order_count = 0u64;

    for order in orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
    {
        product_spend += order.product_price_per_liter * order.volume_liters;
        freight_spend += order.freight_cost_per_liter * order.volume_liters;
        total_liters += order.volume_liters;
        order_count += 1;
    }

    let total_spend = product_spend + freight_spend;
    let avg_cost_per_liter = total_spend
        .checked_div(total_liters)
        .unwrap_or(Decimal::ZERO);
    let freight_share_pct = freight_spend
        .checked_div(total_spend)
        .unwrap_or(Decimal::ZERO)
        * Decimal::ONE_HUNDRED;

    FinancialSummary {
        product_spend,
        freight_spend,
        total_spend,
        total_liters,
        avg_cost_per_liter,
        freight_share_pct,
        order_count,
    }
}

/// Price movement of one supplier's quotes across a period.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PriceVariation {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Price at the earliest quote date in range.
    #[schema(value_type = String)]
    pub first_price: Decimal,
    /// Price at the latest quote date in range.
    #[schema(value_type = String)]
    pub last_price: Decimal,
    /// Minimum quoted price in range.
    #[schema(value_type = String)]
    pub min_price: Decimal,
    /// Maximum quoted price in range.
    #[schema(value_type = String)]
    pub max_price: Decimal,
    /// Arithmetic mean of quoted prices.
    #[schema(value_type = String)]
    pub avg_price: Decimal,
    /// Percent change first → last; zero for a single quote.
    #[schema(value_type = String)]
    pub variation_pct: Decimal,
    /// Number of quotes in range.
    pub quote_count: u64,
}

/// Per-supplier price variation for quotes of one fuel.
///
/// The caller passes quotes already filtered by fuel and date range;
/// this function groups by supplier and orders each series by quote
/// date. Output is sorted by supplier id.
#[must_use]
pub fn price_variation(quotes: &[PriceQuote]) -> Vec<PriceVariation> {
    let mut by_supplier: BTreeMap<SupplierId, Vec<&PriceQuote>> = BTreeMap::new();
    for quote in quotes {
        by_supplier.entry(quote.supplier_id).or_default().push(quote);
    }

    by_supplier
        .into_iter()
        .filter_map(|(supplier_id, mut series)| {
            series.sort_by_key(|q| q.quote_date);
            let first = series.first()?.price_per_liter;
            let last = series.last()?.price_per_liter;
            let min_price = series
                .iter()
                .map(|q| q.price_per_liter)
                .min()
                .unwrap_or(first);
            let max_price = series
                .iter()
                .map(|q| q.price_per_liter)
                .max()
                .unwrap_or(first);
            let count = Decimal::from(series.len());
            let sum: Decimal = series.iter().map(|q| q.price_per_liter).sum();
            let avg_price = sum.checked_div(count).unwrap_or(first);
            let variation_pct = (last - first)
                .checked_div(first)
                .unwrap_or(Decimal::ZERO)
                * Decimal::ONE_HUNDRED;

            Some(PriceVariation {
                supplier_id,
                first_price: first,
                last_price: last,
                min_price,
                max_price,
                avg_price,
                variation_pct,
                quote_count: series.len() as u64,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::catalog::{FuelType, VehicleType};
    use crate::domain::ids::{CityId, OrderId, QuoteId, StationId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap_or_default()
    }

    fn order(
        supplier_id: SupplierId,
        station_id: StationId,
        fuel: FuelType,
        liters: Decimal,
        price: Decimal,
        freight: Decimal,
        status: OrderStatus,
    ) -> PurchaseOrder {
        PurchaseOrder {
            id: OrderId::new(),
            station_id,
            supplier_id,
            fuel,
            vehicle: VehicleType::Carreta,
            volume_liters: liters,
            product_price_per_liter: price,
            freight_cost_per_liter: freight,
            order_date: day(2),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn quote_on(supplier_id: SupplierId, d: u32, price: Decimal) -> PriceQuote {
        PriceQuote {
            id: QuoteId::new(),
            supplier_id,
            base_city_id: CityId::new(),
            fuel: FuelType::Ethanol,
            quote_date: day(d),
            price_per_liter: price,
            flag_restriction: None,
            created_at: Utc::now(),
        }
    }

    fn sample(name: &str, reference: Decimal, best: Decimal) -> GroupCostSample {
        GroupCostSample {
            group_id: GroupId::new(),
            group_name: name.to_string(),
            reference_price: reference,
            best_total: best,
        }
    }

    #[test]
    fn deviation_flags_only_beyond_threshold() {
        let samples = vec![
            // +5% deviation
            sample("high", Decimal::new(400, 2), Decimal::new(420, 2)),
            // +1% deviation
            sample("ok", Decimal::new(400, 2), Decimal::new(404, 2)),
        ];
        let result = detect_price_deviations(&samples, Decimal::new(2, 0));

        assert_eq!(result.len(), 2);
        let Some(worst) = result.first() else {
            panic!("expected deviations");
        };
        assert_eq!(worst.group_name, "high");
        assert!(worst.flagged);
        assert_eq!(worst.deviation_pct, Decimal::new(5, 0));
        assert_eq!(result.get(1).map(|d| d.flagged), Some(false));
    }

    #[test]
    fn deviation_is_signed_below_reference() {
        let samples = vec![sample("below", Decimal::new(400, 2), Decimal::new(380, 2))];
        let result = detect_price_deviations(&samples, Decimal::new(2, 0));

        let Some(dev) = result.first() else {
            panic!("expected a deviation");
        };
        assert_eq!(dev.deviation_pct, Decimal::new(-5, 0));
        assert!(dev.flagged); // magnitude counts in both directions
    }

    #[test]
    fn deviation_skips_zero_reference() {
        let samples = vec![sample("zero", Decimal::ZERO, Decimal::new(380, 2))];
        assert!(detect_price_deviations(&samples, Decimal::ONE).is_empty());
    }

    #[test]
    fn volume_summary_groups_and_excludes_cancelled() {
        let sup_a = SupplierId::new();
        let sup_b = SupplierId::new();
        let st = StationId::new();
        let orders = vec![
            order(
                sup_a,
                st,
                FuelType::Ethanol,
                Decimal::new(10_000, 0),
                Decimal::new(350, 2),
                Decimal::new(10, 2),
                OrderStatus::Confirmed,
            ),
            order(
                sup_a,
                st,
                FuelType::Ethanol,
                Decimal::new(5_000, 0),
                Decimal::new(350, 2),
                Decimal::new(10, 2),
                OrderStatus::Delivered,
            ),
            order(
                sup_b,
                st,
                FuelType::Ethanol,
                Decimal::new(50_000, 0),
                Decimal::new(340, 2),
                Decimal::new(10, 2),
                OrderStatus::Cancelled,
            ),
        ];

        let buckets = volume_summary(&orders, VolumeGroupBy::Supplier);
        assert_eq!(buckets.len(), 1);
        let Some(bucket) = buckets.first() else {
            panic!("expected one bucket");
        };
        assert_eq!(bucket.key, sup_a.to_string());
        assert_eq!(bucket.liters, Decimal::new(15_000, 0));
        assert_eq!(bucket.order_count, 2);
        // 15_000 L at 3.60 landed
        assert_eq!(bucket.spend, Decimal::new(54_000, 0));
    }

    #[test]
    fn volume_summary_sorts_by_liters_desc() {
        let st = StationId::new();
        let orders = vec![
            order(
                SupplierId::new(),
                st,
                FuelType::Ethanol,
                Decimal::new(1_000, 0),
                Decimal::ONE,
                Decimal::ZERO,
                OrderStatus::Confirmed,
            ),
            order(
                SupplierId::new(),
                st,
                FuelType::DieselS10,
                Decimal::new(9_000, 0),
                Decimal::ONE,
                Decimal::ZERO,
                OrderStatus::Confirmed,
            ),
        ];
        let buckets = volume_summary(&orders, VolumeGroupBy::Fuel);
        let keys: Vec<&str> = buckets.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["diesel_s10", "ethanol"]);
    }

    #[test]
    fn financial_summary_weighted_average() {
        let st = StationId::new();
        let orders = vec![
            order(
                SupplierId::new(),
                st,
                FuelType::Ethanol,
                Decimal::new(10_000, 0),
                Decimal::new(300, 2),
                Decimal::new(20, 2),
                OrderStatus::Delivered,
            ),
            order(
                SupplierId::new(),
                st,
                FuelType::Ethanol,
                Decimal::new(30_000, 0),
                Decimal::new(400, 2),
                Decimal::new(20, 2),
                OrderStatus::Delivered,
            ),
        ];
        let summary = financial_summary(&orders);

        assert_eq!(summary.total_liters, Decimal::new(40_000, 0));
        assert_eq!(summary.product_spend, Decimal::new(150_000, 0));
        assert_eq!(summary.freight_spend, Decimal::new(8_000, 0));
        assert_eq!(summary.total_spend, Decimal::new(158_000, 0));
        // 158_000 / 40_000 = 3.95, not the unweighted (3.20+4.20)/2
        assert_eq!(summary.avg_cost_per_liter, Decimal::new(395, 2));
        assert_eq!(summary.order_count, 2);
    }

    #[test]
    fn financial_summary_empty_is_zeroed() {
        let summary = financial_summary(&[]);
        assert_eq!(summary.total_spend, Decimal::ZERO);
        assert_eq!(summary.avg_cost_per_liter, Decimal::ZERO);
        assert_eq!(summary.freight_share_pct, Decimal::ZERO);
        assert_eq!(summary.order_count, 0);
    }

    #[test]
    fn price_variation_first_to_last() {
        let sup = SupplierId::new();
        let quotes = vec![
            quote_on(sup, 10, Decimal::new(330, 2)),
            quote_on(sup, 1, Decimal::new(300, 2)),
            quote_on(sup, 5, Decimal::new(290, 2)),
        ];
        let result = price_variation(&quotes);

        assert_eq!(result.len(), 1);
        let Some(var) = result.first() else {
            panic!("expected a series");
        };
        assert_eq!(var.first_price, Decimal::new(300, 2));
        assert_eq!(var.last_price, Decimal::new(330, 2));
        assert_eq!(var.min_price, Decimal::new(290, 2));
        assert_eq!(var.max_price, Decimal::new(330, 2));
        assert_eq!(var.variation_pct, Decimal::new(10, 0));
        assert_eq!(var.quote_count, 3);
    }

    #[test]
    fn price_variation_single_quote_is_flat() {
        let quotes = vec![quote_on(SupplierId::new(), 3, Decimal::new(355, 2))];
        let result = price_variation(&quotes);
        let Some(var) = result.first() else {
            panic!("expected a series");
        };
        assert_eq!(var.variation_pct, Decimal::ZERO);
        assert_eq!(var.avg_price, Decimal::new(355, 2));
    }
}
