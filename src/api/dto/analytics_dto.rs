//! Dashboard DTOs: best cost, deviations, volume, financial summary,
//! and price variation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::analytics::{FinancialSummary, GroupDeviation, VolumeGroupBy};
use crate::domain::{GroupId, StationId, SupplierId};
use crate::service::order_service::VolumeBucketView;
use crate::service::pricing_service::PriceVariationView;

/// Query parameters for `GET /dashboard/best-cost`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct BestCostParams {
    /// Station to price supply for.
    pub station_id: StationId,
    /// Fuel discriminator.
    pub fuel: String,
    /// Business date of the quotes to use.
    pub date: NaiveDate,
    /// Restrict freight to one vehicle discriminator.
    #[serde(default)]
    pub vehicle: Option<String>,
}

/// Query parameters for `GET /dashboard/price-deviations`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeviationParams {
    /// Fuel discriminator.
    pub fuel: String,
    /// Business date of the quotes to compare.
    pub date: NaiveDate,
    /// Deviation threshold percent; service default when omitted.
    #[serde(default)]
    pub threshold_pct: Option<String>,
}

/// One group deviation row in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviationDto {
    /// Group the deviation refers to.
    pub group_id: GroupId,
    /// Group name, for display.
    pub group_name: String,
    /// Reference price per liter, as a decimal string.
    pub reference_price: String,
    /// Best achievable total per liter, as a decimal string.
    pub best_total: String,
    /// Signed deviation percent, as a decimal string.
    pub deviation_pct: String,
    /// True when the magnitude exceeds the threshold.
    pub flagged: bool,
}

impl From<GroupDeviation> for DeviationDto {
    fn from(dev: GroupDeviation) -> Self {
        Self {
            group_id: dev.group_id,
            group_name: dev.group_name,
            reference_price: dev.reference_price.to_string(),
            best_total: dev.best_total.to_string(),
            deviation_pct: dev.deviation_pct.round_dp(2).to_string(),
            flagged: dev.flagged,
        }
    }
}

/// Query parameters for `GET /dashboard/volume`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VolumeParams {
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
    /// Bucket dimension.
    pub group_by: VolumeGroupBy,
}

/// One volume bucket row in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct VolumeBucketDto {
    /// Bucket key (entity UUID or fuel discriminator).
    pub key: String,
    /// Resolved display label.
    pub label: String,
    /// Total liters, as a decimal string.
    pub liters: String,
    /// Total landed spend, as a decimal string.
    pub spend: String,
    /// Number of orders in the bucket.
    pub order_count: u64,
}

impl From<VolumeBucketView> for VolumeBucketDto {
    fn from(view: VolumeBucketView) -> Self {
        Self {
            key: view.bucket.key,
            label: view.label,
            liters: view.bucket.liters.to_string(),
            spend: view.bucket.spend.to_string(),
            order_count: view.bucket.order_count,
        }
    }
}

/// Query parameters for `GET /dashboard/financial-summary`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodParams {
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
}

/// Financial summary response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FinancialSummaryDto {
    /// Product spend, as a decimal string.
    pub product_spend: String,
    /// Freight spend, as a decimal string.
    pub freight_spend: String,
    /// Landed total spend, as a decimal string.
    pub total_spend: String,
    /// Total liters, as a decimal string.
    pub total_liters: String,
    /// Volume-weighted average cost per liter, as a decimal string.
    pub avg_cost_per_liter: String,
    /// Freight share of spend in percent, as a decimal string.
    pub freight_share_pct: String,
    /// Number of non-cancelled orders.
    pub order_count: u64,
}

impl From<FinancialSummary> for FinancialSummaryDto {
    fn from(summary: FinancialSummary) -> Self {
        Self {
            product_spend: summary.product_spend.to_string(),
            freight_spend: summary.freight_spend.to_string(),
            total_spend: summary.total_spend.to_string(),
            total_liters: summary.total_liters.to_string(),
            avg_cost_per_liter: summary.avg_cost_per_liter.round_dp(4).to_string(),
            freight_share_pct: summary.freight_share_pct.round_dp(2).to_string(),
            order_count: summary.order_count,
        }
    }
}

/// Query parameters for `GET /dashboard/price-variation`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PriceVariationParams {
    /// Fuel discriminator.
    pub fuel: String,
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
}

/// One supplier's price variation row in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PriceVariationDto {
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Supplier name, for display.
    pub supplier_name: String,
    /// Price at the earliest quote date, as a decimal string.
    pub first_price: String,
    /// Price at the latest quote date, as a decimal string.
    pub last_price: String,
    /// Minimum price in range, as a decimal string.
    pub min_price: String,
    /// Maximum price in range, as a decimal string.
    pub max_price: String,
    /// Mean price in range, as a decimal string.
    pub avg_price: String,
    /// Percent change first → last, as a decimal string.
    pub variation_pct: String,
    /// Number of quotes in range.
    pub quote_count: u64,
}

impl From<PriceVariationView> for PriceVariationDto {
    fn from(view: PriceVariationView) -> Self {
        let v = view.variation;
        Self {
            supplier_id: v.supplier_id,
            supplier_name: view.supplier_name,
            first_price: v.first_price.to_string(),
            last_price: v.last_price.to_string(),
            min_price: v.min_price.to_string(),
            max_price: v.max_price.to_string(),
            avg_price: v.avg_price.round_dp(4).to_string(),
            variation_pct: v.variation_pct.round_dp(2).to_string(),
            quote_count: v.quote_count,
        }
    }
}
