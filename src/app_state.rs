//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::service::{CatalogService, OrderService, PricingService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Catalog CRUD: cities, suppliers, stations, groups.
    pub catalog: Arc<CatalogService>,
    /// Quotes, freight, reference prices, and comparisons.
    pub pricing: Arc<PricingService>,
    /// Purchase orders and spend analytics.
    pub orders: Arc<OrderService>,
    /// Default deviation threshold percent for dashboards.
    pub deviation_threshold_pct: Decimal,
}
