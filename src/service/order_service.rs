//! Order service: purchase order lifecycle and spend analytics.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::analytics::{
    self, FinancialSummary, VolumeBucket, VolumeGroupBy,
};
use crate::domain::{
    FuelType, OrderId, OrderStatus, PurchaseOrder, StationId, SupplierId, VehicleType,
};
use crate::error::ApiError;
use crate::persistence::PgStore;

/// Fields accepted when placing a purchase order.
#[derive(Debug, Clone)]
pub struct OrderInput {
    /// Receiving station.
    pub station_id: StationId,
    /// Selling supplier.
    pub supplier_id: SupplierId,
    /// Ordered fuel.
    pub fuel: FuelType,
    /// Vehicle contracted for the haul.
    pub vehicle: VehicleType,
    /// Ordered volume in liters.
    pub volume_liters: Decimal,
    /// Negotiated product price per liter.
    pub product_price_per_liter: Decimal,
    /// Negotiated freight cost per liter.
    pub freight_cost_per_liter: Decimal,
    /// Business date of the order.
    pub order_date: NaiveDate,
}

/// Filters accepted when listing orders.
#[derive(Debug, Clone, Copy)]
pub struct OrderFilter {
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
    /// Restrict to one station.
    pub station_id: Option<StationId>,
    /// Restrict to one supplier.
    pub supplier_id: Option<SupplierId>,
    /// Restrict to one status.
    pub status: Option<OrderStatus>,
}

/// Volume bucket joined with its display label.
#[derive(Debug, Clone)]
pub struct VolumeBucketView {
    /// Resolved display label (entity name or fuel label).
    pub label: String,
    /// The aggregate.
    pub bucket: VolumeBucket,
}

/// Orchestration layer for purchase orders.
#[derive(Debug, Clone)]
pub struct OrderService {
    store: PgStore,
}

impl OrderService {
    /// Creates a new `OrderService`.
    #[must_use]
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }

    /// Places a purchase order in `draft` status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn create_order(&self, input: OrderInput) -> Result<PurchaseOrder, ApiError> {
        if input.volume_liters <= Decimal::ZERO {
            return Err(ApiError::InvalidRequest(
                "volume_liters must be positive".to_string(),
            ));
        }
        if input.product_price_per_liter <= Decimal::ZERO {
            return Err(ApiError::InvalidRequest(
                "product_price_per_liter must be positive".to_string(),
            ));
        }
        if input.freight_cost_per_liter < Decimal::ZERO {
            return Err(ApiError::InvalidRequest(
                "freight_cost_per_liter must not be negative".to_string(),
            ));
        }
        self.store
            .get_station(*input.station_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("station", input.station_id))?;
        self.store
            .get_supplier(*input.supplier_id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("supplier", input.supplier_id))?;

        let now = Utc::now();
        let order = PurchaseOrder {
            id: OrderId::new(),
            station_id: input.station_id,
            supplier_id: input.supplier_id,
            fuel: input.fuel,
            vehicle: input.vehicle,
            volume_liters: input.volume_liters,
            product_price_per_liter: input.product_price_per_liter,
            freight_cost_per_liter: input.freight_cost_per_liter,
            order_date: input.order_date,
            status: OrderStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_order(&order).await?;
        tracing::info!(
            order_id = %order.id,
            station_id = %order.station_id,
            supplier_id = %order.supplier_id,
            liters = %order.volume_liters,
            "order placed"
        );
        Ok(order)
    }

    /// Fetches an order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the order does not exist.
    pub async fn get_order(&self, id: OrderId) -> Result<PurchaseOrder, ApiError> {
        self.store
            .get_order(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("order", id))
    }

    /// Lists orders matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the range is inverted.
    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<PurchaseOrder>, ApiError> {
        if filter.from > filter.to {
            return Err(ApiError::InvalidRequest(
                "from must not be after to".to_string(),
            ));
        }
        self.store
            .orders_between(
                filter.from,
                filter.to,
                filter.station_id.map(|s| *s.as_uuid()),
                filter.supplier_id.map(|s| *s.as_uuid()),
                filter.status,
            )
            .await
    }

    /// Moves an order to a new status, enforcing the lifecycle rules.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidStatusTransition`] when the move is
    /// not allowed.
    pub async fn update_status(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<PurchaseOrder, ApiError> {
        let mut order = self.get_order(id).await?;
        if !order.status.can_transition_to(next) {
            return Err(ApiError::InvalidStatusTransition {
                from: order.status,
                to: next,
            });
        }
        if !self.store.update_order_status(*id.as_uuid(), next).await? {
            return Err(ApiError::not_found("order", id));
        }
        tracing::info!(order_id = %id, from = %order.status, to = %next, "order status changed");
        order.status = next;
        order.updated_at = Utc::now();
        Ok(order)
    }

    /// Volume and spend bucketed by the chosen dimension across a date
    /// range, with display labels resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the range is inverted.
    pub async fn volume_dashboard(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        group_by: VolumeGroupBy,
    ) -> Result<Vec<VolumeBucketView>, ApiError> {
        if from > to {
            return Err(ApiError::InvalidRequest(
                "from must not be after to".to_string(),
            ));
        }
        let orders = self
            .store
            .orders_between(from, to, None, None, None)
            .await?;
        let buckets = analytics::volume_summary(&orders, group_by);

        let views = match group_by {
            VolumeGroupBy::Fuel => buckets
                .into_iter()
                .map(|bucket| {
                    let label = bucket
                        .key
                        .parse::<FuelType>()
                        .map_or_else(|_| bucket.key.clone(), |f| f.label().to_string());
                    VolumeBucketView { label, bucket }
                })
                .collect(),
            VolumeGroupBy::Supplier => {
                let suppliers = self.store.list_suppliers().await?;
                buckets
                    .into_iter()
                    .map(|bucket| {
                        let label = suppliers
                            .iter()
                            .find(|s| s.id.to_string() == bucket.key)
                            .map_or_else(|| bucket.key.clone(), |s| s.name.clone());
                        VolumeBucketView { label, bucket }
                    })
                    .collect()
            }
            VolumeGroupBy::Station => {
                let stations = self.store.list_stations().await?;
                buckets
                    .into_iter()
                    .map(|bucket| {
                        let label = stations
                            .iter()
                            .find(|s| s.id.to_string() == bucket.key)
                            .map_or_else(|| bucket.key.clone(), |s| s.name.clone());
                        VolumeBucketView { label, bucket }
                    })
                    .collect()
            }
        };
        Ok(views)
    }

    /// Spend totals across a date range.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the range is inverted.
    pub async fn financial_dashboard(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<FinancialSummary, ApiError> {
        if from > to {
            return Err(ApiError::InvalidRequest(
                "from must not be after to".to_string(),
            ));
        }
        let orders = self
            .store
            .orders_between(from, to, None, None, None)
            .await?;
        Ok(analytics::financial_summary(&orders))
    }
}
