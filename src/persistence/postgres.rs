//! PostgreSQL implementation of the persistence layer.
//!
//! [`PgStore`] is the single data-access type: plain row-level CRUD and
//! the handful of filtered queries the services need. No caching, no
//! retry; errors surface as [`ApiError::PersistenceError`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{
    CityRow, FreightRouteRow, GroupReferencePriceRow, GroupRow, PriceQuoteRow, PurchaseOrderRow,
    StationRow, SupplierRow,
};
use crate::domain::{
    City, FreightRoute, FuelType, GroupReferencePrice, OrderStatus, PriceQuote, PurchaseOrder,
    Station, StationGroup, Supplier,
};
use crate::error::ApiError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>, ApiError>
where
    T: TryFrom<R, Error = ApiError>,
{
    rows.into_iter().map(T::try_from).collect()
}

impl PgStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ── Cities ──────────────────────────────────────────────────────────

    /// Inserts a city row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn insert_city(&self, city: &City) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO cities (id, name, state, is_supply_base, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(city.id.as_uuid())
        .bind(&city.name)
        .bind(&city.state)
        .bind(city.is_supply_base)
        .bind(city.created_at)
        .bind(city.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Updates a city row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn update_city(&self, city: &City) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE cities SET name = $2, state = $3, is_supply_base = $4, updated_at = now() \
             WHERE id = $1",
        )
        .bind(city.id.as_uuid())
        .bind(&city.name)
        .bind(&city.state)
        .bind(city.is_supply_base)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a city row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn delete_city(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetches a city by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn get_city(&self, id: Uuid) -> Result<Option<City>, ApiError> {
        let row = sqlx::query_as::<_, CityRow>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(City::from))
    }

    /// Lists all cities ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let rows = sqlx::query_as::<_, CityRow>("SELECT * FROM cities ORDER BY name, state")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(City::from).collect())
    }

    // ── Suppliers ───────────────────────────────────────────────────────

    /// Inserts a supplier row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn insert_supplier(&self, supplier: &Supplier) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO suppliers \
             (id, name, tax_id, base_city_id, payment_term_days, active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(supplier.id.as_uuid())
        .bind(&supplier.name)
        .bind(&supplier.tax_id)
        .bind(supplier.base_city_id.as_uuid())
        .bind(i32::try_from(supplier.payment_term_days).unwrap_or(i32::MAX))
        .bind(supplier.active)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Updates a supplier row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn update_supplier(&self, supplier: &Supplier) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE suppliers SET name = $2, tax_id = $3, base_city_id = $4, \
             payment_term_days = $5, active = $6, updated_at = now() WHERE id = $1",
        )
        .bind(supplier.id.as_uuid())
        .bind(&supplier.name)
        .bind(&supplier.tax_id)
        .bind(supplier.base_city_id.as_uuid())
        .bind(i32::try_from(supplier.payment_term_days).unwrap_or(i32::MAX))
        .bind(supplier.active)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a supplier row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn delete_supplier(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetches a supplier by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, ApiError> {
        let row = sqlx::query_as::<_, SupplierRow>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Supplier::from))
    }

    /// Lists all suppliers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        let rows = sqlx::query_as::<_, SupplierRow>("SELECT * FROM suppliers ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    // ── Stations ────────────────────────────────────────────────────────

    /// Inserts a station row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn insert_station(&self, station: &Station) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO stations \
             (id, name, city_id, flag, group_id, monthly_volume_liters, active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(station.id.as_uuid())
        .bind(&station.name)
        .bind(station.city_id.as_uuid())
        .bind(station.flag.as_str())
        .bind(station.group_id.map(|g| *g.as_uuid()))
        .bind(station.monthly_volume_liters)
        .bind(station.active)
        .bind(station.created_at)
        .bind(station.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Updates a station row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn update_station(&self, station: &Station) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE stations SET name = $2, city_id = $3, flag = $4, group_id = $5, \
             monthly_volume_liters = $6, active = $7, updated_at = now() WHERE id = $1",
        )
        .bind(station.id.as_uuid())
        .bind(&station.name)
        .bind(station.city_id.as_uuid())
        .bind(station.flag.as_str())
        .bind(station.group_id.map(|g| *g.as_uuid()))
        .bind(station.monthly_volume_liters)
        .bind(station.active)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a station row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn delete_station(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM stations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetches a station by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn get_station(&self, id: Uuid) -> Result<Option<Station>, ApiError> {
        let row = sqlx::query_as::<_, StationRow>("SELECT * FROM stations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Station::try_from).transpose()
    }

    /// Lists all stations ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        let rows = sqlx::query_as::<_, StationRow>("SELECT * FROM stations ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        collect(rows)
    }

    /// Lists active stations belonging to a group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn stations_in_group(&self, group_id: Uuid) -> Result<Vec<Station>, ApiError> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT * FROM stations WHERE group_id = $1 AND active ORDER BY name",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    // ── Station groups ──────────────────────────────────────────────────

    /// Inserts a group row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn insert_group(&self, group: &StationGroup) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO station_groups (id, name, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(group.id.as_uuid())
        .bind(&group.name)
        .bind(group.created_at)
        .bind(group.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Updates a group row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn update_group(&self, group: &StationGroup) -> Result<bool, ApiError> {
        let result =
            sqlx::query("UPDATE station_groups SET name = $2, updated_at = now() WHERE id = $1")
                .bind(group.id.as_uuid())
                .bind(&group.name)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a group row, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn delete_group(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM station_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetches a group by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn get_group(&self, id: Uuid) -> Result<Option<StationGroup>, ApiError> {
        let row = sqlx::query_as::<_, GroupRow>("SELECT * FROM station_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(StationGroup::from))
    }

    /// Lists all groups ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_groups(&self) -> Result<Vec<StationGroup>, ApiError> {
        let rows = sqlx::query_as::<_, GroupRow>("SELECT * FROM station_groups ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(StationGroup::from).collect())
    }

    /// Upserts one per-fuel reference price for a group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn set_reference_price(
        &self,
        group_id: Uuid,
        fuel: FuelType,
        price_per_liter: Decimal,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO group_reference_prices (group_id, fuel, price_per_liter, updated_at) \
             VALUES ($1, $2, $3, now()) \
             ON CONFLICT (group_id, fuel) \
             DO UPDATE SET price_per_liter = EXCLUDED.price_per_liter, updated_at = now()",
        )
        .bind(group_id)
        .bind(fuel.as_str())
        .bind(price_per_liter)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Lists the reference prices of one group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn reference_prices(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<GroupReferencePrice>, ApiError> {
        let rows = sqlx::query_as::<_, GroupReferencePriceRow>(
            "SELECT * FROM group_reference_prices WHERE group_id = $1 ORDER BY fuel",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    /// Lists every group's reference price for one fuel.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn reference_prices_for_fuel(
        &self,
        fuel: FuelType,
    ) -> Result<Vec<GroupReferencePrice>, ApiError> {
        let rows = sqlx::query_as::<_, GroupReferencePriceRow>(
            "SELECT * FROM group_reference_prices WHERE fuel = $1",
        )
        .bind(fuel.as_str())
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    // ── Freight routes ──────────────────────────────────────────────────

    /// Upserts a freight route keyed by (origin, destination, vehicle).
    ///
    /// Returns the row id (existing id when the rate was updated).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn upsert_route(&self, route: &FreightRoute) -> Result<Uuid, ApiError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO freight_routes \
             (id, origin_city_id, dest_city_id, vehicle, cost_per_liter, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (origin_city_id, dest_city_id, vehicle) \
             DO UPDATE SET cost_per_liter = EXCLUDED.cost_per_liter, updated_at = now() \
             RETURNING id",
        )
        .bind(route.id.as_uuid())
        .bind(route.origin_city_id.as_uuid())
        .bind(route.dest_city_id.as_uuid())
        .bind(route.vehicle.as_str())
        .bind(route.cost_per_liter)
        .bind(route.created_at)
        .bind(route.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Deletes a freight route, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn delete_route(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM freight_routes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lists freight routes, optionally filtered by origin and/or
    /// destination city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn list_routes(
        &self,
        origin: Option<Uuid>,
        destination: Option<Uuid>,
    ) -> Result<Vec<FreightRoute>, ApiError> {
        let rows = sqlx::query_as::<_, FreightRouteRow>(
            "SELECT * FROM freight_routes \
             WHERE ($1::uuid IS NULL OR origin_city_id = $1) \
               AND ($2::uuid IS NULL OR dest_city_id = $2) \
             ORDER BY origin_city_id, dest_city_id, vehicle",
        )
        .bind(origin)
        .bind(destination)
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    // ── Price quotes ────────────────────────────────────────────────────

    /// Upserts a daily quote keyed by (supplier, fuel, date).
    ///
    /// Returns the row id (existing id when the price was replaced).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn upsert_quote(&self, quote: &PriceQuote) -> Result<Uuid, ApiError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO price_quotes \
             (id, supplier_id, base_city_id, fuel, quote_date, price_per_liter, flag_restriction, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (supplier_id, fuel, quote_date) \
             DO UPDATE SET price_per_liter = EXCLUDED.price_per_liter, \
                           base_city_id = EXCLUDED.base_city_id, \
                           flag_restriction = EXCLUDED.flag_restriction \
             RETURNING id",
        )
        .bind(quote.id.as_uuid())
        .bind(quote.supplier_id.as_uuid())
        .bind(quote.base_city_id.as_uuid())
        .bind(quote.fuel.as_str())
        .bind(quote.quote_date)
        .bind(quote.price_per_liter)
        .bind(quote.flag_restriction.map(|f| f.as_str()))
        .bind(quote.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Lists quotes for one business date, optionally narrowed by fuel
    /// and/or supplier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn quotes_on(
        &self,
        date: NaiveDate,
        fuel: Option<FuelType>,
        supplier: Option<Uuid>,
    ) -> Result<Vec<PriceQuote>, ApiError> {
        let rows = sqlx::query_as::<_, PriceQuoteRow>(
            "SELECT * FROM price_quotes \
             WHERE quote_date = $1 \
               AND ($2::text IS NULL OR fuel = $2) \
               AND ($3::uuid IS NULL OR supplier_id = $3) \
             ORDER BY fuel, price_per_liter",
        )
        .bind(date)
        .bind(fuel.map(|f| f.as_str()))
        .bind(supplier)
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    /// Lists quotes for one fuel across a date range (inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn quotes_between(
        &self,
        fuel: FuelType,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceQuote>, ApiError> {
        let rows = sqlx::query_as::<_, PriceQuoteRow>(
            "SELECT * FROM price_quotes \
             WHERE fuel = $1 AND quote_date BETWEEN $2 AND $3 \
             ORDER BY supplier_id, quote_date",
        )
        .bind(fuel.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }

    // ── Purchase orders ─────────────────────────────────────────────────

    /// Inserts a purchase order row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn insert_order(&self, order: &PurchaseOrder) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO purchase_orders \
             (id, station_id, supplier_id, fuel, vehicle, volume_liters, \
              product_price_per_liter, freight_cost_per_liter, order_date, status, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(order.id.as_uuid())
        .bind(order.station_id.as_uuid())
        .bind(order.supplier_id.as_uuid())
        .bind(order.fuel.as_str())
        .bind(order.vehicle.as_str())
        .bind(order.volume_liters)
        .bind(order.product_price_per_liter)
        .bind(order.freight_cost_per_liter)
        .bind(order.order_date)
        .bind(order.status.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Fetches an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn get_order(&self, id: Uuid) -> Result<Option<PurchaseOrder>, ApiError> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(
            "SELECT * FROM purchase_orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(PurchaseOrder::try_from).transpose()
    }

    /// Updates an order's status, returning `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE purchase_orders SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Lists orders in a date range (inclusive), with optional filters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure or a
    /// corrupt enum column.
    pub async fn orders_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        station: Option<Uuid>,
        supplier: Option<Uuid>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<PurchaseOrder>, ApiError> {
        let rows = sqlx::query_as::<_, PurchaseOrderRow>(
            "SELECT * FROM purchase_orders \
             WHERE order_date BETWEEN $1 AND $2 \
               AND ($3::uuid IS NULL OR station_id = $3) \
               AND ($4::uuid IS NULL OR supplier_id = $4) \
               AND ($5::text IS NULL OR status = $5) \
             ORDER BY order_date DESC, created_at DESC",
        )
        .bind(from)
        .bind(to)
        .bind(station)
        .bind(supplier)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        collect(rows)
    }
}
