//! Database row models and their conversions into domain entities.
//!
//! Each `*Row` struct mirrors one table and derives [`sqlx::FromRow`].
//! Enumerations are stored as text; `TryFrom` conversions parse them and
//! surface unknown values as [`ApiError::Internal`], since only the
//! service writes these columns.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::{
    City, CityId, Flag, FreightRoute, FuelType, GroupId, GroupReferencePrice, OrderId,
    OrderStatus, PriceQuote, PurchaseOrder, QuoteId, RouteId, Station, StationGroup, StationId,
    Supplier, SupplierId, VehicleType,
};
use crate::error::ApiError;

fn parse_column<T>(column: &str, value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| ApiError::Internal(format!("corrupt {column} column: {e}")))
}

/// A `cities` table row.
#[derive(Debug, Clone, FromRow)]
pub struct CityRow {
    /// Primary key.
    pub id: Uuid,
    /// City name.
    pub name: String,
    /// Two-letter state code.
    pub state: String,
    /// Supply-base flag.
    pub is_supply_base: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        Self {
            id: CityId::from_uuid(row.id),
            name: row.name,
            state: row.state,
            is_supply_base: row.is_supply_base,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A `suppliers` table row.
#[derive(Debug, Clone, FromRow)]
pub struct SupplierRow {
    /// Primary key.
    pub id: Uuid,
    /// Supplier name.
    pub name: String,
    /// Optional tax identifier.
    pub tax_id: Option<String>,
    /// Default loading city.
    pub base_city_id: Uuid,
    /// Payment term in days.
    pub payment_term_days: i32,
    /// Active flag.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: SupplierId::from_uuid(row.id),
            name: row.name,
            tax_id: row.tax_id,
            base_city_id: CityId::from_uuid(row.base_city_id),
            payment_term_days: u32::try_from(row.payment_term_days).unwrap_or(0),
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A `stations` table row.
#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    /// Primary key.
    pub id: Uuid,
    /// Station name.
    pub name: String,
    /// Location city.
    pub city_id: Uuid,
    /// Flag discriminator text.
    pub flag: String,
    /// Optional group membership.
    pub group_id: Option<Uuid>,
    /// Estimated monthly volume.
    pub monthly_volume_liters: Option<Decimal>,
    /// Active flag.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<StationRow> for Station {
    type Error = ApiError;

    fn try_from(row: StationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StationId::from_uuid(row.id),
            name: row.name,
            city_id: CityId::from_uuid(row.city_id),
            flag: parse_column::<Flag>("flag", &row.flag)?,
            group_id: row.group_id.map(GroupId::from_uuid),
            monthly_volume_liters: row.monthly_volume_liters,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A `station_groups` table row.
#[derive(Debug, Clone, FromRow)]
pub struct GroupRow {
    /// Primary key.
    pub id: Uuid,
    /// Group name.
    pub name: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<GroupRow> for StationGroup {
    fn from(row: GroupRow) -> Self {
        Self {
            id: GroupId::from_uuid(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A `group_reference_prices` table row.
#[derive(Debug, Clone, FromRow)]
pub struct GroupReferencePriceRow {
    /// Owning group.
    pub group_id: Uuid,
    /// Fuel discriminator text.
    pub fuel: String,
    /// Target price per liter.
    pub price_per_liter: Decimal,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GroupReferencePriceRow> for GroupReferencePrice {
    type Error = ApiError;

    fn try_from(row: GroupReferencePriceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            group_id: GroupId::from_uuid(row.group_id),
            fuel: parse_column::<FuelType>("fuel", &row.fuel)?,
            price_per_liter: row.price_per_liter,
            updated_at: row.updated_at,
        })
    }
}

/// A `freight_routes` table row.
#[derive(Debug, Clone, FromRow)]
pub struct FreightRouteRow {
    /// Primary key.
    pub id: Uuid,
    /// Loading city.
    pub origin_city_id: Uuid,
    /// Delivery city.
    pub dest_city_id: Uuid,
    /// Vehicle discriminator text.
    pub vehicle: String,
    /// Freight cost per liter.
    pub cost_per_liter: Decimal,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<FreightRouteRow> for FreightRoute {
    type Error = ApiError;

    fn try_from(row: FreightRouteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RouteId::from_uuid(row.id),
            origin_city_id: CityId::from_uuid(row.origin_city_id),
            dest_city_id: CityId::from_uuid(row.dest_city_id),
            vehicle: parse_column::<VehicleType>("vehicle", &row.vehicle)?,
            cost_per_liter: row.cost_per_liter,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A `price_quotes` table row.
#[derive(Debug, Clone, FromRow)]
pub struct PriceQuoteRow {
    /// Primary key.
    pub id: Uuid,
    /// Quoting supplier.
    pub supplier_id: Uuid,
    /// Loading city the price assumes.
    pub base_city_id: Uuid,
    /// Fuel discriminator text.
    pub fuel: String,
    /// Business date.
    pub quote_date: NaiveDate,
    /// Product price per liter.
    pub price_per_liter: Decimal,
    /// Optional flag restriction text.
    pub flag_restriction: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PriceQuoteRow> for PriceQuote {
    type Error = ApiError;

    fn try_from(row: PriceQuoteRow) -> Result<Self, Self::Error> {
        let flag_restriction = row
            .flag_restriction
            .as_deref()
            .map(|f| parse_column::<Flag>("flag_restriction", f))
            .transpose()?;
        Ok(Self {
            id: QuoteId::from_uuid(row.id),
            supplier_id: SupplierId::from_uuid(row.supplier_id),
            base_city_id: CityId::from_uuid(row.base_city_id),
            fuel: parse_column::<FuelType>("fuel", &row.fuel)?,
            quote_date: row.quote_date,
            price_per_liter: row.price_per_liter,
            flag_restriction,
            created_at: row.created_at,
        })
    }
}

/// A `purchase_orders` table row.
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseOrderRow {
    /// Primary key.
    pub id: Uuid,
    /// Receiving station.
    pub station_id: Uuid,
    /// Selling supplier.
    pub supplier_id: Uuid,
    /// Fuel discriminator text.
    pub fuel: String,
    /// Vehicle discriminator text.
    pub vehicle: String,
    /// Ordered volume in liters.
    pub volume_liters: Decimal,
    /// Negotiated product price per liter.
    pub product_price_per_liter: Decimal,
    /// Negotiated freight cost per liter.
    pub freight_cost_per_liter: Decimal,
    /// Business date.
    pub order_date: NaiveDate,
    /// Status discriminator text.
    pub status: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PurchaseOrderRow> for PurchaseOrder {
    type Error = ApiError;

    fn try_from(row: PurchaseOrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: OrderId::from_uuid(row.id),
            station_id: StationId::from_uuid(row.station_id),
            supplier_id: SupplierId::from_uuid(row.supplier_id),
            fuel: parse_column::<FuelType>("fuel", &row.fuel)?,
            vehicle: parse_column::<VehicleType>("vehicle", &row.vehicle)?,
            volume_liters: row.volume_liters,
            product_price_per_liter: row.product_price_per_liter,
            freight_cost_per_liter: row.freight_cost_per_liter,
            order_date: row.order_date,
            status: parse_column::<OrderStatus>("status", &row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn station_row_parses_flag() {
        let row = StationRow {
            id: Uuid::new_v4(),
            name: "posto".to_string(),
            city_id: Uuid::new_v4(),
            flag: "white".to_string(),
            group_id: None,
            monthly_volume_liters: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let station = Station::try_from(row);
        assert_eq!(station.ok().map(|s| s.flag), Some(Flag::White));
    }

    #[test]
    fn station_row_rejects_corrupt_flag() {
        let row = StationRow {
            id: Uuid::new_v4(),
            name: "posto".to_string(),
            city_id: Uuid::new_v4(),
            flag: "plaid".to_string(),
            group_id: None,
            monthly_volume_liters: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(Station::try_from(row).is_err());
    }

    #[test]
    fn quote_row_parses_optional_restriction() {
        let row = PriceQuoteRow {
            id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            base_city_id: Uuid::new_v4(),
            fuel: "diesel_s10".to_string(),
            quote_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            price_per_liter: Decimal::new(389, 2),
            flag_restriction: Some("branded".to_string()),
            created_at: Utc::now(),
        };
        let quote = PriceQuote::try_from(row);
        let Ok(quote) = quote else {
            panic!("conversion failed");
        };
        assert_eq!(quote.fuel, FuelType::DieselS10);
        assert_eq!(quote.flag_restriction, Some(Flag::Branded));
    }
}
