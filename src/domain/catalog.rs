//! Catalog entities and controlled vocabulary.
//!
//! The relational rows this service manages: cities, suppliers,
//! stations, station groups, freight routes, daily price quotes, and
//! purchase orders. Enumerations carry their wire discriminators
//! (snake_case strings used both in JSON and in the database).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{CityId, GroupId, OrderId, QuoteId, RouteId, StationId, SupplierId};

/// Fuel products traded on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    /// Regular gasoline (gasolina comum).
    GasolineRegular,
    /// Additive gasoline (gasolina aditivada).
    GasolineAdditive,
    /// Hydrous ethanol.
    Ethanol,
    /// Diesel S10 (10 ppm sulfur).
    DieselS10,
    /// Diesel S500 (500 ppm sulfur).
    DieselS500,
}

impl FuelType {
    /// All fuel types, in catalog order.
    pub const ALL: [Self; 5] = [
        Self::GasolineRegular,
        Self::GasolineAdditive,
        Self::Ethanol,
        Self::DieselS10,
        Self::DieselS500,
    ];

    /// Wire discriminator used in JSON and database text columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GasolineRegular => "gasoline_regular",
            Self::GasolineAdditive => "gasoline_additive",
            Self::Ethanol => "ethanol",
            Self::DieselS10 => "diesel_s10",
            Self::DieselS500 => "diesel_s500",
        }
    }

    /// Human-readable label for catalog listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::GasolineRegular => "Gasolina Comum",
            Self::GasolineAdditive => "Gasolina Aditivada",
            Self::Ethanol => "Etanol Hidratado",
            Self::DieselS10 => "Diesel S10",
            Self::DieselS500 => "Diesel S500",
        }
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gasoline_regular" => Ok(Self::GasolineRegular),
            "gasoline_additive" => Ok(Self::GasolineAdditive),
            "ethanol" => Ok(Self::Ethanol),
            "diesel_s10" => Ok(Self::DieselS10),
            "diesel_s500" => Ok(Self::DieselS500),
            other => Err(format!("unknown fuel type: {other}")),
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand affiliation of a station (bandeira).
///
/// Suppliers may restrict a price quote to stations of one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// White-label station, free to buy from any supplier.
    White,
    /// Station tied to a distributor brand.
    Branded,
}

impl Flag {
    /// All flags, in catalog order.
    pub const ALL: [Self; 2] = [Self::White, Self::Branded];

    /// Wire discriminator used in JSON and database text columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Branded => "branded",
        }
    }
}

impl std::str::FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "white" => Ok(Self::White),
            "branded" => Ok(Self::Branded),
            other => Err(format!("unknown flag: {other}")),
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tanker vehicle classes freight is quoted for.
///
/// Freight cost per liter differs by vehicle because capacity dilutes
/// the fixed trip cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    /// Small rigid tanker.
    Toco,
    /// Three-axle rigid truck.
    Truck,
    /// Semi-trailer tanker.
    Carreta,
    /// Double-trailer combination.
    Bitrem,
}

impl VehicleType {
    /// All vehicle types, in catalog order.
    pub const ALL: [Self; 4] = [Self::Toco, Self::Truck, Self::Carreta, Self::Bitrem];

    /// Wire discriminator used in JSON and database text columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toco => "toco",
            Self::Truck => "truck",
            Self::Carreta => "carreta",
            Self::Bitrem => "bitrem",
        }
    }

    /// Nominal tank capacity in liters.
    #[must_use]
    pub const fn capacity_liters(&self) -> u32 {
        match self {
            Self::Toco => 15_000,
            Self::Truck => 30_000,
            Self::Carreta => 45_000,
            Self::Bitrem => 60_000,
        }
    }
}

impl std::str::FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toco" => Ok(Self::Toco),
            "truck" => Ok(Self::Truck),
            "carreta" => Ok(Self::Carreta),
            "bitrem" => Ok(Self::Bitrem),
            other => Err(format!("unknown vehicle type: {other}")),
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Registered but not yet committed with the supplier.
    Draft,
    /// Committed; awaiting delivery.
    Confirmed,
    /// Delivered to the station. Terminal.
    Delivered,
    /// Abandoned. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in catalog order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::Confirmed, Self::Delivered, Self::Cancelled];

    /// Wire discriminator used in JSON and database text columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order in this status may move to `next`.
    ///
    /// Draft orders may be confirmed or cancelled; confirmed orders may
    /// be delivered or cancelled. Terminal statuses admit no change.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Delivered | Self::Cancelled)
        )
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A city: either a station location, a supply base (cidade base), or
/// both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    /// Unique city identifier.
    pub id: CityId,
    /// City name.
    pub name: String,
    /// Two-letter state code (UF).
    pub state: String,
    /// Whether suppliers load fuel here.
    pub is_supply_base: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A fuel supplier quoting daily prices from a supply base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique supplier identifier.
    pub id: SupplierId,
    /// Legal or trade name.
    pub name: String,
    /// Tax identifier (CNPJ). Free text, optional.
    pub tax_id: Option<String>,
    /// Default loading city.
    pub base_city_id: CityId,
    /// Payment term granted, in days. Drives financial cost.
    pub payment_term_days: u32,
    /// Inactive suppliers are excluded from cost resolution.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A retail fuel station (posto), the unit being supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier.
    pub id: StationId,
    /// Station name.
    pub name: String,
    /// City where the station is located.
    pub city_id: CityId,
    /// Brand affiliation (bandeira).
    pub flag: Flag,
    /// Optional pricing group membership.
    pub group_id: Option<GroupId>,
    /// Estimated monthly volume in liters, when known.
    pub monthly_volume_liters: Option<Decimal>,
    /// Inactive stations are excluded from dashboards.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A named collection of stations sharing reference pricing (grupo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationGroup {
    /// Unique group identifier.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-fuel target price a group negotiates against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReferencePrice {
    /// Owning group.
    pub group_id: GroupId,
    /// Fuel this reference applies to.
    pub fuel: FuelType,
    /// Target price per liter.
    pub price_per_liter: Decimal,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Freight cost per liter between a base and a destination city, keyed
/// by vehicle type (frete).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreightRoute {
    /// Unique route identifier.
    pub id: RouteId,
    /// Loading city (base).
    pub origin_city_id: CityId,
    /// Delivery city.
    pub dest_city_id: CityId,
    /// Vehicle the rate is quoted for.
    pub vehicle: VehicleType,
    /// Freight cost per liter.
    pub cost_per_liter: Decimal,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A supplier's daily price for one fuel from one base.
///
/// One quote exists per (supplier, fuel, date); a later submission for
/// the same key replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Unique quote identifier.
    pub id: QuoteId,
    /// Quoting supplier.
    pub supplier_id: SupplierId,
    /// Loading city the price assumes.
    pub base_city_id: CityId,
    /// Quoted fuel.
    pub fuel: FuelType,
    /// Business date the price is valid for.
    pub quote_date: NaiveDate,
    /// Product price per liter, ex-freight.
    pub price_per_liter: Decimal,
    /// When set, only stations of this flag may buy at this price.
    pub flag_restriction: Option<Flag>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A purchase order placing volume with a supplier for a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique order identifier.
    pub id: OrderId,
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
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Landed cost per liter: product plus freight.
    #[must_use]
    pub fn cost_per_liter(&self) -> Decimal {
        self.product_price_per_liter + self.freight_cost_per_liter
    }

    /// Total order value: landed cost times volume.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.cost_per_liter() * self.volume_liters
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn fuel_type_str_round_trip() {
        for fuel in FuelType::ALL {
            let parsed: Result<FuelType, _> = fuel.as_str().parse();
            assert_eq!(parsed.ok(), Some(fuel));
        }
    }

    #[test]
    fn fuel_type_rejects_unknown() {
        let parsed: Result<FuelType, _> = "kerosene".parse();
        assert!(parsed.is_err());
    }

    #[test]
    fn vehicle_type_str_round_trip() {
        for vehicle in VehicleType::ALL {
            let parsed: Result<VehicleType, _> = vehicle.as_str().parse();
            assert_eq!(parsed.ok(), Some(vehicle));
        }
    }

    #[test]
    fn vehicle_capacity_increases_with_class() {
        assert!(VehicleType::Toco.capacity_liters() < VehicleType::Truck.capacity_liters());
        assert!(VehicleType::Carreta.capacity_liters() < VehicleType::Bitrem.capacity_liters());
    }

    #[test]
    fn flag_str_round_trip() {
        for flag in Flag::ALL {
            let parsed: Result<Flag, _> = flag.as_str().parse();
            assert_eq!(parsed.ok(), Some(flag));
        }
    }

    #[test]
    fn order_status_transitions() {
        use OrderStatus::{Cancelled, Confirmed, Delivered, Draft};

        assert!(Draft.can_transition_to(Confirmed));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Delivered));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Draft.can_transition_to(Delivered));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Draft));
        assert!(!Confirmed.can_transition_to(Draft));
    }

    #[test]
    fn fuel_serde_uses_snake_case() {
        let json = serde_json::to_string(&FuelType::DieselS10).ok();
        assert_eq!(json.as_deref(), Some("\"diesel_s10\""));
    }

    #[test]
    fn order_totals() {
        let order = PurchaseOrder {
            id: crate::domain::OrderId::new(),
            station_id: crate::domain::StationId::new(),
            supplier_id: crate::domain::SupplierId::new(),
            fuel: FuelType::Ethanol,
            vehicle: VehicleType::Carreta,
            volume_liters: Decimal::new(10_000, 0),
            product_price_per_liter: Decimal::new(350, 2),
            freight_cost_per_liter: Decimal::new(15, 2),
            order_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
            status: OrderStatus::Draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(order.cost_per_liter(), Decimal::new(365, 2));
        assert_eq!(order.total_value(), Decimal::new(36_500, 0));
    }
}
