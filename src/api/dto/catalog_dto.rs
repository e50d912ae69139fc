//! Catalog DTOs: cities, suppliers, stations, and groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common_dto::PaginationMeta;
use crate::domain::{
    City, CityId, GroupId, GroupReferencePrice, Station, StationGroup, StationId, Supplier,
    SupplierId,
};

/// Request body for `POST /cities` and `PUT /cities/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CityRequest {
    /// City name.
    pub name: String,
    /// Two-letter state code (UF).
    pub state: String,
    /// Whether suppliers load fuel here. Defaults to false.
    #[serde(default)]
    pub is_supply_base: bool,
}

/// City representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityResponse {
    /// Unique city identifier.
    pub id: CityId,
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

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state: city.state,
            is_supply_base: city.is_supply_base,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}

/// Paginated list response for `GET /cities`.
#[derive(Debug, Serialize, ToSchema)]
pub struct CityListResponse {
    /// City rows.
    pub data: Vec<CityResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `POST /suppliers` and `PUT /suppliers/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplierRequest {
    /// Legal or trade name.
    pub name: String,
    /// Tax identifier (CNPJ). Optional.
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Default loading city; must be a supply base.
    pub base_city_id: CityId,
    /// Payment term granted, in days. Defaults to 0 (cash).
    #[serde(default)]
    pub payment_term_days: u32,
    /// Active flag. Defaults to true.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Supplier representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierResponse {
    /// Unique supplier identifier.
    pub id: SupplierId,
    /// Legal or trade name.
    pub name: String,
    /// Tax identifier, when registered.
    pub tax_id: Option<String>,
    /// Default loading city.
    pub base_city_id: CityId,
    /// Payment term in days.
    pub payment_term_days: u32,
    /// Active flag.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            tax_id: supplier.tax_id,
            base_city_id: supplier.base_city_id,
            payment_term_days: supplier.payment_term_days,
            active: supplier.active,
            created_at: supplier.created_at,
            updated_at: supplier.updated_at,
        }
    }
}

/// Paginated list response for `GET /suppliers`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SupplierListResponse {
    /// Supplier rows.
    pub data: Vec<SupplierResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `POST /stations` and `PUT /stations/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StationRequest {
    /// Station name.
    pub name: String,
    /// Location city.
    pub city_id: CityId,
    /// Brand affiliation discriminator (`white` or `branded`).
    pub flag: String,
    /// Optional group membership.
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Estimated monthly volume in liters, as a decimal string.
    #[serde(default)]
    pub monthly_volume_liters: Option<String>,
    /// Active flag. Defaults to true.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Station representation in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct StationResponse {
    /// Unique station identifier.
    pub id: StationId,
    /// Station name.
    pub name: String,
    /// Location city.
    pub city_id: CityId,
    /// Brand affiliation discriminator.
    pub flag: String,
    /// Group membership, when any.
    pub group_id: Option<GroupId>,
    /// Estimated monthly volume in liters, as a decimal string.
    pub monthly_volume_liters: Option<String>,
    /// Active flag.
    pub active: bool,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
            city_id: station.city_id,
            flag: station.flag.as_str().to_string(),
            group_id: station.group_id,
            monthly_volume_liters: station.monthly_volume_liters.map(|v| v.to_string()),
            active: station.active,
            created_at: station.created_at,
            updated_at: station.updated_at,
        }
    }
}

/// Paginated list response for `GET /stations`.
#[derive(Debug, Serialize, ToSchema)]
pub struct StationListResponse {
    /// Station rows.
    pub data: Vec<StationResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `POST /groups` and `PUT /groups/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GroupRequest {
    /// Group name.
    pub name: String,
}

/// One per-fuel reference price entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReferencePriceEntry {
    /// Fuel discriminator.
    pub fuel: String,
    /// Target price per liter, as a decimal string.
    pub price_per_liter: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<GroupReferencePrice> for ReferencePriceEntry {
    fn from(price: GroupReferencePrice) -> Self {
        Self {
            fuel: price.fuel.as_str().to_string(),
            price_per_liter: price.price_per_liter.to_string(),
            updated_at: price.updated_at,
        }
    }
}

/// Group representation in responses, with its reference prices.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupResponse {
    /// Unique group identifier.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Per-fuel reference prices, when loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_prices: Option<Vec<ReferencePriceEntry>>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<StationGroup> for GroupResponse {
    fn from(group: StationGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            reference_prices: None,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

/// Paginated list response for `GET /groups`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GroupListResponse {
    /// Group rows.
    pub data: Vec<GroupResponse>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Request body for `PUT /groups/{id}/reference-prices`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetReferencePricesRequest {
    /// Entries to upsert.
    pub prices: Vec<ReferencePriceInput>,
}

/// One reference price to set.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReferencePriceInput {
    /// Fuel discriminator.
    pub fuel: String,
    /// Target price per liter, as a decimal string.
    pub price_per_liter: String,
}

fn default_true() -> bool {
    true
}
