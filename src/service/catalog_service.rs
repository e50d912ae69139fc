//! Catalog service: cities, suppliers, stations, and groups.
//!
//! Orchestrates CRUD over the store with referential checks the
//! database alone would report less helpfully (400 for a bad reference
//! instead of a raw foreign-key violation).

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    City, CityId, Flag, GroupId, GroupReferencePrice, Station, StationGroup, StationId, Supplier,
    SupplierId,
};
use crate::error::ApiError;
use crate::persistence::PgStore;

/// Fields accepted when creating or updating a city.
#[derive(Debug, Clone)]
pub struct CityInput {
    /// City name.
    pub name: String,
    /// Two-letter state code (UF).
    pub state: String,
    /// Whether suppliers load fuel here.
    pub is_supply_base: bool,
}

/// Fields accepted when creating or updating a supplier.
#[derive(Debug, Clone)]
pub struct SupplierInput {
    /// Legal or trade name.
    pub name: String,
    /// Tax identifier (CNPJ). Free text, optional.
    pub tax_id: Option<String>,
    /// Default loading city.
    pub base_city_id: CityId,
    /// Payment term granted, in days.
    pub payment_term_days: u32,
    /// Active flag.
    pub active: bool,
}

/// Fields accepted when creating or updating a station.
#[derive(Debug, Clone)]
pub struct StationInput {
    /// Station name.
    pub name: String,
    /// Location city.
    pub city_id: CityId,
    /// Brand affiliation.
    pub flag: Flag,
    /// Optional group membership.
    pub group_id: Option<GroupId>,
    /// Estimated monthly volume in liters.
    pub monthly_volume_liters: Option<Decimal>,
    /// Active flag.
    pub active: bool,
}

/// Orchestration layer for catalog CRUD.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: PgStore,
}

impl CatalogService {
    /// Creates a new `CatalogService`.
    #[must_use]
    pub fn new(store: PgStore) -> Self {
        Self { store }
    }

    fn validate_name(name: &str) -> Result<(), ApiError> {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidRequest("name must not be empty".to_string()));
        }
        Ok(())
    }

    fn validate_state(state: &str) -> Result<(), ApiError> {
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ApiError::InvalidRequest(format!(
                "state must be a two-letter code, got {state:?}"
            )));
        }
        Ok(())
    }

    async fn require_city(&self, id: CityId) -> Result<City, ApiError> {
        self.store
            .get_city(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("city", id))
    }

    async fn require_supply_base(&self, id: CityId) -> Result<City, ApiError> {
        let city = self.require_city(id).await?;
        if !city.is_supply_base {
            return Err(ApiError::InvalidRequest(format!(
                "city {} is not a supply base",
                city.name
            )));
        }
        Ok(city)
    }

    // ── Cities ──────────────────────────────────────────────────────────

    /// Registers a city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn create_city(&self, input: CityInput) -> Result<City, ApiError> {
        Self::validate_name(&input.name)?;
        Self::validate_state(&input.state)?;

        let now = Utc::now();
        let city = City {
            id: CityId::new(),
            name: input.name,
            state: input.state.to_ascii_uppercase(),
            is_supply_base: input.is_supply_base,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_city(&city).await?;
        tracing::info!(city_id = %city.id, name = %city.name, "city created");
        Ok(city)
    }

    /// Updates a city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city does not exist.
    pub async fn update_city(&self, id: CityId, input: CityInput) -> Result<City, ApiError> {
        Self::validate_name(&input.name)?;
        Self::validate_state(&input.state)?;

        let mut city = self.require_city(id).await?;
        city.name = input.name;
        city.state = input.state.to_ascii_uppercase();
        city.is_supply_base = input.is_supply_base;
        city.updated_at = Utc::now();

        if !self.store.update_city(&city).await? {
            return Err(ApiError::not_found("city", id));
        }
        Ok(city)
    }

    /// Deletes a city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city does not exist.
    pub async fn delete_city(&self, id: CityId) -> Result<(), ApiError> {
        if !self.store.delete_city(*id.as_uuid()).await? {
            return Err(ApiError::not_found("city", id));
        }
        tracing::info!(city_id = %id, "city deleted");
        Ok(())
    }

    /// Fetches a city.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the city does not exist.
    pub async fn get_city(&self, id: CityId) -> Result<City, ApiError> {
        self.require_city(id).await
    }

    /// Lists all cities.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        self.store.list_cities().await
    }

    // ── Suppliers ───────────────────────────────────────────────────────

    /// Registers a supplier. The base city must exist and be marked as
    /// a supply base.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn create_supplier(&self, input: SupplierInput) -> Result<Supplier, ApiError> {
        Self::validate_name(&input.name)?;
        self.require_supply_base(input.base_city_id).await?;

        let now = Utc::now();
        let supplier = Supplier {
            id: SupplierId::new(),
            name: input.name,
            tax_id: input.tax_id,
            base_city_id: input.base_city_id,
            payment_term_days: input.payment_term_days,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_supplier(&supplier).await?;
        tracing::info!(supplier_id = %supplier.id, name = %supplier.name, "supplier created");
        Ok(supplier)
    }

    /// Updates a supplier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the supplier does not exist.
    pub async fn update_supplier(
        &self,
        id: SupplierId,
        input: SupplierInput,
    ) -> Result<Supplier, ApiError> {
        Self::validate_name(&input.name)?;
        self.require_supply_base(input.base_city_id).await?;

        let mut supplier = self
            .store
            .get_supplier(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("supplier", id))?;
        supplier.name = input.name;
        supplier.tax_id = input.tax_id;
        supplier.base_city_id = input.base_city_id;
        supplier.payment_term_days = input.payment_term_days;
        supplier.active = input.active;
        supplier.updated_at = Utc::now();

        if !self.store.update_supplier(&supplier).await? {
            return Err(ApiError::not_found("supplier", id));
        }
        Ok(supplier)
    }

    /// Deletes a supplier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the supplier does not exist.
    pub async fn delete_supplier(&self, id: SupplierId) -> Result<(), ApiError> {
        if !self.store.delete_supplier(*id.as_uuid()).await? {
            return Err(ApiError::not_found("supplier", id));
        }
        tracing::info!(supplier_id = %id, "supplier deleted");
        Ok(())
    }

    /// Fetches a supplier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the supplier does not exist.
    pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier, ApiError> {
        self.store
            .get_supplier(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("supplier", id))
    }

    /// Lists all suppliers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.store.list_suppliers().await
    }

    // ── Stations ────────────────────────────────────────────────────────

    /// Registers a station. The city must exist; the group, when given,
    /// must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn create_station(&self, input: StationInput) -> Result<Station, ApiError> {
        Self::validate_name(&input.name)?;
        self.require_city(input.city_id).await?;
        if let Some(group_id) = input.group_id {
            self.require_group(group_id).await?;
        }

        let now = Utc::now();
        let station = Station {
            id: StationId::new(),
            name: input.name,
            city_id: input.city_id,
            flag: input.flag,
            group_id: input.group_id,
            monthly_volume_liters: input.monthly_volume_liters,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_station(&station).await?;
        tracing::info!(station_id = %station.id, name = %station.name, "station created");
        Ok(station)
    }

    /// Updates a station.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the station does not exist.
    pub async fn update_station(
        &self,
        id: StationId,
        input: StationInput,
    ) -> Result<Station, ApiError> {
        Self::validate_name(&input.name)?;
        self.require_city(input.city_id).await?;
        if let Some(group_id) = input.group_id {
            self.require_group(group_id).await?;
        }

        let mut station = self
            .store
            .get_station(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("station", id))?;
        station.name = input.name;
        station.city_id = input.city_id;
        station.flag = input.flag;
        station.group_id = input.group_id;
        station.monthly_volume_liters = input.monthly_volume_liters;
        station.active = input.active;
        station.updated_at = Utc::now();

        if !self.store.update_station(&station).await? {
            return Err(ApiError::not_found("station", id));
        }
        Ok(station)
    }

    /// Deletes a station.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the station does not exist.
    pub async fn delete_station(&self, id: StationId) -> Result<(), ApiError> {
        if !self.store.delete_station(*id.as_uuid()).await? {
            return Err(ApiError::not_found("station", id));
        }
        tracing::info!(station_id = %id, "station deleted");
        Ok(())
    }

    /// Fetches a station.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the station does not exist.
    pub async fn get_station(&self, id: StationId) -> Result<Station, ApiError> {
        self.store
            .get_station(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("station", id))
    }

    /// Lists all stations.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_stations(&self) -> Result<Vec<Station>, ApiError> {
        self.store.list_stations().await
    }

    // ── Station groups ──────────────────────────────────────────────────

    async fn require_group(&self, id: GroupId) -> Result<StationGroup, ApiError> {
        self.store
            .get_group(*id.as_uuid())
            .await?
            .ok_or_else(|| ApiError::not_found("group", id))
    }

    /// Registers a station group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on validation or persistence failure.
    pub async fn create_group(&self, name: String) -> Result<StationGroup, ApiError> {
        Self::validate_name(&name)?;

        let now = Utc::now();
        let group = StationGroup {
            id: GroupId::new(),
            name,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_group(&group).await?;
        tracing::info!(group_id = %group.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Renames a station group.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the group does not exist.
    pub async fn update_group(&self, id: GroupId, name: String) -> Result<StationGroup, ApiError> {
        Self::validate_name(&name)?;

        let mut group = self.require_group(id).await?;
        group.name = name;
        group.updated_at = Utc::now();

        if !self.store.update_group(&group).await? {
            return Err(ApiError::not_found("group", id));
        }
        Ok(group)
    }

    /// Deletes a station group. Member stations are detached, not
    /// deleted (FK is `ON DELETE SET NULL`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the group does not exist.
    pub async fn delete_group(&self, id: GroupId) -> Result<(), ApiError> {
        if !self.store.delete_group(*id.as_uuid()).await? {
            return Err(ApiError::not_found("group", id));
        }
        tracing::info!(group_id = %id, "group deleted");
        Ok(())
    }

    /// Fetches a group together with its reference prices.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the group does not exist.
    pub async fn get_group(
        &self,
        id: GroupId,
    ) -> Result<(StationGroup, Vec<GroupReferencePrice>), ApiError> {
        let group = self.require_group(id).await?;
        let prices = self.store.reference_prices(*id.as_uuid()).await?;
        Ok((group, prices))
    }

    /// Lists all groups.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::PersistenceError`] on database failure.
    pub async fn list_groups(&self) -> Result<Vec<StationGroup>, ApiError> {
        self.store.list_groups().await
    }
}
