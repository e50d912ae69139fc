//! Domain layer: entities, vocabulary, and the computation cores.
//!
//! This module holds the typed identifiers, the relational entities the
//! service manages, and the pure functions the dashboards are built on:
//! best-cost resolution and aggregation analytics.

pub mod analytics;
pub mod catalog;
pub mod ids;
pub mod pricing;

pub use catalog::{
    City, Flag, FreightRoute, FuelType, GroupReferencePrice, OrderStatus, PriceQuote,
    PurchaseOrder, Station, StationGroup, Supplier, VehicleType,
};
pub use ids::{CityId, GroupId, OrderId, QuoteId, RouteId, StationId, SupplierId};
