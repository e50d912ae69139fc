//! Service layer: business logic orchestration.
//!
//! Each service owns a [`crate::persistence::PgStore`] handle and
//! follows the same shape: validate, fetch, delegate computation to
//! the domain cores, persist.

pub mod catalog_service;
pub mod order_service;
pub mod pricing_service;

pub use catalog_service::CatalogService;
pub use order_service::OrderService;
pub use pricing_service::PricingService;
