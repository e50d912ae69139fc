//! # fuelhub-api
//!
//! REST API for fuel-distribution management.
//!
//! A fuel buyer registers suppliers, cities, stations, pricing groups,
//! daily price quotes, freight routes, and purchase orders, then
//! queries comparative and analytical views: best supply cost per
//! station, group price deviations, volume analytics, and financial
//! summaries. PostgreSQL owns the rows; the interesting logic is the
//! pure pricing and aggregation core in [`domain`].
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── CatalogService / PricingService / OrderService (service/)
//!     │
//!     ├── pricing + analytics cores (domain/)
//!     │
//!     └── PgStore → PostgreSQL (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
