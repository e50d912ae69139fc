//! Data Transfer Objects for REST request/response serialization.
//!
//! All monetary values and liter volumes are serialized as JSON
//! strings to prevent precision loss; enum discriminators cross the
//! wire as snake_case strings and are parsed in the handlers.

pub mod analytics_dto;
pub mod catalog_dto;
pub mod common_dto;
pub mod order_dto;
pub mod pricing_dto;

pub use analytics_dto::*;
pub use catalog_dto::*;
pub use common_dto::*;
pub use order_dto::*;
pub use pricing_dto::*;
