//! Persistence layer: PostgreSQL as the system of record.
//!
//! Row models live in [`models`], the `sqlx`-backed store in
//! [`postgres`]. Schema migrations are under `migrations/` and applied
//! at startup with `sqlx::migrate!`.

pub mod models;
pub mod postgres;

pub use postgres::PgStore;
