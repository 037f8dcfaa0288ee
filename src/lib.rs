//! Nostra Pizza - pizza-ordering backend
//!
//! REST endpoints over PostgreSQL plus pass-through checkout against two
//! external payment processors (MercadoPago and dLocal Go).
//!
//! # Modules
//!
//! - [`gateway`] - HTTP server, routing, shared state, error mapping
//! - [`menu`] - menu items and menu/flavour-group associations
//! - [`flavours`] - flavours and flavour groups
//! - [`orders`] - customer orders
//! - [`users`] - signup/login, user records, saved addresses
//! - [`checkout`] - payment-processor adapter and webhook ingestion
//! - [`config`] - YAML configuration per environment
//! - [`db`] - PostgreSQL pool management
//! - [`logging`] - tracing setup with rolling file output

pub mod config;
pub mod db;
pub mod logging;

// HTTP surface
pub mod gateway;

// Resource modules
pub mod flavours;
pub mod menu;
pub mod orders;
pub mod users;

// Payment gateway adapter
pub mod checkout;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use db::Database;
pub use gateway::state::AppState;
