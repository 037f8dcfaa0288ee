//! Payment gateway adapter: MercadoPago and dLocal Go pass-through calls
//! plus webhook ingestion.

pub mod handlers;
pub mod idempotency;
pub mod service;
