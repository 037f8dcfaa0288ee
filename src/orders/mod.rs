//! Customer orders.

pub mod handlers;
pub mod service;
