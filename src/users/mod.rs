//! Users, authentication and saved addresses.

pub mod handlers;
pub mod service;
