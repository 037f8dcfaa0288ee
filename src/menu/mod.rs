//! Menu items and menu/flavour-group associations.

pub mod handlers;
pub mod service;
