//! Flavours and flavour groups.

pub mod handlers;
pub mod service;
