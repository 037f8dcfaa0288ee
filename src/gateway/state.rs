use std::sync::Arc;

use crate::checkout::service::PaymentClient;
use crate::db::Database;

/// Shared application state: one pooled database connection and one set of
/// payment-processor credentials, shared by every route.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL pool wrapper
    pub db: Arc<Database>,
    /// Outbound payment-processor client (MercadoPago + dLocal)
    pub payments: Arc<PaymentClient>,
}

impl AppState {
    pub fn new(db: Arc<Database>, payments: Arc<PaymentClient>) -> Self {
        Self { db, payments }
    }
}
