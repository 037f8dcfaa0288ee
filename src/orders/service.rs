use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

/// Order row. The `order` column holds the cart payload as sent by the
/// client (items, flavour selections, notes) and is stored opaquely.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[sqlx(rename = "order")]
    #[schema(value_type = Object)]
    pub order: serde_json::Value,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderInput {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[schema(value_type = Object)]
    pub order: serde_json::Value,
}

/// Status mutation applied by admin action.
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderStatusInput {
    #[schema(example = "delivered")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCreated {
    pub id: i64,
}

pub async fn insert(pool: &PgPool, input: &OrderInput) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (customer_name, customer_phone, customer_address, \"order\", created_at) \
         VALUES ($1, $2, $3, $4, now()) RETURNING id",
    )
    .bind(&input.customer_name)
    .bind(&input.customer_phone)
    .bind(&input.customer_address)
    .bind(&input.order)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, customer_name, customer_phone, customer_address, \"order\", status, created_at \
         FROM orders",
    )
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as::<_, Order>(
        "SELECT id, customer_name, customer_phone, customer_address, \"order\", status, created_at \
         FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_status(pool: &PgPool, id: i64, status: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_input_keeps_payload_opaque() {
        let json = r#"{
            "customer_name": "Ana",
            "customer_phone": "099123456",
            "customer_address": "18 de Julio 1234",
            "order": {"items": [{"menu_id": 5, "flavours": [1, 3], "qty": 2}], "notes": "sin aceitunas"}
        }"#;
        let input: OrderInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.customer_name, "Ana");
        assert_eq!(input.order["items"][0]["qty"], 2);
        assert_eq!(input.order["notes"], "sin aceitunas");
    }

    #[test]
    fn order_input_without_optional_contact_fields() {
        let json = r#"{"customer_name": "Ana", "order": []}"#;
        let input: OrderInput = serde_json::from_str(json).unwrap();
        assert!(input.customer_phone.is_none());
        assert!(input.customer_address.is_none());
        assert!(input.order.is_array());
    }
}
