//! PaymentClient integration tests against a local mock processor.
//!
//! Spins up a throwaway axum server imitating the MercadoPago and dLocal
//! endpoints, then drives the real client at it over loopback.

use axum::{
    Json, Router,
    extract::Path,
    routing::{get, post},
};
use serde_json::{Value, json};

use nostra_pizza::checkout::service::{CardTokenRequest, PaymentClient, PreferenceItem};
use nostra_pizza::config::{DlocalConfig, MercadoPagoConfig};

async fn spawn_mock_processor() -> String {
    let app = Router::new()
        .route(
            "/v1/card_tokens",
            post(|Json(body): Json<Value>| async move {
                // Reject a sentinel card number, accept everything else
                if body["card_number"] == "0000000000000000" {
                    Json(json!({ "status": 400, "message": "invalid card_number" }))
                } else {
                    assert_eq!(body["cardholder"]["name"], "APRO");
                    Json(json!({ "id": "tok_123", "status": 21 }))
                }
            }),
        )
        .route(
            "/v1/customers",
            post(|| async { Json(json!({ "id": "cus_1", "status": 201 })) }),
        )
        .route(
            "/v1/customers/{customer_id}/cards",
            post(|Path(customer_id): Path<String>| async move {
                Json(json!({ "id": "card_9", "customer_id": customer_id, "status": 201 }))
            }),
        )
        .route(
            "/checkout/preferences",
            post(|Json(body): Json<Value>| async move {
                assert!(body["items"].is_array());
                assert!(body["notification_url"].is_string());
                Json(json!({ "id": "pref_777" }))
            }),
        )
        .route(
            "/v1/payments",
            post(|Json(body): Json<Value>| async move {
                if body["amount"].as_f64().unwrap_or(0.0) < 0.0 {
                    Json(json!({ "code": 3001, "message": "INVALID_AMOUNT" }))
                } else {
                    Json(json!({ "id": 555, "redirect_url": "https://pay.example/555" }))
                }
            }),
        )
        .route(
            "/v1/payments/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({ "id": id, "status": "approved" }))
            }),
        )
        .route(
            "/payments/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({ "id": id, "status": "PAID" }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> PaymentClient {
    PaymentClient::new(
        "https://pizza.example".to_string(),
        MercadoPagoConfig {
            base_url: base_url.to_string(),
            access_token: "TEST-TOKEN".to_string(),
        },
        DlocalConfig {
            base_url: base_url.to_string(),
            api_key: "key".to_string(),
            secret_key: "secret".to_string(),
        },
    )
    .expect("client should build")
}

fn card_token_request(card_number: &str) -> CardTokenRequest {
    serde_json::from_value(json!({
        "card_number": card_number,
        "security_code": "123",
        "card_expiration_month": "11",
        "card_expiration_year": "2030",
    }))
    .unwrap()
}

#[tokio::test]
async fn card_token_accepted_relays_processor_payload() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let data = client
        .create_card_token(&card_token_request("5031755734530604"))
        .await
        .expect("token should be accepted");
    assert_eq!(data["id"], "tok_123");
}

#[tokio::test]
async fn card_token_rejection_carries_processor_message() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let err = client
        .create_card_token(&card_token_request("0000000000000000"))
        .await
        .expect_err("token should be rejected");
    assert!(err.to_string().contains("invalid card_number"));
}

#[tokio::test]
async fn customer_and_card_registration() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let customer = client
        .create_customer(
            &serde_json::from_value(json!({
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "García",
            }))
            .unwrap(),
        )
        .await
        .expect("customer should be created");
    assert_eq!(customer["id"], "cus_1");

    let card = client
        .attach_card(
            "cus_1",
            &serde_json::from_value(json!({ "token": "tok_123" })).unwrap(),
        )
        .await
        .expect("card should attach");
    assert_eq!(card["customer_id"], "cus_1");
}

#[tokio::test]
async fn preference_returns_processor_issued_id() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let items = vec![PreferenceItem {
        title: "Muzzarella".to_string(),
        quantity: 2,
        unit_price: 250.0,
    }];
    let id = client
        .create_preference(&items)
        .await
        .expect("preference should be created");
    assert_eq!(id, "pref_777");
}

#[tokio::test]
async fn dlocal_payment_created_and_looked_up() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let payment = client
        .create_dlocal_payment(480.0)
        .await
        .expect("payment should be created");
    assert_eq!(payment.id, json!(555));
    assert_eq!(payment.url.as_deref(), Some("https://pay.example/555"));

    let details = client
        .fetch_dlocal_payment("555")
        .await
        .expect("lookup should succeed");
    assert_eq!(details["status"], "PAID");
}

#[tokio::test]
async fn dlocal_rejection_detected_by_code_field() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let err = client
        .create_dlocal_payment(-1.0)
        .await
        .expect_err("negative amount should be rejected");
    assert!(err.to_string().contains("INVALID_AMOUNT"));
}

#[tokio::test]
async fn mp_payment_lookup_after_webhook() {
    let base = spawn_mock_processor().await;
    let client = client_for(&base);

    let payment = client
        .fetch_payment("987654321")
        .await
        .expect("lookup should succeed");
    assert_eq!(payment["id"], "987654321");
    assert_eq!(payment["status"], "approved");
}

#[tokio::test]
async fn network_failure_is_an_error_not_a_panic() {
    // Nothing listens on this port
    let client = client_for("http://127.0.0.1:9");
    let result = client.fetch_payment("1").await;
    assert!(result.is_err());
}
