use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

use super::idempotency::idempotency_key;
use crate::config::{DlocalConfig, MercadoPagoConfig};

/// Status code MercadoPago reports for an accepted card token.
const CARD_TOKEN_ACCEPTED: i64 = 21;
/// Status code MercadoPago reports for a created customer or card.
const MP_CREATED: i64 = 201;
/// Cardholder name forwarded with every tokenization request.
const CARDHOLDER_NAME: &str = "APRO";

const DLOCAL_ORDER_DESCRIPTION: &str = "Pedido Nostra Pizza";
const DLOCAL_CURRENCY: &str = "UYU";
const DLOCAL_COUNTRY: &str = "UY";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The processor answered but reported a rejection; carries the
    /// processor's own message or serialized payload.
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardTokenRequest {
    pub card_number: String,
    pub security_code: String,
    pub card_expiration_month: String,
    pub card_expiration_year: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CardAttachRequest {
    /// Card token previously issued by the processor
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PreferenceItem {
    #[schema(example = "Muzzarella")]
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PreferenceRequest {
    pub items: Vec<PreferenceItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreferenceResponse {
    /// Processor-issued preference id
    pub id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DlocalPaymentRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DlocalPaymentResponse {
    /// Processor-issued payment id
    #[schema(value_type = Object)]
    pub id: Value,
    /// Redirect URL for the customer to complete the payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Notification payload MercadoPago posts to the webhook endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MpWebhook {
    pub data: MpWebhookData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MpWebhookData {
    pub id: String,
}

/// Notification payload dLocal posts to the webhook endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DlocalWebhook {
    pub payment_id: String,
}

/// Outbound client for both payment processors. One shared `reqwest`
/// client, credentials from configuration; every call is a single HTTPS
/// round trip with no retries.
pub struct PaymentClient {
    http: reqwest::Client,
    mercadopago: MercadoPagoConfig,
    dlocal: DlocalConfig,
    public_url: String,
}

impl PaymentClient {
    pub fn new(
        public_url: String,
        mercadopago: MercadoPagoConfig,
        dlocal: DlocalConfig,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            mercadopago,
            dlocal,
            public_url,
        })
    }

    fn mp_auth(&self) -> String {
        format!("Bearer {}", self.mercadopago.access_token)
    }

    /// dLocal Go authenticates with colon-joined key:secret credentials.
    fn dlocal_auth(&self) -> String {
        format!("Bearer {}:{}", self.dlocal.api_key, self.dlocal.secret_key)
    }

    /// Tokenize a card. Accepted only when the processor payload reports
    /// status `21`; any other status surfaces the processor message.
    pub async fn create_card_token(&self, req: &CardTokenRequest) -> Result<Value, PaymentError> {
        let data: Value = self
            .http
            .post(format!("{}/v1/card_tokens", self.mercadopago.base_url))
            .header(header::AUTHORIZATION, self.mp_auth())
            .json(&card_token_body(req))
            .send()
            .await?
            .json()
            .await?;
        if data["status"].as_i64() != Some(CARD_TOKEN_ACCEPTED) {
            return Err(PaymentError::Rejected(rejection_message(&data)));
        }
        Ok(data)
    }

    pub async fn create_customer(&self, req: &CustomerRequest) -> Result<Value, PaymentError> {
        let data: Value = self
            .http
            .post(format!("{}/v1/customers", self.mercadopago.base_url))
            .header(header::AUTHORIZATION, self.mp_auth())
            .json(&json!({
                "email": req.email,
                "first_name": req.first_name,
                "last_name": req.last_name,
            }))
            .send()
            .await?
            .json()
            .await?;
        if data["status"].as_i64() != Some(MP_CREATED) {
            return Err(PaymentError::Rejected(rejection_message(&data)));
        }
        Ok(data)
    }

    pub async fn attach_card(
        &self,
        customer_id: &str,
        req: &CardAttachRequest,
    ) -> Result<Value, PaymentError> {
        let data: Value = self
            .http
            .post(format!(
                "{}/v1/customers/{}/cards",
                self.mercadopago.base_url, customer_id
            ))
            .header(header::AUTHORIZATION, self.mp_auth())
            .json(&json!({ "token": req.token }))
            .send()
            .await?
            .json()
            .await?;
        if data["status"].as_i64() != Some(MP_CREATED) {
            return Err(PaymentError::Rejected(rejection_message(&data)));
        }
        Ok(data)
    }

    /// Create a checkout preference from the cart line items. Sent with a
    /// fresh `X-Idempotency-Key`; returns the processor-issued id.
    pub async fn create_preference(
        &self,
        items: &[PreferenceItem],
    ) -> Result<String, PaymentError> {
        let data: Value = self
            .http
            .post(format!(
                "{}/checkout/preferences",
                self.mercadopago.base_url
            ))
            .header(header::AUTHORIZATION, self.mp_auth())
            .header("X-Idempotency-Key", idempotency_key())
            .json(&preference_body(items, &self.public_url))
            .send()
            .await?
            .json()
            .await?;
        data["id"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| PaymentError::Rejected(data.to_string()))
    }

    /// Fetch full payment details after a MercadoPago webhook notification.
    pub async fn fetch_payment(&self, payment_id: &str) -> Result<Value, PaymentError> {
        let data: Value = self
            .http
            .get(format!(
                "{}/v1/payments/{}",
                self.mercadopago.base_url, payment_id
            ))
            .header(header::AUTHORIZATION, self.mp_auth())
            .send()
            .await?
            .json()
            .await?;
        Ok(data)
    }

    /// Create a dLocal payment. A payload carrying a `code` field is a
    /// processor-reported rejection.
    pub async fn create_dlocal_payment(
        &self,
        amount: f64,
    ) -> Result<DlocalPaymentResponse, PaymentError> {
        let data: Value = self
            .http
            .post(format!("{}/v1/payments", self.dlocal.base_url))
            .header(header::AUTHORIZATION, self.dlocal_auth())
            .json(&dlocal_payment_body(amount, &self.public_url))
            .send()
            .await?
            .json()
            .await?;
        if !data["code"].is_null() {
            return Err(PaymentError::Rejected(data.to_string()));
        }
        Ok(DlocalPaymentResponse {
            id: data["id"].clone(),
            url: data["redirect_url"].as_str().map(str::to_owned),
        })
    }

    /// Fetch full payment details after a dLocal webhook notification.
    pub async fn fetch_dlocal_payment(&self, payment_id: &str) -> Result<Value, PaymentError> {
        let data: Value = self
            .http
            .get(format!("{}/payments/{}", self.dlocal.base_url, payment_id))
            .header("X-Version", "2.1")
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, self.dlocal_auth())
            .send()
            .await?
            .json()
            .await?;
        if !data["code"].is_null() {
            return Err(PaymentError::Rejected(data.to_string()));
        }
        Ok(data)
    }
}

/// Tokenization body: the client sends `card_expiration_*` field names,
/// the processor expects `expiration_*`; cardholder name is fixed.
fn card_token_body(req: &CardTokenRequest) -> Value {
    json!({
        "card_number": req.card_number,
        "security_code": req.security_code,
        "expiration_month": req.card_expiration_month,
        "expiration_year": req.card_expiration_year,
        "cardholder": { "name": CARDHOLDER_NAME },
    })
}

fn preference_body(items: &[PreferenceItem], public_url: &str) -> Value {
    json!({
        "items": items,
        "back_urls": {
            "success": format!("{}/checkout/success", public_url),
            "failure": format!("{}/checkout/failure", public_url),
            "pending": format!("{}/checkout/pending", public_url),
        },
        "auto_return": "approved",
        "notification_url": format!("{}/checkout/mp/webhook", public_url),
    })
}

fn dlocal_payment_body(amount: f64, public_url: &str) -> Value {
    json!({
        "description": DLOCAL_ORDER_DESCRIPTION,
        "amount": amount,
        "currency": DLOCAL_CURRENCY,
        "country": DLOCAL_COUNTRY,
        "notification_url": format!("{}/checkout/dlocal/webhook", public_url),
    })
}

/// Prefer the processor's `message` field; fall back to the raw payload.
fn rejection_message(data: &Value) -> String {
    data["message"]
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_token_body_renames_expiration_fields() {
        let req = CardTokenRequest {
            card_number: "5031755734530604".to_string(),
            security_code: "123".to_string(),
            card_expiration_month: "11".to_string(),
            card_expiration_year: "2030".to_string(),
        };
        let body = card_token_body(&req);
        assert_eq!(body["expiration_month"], "11");
        assert_eq!(body["expiration_year"], "2030");
        assert!(body.get("card_expiration_month").is_none());
        assert_eq!(body["cardholder"]["name"], "APRO");
    }

    #[test]
    fn preference_body_builds_redirects_from_public_url() {
        let items = vec![PreferenceItem {
            title: "Muzzarella".to_string(),
            quantity: 2,
            unit_price: 250.0,
        }];
        let body = preference_body(&items, "https://pizza.example");
        assert_eq!(body["items"][0]["title"], "Muzzarella");
        assert_eq!(body["items"][0]["quantity"], 2);
        assert_eq!(
            body["back_urls"]["success"],
            "https://pizza.example/checkout/success"
        );
        assert_eq!(
            body["notification_url"],
            "https://pizza.example/checkout/mp/webhook"
        );
        assert_eq!(body["auto_return"], "approved");
    }

    #[test]
    fn dlocal_body_fixed_description_and_locale() {
        let body = dlocal_payment_body(480.0, "https://pizza.example");
        assert_eq!(body["description"], "Pedido Nostra Pizza");
        assert_eq!(body["currency"], "UYU");
        assert_eq!(body["country"], "UY");
        assert_eq!(body["amount"], 480.0);
        assert_eq!(
            body["notification_url"],
            "https://pizza.example/checkout/dlocal/webhook"
        );
    }

    #[test]
    fn mp_webhook_payload_shape() {
        let payload: MpWebhook =
            serde_json::from_str(r#"{"action":"payment.updated","data":{"id":"123456789"}}"#)
                .unwrap();
        assert_eq!(payload.data.id, "123456789");
    }

    #[test]
    fn dlocal_webhook_payload_shape() {
        let payload: DlocalWebhook =
            serde_json::from_str(r#"{"payment_id":"PAY-42","status":"PAID"}"#).unwrap();
        assert_eq!(payload.payment_id, "PAY-42");
    }

    #[test]
    fn rejection_message_prefers_processor_message() {
        let data = json!({"status": 400, "message": "invalid card_number"});
        assert_eq!(rejection_message(&data), "invalid card_number");
        let bare = json!({"status": 400});
        assert_eq!(rejection_message(&bare), r#"{"status":400}"#);
    }
}
