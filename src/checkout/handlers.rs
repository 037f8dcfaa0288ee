use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use std::sync::Arc;

use super::service::{
    CardAttachRequest, CardTokenRequest, CustomerRequest, DlocalPaymentRequest,
    DlocalPaymentResponse, DlocalWebhook, MpWebhook, PaymentError, PreferenceRequest,
    PreferenceResponse,
};
use crate::gateway::{state::AppState, types::ApiError};

/// Attach the Spanish response context to a processor failure.
fn upstream(context: &'static str) -> impl FnOnce(PaymentError) -> ApiError {
    move |err| ApiError::Upstream {
        context,
        detail: err.to_string(),
    }
}

/// Tokenize a card with MercadoPago
///
/// POST /checkout/mp/card_token
#[utoipa::path(
    post,
    path = "/checkout/mp/card_token",
    request_body = CardTokenRequest,
    responses(
        (status = 201, description = "Processor card-token payload, relayed verbatim"),
        (status = 500, description = "Processor rejection or network failure")
    ),
    tag = "Checkout"
)]
pub async fn create_card_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CardTokenRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = state
        .payments
        .create_card_token(&req)
        .await
        .map_err(upstream("Error al crear el token de la tarjeta"))?;
    Ok((StatusCode::CREATED, Json(data)))
}

/// Register a customer with MercadoPago
///
/// POST /checkout/mp/customer
#[utoipa::path(
    post,
    path = "/checkout/mp/customer",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Processor customer payload, relayed verbatim"),
        (status = 500, description = "Processor rejection or network failure")
    ),
    tag = "Checkout"
)]
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = state
        .payments
        .create_customer(&req)
        .await
        .map_err(upstream("Error al crear el cliente"))?;
    Ok((StatusCode::CREATED, Json(data)))
}

/// Attach a tokenized card to a customer
///
/// POST /checkout/mp/customer/{customer_id}/card
#[utoipa::path(
    post,
    path = "/checkout/mp/customer/{customer_id}/card",
    params(("customer_id" = String, Path, description = "Processor customer id")),
    request_body = CardAttachRequest,
    responses(
        (status = 201, description = "Processor card payload, relayed verbatim"),
        (status = 500, description = "Processor rejection or network failure")
    ),
    tag = "Checkout"
)]
pub async fn attach_card(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Json(req): Json<CardAttachRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let data = state
        .payments
        .attach_card(&customer_id, &req)
        .await
        .map_err(upstream("Error al agregar la tarjeta"))?;
    Ok((StatusCode::CREATED, Json(data)))
}

/// Create a MercadoPago checkout preference from the cart
///
/// POST /checkout/mp
#[utoipa::path(
    post,
    path = "/checkout/mp",
    request_body = PreferenceRequest,
    responses(
        (status = 200, description = "Preference created", body = PreferenceResponse),
        (status = 500, description = "Processor rejection or network failure")
    ),
    tag = "Checkout"
)]
pub async fn create_preference(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreferenceRequest>,
) -> Result<(StatusCode, Json<PreferenceResponse>), ApiError> {
    let id = state
        .payments
        .create_preference(&req.items)
        .await
        .map_err(upstream("Error al crear la preferencia"))?;
    tracing::info!("Preference created: {}", id);
    Ok((StatusCode::OK, Json(PreferenceResponse { id })))
}

/// MercadoPago webhook
///
/// POST /checkout/mp/webhook
///
/// Looks the payment up at the processor and logs it. No signature
/// verification and no delivery dedup; only a failed lookup is an error.
#[utoipa::path(
    post,
    path = "/checkout/mp/webhook",
    request_body = MpWebhook,
    responses(
        (status = 200, description = "Acknowledged"),
        (status = 500, description = "Lookup failed")
    ),
    tag = "Checkout"
)]
pub async fn mp_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MpWebhook>,
) -> Result<(StatusCode, &'static str), ApiError> {
    tracing::info!("Webhook MP: payment id {}", payload.data.id);
    let payment = state
        .payments
        .fetch_payment(&payload.data.id)
        .await
        .map_err(|err| {
            tracing::error!("Error al procesar el webhook MP {}: {}", payload.data.id, err);
            ApiError::Upstream {
                context: "Error al procesar el webhook",
                detail: String::new(),
            }
        })?;
    tracing::info!("Payment {}: {}", payload.data.id, payment);
    Ok((StatusCode::OK, "OK"))
}

/// Create a dLocal payment
///
/// POST /checkout/dlocal
#[utoipa::path(
    post,
    path = "/checkout/dlocal",
    request_body = DlocalPaymentRequest,
    responses(
        (status = 200, description = "Payment created", body = DlocalPaymentResponse),
        (status = 500, description = "Processor rejection or network failure")
    ),
    tag = "Checkout"
)]
pub async fn create_dlocal_payment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DlocalPaymentRequest>,
) -> Result<(StatusCode, Json<DlocalPaymentResponse>), ApiError> {
    let payment = state
        .payments
        .create_dlocal_payment(req.amount)
        .await
        .map_err(upstream("Error al crear el pago"))?;
    tracing::info!("Payment created: {}", payment.id);
    Ok((StatusCode::OK, Json(payment)))
}

/// dLocal webhook
///
/// POST /checkout/dlocal/webhook
#[utoipa::path(
    post,
    path = "/checkout/dlocal/webhook",
    request_body = DlocalWebhook,
    responses(
        (status = 200, description = "Acknowledged"),
        (status = 500, description = "Lookup failed")
    ),
    tag = "Checkout"
)]
pub async fn dlocal_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DlocalWebhook>,
) -> Result<(StatusCode, &'static str), ApiError> {
    tracing::info!("Webhook DLocal: payment id {}", payload.payment_id);
    let payment = state
        .payments
        .fetch_dlocal_payment(&payload.payment_id)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error al procesar el webhook DLocal {}: {}",
                payload.payment_id,
                err
            );
            ApiError::Upstream {
                context: "Error",
                detail: String::new(),
            }
        })?;
    tracing::info!("Webhook DLocal {}: {}", payload.payment_id, payment);
    Ok((StatusCode::OK, "OK"))
}
