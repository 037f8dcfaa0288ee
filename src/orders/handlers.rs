use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::service::{self, Order, OrderCreated, OrderInput, OrderStatusInput};
use crate::gateway::{
    state::AppState,
    types::{ApiError, StatusResponse},
};

/// Place an order
///
/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderInput,
    responses(
        (status = 201, description = "Order created", body = OrderCreated),
        (status = 500, description = "Database failure")
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(input): Json<OrderInput>,
) -> Result<(StatusCode, Json<OrderCreated>), ApiError> {
    let id = service::insert(state.db.pool(), &input)
        .await
        .map_err(ApiError::db("Error al agregar el pedido"))?;
    Ok((StatusCode::CREATED, Json(OrderCreated { id })))
}

/// List all orders
///
/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders", body = [Order]),
        (status = 500, description = "Database failure")
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<Order>>), ApiError> {
    let orders = service::list(state.db.pool())
        .await
        .map_err(ApiError::db("Error al obtener los pedidos"))?;
    Ok((StatusCode::OK, Json(orders)))
}

/// Fetch one order
///
/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "The order", body = Order),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Database failure")
    ),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = service::find(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al obtener el pedido"))?
        .ok_or(ApiError::NotFound("Order not found"))?;
    Ok((StatusCode::OK, Json(order)))
}

/// Update an order's status
///
/// PUT /orders/{id}
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    request_body = OrderStatusInput,
    responses(
        (status = 200, description = "Order status updated", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<OrderStatusInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::update_status(state.db.pool(), id, &input.status)
        .await
        .map_err(ApiError::db("Error al actualizar el pedido"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Delete an order (idempotent)
///
/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::delete(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al eliminar el pedido"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
