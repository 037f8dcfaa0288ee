use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::service::{self, Flavour, FlavourGroup, FlavourGroupInput, FlavourInput};
use crate::gateway::{
    state::AppState,
    types::{ApiError, SearchQuery, StatusResponse},
};

/// List or search flavours
///
/// GET /flavours?search=
#[utoipa::path(
    get,
    path = "/flavours",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching flavours", body = [Flavour]),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn list_flavours(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<(StatusCode, Json<Vec<Flavour>>), ApiError> {
    let flavours = service::search(state.db.pool(), &query.search)
        .await
        .map_err(ApiError::db("Error al obtener los gustos"))?;
    Ok((StatusCode::OK, Json(flavours)))
}

/// Add a flavour
///
/// POST /flavours
#[utoipa::path(
    post,
    path = "/flavours",
    request_body = FlavourInput,
    responses(
        (status = 201, description = "Flavour created", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn create_flavour(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FlavourInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = service::insert(state.db.pool(), &input)
        .await
        .map_err(ApiError::db("Error al agregar el gusto"))?;
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// Update a flavour
///
/// PUT /flavours/{id}
#[utoipa::path(
    put,
    path = "/flavours/{id}",
    params(("id" = i64, Path, description = "Flavour id")),
    request_body = FlavourInput,
    responses(
        (status = 200, description = "Flavour updated", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn update_flavour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<FlavourInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::update(state.db.pool(), id, &input)
        .await
        .map_err(ApiError::db("Error al actualizar el gusto"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Delete a flavour (idempotent)
///
/// DELETE /flavours/{id}
#[utoipa::path(
    delete,
    path = "/flavours/{id}",
    params(("id" = i64, Path, description = "Flavour id")),
    responses(
        (status = 200, description = "Flavour deleted", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn delete_flavour(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::delete(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al eliminar el gusto"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// List flavour groups
///
/// GET /flavours/groups
#[utoipa::path(
    get,
    path = "/flavours/groups",
    responses(
        (status = 200, description = "All flavour groups", body = [FlavourGroup]),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<FlavourGroup>>), ApiError> {
    let groups = service::list_groups(state.db.pool())
        .await
        .map_err(ApiError::db("Error al obtener los grupos de gustos"))?;
    Ok((StatusCode::OK, Json(groups)))
}

/// Add a flavour group
///
/// POST /flavours/groups
#[utoipa::path(
    post,
    path = "/flavours/groups",
    request_body = FlavourGroupInput,
    responses(
        (status = 201, description = "Flavour group created", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FlavourGroupInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = service::insert_group(state.db.pool(), &input)
        .await
        .map_err(ApiError::db("Error al agregar el grupo de gustos"))?;
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// Update a flavour group
///
/// PUT /flavours/groups/{id}
#[utoipa::path(
    put,
    path = "/flavours/groups/{id}",
    params(("id" = i64, Path, description = "Flavour group id")),
    request_body = FlavourGroupInput,
    responses(
        (status = 200, description = "Flavour group updated", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn update_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<FlavourGroupInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::update_group(state.db.pool(), id, &input)
        .await
        .map_err(ApiError::db("Error al actualizar el grupo de gustos"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Delete a flavour group (idempotent)
///
/// DELETE /flavours/groups/{id}
#[utoipa::path(
    delete,
    path = "/flavours/groups/{id}",
    params(("id" = i64, Path, description = "Flavour group id")),
    responses(
        (status = 200, description = "Flavour group deleted", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Flavours"
)]
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::delete_group(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al eliminar el grupo de gustos"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
