use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::service::{self, AssociationInput, MenuFlavourRow, MenuItem, MenuItemInput};
use crate::gateway::{
    state::AppState,
    types::{ApiError, SearchQuery, StatusResponse},
};

/// List or search the menu
///
/// GET /menu?search=
#[utoipa::path(
    get,
    path = "/menu",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching menu items", body = [MenuItem]),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn list_menu(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<(StatusCode, Json<Vec<MenuItem>>), ApiError> {
    let items = service::search(state.db.pool(), &query.search)
        .await
        .map_err(ApiError::db("Error al obtener el menú"))?;
    if items.is_empty() {
        tracing::warn!("No se encontró en el menú: '{}'", query.search);
    }
    Ok((StatusCode::OK, Json(items)))
}

/// Add a menu item
///
/// POST /menu
#[utoipa::path(
    post,
    path = "/menu",
    request_body = MenuItemInput,
    responses(
        (status = 201, description = "Menu item created", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn create_menu_item(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MenuItemInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = service::insert(state.db.pool(), &input)
        .await
        .map_err(ApiError::db("Error al agregar el producto al menú"))?;
    tracing::info!("Menu item added with ID: {}", id);
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// Update a menu item
///
/// PUT /menu/{id}
#[utoipa::path(
    put,
    path = "/menu/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    request_body = MenuItemInput,
    responses(
        (status = 200, description = "Menu item updated", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn update_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<MenuItemInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::update(state.db.pool(), id, &input)
        .await
        .map_err(ApiError::db("Error al actualizar el menú"))?;
    tracing::info!("Menu item with ID: {} updated", id);
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Delete a menu item (idempotent)
///
/// DELETE /menu/{id}
#[utoipa::path(
    delete,
    path = "/menu/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu item deleted", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn delete_menu_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::delete(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al eliminar el producto del menú"))?;
    tracing::info!("Menu item with ID: {} deleted", id);
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Flavour choices for a menu item
///
/// GET /menu/flavours/{id}
#[utoipa::path(
    get,
    path = "/menu/flavours/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Flavour choices", body = [MenuFlavourRow]),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn menu_flavours(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Vec<MenuFlavourRow>>), ApiError> {
    let rows = service::flavours_for_menu(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al obtener los gustos"))?;
    Ok((StatusCode::OK, Json(rows)))
}

/// Attach flavour groups to a menu item
///
/// POST /menu/flavours
#[utoipa::path(
    post,
    path = "/menu/flavours",
    request_body = [AssociationInput],
    responses(
        (status = 201, description = "Associations added", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn add_menu_flavours(
    State(state): State<Arc<AppState>>,
    Json(associations): Json<Vec<AssociationInput>>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::add_associations(state.db.pool(), &associations)
        .await
        .map_err(ApiError::db("Error al agregar el gusto al menú"))?;
    if let Some(first) = associations.first() {
        tracing::info!("Flavours added to menu item ID: {}", first.menu_id);
    }
    Ok((StatusCode::CREATED, Json(StatusResponse::ok())))
}

/// Replace the flavour groups of a menu item
///
/// PUT /menu/flavours/{id}
///
/// Deletes the existing associations for the menu id, then inserts the new
/// set. An empty body leaves the menu item with no associations.
#[utoipa::path(
    put,
    path = "/menu/flavours/{id}",
    params(("id" = i64, Path, description = "Menu item id")),
    request_body = [AssociationInput],
    responses(
        (status = 200, description = "Associations replaced", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Menu"
)]
pub async fn replace_menu_flavours(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(associations): Json<Vec<AssociationInput>>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::replace_associations(state.db.pool(), id, &associations)
        .await
        .map_err(ApiError::db("Error al actualizar el gusto del menú"))?;
    tracing::info!("Flavours updated for menu item ID: {}", id);
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
