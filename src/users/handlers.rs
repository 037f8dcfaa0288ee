use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::service::{
    self, Address, AddressInput, AddressUpdate, GoogleSignupRequest, LoginRequest, LoginResponse,
    SignupRequest, User,
};
use crate::db::is_unique_violation;
use crate::gateway::{
    state::AppState,
    types::{ApiError, StatusResponse},
};

/// Log in with email and password
///
/// POST /users/login
///
/// A missing user and a failed password check produce the same 401 body, so
/// the response never reveals whether the email exists.
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let user = service::find_by_email(state.db.pool(), &req.email)
        .await
        .map_err(ApiError::db("Error during login"))?
        .ok_or(ApiError::InvalidCredentials)?;

    let stored_hash = user
        .password_hash
        .as_deref()
        .ok_or(ApiError::InvalidCredentials)?;
    if !service::verify_password(&req.password, stored_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            success: true,
            user_id: user.id,
        }),
    ))
}

/// Sign up with email and password
///
/// POST /users/signup
#[utoipa::path(
    post,
    path = "/users/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = StatusResponse),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let password_hash = service::hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::Internal {
            context: "Error al registrar el usuario",
        }
    })?;

    let id = service::insert_user(state.db.pool(), &req, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::DuplicateEmail
            } else {
                ApiError::db("Error al registrar el usuario")(e)
            }
        })?;
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// Sign up with a Google account
///
/// POST /users/signup/google
#[utoipa::path(
    post,
    path = "/users/signup/google",
    request_body = GoogleSignupRequest,
    responses(
        (status = 201, description = "User created", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn signup_google(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoogleSignupRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = service::insert_google_user(state.db.pool(), &req)
        .await
        .map_err(ApiError::db("Error al registrar el usuario"))?;
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// List all users
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Vec<User>>), ApiError> {
    let users = service::list(state.db.pool())
        .await
        .map_err(ApiError::db("Error al obtener los usuarios"))?;
    Ok((StatusCode::OK, Json(users)))
}

/// Fetch one user
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service::find(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al obtener el usuario"))?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok((StatusCode::OK, Json(user)))
}

/// Fetch one user by Google id
///
/// GET /users/google/{id}
#[utoipa::path(
    get,
    path = "/users/google/{id}",
    params(("id" = String, Path, description = "Google account id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn get_user_by_google_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service::find_by_google_id(state.db.pool(), &id)
        .await
        .map_err(ApiError::db("Error al obtener el usuario"))?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok((StatusCode::OK, Json(user)))
}

/// Saved addresses of a user
///
/// GET /users/addresses/{user_id}
#[utoipa::path(
    get,
    path = "/users/addresses/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Saved addresses", body = [Address]),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn list_addresses(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<Vec<Address>>), ApiError> {
    let addresses = service::addresses_for_user(state.db.pool(), user_id)
        .await
        .map_err(ApiError::db("Error al obtener las direcciones"))?;
    Ok((StatusCode::OK, Json(addresses)))
}

/// Save a new address
///
/// POST /users/addresses
#[utoipa::path(
    post,
    path = "/users/addresses",
    request_body = AddressInput,
    responses(
        (status = 201, description = "Address created", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn create_address(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AddressInput>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let id = service::insert_address(state.db.pool(), &input)
        .await
        .map_err(ApiError::db("Error al agregar la dirección de usuario"))?;
    Ok((StatusCode::CREATED, Json(StatusResponse::created(id))))
}

/// Update a saved address
///
/// PUT /users/addresses/{id}
#[utoipa::path(
    put,
    path = "/users/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    request_body = AddressUpdate,
    responses(
        (status = 200, description = "Address updated", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn update_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(input): Json<AddressUpdate>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::update_address(state.db.pool(), id, &input)
        .await
        .map_err(ApiError::db("Error al actualizar la dirección de usuario"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}

/// Delete a saved address (idempotent)
///
/// DELETE /users/addresses/{id}
#[utoipa::path(
    delete,
    path = "/users/addresses/{id}",
    params(("id" = i64, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address deleted", body = StatusResponse),
        (status = 500, description = "Database failure")
    ),
    tag = "Users"
)]
pub async fn delete_address(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    service::delete_address(state.db.pool(), id)
        .await
        .map_err(ApiError::db("Error al eliminar la dirección de usuario"))?;
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
