use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;

/// User row. `password_hash` is null for Google-signup accounts,
/// `google_id` is null for password accounts.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub is_guest: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub password: String,
}

/// Login success just echoes the user id; no session or token is issued.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GoogleSignupRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub google_id: String,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Address {
    pub id: i64,
    pub title: Option<String>,
    pub user_id: i64,
    pub address: String,
    pub additional_references: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressInput {
    pub title: Option<String>,
    pub user_id: i64,
    pub address: String,
    pub additional_references: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddressUpdate {
    pub title: Option<String>,
    pub address: String,
    pub additional_references: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Salted argon2 hash, stored as a PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Constant-time verification against a stored PHC hash. An unparseable
/// stored hash counts as a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

const USER_COLUMNS: &str =
    "id, name, email, phone, password_hash, google_id, is_guest, is_admin, created_at";

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn insert_user(
    pool: &PgPool,
    req: &SignupRequest,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, phone, password_hash, google_id, is_guest, created_at, is_admin) \
         VALUES ($1, $2, $3, $4, null, false, now(), false) RETURNING id",
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn insert_google_user(
    pool: &PgPool,
    req: &GoogleSignupRequest,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, phone, password_hash, google_id, is_guest, created_at, is_admin) \
         VALUES ($1, $2, $3, null, $4, false, now(), false) RETURNING id",
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.phone)
    .bind(&req.google_id)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users"))
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_google_id(
    pool: &PgPool,
    google_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE google_id = $1"
    ))
    .bind(google_id)
    .fetch_optional(pool)
    .await
}

pub async fn addresses_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Address>, sqlx::Error> {
    sqlx::query_as::<_, Address>(
        "SELECT id, title, user_id, address, additional_references, latitude, longitude \
         FROM user_addresses WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn insert_address(pool: &PgPool, input: &AddressInput) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO user_addresses (title, user_id, address, additional_references, latitude, longitude) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&input.title)
    .bind(input.user_id)
    .bind(&input.address)
    .bind(&input.additional_references)
    .bind(input.latitude)
    .bind(input.longitude)
    .fetch_one(pool)
    .await
}

pub async fn update_address(
    pool: &PgPool,
    id: i64,
    input: &AddressUpdate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE user_addresses SET title = $1, address = $2, additional_references = $3, \
         latitude = $4, longitude = $5 WHERE id = $6",
    )
    .bind(&input.title)
    .bind(&input.address)
    .bind(&input.additional_references)
    .bind(input.latitude)
    .bind(input.longitude)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_address(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_addresses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("pizza con muzzarella").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pizza con muzzarella", &hash));
    }

    #[test]
    fn wrong_password_rejected() {
        let hash = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &hash));
    }

    #[test]
    fn garbage_stored_hash_rejected() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn distinct_salts_produce_distinct_hashes() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn login_response_uses_camel_case_user_id() {
        let body = serde_json::to_string(&LoginResponse {
            success: true,
            user_id: 7,
        })
        .unwrap();
        assert_eq!(body, r#"{"success":true,"userId":7}"#);
    }
}
