use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

/// Acknowledgment envelope returned by every mutation endpoint.
///
/// Creates carry the generated row id; updates and deletes carry only the
/// success flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = true)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            id: None,
        }
    }

    pub fn created(id: i64) -> Self {
        Self {
            success: true,
            id: Some(id),
        }
    }
}

/// Query parameters for the list/search endpoints.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring to match; empty lists everything
    #[serde(default)]
    pub search: String,
}

/// Request-level error taxonomy.
///
/// Database and upstream failures become 500s whose body is the
/// human-readable (Spanish) context string; the explicitly checked
/// conditions map to 404/401/409.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context}")]
    Db {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("{context}")]
    Internal { context: &'static str },
    #[error("{context}")]
    Upstream {
        context: &'static str,
        detail: String,
    },
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email already in use")]
    DuplicateEmail,
}

impl ApiError {
    /// Adapter for `map_err` on sqlx calls: attaches the response context.
    pub fn db(context: &'static str) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Db { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Db { context, source } => {
                tracing::error!("{}: {}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
            }
            ApiError::Internal { context } => {
                tracing::error!("{}", context);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string()).into_response()
            }
            ApiError::Upstream { context, detail } => {
                tracing::error!("{}: {}", context, detail);
                let body = if detail.is_empty() {
                    context.to_string()
                } else {
                    format!("{} {}", context, detail)
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid email or password" })),
            )
                .into_response(),
            ApiError::DuplicateEmail => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "Email already in use" })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_omits_id_when_absent() {
        let body = serde_json::to_string(&StatusResponse::ok()).unwrap();
        assert_eq!(body, r#"{"success":true}"#);
    }

    #[test]
    fn status_response_carries_generated_id() {
        let body = serde_json::to_string(&StatusResponse::created(42)).unwrap();
        assert_eq!(body, r#"{"success":true,"id":42}"#);
    }

    #[test]
    fn search_query_defaults_to_empty() {
        let query: SearchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.search, "");
    }

    #[test]
    fn db_error_displays_context_only() {
        let err = ApiError::db("Error al obtener el menú")(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Error al obtener el menú");
    }
}
