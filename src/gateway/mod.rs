pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Json,
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::checkout::service::PaymentClient;
use crate::config::AppConfig;
use crate::db::Database;
use crate::{checkout, flavours, menu, orders, users};
use state::AppState;
use types::ApiError;

/// Service health: one round trip to the database.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy"),
        (status = 500, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    state
        .db
        .health_check()
        .await
        .map_err(ApiError::db("Error de conexión a la base de datos"))?;
    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}

/// Start the HTTP server. Bind or serve failure is fatal.
pub async fn run_server(config: AppConfig, db: Arc<Database>) {
    let payments = match PaymentClient::new(
        config.public_url.clone(),
        config.mercadopago.clone(),
        config.dlocal.clone(),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("❌ FATAL: Failed to build payment HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(db, payments));

    let menu_routes = Router::new()
        .route(
            "/",
            get(menu::handlers::list_menu).post(menu::handlers::create_menu_item),
        )
        .route(
            "/{id}",
            put(menu::handlers::update_menu_item).delete(menu::handlers::delete_menu_item),
        )
        .route("/flavours", post(menu::handlers::add_menu_flavours))
        .route(
            "/flavours/{id}",
            get(menu::handlers::menu_flavours).put(menu::handlers::replace_menu_flavours),
        );

    let flavours_routes = Router::new()
        .route(
            "/",
            get(flavours::handlers::list_flavours).post(flavours::handlers::create_flavour),
        )
        .route(
            "/groups",
            get(flavours::handlers::list_groups).post(flavours::handlers::create_group),
        )
        .route(
            "/groups/{id}",
            put(flavours::handlers::update_group).delete(flavours::handlers::delete_group),
        )
        .route(
            "/{id}",
            put(flavours::handlers::update_flavour).delete(flavours::handlers::delete_flavour),
        );

    let orders_routes = Router::new()
        .route(
            "/",
            get(orders::handlers::list_orders).post(orders::handlers::create_order),
        )
        .route(
            "/{id}",
            get(orders::handlers::get_order)
                .put(orders::handlers::update_order_status)
                .delete(orders::handlers::delete_order),
        );

    let users_routes = Router::new()
        .route("/login", post(users::handlers::login))
        .route("/signup", post(users::handlers::signup))
        .route("/signup/google", post(users::handlers::signup_google))
        .route("/", get(users::handlers::list_users))
        .route("/google/{id}", get(users::handlers::get_user_by_google_id))
        .route("/addresses", post(users::handlers::create_address))
        .route(
            "/addresses/{id}",
            get(users::handlers::list_addresses)
                .put(users::handlers::update_address)
                .delete(users::handlers::delete_address),
        )
        .route("/{id}", get(users::handlers::get_user));

    let checkout_routes = Router::new()
        .route("/mp/card_token", post(checkout::handlers::create_card_token))
        .route("/mp/customer", post(checkout::handlers::create_customer))
        .route(
            "/mp/customer/{customer_id}/card",
            post(checkout::handlers::attach_card),
        )
        .route("/mp", post(checkout::handlers::create_preference))
        .route("/mp/webhook", post(checkout::handlers::mp_webhook))
        .route(
            "/dlocal",
            post(checkout::handlers::create_dlocal_payment),
        )
        .route("/dlocal/webhook", post(checkout::handlers::dlocal_webhook));

    let app = Router::new()
        .route("/health", get(health))
        .nest("/menu", menu_routes)
        .nest("/flavours", flavours_routes)
        .nest("/orders", orders_routes)
        .nest("/users", users_routes)
        .nest("/checkout", checkout_routes)
        .layer(DefaultBodyLimit::max(
            config.server.body_limit_mb * 1024 * 1024,
        ))
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.server.port, config.server.port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Nostra Pizza backend listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
