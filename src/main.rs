//! Nostra Pizza backend entry point.
//!
//! Loads `config/{env}.yaml`, initializes logging, connects to PostgreSQL
//! and starts the HTTP gateway.

use std::sync::Arc;

use nostra_pizza::config::AppConfig;
use nostra_pizza::db::Database;
use nostra_pizza::gateway;
use nostra_pizza::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.server.port = port;
    }

    let _guard = init_logging(&config);
    tracing::info!("Starting Nostra Pizza backend (env: {})", env);

    let db = match Database::connect(&config.postgres_url).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("❌ FATAL: Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    gateway::run_server(config, db).await;
}
