mod app;
mod config;
mod db;
mod error;
mod extractors;
mod health;
mod state;
mod users;

use crate::state::AppState;

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "usersvc=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let app_state = AppState::init()?;
    tracing::info!(
        db_host = %app_state.config.db.host,
        db_name = %app_state.config.db.name,
        max_connections = app_state.config.db.max_connections,
        "database pool configured"
    );

    let config = app_state.config.clone();
    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
