use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use passystem_intake::config::IntakeConfig;
use passystem_intake::router::build_router;
use passystem_intake::state::AppState;

#[tokio::main]
async fn main() {
    passystem_core::tracing::init_tracing();

    let config = IntakeConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    info!("connected to database");

    let state = AppState { db: Arc::new(db) };

    let router = build_router(state.clone());
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("intake service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("server error");

    // Serve has returned, so the router's state clones are gone and this is
    // the last handle on the connection.
    if let Some(db) = Arc::into_inner(state.db) {
        db.close().await.expect("failed to close database");
    }
}
