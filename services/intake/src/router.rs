use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use passystem_core::health::{healthz, readyz};
use passystem_core::middleware::request_id_layer;

use crate::handlers::{
    application::{list_applications, submit_application},
    user::{get_user, list_users, signup_user},
};
use crate::state::AppState;

async fn root() -> &'static str {
    "Hello World!"
}

pub fn build_router(state: AppState) -> Router {
    // The service is called from browser frontends on other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Greeting
        .route("/", get(root))
        // Users
        .route("/users", get(list_users))
        .route("/users", post(signup_user))
        .route("/users/{email}", get(get_user))
        // Applications
        .route("/applications", get(list_applications))
        .route("/applications", post(submit_application))
        // Submissions arrive fully buffered; size is not limited here.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
