use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::errors::ApiError;
use crate::api::handlers::{health, users};
use crate::api::handlers::users::SharedUserRepository;

/// Builds the application router around an injected user repository
pub fn router(repo: SharedUserRepository) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/get", get(users::get_users))
        .route("/getbyid/:id", get(users::get_user_by_id))
        .route("/create", post(users::create_user))
        .route("/update/:id", put(users::update_user))
        .route("/delete/:id", delete(users::delete_user));

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // User routes
        .nest("/users", user_routes)
        .fallback(route_not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(repo)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
