use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use user_directory_api::api;
use user_directory_api::api::handlers::users::SharedUserRepository;
use user_directory_api::config::Config;
use user_directory_api::domain::repositories::UserRepository;
use user_directory_api::infrastructure::repositories::InMemoryUserRepository;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let repo = if config.seed_users {
        match InMemoryUserRepository::seeded() {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!("Failed to seed users: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        InMemoryUserRepository::new()
    };

    if let Ok(count) = repo.len().await {
        tracing::info!("User directory ready with {} users", count);
    }

    let repo: SharedUserRepository = Arc::new(repo);
    let app = api::router(repo);

    // Start server
    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server failed: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
