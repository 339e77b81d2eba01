//! Catalog API
//!
//! Movie catalog and favorites HTTP service.
//!
//! ## Endpoints
//!
//! - `POST /login` - verify credentials, issue a bearer token
//! - `POST /users` - self-registration
//! - `GET /movies`, `GET /movies/{Title}` - catalog reads (expanded)
//! - `GET /genres`, `/directors`, `/actors` (+ `/{Name}` lookups)
//! - `GET/PUT/DELETE /users/{Username}` - profile and deregistration
//! - `POST/DELETE /users/{Username}/movies/{MovieID}` - favorites
//! - `GET /health`, `GET /ready` - probes

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;

use axum::routing::{delete, get, post, put};
use axum::Router;
use reel_db::pg::Repositories;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready, welcome};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("catalog_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting catalog API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Configuration loaded");

    // Create database pool and apply migrations
    let pool = reel_db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database pool created");

    // Create repositories and application state
    let repos = Repositories::new(pool.clone());
    let state = AppState::new(repos, pool, config.clone());

    // Build and run the HTTP server
    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    let api = Router::new()
        // Public routes
        .route("/", get(welcome))
        .route("/login", post(handlers::login))
        .route("/users", post(handlers::register))
        // Catalog (authenticated reads)
        .route("/movies", get(handlers::list_movies))
        .route("/movies/{Title}", get(handlers::get_movie))
        .route("/genres", get(handlers::list_genres))
        .route("/genres/{Name}", get(handlers::get_genre))
        .route("/directors", get(handlers::list_directors))
        .route("/directors/{Name}", get(handlers::get_director))
        .route("/actors", get(handlers::list_actors))
        .route("/actors/{Name}", get(handlers::get_actor))
        // User-scoped operations
        .route("/users/{Username}", get(handlers::get_user))
        .route("/users/{Username}", put(handlers::update_user))
        .route("/users/{Username}", delete(handlers::delete_user))
        .route(
            "/users/{Username}/movies/{MovieID}",
            post(handlers::add_favorite),
        )
        .route(
            "/users/{Username}/movies/{MovieID}",
            delete(handlers::remove_favorite),
        );

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    api.layer(middleware)
        .merge(health_routes)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
