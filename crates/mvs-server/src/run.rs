use axum::http::StatusCode;
use axum::{Router, response::IntoResponse, routing::get};
use futures::FutureExt;
use mvs_app::state::AppState;
use mvs_dal::movie::{Movie, MovieRepository};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::cors::cors_layer;
use crate::error::Result;

const BUNDLED_MOVIES: &str = include_str!("../data/movies.json");

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state()?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let mut app = main_router(state);

    if !args.no_cors {
        app = app.layer(cors_layer(args.allowed_origins.clone()));
    }

    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    debug!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

fn main_router(state: AppState) -> Router<()> {
    Router::new()
        .nest("/movies", mvs_app::rest_api::movie::router())
        .with_state(state)
        .route("/health", get(health))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Builds application state seeded with the bundled dataset.
///
/// The dataset is compiled into the binary and parsed once here; it is
/// never written back, so state resets on restart.
pub fn build_state() -> Result<AppState> {
    let movies: Vec<Movie> = serde_json::from_str(BUNDLED_MOVIES)?;
    info!("Loaded {} bundled movies", movies.len());

    Ok(AppState::new(MovieRepository::with_movies(movies)))
}
