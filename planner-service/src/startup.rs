//! Application startup and lifecycle management.

use crate::config::PlannerConfig;
use crate::handlers::{
    app::index,
    health::{health_check, readiness_check},
    metrics::metrics,
    plan::create_plan,
    policy::check_policy,
};
use crate::services::{
    AttractionSource, GroqProvider, ItineraryPlanner, NoContext, TextProvider,
    WikipediaAttractions,
};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics_middleware, request_id_middleware, security_headers_middleware, REQUEST_ID_HEADER,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub planner: ItineraryPlanner,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextProvider>, context: Arc<dyn AttractionSource>) -> Self {
        Self {
            planner: ItineraryPlanner::new(provider, context),
        }
    }

    /// Wire the real collaborators from configuration.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, AppError> {
        let provider = GroqProvider::new(config.model.clone())
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;
        tracing::info!(
            model = %config.model.model,
            api_base = %config.model.api_base,
            "Initialized Groq text provider"
        );

        let context: Arc<dyn AttractionSource> = if config.context.enabled {
            let source = WikipediaAttractions::new(config.context.clone())
                .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;
            tracing::info!(
                endpoint = %config.context.api_url,
                limit = config.context.result_limit,
                "Destination context lookup enabled"
            );
            Arc::new(source)
        } else {
            tracing::info!("Destination context lookup disabled");
            Arc::new(NoContext)
        };

        Ok(Self::new(Arc::new(provider), context))
    }
}

pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route("/api/plan", post(create_plan))
        .route("/api/policy/check", post(check_policy))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PlannerConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::build_with_state(&config, state).await
    }

    /// Build around an already-wired state (used to inject test doubles).
    pub async fn build_with_state(config: &PlannerConfig, state: AppState) -> Result<Self, AppError> {
        let router = build_router(state, &config.static_dir);

        // Port 0 = random port for testing
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Planner service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
