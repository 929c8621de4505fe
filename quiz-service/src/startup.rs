//! Application startup and lifecycle management.

use crate::config::QuizConfig;
use crate::handlers::{health, metrics, not_found, quiz};
use crate::services::metrics::init_metrics;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::QuizGenerator;
use axum::{
    http::{header, HeaderName, Method, Request},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub generator: QuizGenerator,
}

impl AppState {
    pub fn new(generator: QuizGenerator) -> Self {
        Self { generator }
    }

    /// Wire the Gemini client and generator from configuration.
    pub fn from_config(config: &QuizConfig) -> Self {
        let gemini_config = GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: config.gemini.timeout_secs.map(Duration::from_secs),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(gemini_config));

        let generator = QuizGenerator::new(text_provider)
            .with_params(GenerationParams {
                temperature: config.gemini.temperature,
                max_tokens: None,
            })
            .with_output_validation(config.quiz.validate_output);

        if generator.is_configured() {
            tracing::info!(
                model = %config.gemini.model,
                "Initialized Gemini text provider"
            );
        }

        Self::new(generator)
    }
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    init_metrics();

    Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/generate-quiz", post(quiz::generate_quiz))
        .route("/metrics", get(metrics::metrics_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
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
        .layer(from_fn(security_headers_middleware))
        // Any origin may call the API
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    HeaderName::from_static(REQUEST_ID_HEADER),
                ]),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// A missing Gemini key does not fail startup; quiz requests answer 500
    /// until the service is restarted with one.
    pub async fn build(config: QuizConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config);
        let router = build_router(state);

        // Port 0 = random port for testing
        let addr = (config.common.host.as_str(), config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(
                "Failed to bind HTTP listener to {}:{}: {}",
                config.common.host,
                config.common.port,
                e
            );
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Quiz service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiSettings, QuizSettings};
    use secrecy::Secret;
    use service_core::config::Config as CoreConfig;

    fn config(api_key: Option<&str>) -> QuizConfig {
        QuizConfig {
            common: CoreConfig::default(),
            gemini: GeminiSettings {
                api_key: api_key.map(|k| Secret::new(k.to_string())),
                model: "gemini-1.5-flash".to_string(),
                api_base: "http://127.0.0.1:1/v1beta".to_string(),
                timeout_secs: None,
                temperature: None,
            },
            quiz: QuizSettings::default(),
        }
    }

    #[test]
    fn missing_key_leaves_generator_unconfigured() {
        let state = AppState::from_config(&config(None));
        assert!(!state.generator.is_configured());
    }

    #[test]
    fn api_key_configures_generator() {
        let state = AppState::from_config(&config(Some("test-api-key")));
        assert!(state.generator.is_configured());
    }
}
