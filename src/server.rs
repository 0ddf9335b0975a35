//! Reusable gateway server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! metrics recorder, backend client, services, REST API and graceful shutdown.
//! The CLI binary and the integration tests both start the gateway through it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{create_api_router, ApiState};
use crate::application::{SearchService, SuggestionService};
use crate::config::{AppConfig, ConfigError, LogFormat};
use crate::domain::BackendError;
use crate::infrastructure::{HttpSearchBackend, InMemoryQueryStore, SearchBackend};
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create backend client: {0}")]
    Backend(#[from] BackendError),

    #[error("Failed to install Prometheus recorder: {0}")]
    Metrics(String),
}

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the gateway.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Install the process-wide Prometheus recorder (default: true).
    ///
    /// Without it `/metrics` still answers, but nothing is recorded.
    pub install_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            install_metrics: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running gateway.
///
/// # Examples
///
/// ```rust,no_run
/// use lumos_gateway::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,

    local_addr: SocketAddr,
    shutdown: ShutdownSignal,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the gateway with the given options.
    ///
    /// This will:
    /// 1. Validate the configuration
    /// 2. Install (or reuse) the Prometheus metrics recorder
    /// 3. Build the backend client, services and session store
    /// 4. Bind the listener and serve the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let config = opts.config;
        config.validate()?;

        info!("Starting Lumos gateway...");

        let metrics = if opts.install_metrics {
            prometheus_handle()?
        } else {
            PrometheusBuilder::new().build_recorder().handle()
        };

        let state = build_state(&config, metrics)?;
        let router = create_api_router(state);

        let addr = config.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownSignal::new();
        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Address the listener is actually bound to (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        self.shutdown.wait().await;
        info!("Waiting for in-flight requests to complete...");

        let grace = Duration::from_secs(self.config.server.shutdown_timeout);
        let mut api_task = self.api_task;
        match tokio::time::timeout(grace, &mut api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => {
                warn!(timeout_secs = grace.as_secs(), "Shutdown timed out, aborting server task");
                api_task.abort();
            }
        }

        info!("Lumos gateway shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down Lumos gateway...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses the first handle.
fn prometheus_handle() -> Result<PrometheusHandle, ServerError> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Wire the backend client, services and session store into router state.
pub fn build_state(config: &AppConfig, metrics: PrometheusHandle) -> Result<ApiState, ServerError> {
    let backend: Arc<dyn SearchBackend> = Arc::new(HttpSearchBackend::new(&config.backend)?);
    info!(
        backend = %config.backend.base_url,
        timeout_secs = config.backend.timeout_secs,
        "Search backend configured"
    );

    let search = SearchService::new(
        backend.clone(),
        config.backend.results_per_page,
        config.pagination.max_visible_buttons,
    );
    let suggestions = SuggestionService::new(
        backend,
        config.suggestions.debounce(),
        config.backend.max_suggestions,
    );

    Ok(ApiState {
        search: Arc::new(search),
        suggestions: Arc::new(suggestions),
        sessions: Arc::new(InMemoryQueryStore::new()),
        metrics,
        started_at: Arc::new(Instant::now()),
    })
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level` when set. Call this once at process
/// startup (before [`ServerHandle::start`]); later calls are ignored.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if result.is_err() {
        warn!("Tracing subscriber already installed, keeping the existing one");
    }
}
