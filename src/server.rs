//! Server runtime for the reservation back office.
//!
//! [`ServerHandle`] owns the whole lifecycle: database init, migrations,
//! repositories, the booking service, the REST API, metrics and graceful
//! shutdown.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::ReservationService;
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, DatabaseConfig, EventBusNotifier, SeaOrmRepositoryProvider,
    TextDocumentGenerator,
};
use crate::interfaces::http::{create_api_router, ApiState};
use crate::notifications::{create_event_bus, SharedEventBus};
use crate::shared::errors::{AppError, InfraError};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── Metrics recorder ───────────────────────────────────────────────

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// The global recorder can be installed once per process; later starts
/// reuse it. `None` if another recorder already owns the slot.
fn prometheus_handle() -> Option<PrometheusHandle> {
    if let Some(handle) = PROM_HANDLE.get() {
        return Some(handle.clone());
    }
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            info!("📊 Prometheus metrics recorder installed");
            Some(PROM_HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
            None
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running back-office server.
///
/// ```rust,no_run
/// use hotel_backoffice::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub event_bus: SharedEventBus,
    pub repos: Arc<dyn RepositoryProvider>,
    pub service: Arc<ReservationService>,
    pub config: AppConfig,
    /// Port the REST API is bound to
    pub api_port: u16,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, wire services and start serving HTTP.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        info!("Starting hotel back office...");

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db_config = DatabaseConfig::from_url(app_cfg.database.connection_url());
        let db = init_database(&db_config).await.map_err(InfraError::from)?;
        if opts.auto_migrate {
            run_migrations(&db).await.map_err(InfraError::from)?;
        } else {
            info!("Skipping migrations");
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        let event_bus = create_event_bus();
        info!("🔔 Event bus initialized");

        let service = Arc::new(ReservationService::new(
            repos.clone(),
            Arc::new(TextDocumentGenerator::new(&app_cfg.documents)),
            Arc::new(EventBusNotifier::new(event_bus.clone())),
            app_cfg.booking.clone(),
        ));
        info!(
            rollback_partial_failures = app_cfg.booking.rollback_partial_failures,
            serialize_room_bookings = app_cfg.booking.serialize_room_bookings,
            "Booking policy loaded"
        );

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let router = create_api_router(
            ApiState {
                service: service.clone(),
                repos: repos.clone(),
                event_bus: event_bus.clone(),
                db: Some(db.clone()),
                started_at: Arc::new(Instant::now()),
            },
            prometheus,
        );

        let api_addr = app_cfg.api_address();
        let listener = tokio::net::TcpListener::bind(&api_addr)
            .await
            .map_err(InfraError::from)?;
        let api_port = listener.local_addr().map_err(InfraError::from)?.port();
        info!("REST API server listening on http://{}", api_addr);
        info!("Swagger UI available at http://{}/docs/", api_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started");

        Ok(Self {
            event_bus,
            repos,
            service,
            config: app_cfg,
            api_port,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install SIGINT/SIGTERM listeners that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until shutdown is triggered and in-flight requests drain, then
    /// close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        shutdown.signal().wait().await;

        let drained = shutdown
            .run_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            warn!("Some requests were still in flight at shutdown");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once, before
/// [`ServerHandle::start`]. Records emitted through the `log` facade are
/// forwarded into the same subscriber.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}
