pub mod config;
pub mod http;
pub mod infrastructure;
pub mod modules;
mod schema;
pub mod shared;

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task;
use tokio_util::sync::CancellationToken;

use config::{AppConfig, StorageBackend};
use http::{AppState, CorsConfig};
use infrastructure::local::LocalStore;
use modules::entry::{EntryRepository, EntryRepositoryImpl, EntryService};
use modules::list::{ListRepository, ListRepositoryImpl, ListService};
use shared::errors::{AppError, AppResult};
use shared::utils::logger::TimedOperation;
use shared::Database;

/// Wire both services over the given storage ports
pub fn build_services(
    list_repo: Arc<dyn ListRepository>,
    entry_repo: Arc<dyn EntryRepository>,
) -> (Arc<ListService>, Arc<EntryService>) {
    let entry_service = Arc::new(EntryService::new(Arc::clone(&entry_repo)));
    let list_service = Arc::new(ListService::new(
        list_repo,
        entry_repo,
        Arc::clone(&entry_service),
    ));
    (list_service, entry_service)
}

/// Application state over an already opened local store
pub fn local_state(store: Arc<LocalStore>, cors_origins: Vec<String>) -> AppState {
    let list_repo: Arc<dyn ListRepository> = store.clone();
    let entry_repo: Arc<dyn EntryRepository> = store;
    let (list_service, entry_service) = build_services(list_repo, entry_repo);

    AppState {
        list_service,
        entry_service,
        backend: StorageBackend::Local,
        cors: Arc::new(CorsConfig::new(cors_origins)),
    }
}

/// Connect the configured backend and build the application state.
///
/// For PostgreSQL this also runs pending migrations.
pub async fn build_state(config: &AppConfig) -> AppResult<AppState> {
    match config.storage {
        StorageBackend::Local => {
            let store = Arc::new(LocalStore::open(&config.local_store_path).await);
            Ok(local_state(store, config.cors_origins.clone()))
        }
        StorageBackend::Postgres => {
            let url = config.database_url.clone().ok_or_else(|| {
                AppError::InvalidInput("DATABASE_URL is not set".to_string())
            })?;

            // Pool setup and migrations are blocking
            let database = task::spawn_blocking(move || -> AppResult<Database> {
                let timer = TimedOperation::new("database_startup");
                let database = Database::connect(&url)?;
                database.run_migrations()?;
                timer.finish();
                Ok(database)
            })
            .await??;
            let database = Arc::new(database);

            let list_repo: Arc<dyn ListRepository> =
                Arc::new(ListRepositoryImpl::new(Arc::clone(&database)));
            let entry_repo: Arc<dyn EntryRepository> =
                Arc::new(EntryRepositoryImpl::new(Arc::clone(&database)));
            let (list_service, entry_service) = build_services(list_repo, entry_repo);

            Ok(AppState {
                list_service,
                entry_service,
                backend: StorageBackend::Postgres,
                cors: Arc::new(CorsConfig::new(config.cors_origins.clone())),
            })
        }
    }
}

/// Serve `app` until `shutdown` is cancelled, then drain in-flight requests.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
