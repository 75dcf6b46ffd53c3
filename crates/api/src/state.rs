use std::sync::Arc;

use nest_mailer::Notifier;
use nest_storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The object store and notifier are trait objects so tests can substitute
/// recording fakes.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: nest_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Hosted object store for uploaded project images.
    pub blobs: Arc<dyn ObjectStore>,
    /// Outbound email dispatcher.
    pub notifier: Arc<dyn Notifier>,
}
