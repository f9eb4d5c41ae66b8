use std::sync::Arc;

use crate::config::EngineConfig;
use crate::matching::source::SnapshotSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineConfig,
    /// Read-only view of profiles, opportunities, resources and the skill catalog.
    /// Default: PgSnapshotSource.
    pub snapshots: Arc<dyn SnapshotSource>,
}
