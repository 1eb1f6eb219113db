pub mod config;
pub mod rest;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use anyhow::Result;

use config::DaemonConfig;
use storage::Storage;
use tasks::{TaskService, TaskStorage};

/// Shared application state passed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    pub storage: Arc<Storage>,
    pub tasks: TaskService,
    pub started_at: std::time::Instant,
}

impl AppContext {
    /// Open the database under the configured data dir and wire the task
    /// service to it.
    pub async fn new(config: Arc<DaemonConfig>) -> Result<Self> {
        let storage = Arc::new(
            Storage::new_with_slow_query(
                &config.data_dir,
                config.observability.slow_query_threshold_ms,
            )
            .await?,
        );
        let tasks = TaskService::new(TaskStorage::new(storage.pool()));
        Ok(Self {
            config,
            storage,
            tasks,
            started_at: std::time::Instant::now(),
        })
    }
}
