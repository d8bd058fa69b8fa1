use std::sync::Arc;

use image_processor::{ImageTransformService, Transformer};
use tokio_util::sync::CancellationToken;

use crate::config::ServiceConfig;
use crate::services::pool::WorkerPool;

/// A transform service usable from any worker thread.
pub type DynTransformService = Arc<dyn ImageTransformService + Send + Sync>;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Configuration resolved at startup
    config: ServiceConfig,
    /// The transform service every call is dispatched to
    service: DynTransformService,
    /// Admission control for transform calls
    pool: WorkerPool,
    /// Cancelled on shutdown
    shutdown_token: CancellationToken,
}

impl SharedState {
    /// Create shared state backed by the in-process [`Transformer`].
    ///
    /// Starts the worker pool, so this must run inside a tokio runtime.
    pub fn new(config: ServiceConfig) -> Self {
        let service = Arc::new(Transformer::new(config.thresholds()));
        Self::with_service(config, service)
    }

    /// Create shared state around any [`ImageTransformService`].
    pub fn with_service(config: ServiceConfig, service: DynTransformService) -> Self {
        let pool = WorkerPool::new(config.max_workers, config.queue_capacity);

        Self {
            inner: Arc::new(SharedStateInner {
                config,
                service,
                pool,
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner.config
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.port
    }

    pub fn service(&self) -> DynTransformService {
        self.inner.service.clone()
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.inner.pool
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }
}
