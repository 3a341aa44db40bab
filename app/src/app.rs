use std::sync::Arc;

use qr_core::{QrEncoder, RenderPipeline};
use tokio::sync::{Mutex, MutexGuard};

use crate::config::AppConfig;

/// The single render session behind the page.
pub type Pipeline = RenderPipeline<QrEncoder>;

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    /// Held only for state transitions, never across the encode step.
    pipeline: Mutex<Pipeline>,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                pipeline: Mutex::new(RenderPipeline::new(QrEncoder)),
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub async fn pipeline(&self) -> MutexGuard<'_, Pipeline> {
        self.inner.pipeline.lock().await
    }
}
