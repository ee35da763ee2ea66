use crate::adapters::StorageGateway;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("message-board-server");
        Self {
            status: meter
                .i64_gauge("board_health_status")
                .with_description("Status of health checks (1 for connected, 0 for disconnected)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn StorageGateway>,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn StorageGateway>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Reports whether the storage connection is established. Never queries the store.
    #[must_use]
    pub fn database_connected(&self) -> bool {
        let connected = self.store.is_connected();
        self.metrics.status.record(i64::from(connected), &[KeyValue::new("component", "database")]);
        connected
    }
}
