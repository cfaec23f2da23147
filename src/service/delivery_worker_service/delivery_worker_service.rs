use super::{delivery_worker::DeliveryWorker, DeliveryWorkerConfig, WorkerEvent};
use crate::platform::{NotificationDisplay, WindowClients};
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};

const EVENTS_CHANNEL_SIZE: usize = 32;

///
/// Owns the background delivery worker task. The worker takes over
/// immediately on creation (no waiting phase) and runs until the event
/// queue is closed.
///
pub struct DeliveryWorkerService {
    events_tx: mpsc::Sender<WorkerEvent>,
    handle: JoinHandle<()>,
}

impl DeliveryWorkerService {
    pub fn new(
        config: DeliveryWorkerConfig,
        display: Arc<dyn NotificationDisplay>,
        windows: Arc<dyn WindowClients>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENTS_CHANNEL_SIZE);

        let worker = DeliveryWorker::new(Arc::new(config), display, windows, events_rx);
        let handle = tokio::spawn(worker.run());

        Self { events_tx, handle }
    }

    /// Queue used by the platform to hand events to the worker.
    pub fn sender(&self) -> mpsc::Sender<WorkerEvent> {
        self.events_tx.clone()
    }

    /// Closes the event queue and waits for the worker to finish.
    pub async fn close(self) {
        let Self { events_tx, handle } = self;
        drop(events_tx);

        if let Err(err) = handle.await {
            tracing::warn!(%err, "delivery worker task failed");
        }
    }
}
