use super::{
    ChannelState, ConnectionStatus, EventStream, EventStreamTransport, LiveChannelService,
    LiveChannelServiceConfig,
};
use crate::{dto::input::Notification, platform::CredentialProvider};
use async_trait::async_trait;
use futures::StreamExt;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

const NOTIFICATIONS_CHANNEL_SIZE: usize = 64;
const STATUS_CHANNEL_SIZE: usize = 16;

pub struct LiveChannelServiceImpl {
    inner: Arc<Inner>,
}

struct Inner {
    config: LiveChannelServiceConfig,
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn EventStreamTransport>,

    state: Mutex<ChannelState>,
    cancellation: Mutex<CancellationToken>,

    notifications_tx: broadcast::Sender<Notification>,
    status_tx: broadcast::Sender<ConnectionStatus>,
}

impl LiveChannelServiceImpl {
    pub fn new(
        config: LiveChannelServiceConfig,
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn EventStreamTransport>,
    ) -> Self {
        let (notifications_tx, _) = broadcast::channel(NOTIFICATIONS_CHANNEL_SIZE);
        let (status_tx, _) = broadcast::channel(STATUS_CHANNEL_SIZE);

        let inner = Inner {
            config,
            credentials,
            transport,
            state: Mutex::new(ChannelState::Disconnected),
            cancellation: Mutex::new(CancellationToken::new()),
            notifications_tx,
            status_tx,
        };

        Self {
            inner: Arc::new(inner),
        }
    }
}

#[async_trait]
impl LiveChannelService for LiveChannelServiceImpl {
    #[tracing::instrument(name = "Live Channel connect", skip_all)]
    async fn connect(&self) {
        let cancellation = CancellationToken::new();

        {
            let mut state = self.inner.state.lock().unwrap();
            match *state {
                ChannelState::Connecting
                | ChannelState::Connected
                | ChannelState::Reconnecting { .. } => {
                    tracing::debug!(state = ?*state, "connection already in progress");
                    return;
                }
                ChannelState::Disconnected | ChannelState::Abandoned => (),
            }

            if self.inner.credentials.bearer_token().is_none() {
                tracing::warn!("cannot connect: no credential");
                drop(state);
                self.inner.report(ConnectionStatus::Disconnected);
                return;
            }

            *state = ChannelState::Connecting;
            // installed under the state lock so a racing call cannot
            // replace the token of a live task
            *self.inner.cancellation.lock().unwrap() = cancellation.clone();
        }

        tracing::debug!("starting connection task");
        tokio::spawn(Inner::run(Arc::clone(&self.inner), cancellation));
    }

    #[tracing::instrument(name = "Live Channel disconnect", skip_all)]
    async fn disconnect(&self) {
        self.inner.cancellation.lock().unwrap().cancel();

        let was_active = {
            let mut state = self.inner.state.lock().unwrap();
            let was_active = !matches!(*state, ChannelState::Disconnected);
            *state = ChannelState::Disconnected;
            was_active
        };

        if was_active {
            tracing::info!("disconnected");
            self.inner.report(ConnectionStatus::Disconnected);
        }
    }

    fn is_connected(&self) -> bool {
        matches!(*self.inner.state.lock().unwrap(), ChannelState::Connected)
    }

    fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifications_tx.subscribe()
    }

    fn subscribe_status(&self) -> broadcast::Receiver<ConnectionStatus> {
        self.inner.status_tx.subscribe()
    }
}

impl Inner {
    #[tracing::instrument(name = "Live Channel", skip_all)]
    async fn run(self: Arc<Self>, cancellation: CancellationToken) {
        let mut attempt = 0;

        loop {
            let Some(credential) = self.credentials.bearer_token() else {
                tracing::warn!("credential no longer available, giving up");
                self.transition(ChannelState::Disconnected);
                self.report(ConnectionStatus::Disconnected);
                return;
            };
            let url = format!("{}?token={credential}", self.config.stream_url);

            match self.transport.open(&url).await {
                Ok(stream) => {
                    if !self.mark_connected(&cancellation) {
                        return;
                    }
                    attempt = 0;
                    self.report(ConnectionStatus::Connected);
                    tracing::info!("connected");

                    if let StreamEnd::Cancelled = self.read_stream(stream, &cancellation).await {
                        return;
                    }
                }
                Err(err) => tracing::warn!(%err, "failed to open stream"),
            }

            attempt += 1;
            match self.schedule_reconnect(&cancellation, attempt) {
                ReconnectDecision::Cancelled => return,
                ReconnectDecision::GiveUp => {
                    tracing::warn!(
                        attempts = self.config.max_reconnect_attempts,
                        "reconnect budget exhausted"
                    );
                    self.report(ConnectionStatus::Disconnected);
                    return;
                }
                ReconnectDecision::Retry => (),
            }
            self.report(ConnectionStatus::Disconnected);

            let delay = reconnect_delay(attempt, self.config.backoff_floor, self.config.backoff_cap);
            tracing::info!(attempt, ?delay, "scheduling reconnect");

            tokio::select! {
                _ = cancellation.cancelled() => return,
                _ = tokio::time::sleep(delay) => (),
            }
        }
    }

    async fn read_stream(&self, mut stream: EventStream, cancellation: &CancellationToken) -> StreamEnd {
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => return StreamEnd::Cancelled,
                frame = stream.next() => match frame {
                    Some(Ok(frame)) => self.process_frame(&frame),
                    Some(Err(err)) => {
                        tracing::warn!(%err, "stream error");
                        return StreamEnd::Lost;
                    }
                    None => {
                        tracing::info!("stream closed by server");
                        return StreamEnd::Lost;
                    }
                }
            }
        }
    }

    /// One malformed event drops that event, never the stream.
    fn process_frame(&self, frame: &str) {
        match serde_json::from_str::<Notification>(frame) {
            Ok(notification) => {
                tracing::debug!(id = notification.id, "received notification");
                let _ = self.notifications_tx.send(notification);
            }
            Err(err) => tracing::warn!(%err, "dropping malformed event"),
        }
    }

    /// Single-lock transition to [ChannelState::Connected]; refused when
    /// a disconnect raced the open call.
    fn mark_connected(&self, cancellation: &CancellationToken) -> bool {
        let mut state = self.state.lock().unwrap();
        if cancellation.is_cancelled() {
            return false;
        }
        *state = ChannelState::Connected;
        true
    }

    ///
    /// Decides what follows a failed attempt, in one state update. A
    /// concurrent `connect()` can therefore never observe an
    /// intermediate `Disconnected` while this task is still alive.
    ///
    fn schedule_reconnect(
        &self,
        cancellation: &CancellationToken,
        attempt: u32,
    ) -> ReconnectDecision {
        let mut state = self.state.lock().unwrap();
        if cancellation.is_cancelled() {
            return ReconnectDecision::Cancelled;
        }

        if attempt > self.config.max_reconnect_attempts {
            *state = ChannelState::Abandoned;
            return ReconnectDecision::GiveUp;
        }

        *state = ChannelState::Reconnecting { attempt };
        ReconnectDecision::Retry
    }

    fn transition(&self, next: ChannelState) {
        let mut state = self.state.lock().unwrap();
        tracing::trace!(from = ?*state, to = ?next, "state transition");
        *state = next;
    }

    fn report(&self, status: ConnectionStatus) {
        let _ = self.status_tx.send(status);
    }
}

enum StreamEnd {
    Cancelled,
    Lost,
}

enum ReconnectDecision {
    Retry,
    GiveUp,
    Cancelled,
}

/// Delay before reconnect attempt `attempt` (1-based): doubling from the
/// floor, capped.
fn reconnect_delay(attempt: u32, floor: Duration, cap: Duration) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    floor.saturating_mul(2u32.saturating_pow(exponent)).min(cap)
}
