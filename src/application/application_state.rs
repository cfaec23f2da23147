use super::ApplicationEnv;
use crate::{
    dto::input::Notification,
    platform::{
        CredentialProvider, NotificationDisplay, NotificationPermissions, PushRegistration,
        WindowClients,
    },
    repository::NotificationHistoryRepositoryImpl,
    service::{
        delivery_worker_service::{DeliveryWorkerConfig, DeliveryWorkerService, WorkerEvent},
        dispatch_service::{DispatchService, DispatchServiceImpl},
        live_channel_service::{
            LiveChannelService, LiveChannelServiceConfig, LiveChannelServiceImpl, SseTransport,
        },
        notification_store_service::{
            NotificationStoreService, NotificationStoreServiceConfig, NotificationStoreServiceImpl,
        },
        push_subscription_service::{
            PushApiClientImpl, PushSubscriptionService, PushSubscriptionServiceImpl,
        },
    },
};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};

const RECONNECT_BACKOFF_FLOOR: Duration = Duration::from_secs(1);
const RECONNECT_BACKOFF_CAP: Duration = Duration::from_secs(30);
const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const TRANSIENT_ALERT_LIFETIME: Duration = Duration::from_secs(5);

const ICON_PATH: &str = "/icons/icon-192.png";
const BADGE_PATH: &str = "/icons/badge-72.png";

///
/// Platform primitives the embedder supplies; everything else is wired
/// internally by [create_state].
///
pub struct PlatformSeams {
    pub credentials: Arc<dyn CredentialProvider>,
    pub permissions: Arc<dyn NotificationPermissions>,
    pub push_registration: Arc<dyn PushRegistration>,
    pub display: Arc<dyn NotificationDisplay>,
    pub windows: Arc<dyn WindowClients>,
}

#[derive(Clone)]
pub struct ApplicationState {
    pub live_channel: Arc<dyn LiveChannelService>,
    pub push_subscriptions: Arc<dyn PushSubscriptionService>,
    pub notification_store: Arc<dyn NotificationStoreService>,
    pub dispatch: Arc<dyn DispatchService>,
    /// Queue feeding the background delivery worker.
    pub delivery_events: mpsc::Sender<WorkerEvent>,
}

pub struct ApplicationStateToClose {
    pub delivery_worker: DeliveryWorkerService,
    pub store_forwarder: JoinHandle<()>,
}

pub fn create_state(
    env: &ApplicationEnv,
    seams: PlatformSeams,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    let client = reqwest::Client::builder().build()?;

    tracing::info!("creating repositories");
    let history_repository =
        NotificationHistoryRepositoryImpl::new(env.history_directory.clone());
    let history_repository = Arc::new(history_repository);

    tracing::info!("creating services");
    let config = NotificationStoreServiceConfig {
        origin: env.app_origin.clone(),
        icon: ICON_PATH.to_string(),
        badge: BADGE_PATH.to_string(),
        transient_alert_lifetime: TRANSIENT_ALERT_LIFETIME,
    };
    let notification_store = NotificationStoreServiceImpl::new(
        config,
        history_repository,
        Arc::clone(&seams.permissions),
        Arc::clone(&seams.display),
        Arc::clone(&seams.windows),
    );
    let notification_store = Arc::new(notification_store);

    let config = LiveChannelServiceConfig {
        stream_url: env.stream_url.clone(),
        backoff_floor: RECONNECT_BACKOFF_FLOOR,
        backoff_cap: RECONNECT_BACKOFF_CAP,
        max_reconnect_attempts: MAX_RECONNECT_ATTEMPTS,
    };
    let transport = Arc::new(SseTransport::new(client.clone()));
    let live_channel =
        LiveChannelServiceImpl::new(config, Arc::clone(&seams.credentials), transport);
    let live_channel = Arc::new(live_channel);

    let push_api = PushApiClientImpl::new(
        env.api_url.clone(),
        client.clone(),
        Arc::clone(&seams.credentials),
    );
    let push_subscriptions = PushSubscriptionServiceImpl::new(
        Arc::clone(&seams.permissions),
        Arc::clone(&seams.push_registration),
        Arc::new(push_api),
    );
    let push_subscriptions = Arc::new(push_subscriptions);

    let dispatch = DispatchServiceImpl::new(
        env.api_url.clone(),
        client,
        Arc::clone(&seams.credentials),
    );
    let dispatch = Arc::new(dispatch);

    let config = DeliveryWorkerConfig {
        origin: env.app_origin.clone(),
        icon: ICON_PATH.to_string(),
        badge: BADGE_PATH.to_string(),
    };
    let delivery_worker =
        DeliveryWorkerService::new(config, Arc::clone(&seams.display), Arc::clone(&seams.windows));
    let delivery_events = delivery_worker.sender();

    let store_forwarder = spawn_store_forwarder(
        live_channel.subscribe_notifications(),
        Arc::clone(&notification_store) as Arc<dyn NotificationStoreService>,
    );

    Ok((
        ApplicationState {
            live_channel,
            push_subscriptions,
            notification_store,
            dispatch,
            delivery_events,
        },
        ApplicationStateToClose {
            delivery_worker,
            store_forwarder,
        },
    ))
}

///
/// Bridges the live channel into the store: every event received while
/// the app is open lands in the per-user history. Double delivery
/// through the push path is made safe by the store's dedup by id.
///
pub fn spawn_store_forwarder(
    mut notifications_rx: broadcast::Receiver<Notification>,
    store: Arc<dyn NotificationStoreService>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match notifications_rx.recv().await {
                Ok(notification) => store.record(notification).await,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    tracing::warn!(count, "store forwarder lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
