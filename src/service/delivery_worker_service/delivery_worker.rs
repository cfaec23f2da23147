use super::{DeliveryWorkerConfig, WorkerEvent};
use crate::{
    dto::input::PushPayload,
    error::Error,
    navigation::{self, NavigationTarget},
    platform::{DisplayRequest, NotificationAction, NotificationDisplay, WindowClients},
};
use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};
use tokio::sync::mpsc;
use uuid::Uuid;

const DEFAULT_TITLE: &str = "Padelklubben";
const DEFAULT_CATEGORY: &str = "general";
const VIBRATION_PATTERN: [u32; 3] = [200, 100, 200];
const DISPLAYED_CAP: usize = 64;

/// Click routing data kept per displayed notification, keyed by tag.
struct DisplayedNotification {
    route: Option<String>,
    link: Option<String>,
}

pub(super) struct DeliveryWorker {
    config: Arc<DeliveryWorkerConfig>,
    display: Arc<dyn NotificationDisplay>,
    windows: Arc<dyn WindowClients>,

    events_rx: mpsc::Receiver<WorkerEvent>,
    displayed: HashMap<String, DisplayedNotification>,
    display_order: VecDeque<String>,
}

impl DeliveryWorker {
    pub(super) fn new(
        config: Arc<DeliveryWorkerConfig>,
        display: Arc<dyn NotificationDisplay>,
        windows: Arc<dyn WindowClients>,
        events_rx: mpsc::Receiver<WorkerEvent>,
    ) -> Self {
        Self {
            config,
            display,
            windows,
            events_rx,
            displayed: HashMap::new(),
            display_order: VecDeque::new(),
        }
    }

    #[tracing::instrument(name = "Delivery Worker", skip_all)]
    pub(super) async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            match event {
                WorkerEvent::Push(payload) => match self.process_push(&payload).await {
                    Ok(()) => (),
                    // a malformed push must not crash the worker
                    Err(err) => tracing::warn!(%err, "dropping push event"),
                },
                WorkerEvent::Click { tag, action } => self.process_click(tag, action).await,
                WorkerEvent::Closed { tag } => {
                    tracing::debug!(tag, "notification dismissed");
                    self.forget_displayed(&tag);
                }
            }
        }

        tracing::info!("event queue closed, worker stopping");
    }

    async fn process_push(&mut self, payload: &[u8]) -> Result<(), Error> {
        let payload: PushPayload = serde_json::from_slice(payload)?;

        let tag = payload
            .notification_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        tracing::info!(tag, "displaying notification");

        self.remember_displayed(
            tag.clone(),
            DisplayedNotification {
                route: payload.route,
                link: payload.link,
            },
        );

        let request = DisplayRequest {
            tag,
            title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: payload.message.unwrap_or_default(),
            icon: self.config.icon.clone(),
            badge: self.config.badge.clone(),
            category: payload
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            require_interaction: true,
            vibration: VIBRATION_PATTERN.to_vec(),
            actions: vec![NotificationAction::Open, NotificationAction::Close],
            on_click: None,
        };
        self.display.show(request).await;

        Ok(())
    }

    async fn process_click(&mut self, tag: String, action: Option<NotificationAction>) {
        tracing::info!(tag, action = ?action, "processing click");
        self.display.close(&tag).await;

        let displayed = self.forget_displayed(&tag);

        if action == Some(NotificationAction::Close) {
            return;
        }

        // missing routing data still navigates, to the app root
        let (route, link) = displayed
            .map(|displayed| (displayed.route, displayed.link))
            .unwrap_or_default();

        let target = navigation::resolve_click(
            &self.config.origin,
            route.as_deref(),
            link.as_deref(),
            self.windows.has_app_window().await,
        );
        match target {
            NavigationTarget::FocusExisting { route } => {
                self.windows.navigate_and_focus(&route).await
            }
            NavigationTarget::OpenWindow { url } => self.windows.open_window(&url).await,
        }
    }

    ///
    /// Keeps routing data for at most [DISPLAYED_CAP] notifications.
    /// Ones the user never clicks or dismisses are evicted oldest-first,
    /// so the map cannot grow for the worker's whole lifetime; a click
    /// on an evicted tag falls back to the app root.
    ///
    fn remember_displayed(&mut self, tag: String, displayed: DisplayedNotification) {
        if self.displayed.insert(tag.clone(), displayed).is_some() {
            self.display_order.retain(|known| known != &tag);
        }
        self.display_order.push_back(tag);

        while self.displayed.len() > DISPLAYED_CAP {
            let Some(evicted) = self.display_order.pop_front() else {
                break;
            };
            self.displayed.remove(&evicted);
        }
    }

    fn forget_displayed(&mut self, tag: &str) -> Option<DisplayedNotification> {
        let displayed = self.displayed.remove(tag);
        if displayed.is_some() {
            self.display_order.retain(|known| known != tag);
        }
        displayed
    }
}
