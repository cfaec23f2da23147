use super::{NotificationStoreService, NotificationStoreServiceConfig, HISTORY_CAP};
use crate::{
    dto::input::Notification,
    navigation::{self, NavigationTarget},
    platform::{
        DisplayCallback, DisplayRequest, NotificationDisplay, NotificationPermissions,
        PermissionState, WindowClients,
    },
    repository::{NotificationHistoryRepository, StoredNotification},
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct NotificationStoreServiceImpl {
    config: NotificationStoreServiceConfig,
    repository: Arc<dyn NotificationHistoryRepository>,
    permissions: Arc<dyn NotificationPermissions>,
    display: Arc<dyn NotificationDisplay>,
    windows: Arc<dyn WindowClients>,

    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    username: Option<String>,
    entries: Vec<StoredNotification>,
}

impl NotificationStoreServiceImpl {
    pub fn new(
        config: NotificationStoreServiceConfig,
        repository: Arc<dyn NotificationHistoryRepository>,
        permissions: Arc<dyn NotificationPermissions>,
        display: Arc<dyn NotificationDisplay>,
        windows: Arc<dyn WindowClients>,
    ) -> Self {
        Self {
            config,
            repository,
            permissions,
            display,
            windows,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Overwrites the user's persisted record with the current list.
    async fn persist(&self, state: &StoreState) {
        let Some(username) = &state.username else {
            return;
        };

        if let Err(err) = self.repository.store(username, &state.entries).await {
            tracing::warn!(%err, "failed to persist notification history");
        }
    }

    ///
    /// Foreground counterpart of the background worker's notification:
    /// shown while the app is open, auto-dismissed after the configured
    /// lifetime, clicking it navigates with the window already open.
    ///
    async fn show_transient_alert(&self, notification: &Notification) {
        let on_click = self.create_click_callback(notification);

        let request = DisplayRequest {
            tag: notification.id.clone(),
            title: notification.title.clone(),
            body: notification.message.clone(),
            icon: self.config.icon.clone(),
            badge: self.config.badge.clone(),
            category: notification.kind.to_string(),
            require_interaction: false,
            vibration: Vec::new(),
            actions: Vec::new(),
            on_click: Some(on_click),
        };
        self.display.show(request).await;

        let display = Arc::clone(&self.display);
        let tag = notification.id.clone();
        let lifetime = self.config.transient_alert_lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            display.close(&tag).await;
        });
    }

    fn create_click_callback(&self, notification: &Notification) -> DisplayCallback {
        let windows = Arc::clone(&self.windows);
        let origin = self.config.origin.clone();
        let route = notification.route.clone();
        let link = notification.link.clone();

        Arc::new(move || {
            let windows = Arc::clone(&windows);
            let origin = origin.clone();
            let route = route.clone();
            let link = link.clone();

            Box::pin(async move {
                let target =
                    navigation::resolve_click(&origin, route.as_deref(), link.as_deref(), true);
                match target {
                    NavigationTarget::FocusExisting { route } => {
                        windows.navigate_and_focus(&route).await
                    }
                    NavigationTarget::OpenWindow { url } => windows.open_window(&url).await,
                }
            })
        })
    }
}

#[async_trait]
impl NotificationStoreService for NotificationStoreServiceImpl {
    #[tracing::instrument(name = "Notification store", skip_all, fields(username))]
    async fn set_user<'a>(&self, username: Option<&'a str>) {
        let entries = match username {
            Some(username) => match self.repository.load(username).await {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(%err, "failed to load notification history");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut state = self.state.lock().await;
        state.username = username.map(str::to_string);
        state.entries = entries;
        tracing::debug!(count = state.entries.len(), "switched user history");
    }

    #[tracing::instrument(name = "Notification store", skip_all, fields(id = notification.id))]
    async fn record(&self, notification: Notification) {
        {
            let mut state = self.state.lock().await;

            let duplicate = state
                .entries
                .iter()
                .any(|entry| entry.notification.id == notification.id);
            if duplicate {
                // first copy wins, even when the content differs
                tracing::trace!("duplicate notification dropped");
                return;
            }

            state.entries.insert(
                0,
                StoredNotification {
                    notification: notification.clone(),
                    read: false,
                },
            );
            state.entries.truncate(HISTORY_CAP);

            self.persist(&state).await;
        }

        if self.permissions.state() == PermissionState::Granted {
            self.show_transient_alert(&notification).await;
        }
    }

    async fn mark_as_read(&self, id: &str) {
        let mut state = self.state.lock().await;

        let Some(entry) = state
            .entries
            .iter_mut()
            .find(|entry| entry.notification.id == id)
        else {
            return;
        };
        entry.read = true;

        self.persist(&state).await;
    }

    async fn mark_all_as_read(&self) {
        let mut state = self.state.lock().await;

        for entry in &mut state.entries {
            entry.read = true;
        }

        self.persist(&state).await;
    }

    async fn remove(&self, id: &str) {
        let mut state = self.state.lock().await;

        state.entries.retain(|entry| entry.notification.id != id);

        self.persist(&state).await;
    }

    async fn clear(&self) {
        let mut state = self.state.lock().await;

        state.entries.clear();

        self.persist(&state).await;
    }

    async fn unread_count(&self) -> usize {
        let state = self.state.lock().await;
        state.entries.iter().filter(|entry| !entry.read).count()
    }

    async fn notifications(&self) -> Vec<StoredNotification> {
        let state = self.state.lock().await;
        state.entries.clone()
    }
}
