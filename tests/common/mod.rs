use async_trait::async_trait;
use futures::{stream, StreamExt};
use padel_notifier_client::{
    platform::{
        CredentialProvider, DisplayRequest, NotificationDisplay, NotificationPermissions,
        PermissionState, WindowClients,
    },
    service::live_channel_service::{EventStream, EventStreamTransport},
    Error,
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::sleep;
use uuid::Uuid;

pub struct FakeCredentials {
    token: Mutex<Option<String>>,
}

impl FakeCredentials {
    pub fn new(token: &str) -> Arc<Self> {
        Arc::new(Self {
            token: Mutex::new(Some(token.to_string())),
        })
    }
}

impl CredentialProvider for FakeCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }
}

pub struct FakePermissions {
    state: PermissionState,
}

impl FakePermissions {
    pub fn new(state: PermissionState) -> Arc<Self> {
        Arc::new(Self { state })
    }
}

#[async_trait]
impl NotificationPermissions for FakePermissions {
    fn state(&self) -> PermissionState {
        self.state
    }

    async fn prompt(&self) -> PermissionState {
        self.state
    }
}

#[derive(Default)]
pub struct FakeDisplay {
    shown: Mutex<Vec<DisplayRequest>>,
    closed: Mutex<Vec<String>>,
}

impl FakeDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shown_tags(&self) -> Vec<String> {
        self.shown
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.tag.clone())
            .collect()
    }

    pub fn closed_tags(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationDisplay for FakeDisplay {
    async fn show(&self, request: DisplayRequest) {
        self.shown.lock().unwrap().push(request);
    }

    async fn close(&self, tag: &str) {
        self.closed.lock().unwrap().push(tag.to_string());
    }
}

pub struct FakeWindows;

impl FakeWindows {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl WindowClients for FakeWindows {
    async fn has_app_window(&self) -> bool {
        true
    }

    async fn navigate_and_focus(&self, _route: &str) {}

    async fn open_window(&self, _url: &str) {}
}

///
/// Transport yielding one scripted frame list per [open] call. By
/// default every stream stays open after its frames so the channel does
/// not reconnect; with closing streams each scripted stream ends after
/// its frames, and only an exhausted script stays open.
///
pub struct ScriptedTransport {
    scripts: Mutex<VecDeque<Vec<String>>>,
    closing: bool,
}

impl ScriptedTransport {
    pub fn new(scripts: Vec<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            closing: false,
        })
    }

    pub fn new_with_closing_streams(scripts: Vec<Vec<String>>) -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(scripts.into()),
            closing: true,
        })
    }
}

#[async_trait]
impl EventStreamTransport for ScriptedTransport {
    async fn open(&self, _url: &str) -> Result<EventStream, Error> {
        let script = self.scripts.lock().unwrap().pop_front();

        let stays_open = !self.closing || script.is_none();
        let frames = stream::iter(script.unwrap_or_default().into_iter().map(Ok::<_, Error>));

        let stream: EventStream = match stays_open {
            true => Box::pin(frames.chain(stream::pending())),
            false => Box::pin(frames),
        };
        Ok(stream)
    }
}

/// Transport whose connection attempts always fail.
pub struct UnreachableTransport;

impl UnreachableTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl EventStreamTransport for UnreachableTransport {
    async fn open(&self, _url: &str) -> Result<EventStream, Error> {
        Err(Error::Transport("connection refused".to_string()))
    }
}

pub fn notification_frame(id: &str, title: &str, route: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "message": "Din kamp er opdateret",
        "type": "info",
        "route": route,
        "timestamp": "2026-08-28T18:30:00Z",
    })
    .to_string()
}

pub fn create_test_directory() -> PathBuf {
    std::env::temp_dir().join(format!("test_pipeline_{}", Uuid::new_v4()))
}

pub async fn destroy_test_directory(directory: PathBuf) {
    let _ = tokio::fs::remove_dir_all(directory).await;
}

/// Polls until the condition holds, failing the test after one second.
pub async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within one second");
}
